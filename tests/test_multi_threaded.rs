mod test_utils;

use bandlog::{
    Band, DeferredNow, LogfileSelector, RotationPolicy, Router, WriteMode,
    TS_DASHES_BLANK_COLONS_DOT_BLANK,
};
use log::*;
use std::thread::JoinHandle;

const NO_OF_THREADS: usize = 5;
const NO_OF_LOGLINES_PER_THREAD: usize = 2_000;
const ROTATE_OVER_SIZE: u64 = 60_000;

// we use a special log line format that starts with a special string so that
// it is easier to verify that all log lines are written correctly
#[test]
fn test_multi_threaded() {
    let dir = temp_dir::TempDir::new().unwrap();
    {
        let handle = Router::new(dir.path())
            .write_mode(WriteMode::BufferAndFlush)
            .format_for_files(test_format)
            .console_threshold(LevelFilter::Off)
            .backtrace_threshold(LevelFilter::Off)
            .rotation_policy(
                RotationPolicy::default()
                    .max_size(ROTATE_OVER_SIZE)
                    .max_backups(1_000)
                    .keep_any_age()
                    .compress(false),
            )
            .start()
            .unwrap_or_else(|e| panic!("logger initialization failed with {e}"));

        let worker_handles = start_worker_threads(NO_OF_THREADS);
        wait_for_workers_to_close(worker_handles);
        handle.shutdown();

        let warn_files = handle
            .existing_log_files(Band::Warn, &LogfileSelector::default().with_current())
            .unwrap();
        assert!(
            warn_files.len() > 1,
            "rotation should have produced several files, got {warn_files:?}"
        );

        // all lines are recoverable, none interleaved
        let mut line_count = 0;
        for file in &warn_files {
            for line in test_utils::read_lines(file) {
                assert!(
                    line.starts_with("XXXXX ["),
                    "irregular line in {file:?}: \"{line}\""
                );
                line_count += 1;
            }
        }
        assert_eq!(line_count, NO_OF_THREADS * NO_OF_LOGLINES_PER_THREAD);

        // nothing ended up in the other bands
        for band in [Band::Info, Band::Error] {
            for file in handle
                .existing_log_files(band, &LogfileSelector::default().with_current())
                .unwrap()
            {
                assert_eq!(test_utils::count_lines(&file), 0);
            }
        }
    }
}

fn start_worker_threads(no_of_workers: usize) -> Vec<JoinHandle<u8>> {
    let mut worker_handles: Vec<JoinHandle<u8>> = Vec::with_capacity(no_of_workers);
    for thread_number in 0..no_of_workers {
        worker_handles.push(
            std::thread::Builder::new()
                .name(thread_number.to_string())
                .spawn(move || {
                    do_work(thread_number);
                    0
                })
                .unwrap(),
        );
    }
    worker_handles
}

fn do_work(thread_number: usize) {
    for idx in 0..NO_OF_LOGLINES_PER_THREAD {
        warn!("({thread_number})  writing out line number {idx}");
    }
}

fn wait_for_workers_to_close(worker_handles: Vec<JoinHandle<u8>>) {
    for worker_handle in worker_handles {
        worker_handle
            .join()
            .unwrap_or_else(|e| panic!("joining worker thread failed: {e:?}"));
    }
}

pub fn test_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> std::io::Result<()> {
    write!(
        w,
        "XXXXX [{}] T[{:?}] {} [{}:{}] {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        std::thread::current().name().unwrap_or("<unnamed>"),
        record.level(),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        &record.args()
    )
}
