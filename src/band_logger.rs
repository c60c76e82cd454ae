use crate::{
    util::{eprint_err, ErrorCode},
    writers::{ConsoleWriter, FileLogWriter, LogWriter},
    Band, BandLogError, DeferredNow,
};
use log::Record;
use std::sync::Arc;

// The set of sinks behind the multiplexed entry point: one rotating file
// writer per severity band, plus the console.
//
// Shared between the installed `BandLogger` and the `RouterHandle`.
pub(crate) struct Cores {
    pub(crate) band_writers: [FileLogWriter; 3],
    pub(crate) console: ConsoleWriter,
}
impl Cores {
    pub(crate) fn flush(&self) {
        for writer in &self.band_writers {
            writer
                .flush()
                .unwrap_or_else(|e| eprint_err(ErrorCode::Flush, "flushing failed", &e));
        }
        self.console
            .flush()
            .unwrap_or_else(|e| eprint_err(ErrorCode::Flush, "flushing failed", &e));
    }

    pub(crate) fn shutdown(&self) {
        for writer in &self.band_writers {
            writer.shutdown();
        }
        self.console.shutdown();
    }

    // All writers are asked to rotate; only the first error is reported.
    pub(crate) fn rotate(&self) -> Result<(), BandLogError> {
        let mut result = Ok(());
        for writer in &self.band_writers {
            let result2 = writer.rotate();
            if result.is_ok() && result2.is_err() {
                result = result2;
            }
        }
        result
    }
}

// Does the logging in the background, is not used directly.
//
// Every record is offered to all four cores; the band writers persist it
// only if it falls into their severity range, the console if it passes the
// console threshold. None of the write paths lets an error escape into the
// instrumented code.
pub(crate) struct BandLogger {
    cores: Arc<Cores>,
    console_threshold: log::LevelFilter,
    backtrace_threshold: log::LevelFilter,
    max_level: log::LevelFilter,
}

impl BandLogger {
    pub(crate) fn new(
        cores: Arc<Cores>,
        console_threshold: log::LevelFilter,
        backtrace_threshold: log::LevelFilter,
    ) -> Self {
        Self {
            cores,
            console_threshold,
            backtrace_threshold,
            // the band files take nothing below Info, so only a lower
            // console threshold can widen the overall range
            max_level: std::cmp::max(log::LevelFilter::Info, console_threshold),
        }
    }

    fn dispatch(&self, now: &mut DeferredNow, record: &Record) {
        for band in Band::ALL {
            if band.contains(record.level()) {
                self.cores.band_writers[band.index()]
                    .write(now, record)
                    .unwrap_or_else(|e| {
                        eprint_err(ErrorCode::Write, "writing to band file failed", &e);
                    });
            }
        }
        if record.level() <= self.console_threshold {
            self.cores.console.write(now, record).unwrap_or_else(|e| {
                eprint_err(ErrorCode::Write, "writing to console failed", &e);
            });
        }
    }
}

impl log::Log for BandLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut now = DeferredNow::new();
        if self
            .backtrace_threshold
            .to_level()
            .is_some_and(|threshold| record.level() <= threshold)
        {
            let backtrace = single_line_backtrace();
            self.dispatch(
                &mut now,
                &Record::builder()
                    .metadata(record.metadata().clone())
                    .module_path(record.module_path())
                    .file(record.file())
                    .line(record.line())
                    .args(format_args!("{} stacktrace: [{backtrace}]", record.args()))
                    .build(),
            );
        } else {
            self.dispatch(&mut now, record);
        }
    }

    fn flush(&self) {
        self.cores.flush();
    }
}

// A captured backtrace, folded into a single line so that it cannot break
// the one-record-one-line property of the sinks.
fn single_line_backtrace() -> String {
    std::backtrace::Backtrace::force_capture()
        .to_string()
        .lines()
        .map(str::trim)
        .collect::<Vec<&str>>()
        .join(" | ")
}

const FLUSHER: &str = "bandlog-flusher";

// Regularly flushes all cores; used with the buffer-and-flush write modes.
// The thread runs until the process ends.
pub(crate) fn start_flusher(cores: Arc<Cores>, flush_interval: std::time::Duration) {
    let builder = std::thread::Builder::new().name(FLUSHER.to_string());
    #[cfg(not(feature = "dont_minimize_extra_stacks"))]
    let builder = builder.stack_size(128);
    builder
        .spawn(move || {
            let (_tx, rx) = std::sync::mpsc::channel::<()>();
            loop {
                rx.recv_timeout(flush_interval).ok();
                cores.flush();
            }
        })
        .unwrap(/* yes, let's panic if the thread can't be spawned */);
}
