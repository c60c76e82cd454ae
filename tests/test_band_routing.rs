mod test_utils;

use bandlog::{Band, LogfileSelector, Router, WriteMode};
use log::*;
use std::path::PathBuf;

#[test]
fn test_band_routing() {
    let dir = temp_dir::TempDir::new().unwrap();

    let handle = Router::new(dir.path())
        .write_mode(WriteMode::SupportCapture)
        .start()
        .unwrap_or_else(|e| panic!("logger initialization failed with {e}"));

    info!("This is an info message");
    warn!("disk at 80%");
    error!("This is an error message");
    debug!("This is a debug message - you must not see it!");
    trace!("This is a trace message - you must not see it!");
    handle.flush();

    let info_file = single_active_file(&handle, Band::Info);
    let warn_file = single_active_file(&handle, Band::Warn);
    let error_file = single_active_file(&handle, Band::Error);

    // each record lands in its band's file, and only there
    assert!(test_utils::file_contains(&info_file, "This is an info message"));
    assert!(test_utils::file_contains(&warn_file, "disk at 80%"));
    assert!(test_utils::file_contains(&error_file, "This is an error message"));
    assert_eq!(test_utils::count_lines(&info_file), 1);
    assert_eq!(test_utils::count_lines(&warn_file), 1);
    assert_eq!(test_utils::count_lines(&error_file), 1);
    assert!(!test_utils::file_contains(&info_file, "disk at 80%"));
    assert!(!test_utils::file_contains(&info_file, "error message"));
    assert!(!test_utils::file_contains(&warn_file, "error message"));
    assert!(!test_utils::file_contains(&error_file, "disk at 80%"));

    // the warn line carries the level name and the message
    assert!(test_utils::file_contains(&warn_file, "WARN"));

    // error records carry a backtrace, others do not
    assert!(test_utils::file_contains(&error_file, "stacktrace: ["));
    assert!(!test_utils::file_contains(&warn_file, "stacktrace: ["));
    assert!(!test_utils::file_contains(&info_file, "stacktrace: ["));

    // directory layout: <base>/<tag>-<band>/<tag>-<band>.log
    for band in Band::ALL {
        let pattern = format!(
            "{}/*-{band}/*-{band}.log",
            dir.path().to_string_lossy()
        );
        assert_eq!(
            glob::glob(&pattern).unwrap().count(),
            1,
            "expected exactly one active file for band {band}"
        );
    }

    // both filename parts carry the same date tag
    let tag = bandlog::DateTag::now();
    assert!(warn_file
        .to_string_lossy()
        .ends_with(&format!("{tag}-warn/{tag}-warn.log")));
}

fn single_active_file(handle: &bandlog::RouterHandle, band: Band) -> PathBuf {
    let files = handle
        .existing_log_files(band, &LogfileSelector::none().with_current())
        .unwrap();
    assert_eq!(files.len(), 1);
    files.into_iter().next().unwrap()
}
