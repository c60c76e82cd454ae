use bandlog::writers::{FileLogWriter, LogWriter};
use bandlog::{DeferredNow, FileSpec, LogfileSelector, RotationPolicy};
use filetime::FileTime;
use log::Level;
use std::time::{Duration, SystemTime};

const MAX_AGE_DAYS: u32 = 30;

// Backups older than the policy's maximum age must be removed during the
// cleanup that runs with the first write, even when their number is below
// the backup cap.
#[test]
fn test_cleanup_by_age() {
    let dir = temp_dir::TempDir::new().unwrap();

    // two stale backups from "40 days ago", one fresh backup
    for (idx, age_days) in [(0_u32, 40_u64), (1, 40), (2, 1)] {
        let path = dir.path().join(format!("app_r0000{idx}.log"));
        std::fs::write(&path, b"old content\n").unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60);
        filetime::set_file_mtime(&path, FileTime::from_system_time(mtime)).unwrap();
    }

    let writer = FileLogWriter::builder(FileSpec::new(dir.path(), "app"))
        .rotate(
            RotationPolicy::default()
                .max_age_days(MAX_AGE_DAYS)
                .compress(false),
        )
        .cleanup_in_background_thread(false)
        .append()
        .build();

    writer
        .write(
            &mut DeferredNow::new(),
            &log::Record::builder()
                .level(Level::Info)
                .args(format_args!("first write triggers the cleanup"))
                .build(),
        )
        .unwrap();
    writer.flush().unwrap();

    let backups = writer
        .existing_log_files(&LogfileSelector::default())
        .unwrap();
    assert_eq!(backups.len(), 1, "stale backups must be gone: {backups:?}");
    assert!(backups[0].to_string_lossy().contains("_r00002"));

    // the active file is not subject to age pruning
    assert!(dir.path().join("app.log").exists());
}
