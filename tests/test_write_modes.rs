use bandlog::writers::{FileLogWriter, LogWriter};
use bandlog::{DeferredNow, FileSpec, WriteMode};
use log::Level;

// With a buffering write mode, log lines reach the file only on flush.
#[test]
fn test_buffer_dont_flush() {
    let dir = temp_dir::TempDir::new().unwrap();
    let writer = FileLogWriter::builder(FileSpec::new(dir.path(), "buffered"))
        .write_mode(WriteMode::BufferDontFlush)
        .build();

    write_record(&writer, "a buffered line");

    let path = dir.path().join("buffered.log");
    assert!(path.exists(), "the file is opened with the first write");
    assert_eq!(
        std::fs::metadata(&path).unwrap().len(),
        0,
        "nothing may reach the file before the flush"
    );

    writer.flush().unwrap();
    assert!(std::fs::read_to_string(&path)
        .unwrap()
        .contains("a buffered line"));
}

// Direct mode writes through immediately.
#[test]
fn test_direct() {
    let dir = temp_dir::TempDir::new().unwrap();
    let writer = FileLogWriter::builder(FileSpec::new(dir.path(), "direct")).build();

    write_record(&writer, "a direct line");
    assert!(std::fs::read_to_string(dir.path().join("direct.log"))
        .unwrap()
        .contains("a direct line"));
}

// Shutdown flushes buffered lines.
#[test]
fn test_shutdown_flushes() {
    let dir = temp_dir::TempDir::new().unwrap();
    let writer = FileLogWriter::builder(FileSpec::new(dir.path(), "shutdown"))
        .write_mode(WriteMode::BufferDontFlush)
        .build();

    write_record(&writer, "written before shutdown");
    writer.shutdown();
    assert!(std::fs::read_to_string(dir.path().join("shutdown.log"))
        .unwrap()
        .contains("written before shutdown"));
}

fn write_record(writer: &FileLogWriter, msg: &str) {
    writer
        .write(
            &mut DeferredNow::new(),
            &log::Record::builder()
                .level(Level::Info)
                .module_path(Some("test_write_modes"))
                .file(Some("test_write_modes.rs"))
                .line(Some(1))
                .args(format_args!("{msg}"))
                .build(),
        )
        .unwrap();
}
