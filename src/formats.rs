use crate::DeferredNow;
use log::Record;

/// Function type for format functions.
///
/// If you want to write the log lines in your own format,
/// implement a function with this signature and provide it to one of the
/// format methods on [`Router`](crate::Router) or
/// [`FileLogWriterBuilder`](crate::writers::FileLogWriterBuilder).
pub type FormatFunction = fn(
    write: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error>;

/// Time stamp format used by [`file_format`].
pub const TS_DASHES_BLANK_COLONS_DOT_BLANK: &str = "%Y-%m-%d %H:%M:%S%.6f %:z";

/// Time stamp format used by [`console_format`].
pub const TS_CONSOLE: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// A logline-formatter for the file sinks, producing log lines like
/// <br>
/// ```[2024-03-15 15:25:01.640870 +01:00] WARN [my_prog::disk] src/disk.rs:26: disk at 80%```
/// <br>
/// i.e. with timestamp, level, module path, and file location.
///
/// # Errors
///
/// See `std::write`
pub fn file_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] {} [{}] {}:{}: {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

/// A logline-formatter for the console, producing log lines like
/// <br>
/// ```[2024-03-15 15:25:01.640] WARN [src/disk.rs:26] disk at 80%```
/// <br>
/// with the level name coloured if the `colors` feature is active.
///
/// # Errors
///
/// See `std::write`
pub fn console_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] {} [{}:{}] {}",
        now.format(TS_CONSOLE),
        styled_level(record.level()),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        record.args()
    )
}

#[cfg(feature = "colors")]
fn styled_level(level: log::Level) -> nu_ansi_term::AnsiString<'static> {
    use nu_ansi_term::{Color, Style};
    let style = match level {
        log::Level::Error => Color::Fixed(196).bold(),
        log::Level::Warn => Color::Fixed(208).bold(),
        log::Level::Info => Style::new(),
        log::Level::Debug => Style::from(Color::Fixed(7)),
        log::Level::Trace => Style::from(Color::Fixed(8)),
    };
    style.paint(level.to_string())
}

#[cfg(not(feature = "colors"))]
fn styled_level(level: log::Level) -> log::Level {
    level
}

#[cfg(test)]
mod test {
    use crate::DeferredNow;
    use log::Level::{Error, Warn};

    #[test]
    fn test_file_format_fields() {
        let mut buf = Vec::<u8>::new();
        super::file_format(
            &mut buf,
            &mut DeferredNow::new(),
            &log::Record::builder()
                .level(Warn)
                .module_path(Some("my_prog::disk"))
                .file(Some("src/disk.rs"))
                .line(Some(26))
                .args(format_args!("disk at 80%"))
                .build(),
        )
        .unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.contains("WARN"));
        assert!(line.contains("my_prog::disk"));
        assert!(line.contains("src/disk.rs:26"));
        assert!(line.contains("disk at 80%"));
    }

    #[test]
    fn test_console_format_fields() {
        let mut buf = Vec::<u8>::new();
        super::console_format(
            &mut buf,
            &mut DeferredNow::new(),
            &log::Record::builder()
                .level(Error)
                .file(Some("src/disk.rs"))
                .line(Some(31))
                .args(format_args!("write failed"))
                .build(),
        )
        .unwrap();
        let line = String::from_utf8(buf).unwrap();
        assert!(line.contains("ERROR"));
        assert!(line.contains("src/disk.rs:31"));
        assert!(line.contains("write failed"));
    }
}
