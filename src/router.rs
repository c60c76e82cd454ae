use crate::{
    band_logger::{start_flusher, BandLogger, Cores},
    formats,
    writers::{ConsoleWriter, FileLogWriter},
    Band, BandLogError, DateTag, FileSpec, FormatFunction, RotationPolicy, RouterHandle,
    WriteMode,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The standard entry-point for using `bandlog`.
///
/// Create a `Router` with the base directory underneath which the dated,
/// per-band log directories shall live, adjust its configuration if needed,
/// and finally call [`start()`](Router::start):
///
/// ```rust
/// use bandlog::Router;
///
/// let _handle = Router::new("/var/log/app")
///     .start()
///     .unwrap_or_else(|e| panic!("logger initialization failed with {e}"));
/// ```
///
/// `start()` computes the date tag once, derives the three file targets
/// (`<dir>/<tag>-info/<tag>-info.log` etc.), and installs the multiplexed
/// logger as the backend of the [`log`] facade. The returned
/// [`RouterHandle`] should be kept alive until the very end of the program.
///
/// The base directory is not validated here: if it cannot be created or
/// written to, every attempted write reports its failure to `stderr`, but
/// neither `start()` nor any emit operation fails because of it.
///
/// `start()` can meaningfully be called only once per process; a second call
/// fails with [`BandLogError::Log`] because the `log` facade rejects a
/// second logger. Use [`build()`](Router::build) to obtain additional,
/// non-global logger instances, e.g. in tests.
pub struct Router {
    directory: PathBuf,
    console_threshold: log::LevelFilter,
    backtrace_threshold: log::LevelFilter,
    write_mode: WriteMode,
    format_for_files: FormatFunction,
    format_for_console: FormatFunction,
    default_policy: RotationPolicy,
    band_policies: [Option<RotationPolicy>; 3],
    append: bool,
    cleanup_in_background_thread: bool,
}

/// Simple methods for influencing the behavior of the `Router`.
impl Router {
    /// Creates a `Router` for the given base directory, with default
    /// configuration: rotation with [`RotationPolicy::default`] for all
    /// three bands, console output for Info and above, backtrace capture
    /// for Error records, direct (unbuffered) writing, and appending to
    /// files left over from an earlier run on the same day.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(directory: P) -> Self {
        Self {
            directory: directory.into(),
            console_threshold: log::LevelFilter::Info,
            backtrace_threshold: log::LevelFilter::Error,
            write_mode: WriteMode::Direct,
            format_for_files: formats::file_format,
            format_for_console: formats::console_format,
            default_policy: RotationPolicy::default(),
            band_policies: [None, None, None],
            append: true,
            cleanup_in_background_thread: true,
        }
    }

    /// Makes the console take records down to the given level.
    ///
    /// The default is `Info`. The band files are not affected: they never
    /// take records below Info. With `Off`, nothing is written to the
    /// console at all.
    #[must_use]
    pub fn console_threshold(mut self, threshold: log::LevelFilter) -> Self {
        self.console_threshold = threshold;
        self
    }

    /// Records at or above the given level carry a captured stack backtrace
    /// in their `stacktrace` field, on all sinks.
    ///
    /// The default is `Error`. Capturing is not cheap, so thresholds below
    /// `Error` are advisable only for debugging. With `Off`, no backtraces
    /// are captured.
    #[must_use]
    pub fn backtrace_threshold(mut self, threshold: log::LevelFilter) -> Self {
        self.backtrace_threshold = threshold;
        self
    }

    /// Sets the write mode for all sinks; default is [`WriteMode::Direct`].
    ///
    /// With one of the flushing modes, [`start()`](Router::start) also
    /// starts a background flusher thread.
    #[must_use]
    pub fn write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    /// Makes the band files use the provided format function,
    /// rather than [`file_format`](crate::file_format).
    #[must_use]
    pub fn format_for_files(mut self, format: FormatFunction) -> Self {
        self.format_for_files = format;
        self
    }

    /// Makes the console use the provided format function,
    /// rather than [`console_format`](crate::console_format).
    #[must_use]
    pub fn format_for_console(mut self, format: FormatFunction) -> Self {
        self.format_for_console = format;
        self
    }

    /// Applies the given rotation policy to all bands that have no explicit
    /// per-band policy.
    #[must_use]
    pub fn rotation_policy(mut self, policy: RotationPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    /// Applies the given rotation policy to one band only.
    #[must_use]
    pub fn rotation_policy_for(mut self, band: Band, policy: RotationPolicy) -> Self {
        self.band_policies[band.index()] = Some(policy);
        self
    }

    /// With false, existing active files are truncated at the first write,
    /// rather than being appended to (the default).
    #[must_use]
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Defines whether cleanup after a rotation (deleting and compressing
    /// backup files) runs on a background thread (the default) or in the
    /// log call that triggered the rotation.
    #[must_use]
    pub fn cleanup_in_background_thread(mut self, use_background_thread: bool) -> Self {
        self.cleanup_in_background_thread = use_background_thread;
        self
    }
}

/// Finish the configuration and get the logger going.
impl Router {
    /// Constructs the multiplexed logger without installing it.
    ///
    /// Computes today's date tag, derives the three file targets, and builds
    /// the four sinks. The returned boxed logger can be installed manually
    /// or driven directly (useful in tests and in programs that combine
    /// several logging backends); no global state is touched, and no flusher
    /// thread is started.
    #[must_use]
    pub fn build(self) -> (Box<dyn log::Log>, RouterHandle) {
        let tag = DateTag::now();
        let band_writers = Band::ALL.map(|band| {
            let mut builder = FileLogWriter::builder(band_file_spec(&self.directory, &tag, band))
                .format(self.format_for_files)
                .rotate(self.band_policies[band.index()].unwrap_or(self.default_policy))
                .write_mode(self.write_mode)
                .max_log_level(log::LevelFilter::Info)
                .cleanup_in_background_thread(self.cleanup_in_background_thread);
            if self.append {
                builder = builder.append();
            }
            builder.build()
        });
        let console = ConsoleWriter::new(
            self.format_for_console,
            self.console_threshold,
            self.write_mode,
        );

        let cores = Arc::new(Cores {
            band_writers,
            console,
        });
        let logger = BandLogger::new(
            Arc::clone(&cores),
            self.console_threshold,
            self.backtrace_threshold,
        );
        (Box::new(logger), RouterHandle::new(cores))
    }

    /// Constructs the multiplexed logger and installs it as the backend of
    /// the [`log`] facade, so that the `log` macros write through it for the
    /// remainder of the process lifetime.
    ///
    /// Keep the returned [`RouterHandle`] alive until the end of the
    /// program; it flushes the sinks when it is dropped.
    ///
    /// # Errors
    ///
    /// `BandLogError::Log` if a logger is already installed for this
    /// process.
    pub fn start(self) -> Result<RouterHandle, BandLogError> {
        let max_level = std::cmp::max(log::LevelFilter::Info, self.console_threshold);
        let flush_interval = self.write_mode.get_flush_interval();
        let (boxed_logger, handle) = self.build();

        log::set_boxed_logger(boxed_logger)?;
        log::set_max_level(max_level);

        if flush_interval != std::time::Duration::ZERO {
            start_flusher(Arc::clone(&handle.cores), flush_interval);
        }
        Ok(handle)
    }
}

// `{directory}/{tag}-{band}/{tag}-{band}.log`; a pure function of its
// inputs, so re-initialization with the same tag reuses the same targets.
pub(crate) fn band_file_spec(directory: &Path, tag: &DateTag, band: Band) -> FileSpec {
    let leaf = format!("{tag}-{band}");
    FileSpec::new(directory.join(&leaf), leaf)
}

#[cfg(test)]
mod test {
    use super::band_file_spec;
    use crate::{Band, DateTag};
    use chrono::TimeZone;
    use std::path::{Path, PathBuf};

    fn tag_for(y: i32, m: u32, d: u32) -> DateTag {
        DateTag::from_datetime(
            &chrono::Local
                .with_ymd_and_hms(y, m, d, 10, 0, 0)
                .single()
                .unwrap(),
        )
    }

    #[test]
    fn test_file_target_shape() {
        let spec = band_file_spec(Path::new("/var/log/app"), &tag_for(2024, 3, 15), Band::Warn);
        assert_eq!(
            spec.as_pathbuf(None),
            PathBuf::from("/var/log/app/2024-03-15-warn/2024-03-15-warn.log")
        );
    }

    #[test]
    fn test_idempotent_derivation() {
        let tag = tag_for(2024, 3, 15);
        for band in Band::ALL {
            let first = band_file_spec(Path::new("base"), &tag, band);
            let second = band_file_spec(Path::new("base"), &tag, band);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_new_tag_new_targets() {
        let today = tag_for(2024, 3, 15);
        let tomorrow = tag_for(2024, 3, 16);
        for band in Band::ALL {
            let path_today = band_file_spec(Path::new("base"), &today, band).as_pathbuf(None);
            let path_tomorrow =
                band_file_spec(Path::new("base"), &tomorrow, band).as_pathbuf(None);
            assert_ne!(path_today, path_tomorrow);
            assert!(path_tomorrow.to_string_lossy().contains("2024-03-16"));
        }
    }
}
