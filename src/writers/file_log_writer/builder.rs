use super::{Config, FileLogWriter, State, UNIX_LINE_ENDING, WINDOWS_LINE_ENDING};
use crate::formats::file_format;
use crate::{FileSpec, FormatFunction, RotationPolicy, WriteMode};
use std::sync::Mutex;

/// Builder for [`FileLogWriter`].
#[allow(clippy::module_name_repetitions)]
pub struct FileLogWriterBuilder {
    config: Config,
    format: FormatFunction,
    o_rotation_policy: Option<RotationPolicy>,
    max_log_level: log::LevelFilter,
    cleanup_in_background_thread: bool,
}

/// Simple methods for influencing the behavior of the `FileLogWriter`.
impl FileLogWriterBuilder {
    pub(crate) fn new(file_spec: FileSpec) -> Self {
        Self {
            config: Config {
                file_spec,
                append: false,
                write_mode: WriteMode::Direct,
                line_ending: UNIX_LINE_ENDING,
            },
            format: file_format,
            o_rotation_policy: None,
            max_log_level: log::LevelFilter::Trace,
            cleanup_in_background_thread: true,
        }
    }

    /// Makes the `FileLogWriter` use the provided format function for the
    /// log entries, rather than [`file_format`](crate::file_format).
    pub fn format(mut self, format: FormatFunction) -> Self {
        self.format = format;
        self
    }

    /// Use rotation to prevent indefinite growth of the log file.
    ///
    /// By default, the log file is fixed while your program is running and
    /// will grow indefinitely. With rotation, when the active file exceeds
    /// the policy's maximum size, it is closed and renamed to a file with a
    /// numbered infix (like `_r00001`), and then logging continues to a
    /// fresh active file. The policy further defines how many backups are
    /// retained, for how long, and whether they are compressed.
    #[must_use]
    pub fn rotate(mut self, policy: RotationPolicy) -> Self {
        self.o_rotation_policy = Some(policy);
        self
    }

    /// Makes the writer append to the target file, if it exists; by default,
    /// the file would be truncated.
    #[must_use]
    pub fn append(mut self) -> Self {
        self.config.append = true;
        self
    }

    /// Defines if and how output is buffered; default is [`WriteMode::Direct`].
    ///
    /// Note that the flusher thread that some write modes ask for is not
    /// started by the writer itself; standalone users call
    /// [`LogWriter::flush`](crate::writers::LogWriter::flush) when needed.
    #[must_use]
    pub fn write_mode(mut self, write_mode: WriteMode) -> Self {
        self.config.write_mode = write_mode;
        self
    }

    /// Use Windows line endings, rather than just `\n`.
    #[must_use]
    pub fn use_windows_line_ending(mut self) -> Self {
        self.config.line_ending = WINDOWS_LINE_ENDING;
        self
    }

    /// Only records up to this level are to be written to this writer.
    #[must_use]
    pub fn max_log_level(mut self, level: log::LevelFilter) -> Self {
        self.max_log_level = level;
        self
    }

    /// Defines whether the cleanup activities (finding, deleting, evtl
    /// compressing files) are done in the current thread (in the log call
    /// that triggers a rotation), or on a background thread (the default,
    /// which minimizes the blocking impact on your application).
    #[must_use]
    pub fn cleanup_in_background_thread(mut self, use_background_thread: bool) -> Self {
        self.cleanup_in_background_thread = use_background_thread;
        self
    }

    /// Produces the `FileLogWriter`.
    ///
    /// No filesystem activity happens here; the target directory is created
    /// and the output file is opened on the first write.
    #[must_use]
    pub fn build(self) -> FileLogWriter {
        let line_ending = self.config.line_ending;
        FileLogWriter::new(
            self.format,
            line_ending,
            Mutex::new(State::new(
                self.config,
                self.o_rotation_policy,
                self.cleanup_in_background_thread,
            )),
            self.max_log_level,
        )
    }
}
