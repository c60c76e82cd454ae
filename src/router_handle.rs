use crate::{band_logger::Cores, Band, BandLogError};
use std::path::PathBuf;
use std::sync::Arc;

/// The explicit handle to a started router,
/// which **flushes and shuts down the sinks when it is dropped**.
///
/// A `RouterHandle` is returned from [`Router::start`](crate::Router::start)
/// and from [`Router::build`](crate::Router::build).
///
/// Keep it alive until the very end of your program, because it shuts down
/// the writers when it is dropped! This is relevant with a buffering
/// [`WriteMode`](crate::WriteMode) (unflushed lines would be lost), and with
/// rotation compression (a termination while a rotated file is being
/// compressed could leave unexpected files behind).
///
/// Note that the drop-time flush is best-effort: if the process is killed
/// rather than terminating normally, it does not run, and buffered log lines
/// may be lost.
///
/// ```rust
/// use bandlog::Router;
/// use std::error::Error;
/// fn main() -> Result<(), Box<dyn Error>> {
///     let _handle = Router::new("log_files").start()?;
///     // do work
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct RouterHandle {
    pub(crate) cores: Arc<Cores>,
}

impl RouterHandle {
    pub(crate) fn new(cores: Arc<Cores>) -> Self {
        Self { cores }
    }

    /// Flush all writers.
    pub fn flush(&self) {
        self.cores.flush();
    }

    /// Trigger an extra rotation of all three band files.
    ///
    /// # Errors
    ///
    /// `BandLogError::Poison` if a writer's mutex is poisoned, or IO errors.
    pub fn trigger_rotation(&self) -> Result<(), BandLogError> {
        self.cores.rotate()
    }

    /// Returns the list of existing log files of the given band, in the
    /// order of youngest to oldest.
    ///
    /// Depending on the given selector, the list may include the active
    /// file and the compressed backup files, if they exist.
    ///
    /// # Errors
    ///
    /// `BandLogError::Poison` if a writer's mutex is poisoned.
    pub fn existing_log_files(
        &self,
        band: Band,
        selector: &LogfileSelector,
    ) -> Result<Vec<PathBuf>, BandLogError> {
        self.cores.band_writers[band.index()].existing_log_files(selector)
    }

    /// Shutdown all writers: flush buffered lines and join helper threads.
    ///
    /// This method is called automatically when the handle is dropped; call
    /// it explicitly when you need the sinks to be quiesced at a specific
    /// point of your shutdown path.
    pub fn shutdown(&self) {
        self.cores.shutdown();
    }
}

impl Drop for RouterHandle {
    fn drop(&mut self) {
        self.cores.shutdown();
    }
}

/// Used in [`RouterHandle::existing_log_files`] and
/// [`FileLogWriter::existing_log_files`](crate::writers::FileLogWriter::existing_log_files).
///
/// Example:
///
/// ```rust
/// # use bandlog::{Band, LogfileSelector, Router};
/// # let handle = Router::new("log_files").start().unwrap();
/// let all_error_files = handle.existing_log_files(
///     Band::Error,
///     &LogfileSelector::default()
///         .with_current()
///         .with_compressed_files(),
/// );
/// ```
pub struct LogfileSelector {
    pub(crate) with_plain_files: bool,
    pub(crate) with_current: bool,
    pub(crate) with_compressed_files: bool,
}

impl Default for LogfileSelector {
    /// Selects the plain backup files without the active file.
    fn default() -> Self {
        Self {
            with_plain_files: true,
            with_current: false,
            with_compressed_files: false,
        }
    }
}

impl LogfileSelector {
    /// Selects no file at all.
    #[must_use]
    pub fn none() -> Self {
        Self {
            with_plain_files: false,
            with_current: false,
            with_compressed_files: false,
        }
    }

    /// Selects additionally the active output file.
    #[must_use]
    pub fn with_current(mut self) -> Self {
        self.with_current = true;
        self
    }

    /// Selects additionally the compressed backup files.
    #[must_use]
    pub fn with_compressed_files(mut self) -> Self {
        self.with_compressed_files = true;
        self
    }
}
