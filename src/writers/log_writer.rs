use crate::{BandLogError, DeferredNow};
use log::Record;
use std::io;

/// Writes to a single log output stream.
///
/// This is the seam between the router and its sinks; boxed instances of
/// `LogWriter` can also be used as standalone log targets.
pub trait LogWriter: Sync + Send {
    /// Writes out a log line.
    ///
    /// # Errors
    ///
    /// `std::io::Error` if writing fails. The router swallows (and reports
    /// to `stderr`) such errors; standalone users decide themselves.
    fn write(&self, now: &mut DeferredNow, record: &Record) -> io::Result<()>;

    /// Flushes any buffered records.
    ///
    /// # Errors
    ///
    /// `std::io::Error` if flushing fails.
    fn flush(&self) -> io::Result<()>;

    /// Provides the maximum log level that is to be written.
    fn max_log_level(&self) -> log::LevelFilter;

    /// Rotates the output, if rotation applies to this writer.
    ///
    /// The default implementation does nothing.
    ///
    /// # Errors
    ///
    /// Depends on the implementation.
    fn rotate(&self) -> Result<(), BandLogError> {
        Ok(())
    }

    /// Cleanup open resources, e.g. flush buffers and join helper threads.
    ///
    /// The default implementation does nothing.
    fn shutdown(&self) {}
}
