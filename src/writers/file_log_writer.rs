mod builder;
mod config;
mod state;

pub use self::builder::FileLogWriterBuilder;
pub(crate) use self::config::Config;
use self::state::State;

use super::LogWriter;
use crate::{
    util::{buffer_with, eprint_err, io_err, ErrorCode},
    BandLogError, DeferredNow, FileSpec, FormatFunction, LogfileSelector,
};
use log::Record;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

const UNIX_LINE_ENDING: &[u8] = b"\n";
const WINDOWS_LINE_ENDING: &[u8] = b"\r\n";

/// A configurable [`LogWriter`] implementation that writes to a file,
/// or, when rotation is used, to a sequence of files.
///
/// Directory creation and the opening of the output file happen lazily, on
/// the first write; an unusable target directory therefore surfaces as a
/// write error, not at construction time.
///
/// Is used by [`Router`](crate::Router) for the three band files, and can be
/// built standalone via [`FileLogWriter::builder`].
pub struct FileLogWriter {
    format: FormatFunction,
    line_ending: &'static [u8],
    // the state needs to be mutable; since `Log.log()` requires an unmutable self,
    // which translates into a non-mutating `LogWriter::write()`,
    // we need the internal mutability of the Mutex, which also makes the
    // writer thread-safe
    am_state: Mutex<State>,
    max_log_level: log::LevelFilter,
}

impl FileLogWriter {
    /// Instantiates a builder for `FileLogWriter`.
    #[must_use]
    pub fn builder(file_spec: FileSpec) -> FileLogWriterBuilder {
        FileLogWriterBuilder::new(file_spec)
    }

    pub(crate) fn new(
        format: FormatFunction,
        line_ending: &'static [u8],
        am_state: Mutex<State>,
        max_log_level: log::LevelFilter,
    ) -> Self {
        Self {
            format,
            line_ending,
            am_state,
            max_log_level,
        }
    }

    /// Returns the list of existing log files that belong to this writer,
    /// in the order of youngest to oldest.
    ///
    /// Depending on the given selector, the list includes the active output
    /// file and the compressed backup files, if they exist.
    ///
    /// # Errors
    ///
    /// `BandLogError::Poison` if the state mutex is poisoned.
    pub fn existing_log_files(
        &self,
        selector: &LogfileSelector,
    ) -> Result<Vec<PathBuf>, BandLogError> {
        Ok(self
            .am_state
            .lock()
            .map_err(|_| BandLogError::Poison)?
            .existing_log_files(selector))
    }
}

impl LogWriter for FileLogWriter {
    #[inline]
    fn write(&self, now: &mut DeferredNow, record: &Record) -> std::io::Result<()> {
        let mut result: Result<(), std::io::Error> = Ok(());
        buffer_with(|tl_buf| match tl_buf.try_borrow_mut() {
            Ok(mut buffer) => {
                (self.format)(&mut *buffer, now, record)
                    .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
                buffer
                    .write_all(self.line_ending)
                    .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
                result = self
                    .am_state
                    .lock()
                    .map_err(|_e| io_err("Poison"))
                    .and_then(|mut state| state.write_buffer(&buffer));
                buffer.clear();
            }
            Err(_e) => {
                // recursive logging; see util::write_buffered
                let mut tmp_buf = Vec::<u8>::with_capacity(200);
                (self.format)(&mut tmp_buf, now, record)
                    .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
                tmp_buf
                    .write_all(self.line_ending)
                    .unwrap_or_else(|e| eprint_err(ErrorCode::Format, "formatting failed", &e));
                result = self
                    .am_state
                    .lock()
                    .map_err(|_e| io_err("Poison"))
                    .and_then(|mut state| state.write_buffer(&tmp_buf));
            }
        });
        result
    }

    #[inline]
    fn flush(&self) -> std::io::Result<()> {
        self.am_state
            .lock()
            .map_err(|_e| io_err("Poison"))?
            .flush()
    }

    fn max_log_level(&self) -> log::LevelFilter {
        self.max_log_level
    }

    fn rotate(&self) -> Result<(), BandLogError> {
        self.am_state
            .lock()
            .map_err(|_| BandLogError::Poison)?
            .mount_next_writer_if_necessary(true)
    }

    fn shutdown(&self) {
        if let Ok(ref mut state) = self.am_state.lock() {
            state.shutdown();
        }
    }
}
