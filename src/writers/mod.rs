//! Contains the trait [`LogWriter`] for the sinks that the router fans
//! records out to, and the two concrete implementations,
//! [`FileLogWriter`] for writing to a rotating sequence of files,
//! and [`ConsoleWriter`] for writing to the process's standard output.
//!
//! Both writers are normally constructed by [`Router`](crate::Router), but
//! `FileLogWriter` can also be used standalone when a rotating file sink is
//! needed outside of the band routing, e.g. for a dedicated audit stream:
//!
//! ```rust
//! use bandlog::{FileSpec, RotationPolicy};
//! use bandlog::writers::FileLogWriter;
//!
//! fn audit_writer() -> FileLogWriter {
//!     FileLogWriter::builder(FileSpec::new("audit_files", "audit"))
//!         .rotate(RotationPolicy::default())
//!         .append()
//!         .build()
//! }
//! ```

mod console_writer;
mod file_log_writer;
mod log_writer;

pub use console_writer::ConsoleWriter;
pub use file_log_writer::{FileLogWriter, FileLogWriterBuilder};
pub use log_writer::LogWriter;
