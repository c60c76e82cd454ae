// only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::unused_self)]
#![allow(clippy::needless_doctest_main)]
//! A leveled, multi-destination logger that routes log records by severity
//! to separate rotating files plus the console.
//!
//! `bandlog` partitions the severity scale into three bands — info, warn, and
//! error — and gives each band its own rotating log file underneath a dated
//! directory, while every record additionally goes to the console:
//!
//! ```text
//! /var/log/app/2024-03-15-info/2024-03-15-info.log
//! /var/log/app/2024-03-15-warn/2024-03-15-warn.log
//! /var/log/app/2024-03-15-error/2024-03-15-error.log
//! ```
//!
//! Start it once, early in `main`, and keep the returned handle alive until
//! the very end of your program:
//!
//! ```rust
//! use bandlog::Router;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let _handle = Router::new("/var/log/app").start()?;
//!     log::warn!("disk at 80%");
//!     Ok(())
//! }
//! ```
//!
//! Records are emitted through the [`log`] facade macros (`info!`, `warn!`,
//! `error!`, ...). Each record is offered to all four sinks; the band sinks
//! persist it only if it falls into their severity range, the console sink
//! if it passes the console threshold (Info by default, with no upper bound).
//!
//! See
//!
//! * the builder [`Router`] for all configuration options,
//! * [`RotationPolicy`] for the size/backup/age/compression thresholds,
//! * the module [`writers`] for using the sinks standalone.
//!
//! By default, i.e. if the `colors` feature is not switched off, the level
//! names on your terminal are coloured. File output is never coloured.

mod band;
mod band_logger;
mod bandlog_error;
mod date_tag;
mod deferred_now;
mod file_spec;
mod formats;
mod rotation;
mod router;
mod router_handle;
mod util;
mod write_mode;

pub mod writers;

pub use crate::band::Band;
pub use crate::bandlog_error::BandLogError;
pub use crate::date_tag::DateTag;
pub use crate::deferred_now::DeferredNow;
pub use crate::file_spec::FileSpec;
pub use crate::formats::*;
pub use crate::rotation::RotationPolicy;
pub use crate::router::Router;
pub use crate::router_handle::{LogfileSelector, RouterHandle};
pub use crate::write_mode::{WriteMode, DEFAULT_BUFFER_CAPACITY, DEFAULT_FLUSH_INTERVAL};

/// Re-exports from log crate
pub use log::{Level, LevelFilter, Record};
