use crate::{FileSpec, WriteMode};

// The immutable configuration of a FileLogWriter.
#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) file_spec: FileSpec,
    pub(crate) append: bool,
    pub(crate) write_mode: WriteMode,
    pub(crate) line_ending: &'static [u8],
}
