use log::Level;

/// One of the three severity ranges that get their own rotating log file.
///
/// The bands partition the level scale from Info upwards, with no gaps and
/// no overlaps:
///
/// * `Info` takes records in `[Info, Warn)`,
/// * `Warn` takes records in `[Warn, Error)`,
/// * `Error` takes records at Error severity and above.
///
/// Records below Info (Debug, Trace) fall into no band and reach no file;
/// whether they reach the console depends on the console threshold
/// (see [`Router::console_threshold`](crate::Router::console_threshold)).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Band {
    /// Takes records with level Info.
    Info,
    /// Takes records with level Warn.
    Warn,
    /// Takes records with level Error and above.
    Error,
}

impl Band {
    /// All bands, ordered from least to most severe.
    pub const ALL: [Band; 3] = [Band::Info, Band::Warn, Band::Error];

    /// Returns true if a record with the given level belongs into this band.
    // Note that `log::Level` orders Error lowest, so "at least as severe as"
    // reads as `<=`.
    #[must_use]
    pub fn contains(self, level: Level) -> bool {
        match self {
            Self::Info => level == Level::Info,
            Self::Warn => level == Level::Warn,
            Self::Error => level <= Level::Error,
        }
    }

    /// The lowercase name used in directory and file names:
    /// `"info"`, `"warn"`, or `"error"`.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Info => 0,
            Self::Warn => 1,
            Self::Error => 2,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}
