use std::time::Duration;

/// Default buffer capacity (8k), when buffering is used.
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Default flush interval (1s), when flushing is used.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Describes if and how I/O should be buffered and flushed.
///
/// Is used in [`Router::write_mode`](crate::Router::write_mode).
///
/// Buffering reduces the program's I/O overhead, and thus increases overall
/// performance, which can become relevant if logging is used heavily.
/// On the other hand, if logging is used with low frequency,
/// buffering can defer the appearance of log lines significantly,
/// so regular flushing is usually advisable with buffering.
///
/// **Note** that for all options except `Direct` and `SupportCapture` you
/// should keep the [`RouterHandle`](crate::RouterHandle) alive up to the very
/// end of your program to ensure that all buffered log lines are flushed out
/// (which happens automatically when the handle is dropped) before the
/// program terminates. If the process is killed rather than terminating
/// normally, buffered lines that were not yet flushed are lost; this is an
/// accepted property of buffered logging, not something the emit path works
/// around with per-record flushing.
///
/// **Note** further that flushing uses an extra thread (with minimal stack).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WriteMode {
    /// Do not buffer (default).
    ///
    /// Every log line is directly written to the output, without buffering.
    /// This allows seeing new log lines in real time, and does not need
    /// additional threads.
    Direct,

    /// Do not buffer and support `cargo test`'s output capture.
    ///
    /// Much like `Direct`, just a bit slower, and allows
    /// `cargo test` to capture console output and print it only for failing
    /// tests.
    SupportCapture,

    /// Same as `BufferAndFlushWith` with default capacity
    /// ([`DEFAULT_BUFFER_CAPACITY`]) and default interval
    /// ([`DEFAULT_FLUSH_INTERVAL`]).
    BufferAndFlush,

    /// Buffer and flush with given buffer capacity and flush interval.
    BufferAndFlushWith(
        /// Buffer capacity.
        usize,
        /// Flush interval.
        Duration,
    ),

    /// Same as `BufferDontFlushWith` with default capacity
    /// ([`DEFAULT_BUFFER_CAPACITY`]).
    BufferDontFlush,

    /// Buffer with given buffer capacity, but don't flush.
    ///
    /// This might be handy if you want to minimize I/O effort and don't want
    /// to create the extra thread for flushing and don't care if log lines
    /// appear with delay.
    BufferDontFlushWith(
        /// Buffer capacity.
        usize,
    ),
}

impl WriteMode {
    pub(crate) fn buffersize(self) -> Option<usize> {
        match self {
            Self::Direct | Self::SupportCapture => None,
            Self::BufferAndFlush | Self::BufferDontFlush => Some(DEFAULT_BUFFER_CAPACITY),
            Self::BufferAndFlushWith(bufsize, _) | Self::BufferDontFlushWith(bufsize) => {
                Some(bufsize)
            }
        }
    }

    // Duration::ZERO means "no flusher thread".
    pub(crate) fn get_flush_interval(self) -> Duration {
        match self {
            Self::Direct
            | Self::SupportCapture
            | Self::BufferDontFlush
            | Self::BufferDontFlushWith(_) => Duration::ZERO,
            Self::BufferAndFlush => DEFAULT_FLUSH_INTERVAL,
            Self::BufferAndFlushWith(_, flush_interval) => flush_interval,
        }
    }
}
