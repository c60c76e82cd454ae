/// Describes errors in the initialization of `bandlog`.
///
/// Note that this enum appears only on the initialization surface
/// ([`Router::build`](crate::Router::build), [`Router::start`](crate::Router::start),
/// and the explicit operations on [`RouterHandle`](crate::RouterHandle)).
/// The emit path never returns an error: failures while writing, rotating,
/// or compressing are reported to `stderr` and otherwise swallowed, so that
/// logging can never crash the code it instruments.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BandLogError {
    /// Log file cannot be opened, written, rotated, or cleaned up.
    #[error("input/output problem")]
    Io(#[from] std::io::Error),

    /// Logger installation failed, usually because a logger was already
    /// installed for this process.
    #[error("logger installation failed")]
    Log(#[from] log::SetLoggerError),

    /// Some synchronization primitive is poisoned.
    #[error("a mutex is poisoned")]
    Poison,
}
