/// The thresholds governing when an active log file is archived and how
/// archives are pruned.
///
/// The default policy rotates when the active file exceeds 100 MiB, keeps at
/// most five backup segments, deletes segments older than 30 days, and
/// compresses the retained segments with gzip.
///
/// One policy value is applied to all three severity bands unless a band is
/// given its own with [`Router::rotation_policy_for`](crate::Router::rotation_policy_for).
///
/// ```rust
/// use bandlog::{RotationPolicy, Router};
///
/// Router::new("/var/log/app")
///     .rotation_policy(RotationPolicy::default().max_size(10 * 1024 * 1024).compress(false));
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RotationPolicy {
    max_size: u64,
    max_backups: usize,
    o_max_age_days: Option<u32>,
    compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size: 100 * 1024 * 1024,
            max_backups: 5,
            o_max_age_days: Some(30),
            compress: true,
        }
    }
}

impl RotationPolicy {
    /// The active file is rotated when it exceeds this size (in bytes).
    #[must_use]
    pub fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// At most this many rotated segments are retained; older ones are
    /// deleted during cleanup.
    #[must_use]
    pub fn max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    /// Rotated segments older than this many days are deleted during
    /// cleanup, regardless of how many segments are retained.
    #[must_use]
    pub fn max_age_days(mut self, days: u32) -> Self {
        self.o_max_age_days = Some(days);
        self
    }

    /// Disables age-based pruning; segments are then only pruned by count.
    #[must_use]
    pub fn keep_any_age(mut self) -> Self {
        self.o_max_age_days = None;
        self
    }

    /// With true, retained segments are compressed with gzip (suffix `.gz`).
    ///
    /// Without the `compress` feature this setting has no effect.
    #[must_use]
    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub(crate) fn get_max_size(&self) -> u64 {
        self.max_size
    }
    pub(crate) fn get_max_backups(&self) -> usize {
        self.max_backups
    }
    pub(crate) fn get_max_age_days(&self) -> Option<u32> {
        self.o_max_age_days
    }
    pub(crate) fn wants_compression(&self) -> bool {
        cfg!(feature = "compress") && self.compress
    }
}

#[cfg(test)]
mod test {
    use super::RotationPolicy;

    #[test]
    fn test_defaults() {
        let policy = RotationPolicy::default();
        assert_eq!(policy.get_max_size(), 100 * 1024 * 1024);
        assert_eq!(policy.get_max_backups(), 5);
        assert_eq!(policy.get_max_age_days(), Some(30));
        #[cfg(feature = "compress")]
        assert!(policy.wants_compression());
    }

    #[test]
    fn test_overrides() {
        let policy = RotationPolicy::default()
            .max_size(1_000)
            .max_backups(2)
            .keep_any_age()
            .compress(false);
        assert_eq!(policy.get_max_size(), 1_000);
        assert_eq!(policy.get_max_backups(), 2);
        assert_eq!(policy.get_max_age_days(), None);
        assert!(!policy.wants_compression());
    }
}
