use chrono::{DateTime, Local};

// The first ten characters of this layout are exactly the date portion;
// `DateTag` relies on that when truncating. If the layout changes, the
// truncation below must be replaced with a dedicated date format.
const FULL_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// The day-granularity string that namespaces the per-day log directories.
///
/// A `DateTag` has the form `YYYY-MM-DD` and is derived by rendering the
/// current local time in a full date-and-time layout and keeping the first
/// ten characters.
///
/// [`Router::start`](crate::Router::start) computes the tag exactly once;
/// the file targets stay stable for the lifetime of the router, even when
/// the wall-clock date rolls over while the program is running.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DateTag(String);

impl DateTag {
    /// Returns the tag for the current local date.
    #[must_use]
    pub fn now() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub(crate) fn from_datetime(ts: &DateTime<Local>) -> Self {
        let mut full = ts.format(FULL_LAYOUT).to_string();
        full.truncate(10);
        Self(full)
    }

    /// The tag as a string slice, e.g. `"2024-03-15"`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DateTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod test {
    use super::{DateTag, FULL_LAYOUT};
    use chrono::Local;

    #[test]
    fn test_tag_is_prefix_of_full_rendering() {
        let instant = Local::now();
        let full = instant.format(FULL_LAYOUT).to_string();
        let tag = DateTag::from_datetime(&instant);
        assert_eq!(tag.as_str(), &full[..10]);
    }

    #[test]
    fn test_tag_shape() {
        let tag = DateTag::now();
        let bytes = tag.as_str().as_bytes();
        assert_eq!(bytes.len(), 10);
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert!(chrono::NaiveDate::parse_from_str(tag.as_str(), "%Y-%m-%d").is_ok());
    }
}
