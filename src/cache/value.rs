//! Cache value encoding.

use serde::{Deserialize, Serialize};

/// A cache entry that remembers absence.
///
/// `Absent` encodes as JSON `null`, `Present(v)` as the JSON encoding of `v`.
/// "We looked and there was nothing" therefore stays distinguishable from a
/// plain cache miss without reserving a magic string.
///
/// Stored types must not themselves encode to `null` (so no `Option` at the
/// top level), otherwise a present value would decode as `Absent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cached<T> {
    Absent,
    Present(T),
}

impl<T> Cached<T> {
    /// Unwrap into the plain optional value.
    pub fn into_option(self) -> Option<T> {
        match self {
            Cached::Absent => None,
            Cached::Present(value) => Some(value),
        }
    }

    /// True if this entry records an absence.
    #[allow(dead_code)]
    pub fn is_absent(&self) -> bool {
        matches!(self, Cached::Absent)
    }
}

impl<T> From<Option<T>> for Cached<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Cached::Absent,
            Some(value) => Cached::Present(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_absent_encodes_as_null() {
        let entry: Cached<String> = Cached::Absent;
        assert_eq!(serde_json::to_string(&entry).unwrap(), "null");
    }

    #[test]
    fn test_present_encodes_as_value() {
        let entry = Cached::Present("en-US".to_string());
        assert_eq!(serde_json::to_string(&entry).unwrap(), "\"en-US\"");
    }

    #[test]
    fn test_null_decodes_as_absent() {
        let entry: Cached<String> = serde_json::from_str("null").unwrap();
        assert_eq!(entry, Cached::Absent);
    }

    #[test]
    fn test_sentinel_like_string_stays_present() {
        // A player literally named "None" must not read back as absence.
        let entry: Cached<String> = serde_json::from_str("\"None\"").unwrap();
        assert_eq!(entry, Cached::Present("None".to_string()));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Cached::from(Some(1)), Cached::Present(1));
        assert_eq!(Cached::<i32>::from(None), Cached::Absent);
        assert_eq!(Cached::Present(1).into_option(), Some(1));
        assert_eq!(Cached::<i32>::Absent.into_option(), None);
    }
}
