//! Dialect identifiers for override lookup.

use std::borrow::Cow;
use std::fmt;

/// Identifies which host JSON adapter style is producing or consuming data.
///
/// The dialect is one third of the override lookup key
/// (dialect, declaring type, field name). The two built-in adapter shims
/// have well-known ids, but any string your lookup understands is valid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DialectId(pub Cow<'static, str>);

impl DialectId {
    // Built-in adapter dialects

    /// The tree-model adapter (`datewire-tree`).
    pub const TREE: DialectId = DialectId(Cow::Borrowed("tree"));

    /// The streaming-token adapter (`datewire-stream`).
    pub const STREAM: DialectId = DialectId(Cow::Borrowed("stream"));

    /// Create a dialect id from a static string.
    pub const fn from_static(s: &'static str) -> Self {
        DialectId(Cow::Borrowed(s))
    }

    /// Create a dialect id from an owned string.
    pub fn new(s: impl Into<String>) -> Self {
        DialectId(Cow::Owned(s.into()))
    }

    /// Get the dialect id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DialectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for DialectId {
    fn from(s: &'static str) -> Self {
        DialectId(Cow::Borrowed(s))
    }
}

impl From<String> for DialectId {
    fn from(s: String) -> Self {
        DialectId(Cow::Owned(s))
    }
}

impl AsRef<str> for DialectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_work() {
        assert_eq!(DialectId::TREE.as_str(), "tree");
        assert_eq!(DialectId::STREAM.as_str(), "stream");
        assert_ne!(DialectId::TREE, DialectId::STREAM);
    }

    #[test]
    fn custom_dialects() {
        let d = DialectId::new("yaml-tree");
        assert_eq!(d.as_str(), "yaml-tree");
    }

    #[test]
    fn equality() {
        assert_eq!(DialectId::TREE, DialectId::from("tree"));
        assert_eq!(DialectId::TREE, DialectId::new("tree".to_string()));
    }

    #[test]
    fn from_static() {
        let d = DialectId::from_static("msgpack");
        assert_eq!(d.as_str(), "msgpack");
    }

    #[test]
    fn display_impl() {
        assert_eq!(format!("{}", DialectId::STREAM), "stream");
    }

    #[test]
    fn as_ref_str() {
        let d = DialectId::TREE;
        let s: &str = d.as_ref();
        assert_eq!(s, "tree");
    }

    #[test]
    fn hash_works() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(DialectId::TREE);
        set.insert(DialectId::STREAM);
        set.insert(DialectId::from("tree")); // Duplicate

        assert_eq!(set.len(), 2);
        assert!(set.contains(&DialectId::TREE));
    }
}
