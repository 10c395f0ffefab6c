//! The codec configuration lookup capability.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::format::{DateFormatter, PatternFormat};
use crate::{DialectId, Error};

/// A field-level date format override.
///
/// Stored configuration may carry both a compiled formatter and a pattern;
/// the formatter wins during resolution. Blank patterns are treated as
/// absent by the codec.
#[derive(Clone, Default)]
pub struct FieldOverride {
    /// Pre-built formatter, preferred when present.
    pub formatter: Option<Arc<dyn DateFormatter>>,
    /// Pattern string, compiled on demand by the codec.
    pub pattern: Option<String>,
}

impl FieldOverride {
    /// An override carrying only a pattern.
    pub fn from_pattern(pattern: impl Into<String>) -> Self {
        Self {
            formatter: None,
            pattern: Some(pattern.into()),
        }
    }

    /// An override carrying only a compiled formatter.
    pub fn from_formatter(formatter: Arc<dyn DateFormatter>) -> Self {
        Self {
            formatter: Some(formatter),
            pattern: None,
        }
    }
}

impl fmt::Debug for FieldOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOverride")
            .field("formatter", &self.formatter.as_ref().map(|_| ".."))
            .field("pattern", &self.pattern)
            .finish()
    }
}

/// Resolve per-field date format overrides.
///
/// The store behind this lookup is not datewire's concern: implementations
/// may consult a registry, a configuration file, or a fixed table.
/// `resolve` must be side-effect-free and safe for concurrent reads; the
/// codec calls it at most once per conversion.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn CodecConfigLookup>`.
pub trait CodecConfigLookup: Send + Sync {
    /// Look up the override for (dialect, declaring type, field name).
    fn resolve(
        &self,
        dialect: &DialectId,
        declaring_type: &str,
        field: &str,
    ) -> Option<FieldOverride>;
}

/// A lookup that never resolves anything.
///
/// Useful when an adapter's own configuration is all the customization a
/// caller needs.
pub struct NoOverrides;

impl CodecConfigLookup for NoOverrides {
    fn resolve(
        &self,
        _dialect: &DialectId,
        _declaring_type: &str,
        _field: &str,
    ) -> Option<FieldOverride> {
        None
    }
}

// Blanket implementations for shared and boxed lookups

impl<T: CodecConfigLookup + ?Sized> CodecConfigLookup for &T {
    fn resolve(
        &self,
        dialect: &DialectId,
        declaring_type: &str,
        field: &str,
    ) -> Option<FieldOverride> {
        (*self).resolve(dialect, declaring_type, field)
    }
}

impl<T: CodecConfigLookup + ?Sized> CodecConfigLookup for Arc<T> {
    fn resolve(
        &self,
        dialect: &DialectId,
        declaring_type: &str,
        field: &str,
    ) -> Option<FieldOverride> {
        self.as_ref().resolve(dialect, declaring_type, field)
    }
}

impl<T: CodecConfigLookup + ?Sized> CodecConfigLookup for Box<T> {
    fn resolve(
        &self,
        dialect: &DialectId,
        declaring_type: &str,
        field: &str,
    ) -> Option<FieldOverride> {
        self.as_ref().resolve(dialect, declaring_type, field)
    }
}

/// One declarative override row, as found in configuration documents.
///
/// ```json
/// {
///   "dialect": "tree",
///   "declaring_type": "Invoice",
///   "field": "issued_on",
///   "pattern": "%Y-%m-%d"
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideEntry {
    /// Dialect the override applies to.
    pub dialect: String,
    /// Name of the type declaring the field.
    pub declaring_type: String,
    /// The field name.
    pub field: String,
    /// The date pattern to apply.
    pub pattern: String,
}

/// An in-memory override table keyed by (dialect, declaring type, field).
///
/// The simplest `CodecConfigLookup`: good for adapters configured in code,
/// and the target for [`OverrideEntry`] rows loaded from configuration.
///
/// # Example
///
/// ```rust
/// use datewire_core::{CodecConfigLookup, DialectId, TableLookup};
///
/// let mut table = TableLookup::new();
/// table
///     .insert_pattern(DialectId::TREE, "Invoice", "issued_on", "%Y-%m-%d")
///     .unwrap();
///
/// let hit = table.resolve(&DialectId::TREE, "Invoice", "issued_on");
/// assert!(hit.is_some());
/// ```
#[derive(Default)]
pub struct TableLookup {
    entries: HashMap<(DialectId, String, String), FieldOverride>,
}

impl TableLookup {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern override.
    ///
    /// The pattern is validated here so a typo fails at configuration
    /// time, not mid-document.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` for a blank or malformed pattern.
    pub fn insert_pattern(
        &mut self,
        dialect: DialectId,
        declaring_type: impl Into<String>,
        field: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Result<(), Error> {
        let pattern = pattern.into();
        PatternFormat::new(pattern.as_str())?;
        self.entries.insert(
            (dialect, declaring_type.into(), field.into()),
            FieldOverride::from_pattern(pattern),
        );
        Ok(())
    }

    /// Register a compiled-formatter override.
    pub fn insert_formatter(
        &mut self,
        dialect: DialectId,
        declaring_type: impl Into<String>,
        field: impl Into<String>,
        formatter: Arc<dyn DateFormatter>,
    ) {
        self.entries.insert(
            (dialect, declaring_type.into(), field.into()),
            FieldOverride::from_formatter(formatter),
        );
    }

    /// Build a table from declarative entries.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` on the first entry whose pattern
    /// does not compile.
    pub fn from_entries(entries: impl IntoIterator<Item = OverrideEntry>) -> Result<Self, Error> {
        let mut table = Self::new();
        for entry in entries {
            table.insert_pattern(
                DialectId::new(entry.dialect),
                entry.declaring_type,
                entry.field,
                entry.pattern,
            )?;
        }
        Ok(table)
    }

    /// Number of registered overrides.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CodecConfigLookup for TableLookup {
    fn resolve(
        &self,
        dialect: &DialectId,
        declaring_type: &str,
        field: &str,
    ) -> Option<FieldOverride> {
        let key = (dialect.clone(), declaring_type.to_owned(), field.to_owned());
        self.entries.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    struct FixedText;

    impl DateFormatter for FixedText {
        fn format(&self, _value: &DateTime<Utc>) -> String {
            "fixed".to_string()
        }
        fn parse(&self, text: &str) -> Result<DateTime<Utc>, Error> {
            Err(Error::Parse {
                input: text.to_string(),
            })
        }
    }

    #[test]
    fn no_overrides_resolves_nothing() {
        let lookup = NoOverrides;
        assert!(lookup
            .resolve(&DialectId::TREE, "Invoice", "issued_on")
            .is_none());
    }

    #[test]
    fn table_hit_and_miss() {
        let mut table = TableLookup::new();
        table
            .insert_pattern(DialectId::TREE, "Invoice", "issued_on", "%Y-%m-%d")
            .unwrap();

        let hit = table
            .resolve(&DialectId::TREE, "Invoice", "issued_on")
            .unwrap();
        assert_eq!(hit.pattern.as_deref(), Some("%Y-%m-%d"));
        assert!(hit.formatter.is_none());

        assert!(table.resolve(&DialectId::TREE, "Invoice", "paid_on").is_none());
        assert!(table.resolve(&DialectId::TREE, "Receipt", "issued_on").is_none());
    }

    #[test]
    fn dialects_are_isolated() {
        let mut table = TableLookup::new();
        table
            .insert_pattern(DialectId::TREE, "Invoice", "issued_on", "%Y-%m-%d")
            .unwrap();

        assert!(table
            .resolve(&DialectId::STREAM, "Invoice", "issued_on")
            .is_none());
    }

    #[test]
    fn insert_rejects_bad_patterns() {
        let mut table = TableLookup::new();

        let result = table.insert_pattern(DialectId::TREE, "Invoice", "issued_on", "");
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));

        let result = table.insert_pattern(DialectId::TREE, "Invoice", "issued_on", "%Q");
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));

        assert!(table.is_empty());
    }

    #[test]
    fn formatter_override_resolves() {
        let mut table = TableLookup::new();
        table.insert_formatter(
            DialectId::STREAM,
            "Event",
            "at",
            Arc::new(FixedText),
        );

        let hit = table.resolve(&DialectId::STREAM, "Event", "at").unwrap();
        assert!(hit.formatter.is_some());
        assert!(hit.pattern.is_none());
    }

    #[test]
    fn from_entries_builds_table() {
        let json = r#"[
            {"dialect": "tree", "declaring_type": "Invoice", "field": "issued_on", "pattern": "%Y-%m-%d"},
            {"dialect": "stream", "declaring_type": "Event", "field": "at", "pattern": "%s"}
        ]"#;
        let entries: Vec<OverrideEntry> = serde_json::from_str(json).unwrap();
        let table = TableLookup::from_entries(entries).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table
            .resolve(&DialectId::from("stream"), "Event", "at")
            .is_some());
    }

    #[test]
    fn from_entries_rejects_bad_pattern() {
        let entries = vec![OverrideEntry {
            dialect: "tree".to_string(),
            declaring_type: "Invoice".to_string(),
            field: "issued_on".to_string(),
            pattern: "%Q".to_string(),
        }];
        assert!(matches!(
            TableLookup::from_entries(entries),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn lookup_through_arc_and_box() {
        let mut table = TableLookup::new();
        table
            .insert_pattern(DialectId::TREE, "Invoice", "issued_on", "%Y-%m-%d")
            .unwrap();

        let arced: Arc<dyn CodecConfigLookup> = Arc::new(table);
        assert!(arced
            .resolve(&DialectId::TREE, "Invoice", "issued_on")
            .is_some());

        let boxed: Box<dyn CodecConfigLookup> = Box::new(NoOverrides);
        assert!(boxed
            .resolve(&DialectId::TREE, "Invoice", "issued_on")
            .is_none());
    }

    #[test]
    fn override_debug_hides_formatter() {
        let ov = FieldOverride::from_formatter(Arc::new(FixedText));
        let debug = format!("{:?}", ov);
        assert!(debug.contains("FieldOverride"));
    }
}
