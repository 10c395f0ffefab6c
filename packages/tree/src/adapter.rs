//! The tree-model shim.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use datewire_core::{
    Classified, CodecConfigLookup, ConversionContext, DateCodec, DateFormatSpec, DateFormatter,
    DialectId, Error, FieldRef, PatternFormat,
};

/// Converts date values to and from `serde_json::Value`.
///
/// Thin glue over [`DateCodec`]: this type builds the per-call context
/// (dialect, field identity, fallback choice) and maps between the tree
/// value model and the engine's scalar vocabulary. The format resolution
/// order is the engine's; nothing format-related is decided here.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use datewire_core::{DialectId, FieldRef, TableLookup};
/// use datewire_tree::TreeDateCodec;
///
/// let mut table = TableLookup::new();
/// table
///     .insert_pattern(DialectId::TREE, "Invoice", "issued_on", "%Y-%m-%d")
///     .unwrap();
///
/// let codec = TreeDateCodec::new(Arc::new(table));
/// let field = FieldRef::new("Invoice", "issued_on");
///
/// let json = serde_json::json!("2021-03-14");
/// let date = codec.deserialize(&json, Some(field)).unwrap().unwrap();
/// assert_eq!(codec.serialize(Some(&date), Some(field)), json);
/// ```
#[derive(Clone)]
pub struct TreeDateCodec {
    dialect: DialectId,
    codec: DateCodec,
    textual_fallback: bool,
}

impl TreeDateCodec {
    /// Create a shim over the given lookup, with no adapter-level format.
    pub fn new(lookup: Arc<dyn CodecConfigLookup>) -> Self {
        Self {
            dialect: DialectId::TREE,
            codec: DateCodec::new(lookup),
            textual_fallback: false,
        }
    }

    /// Use a custom dialect id in lookup keys.
    pub fn with_dialect(mut self, dialect: DialectId) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the adapter-level date pattern.
    ///
    /// A compiled formatter outranks a pattern, whatever the call order,
    /// so this keeps any formatter already set. The pattern is still
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` for a blank or malformed pattern.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, Error> {
        let compiled = PatternFormat::new(pattern)?;
        if !matches!(self.codec.adapter_spec(), DateFormatSpec::Formatter(_)) {
            self.codec = self
                .codec
                .with_adapter_spec(DateFormatSpec::Pattern(compiled));
        }
        Ok(self)
    }

    /// Set the adapter-level compiled formatter. Replaces any pattern.
    pub fn with_formatter(mut self, formatter: Arc<dyn DateFormatter>) -> Self {
        self.codec = self
            .codec
            .with_adapter_spec(DateFormatSpec::Formatter(formatter));
        self
    }

    /// Choose the canonical-text fallback over epoch milliseconds.
    pub fn with_textual_fallback(mut self, using: bool) -> Self {
        self.textual_fallback = using;
        self
    }

    fn context<'a>(&'a self, field: Option<FieldRef<'a>>) -> ConversionContext<'a> {
        ConversionContext {
            dialect: &self.dialect,
            field,
            textual_fallback: self.textual_fallback,
        }
    }

    /// Serialize a date into a JSON tree value.
    ///
    /// A missing date serializes as JSON null.
    pub fn serialize(&self, value: Option<&DateTime<Utc>>, field: Option<FieldRef<'_>>) -> Value {
        self.codec.encode(value, &self.context(field)).into()
    }

    /// Deserialize a JSON tree value into a date.
    ///
    /// Arrays and objects resolve to `Ok(None)`, as do malformed date
    /// strings against a configured format.
    pub fn deserialize(
        &self,
        json: &Value,
        field: Option<FieldRef<'_>>,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        self.codec
            .decode(&Classified::of_value(json), &self.context(field))
    }
}
