//! Per-call conversion context.

use crate::DialectId;

/// Identity of the field a date value is bound to.
///
/// Passed explicitly with every conversion call. There is no ambient
/// "current field" state on the codec or the adapters, so reusing one
/// adapter across calls or threads cannot leak context between fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRef<'a> {
    /// Name of the type declaring the field.
    pub declaring_type: &'a str,
    /// The field name itself.
    pub name: &'a str,
}

impl<'a> FieldRef<'a> {
    /// Create a field reference.
    pub fn new(declaring_type: &'a str, name: &'a str) -> Self {
        Self {
            declaring_type,
            name,
        }
    }
}

/// Ambient context for one encode or decode call.
///
/// Built by the adapter shims per call; never persisted.
#[derive(Clone, Copy, Debug)]
pub struct ConversionContext<'a> {
    /// Which adapter dialect is performing the conversion.
    pub dialect: &'a DialectId,
    /// The field being converted, when the value is bound to one.
    /// Without a field there is nothing to look up overrides for.
    pub field: Option<FieldRef<'a>>,
    /// When no other format applies, convert via the canonical RFC 3339
    /// text form instead of epoch milliseconds.
    pub textual_fallback: bool,
}

impl<'a> ConversionContext<'a> {
    /// Context for a value not bound to any field.
    pub fn unbound(dialect: &'a DialectId) -> Self {
        Self {
            dialect,
            field: None,
            textual_fallback: false,
        }
    }

    /// Context for a value bound to a field.
    pub fn for_field(dialect: &'a DialectId, field: FieldRef<'a>) -> Self {
        Self {
            dialect,
            field: Some(field),
            textual_fallback: false,
        }
    }

    /// Select or deselect the textual fallback.
    pub fn with_textual_fallback(mut self, using: bool) -> Self {
        self.textual_fallback = using;
        self
    }
}
