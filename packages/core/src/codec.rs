//! The conversion engine: format resolution, encode, decode.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::context::ConversionContext;
use crate::format::{DateFormatSpec, DateFormatter, PatternFormat};
use crate::lookup::{CodecConfigLookup, FieldOverride};
use crate::token::{Classified, Scalar, ScalarToken};
use crate::Error;

/// Converts date values to and from their JSON scalar representation.
///
/// One codec is shared by both adapter shims; the format resolution order
/// lives here and nowhere else:
///
/// 1. the field-level override returned by the lookup (a compiled
///    formatter is preferred over a pattern),
/// 2. the adapter-instance [`DateFormatSpec`],
/// 3. the canonical RFC 3339 text form, when the context selects the
///    textual fallback,
/// 4. epoch milliseconds.
///
/// A codec is immutable once built and safe to share across threads.
#[derive(Clone)]
pub struct DateCodec {
    lookup: Arc<dyn CodecConfigLookup>,
    adapter_spec: DateFormatSpec,
}

impl DateCodec {
    /// Create a codec with no adapter-level format.
    pub fn new(lookup: Arc<dyn CodecConfigLookup>) -> Self {
        Self {
            lookup,
            adapter_spec: DateFormatSpec::None,
        }
    }

    /// Create a codec with an adapter-level format spec.
    pub fn with_spec(lookup: Arc<dyn CodecConfigLookup>, adapter_spec: DateFormatSpec) -> Self {
        Self {
            lookup,
            adapter_spec,
        }
    }

    /// Replace the adapter-level spec. Configuration time only: the codec
    /// is consumed and rebuilt, never mutated in place.
    pub fn with_adapter_spec(mut self, adapter_spec: DateFormatSpec) -> Self {
        self.adapter_spec = adapter_spec;
        self
    }

    /// The adapter-level spec this codec falls back on.
    pub fn adapter_spec(&self) -> &DateFormatSpec {
        &self.adapter_spec
    }

    fn resolve_override(&self, ctx: &ConversionContext<'_>) -> Option<FieldOverride> {
        let field = ctx.field?;
        self.lookup
            .resolve(ctx.dialect, field.declaring_type, field.name)
    }

    /// Encode a date as a JSON scalar.
    ///
    /// A missing value encodes as JSON null without consulting the lookup.
    /// A field-level override pattern that fails to compile is logged and
    /// skipped, so encoding itself never fails.
    pub fn encode(&self, value: Option<&DateTime<Utc>>, ctx: &ConversionContext<'_>) -> Scalar {
        let Some(value) = value else {
            return Scalar::Null;
        };

        if let Some(config) = self.resolve_override(ctx) {
            if let Some(formatter) = &config.formatter {
                return Scalar::Text(formatter.format(value));
            }
            if let Some(pattern) = non_blank(config.pattern.as_deref()) {
                match PatternFormat::new(pattern) {
                    Ok(compiled) => return Scalar::Text(compiled.format(value)),
                    Err(e) => log::error!("ignoring field-level date pattern: {}", e),
                }
            }
        }

        if let Some(text) = self.adapter_spec.format(value) {
            return Scalar::Text(text);
        }
        if ctx.textual_fallback {
            return Scalar::Text(value.to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        Scalar::Millis(value.timestamp_millis())
    }

    /// Decode a classified JSON scalar into a date.
    ///
    /// Rejected structural tokens and JSON null decode to `Ok(None)`
    /// without consulting the lookup. A parse failure against a configured
    /// format is logged and decodes to `Ok(None)`: one bad date field must
    /// not abort the surrounding document. Only the terminal
    /// epoch-millisecond fallback returns errors (`NotNumeric`,
    /// `MillisOutOfRange`), since nothing remains to fall back to.
    pub fn decode(
        &self,
        token: &Classified,
        ctx: &ConversionContext<'_>,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        let scalar = match token {
            Classified::Rejected => return Ok(None),
            Classified::Scalar(scalar) => scalar,
        };
        // JSON null is the only scalar without a text form.
        let Some(text) = scalar.text_form() else {
            return Ok(None);
        };

        if let Some(config) = self.resolve_override(ctx) {
            if let Some(formatter) = &config.formatter {
                return Ok(recover_to_none(formatter.parse(&text), &text));
            }
            if let Some(pattern) = non_blank(config.pattern.as_deref()) {
                let parsed =
                    PatternFormat::new(pattern).and_then(|compiled| compiled.parse(&text));
                return Ok(recover_to_none(parsed, &text));
            }
        }

        if let Some(parsed) = self.adapter_spec.parse(&text) {
            return Ok(recover_to_none(parsed, &text));
        }

        if ctx.textual_fallback {
            if let ScalarToken::Text(_) = scalar {
                let parsed = DateTime::parse_from_rfc3339(&text)
                    .map(|zoned| zoned.with_timezone(&Utc))
                    .map_err(|_| Error::Parse {
                        input: text.clone(),
                    });
                return Ok(recover_to_none(parsed, &text));
            }
        }

        let millis = scalar
            .as_millis()
            .ok_or(Error::NotNumeric { token: text })?;
        DateTime::from_timestamp_millis(millis).ok_or(Error::MillisOutOfRange { millis }).map(Some)
    }
}

fn non_blank(pattern: Option<&str>) -> Option<&str> {
    pattern.filter(|p| !p.trim().is_empty())
}

/// Swallow a decode-time parse failure to `None`, logging the offending
/// input at error level.
fn recover_to_none(parsed: Result<DateTime<Utc>, Error>, input: &str) -> Option<DateTime<Utc>> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("cannot decode {:?} as a date: {}", input, e);
            None
        }
    }
}
