//! The streaming-token shim.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use datewire_core::{
    Classified, CodecConfigLookup, ConversionContext, DateCodec, DateFormatSpec, DateFormatter,
    DialectId, Error, FieldRef, PatternFormat,
};

use crate::io::{TokenSink, TokenSource};

/// Converts date values to and from streaming JSON tokens.
///
/// Thin glue over [`DateCodec`]: this type builds the per-call context
/// (dialect, field identity, fallback choice), classifies the next token
/// on read, and emits one token on write. The format resolution order is
/// the engine's; nothing format-related is decided here.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use datewire_core::{JsonToken, NoOverrides};
/// use datewire_stream::{StreamDateCodec, TokenBuffer, TokenSource};
///
/// let codec = StreamDateCodec::new(Arc::new(NoOverrides));
/// let mut buffer = TokenBuffer::new();
///
/// codec.write_date(&mut buffer, None, None);
/// assert_eq!(buffer.next_token(), Some(JsonToken::Null));
/// ```
#[derive(Clone)]
pub struct StreamDateCodec {
    dialect: DialectId,
    codec: DateCodec,
    textual_fallback: bool,
}

impl StreamDateCodec {
    /// Create a shim over the given lookup, with no adapter-level format.
    pub fn new(lookup: Arc<dyn CodecConfigLookup>) -> Self {
        Self {
            dialect: DialectId::STREAM,
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

    /// Encode a date and emit it as a single token.
    ///
    /// A missing date emits a null token.
    pub fn write_date(
        &self,
        sink: &mut dyn TokenSink,
        value: Option<&DateTime<Utc>>,
        field: Option<FieldRef<'_>>,
    ) {
        let scalar = self.codec.encode(value, &self.context(field));
        sink.write_token(scalar.into());
    }

    /// Read one date from the source.
    ///
    /// Scalar tokens (including JSON null) are consumed. A structural
    /// token is left in place for the surrounding decoder and reads as
    /// `Ok(None)`, as does an exhausted source.
    pub fn read_date(
        &self,
        source: &mut dyn TokenSource,
        field: Option<FieldRef<'_>>,
    ) -> Result<Option<DateTime<Utc>>, Error> {
        let Some(next) = source.peek() else {
            return Ok(None);
        };
        let classified = Classified::of_token(next);
        if classified.is_rejected() {
            return Ok(None);
        }
        source.next_token();
        self.codec.decode(&classified, &self.context(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use datewire_core::{JsonToken, NoOverrides, TableLookup};

    use crate::io::TokenBuffer;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn writes_null_for_missing_dates() {
        let codec = StreamDateCodec::new(Arc::new(NoOverrides));
        let mut buffer = TokenBuffer::new();

        codec.write_date(&mut buffer, None, None);
        assert_eq!(buffer.next_token(), Some(JsonToken::Null));
    }

    #[test]
    fn default_is_epoch_millis() {
        let codec = StreamDateCodec::new(Arc::new(NoOverrides));
        let mut buffer = TokenBuffer::new();
        let date = day(2021, 3, 14);

        codec.write_date(&mut buffer, Some(&date), None);
        assert_eq!(
            buffer.next_token(),
            Some(JsonToken::Number(date.timestamp_millis().into()))
        );
    }

    #[test]
    fn pattern_roundtrips_through_tokens() {
        let codec = StreamDateCodec::new(Arc::new(NoOverrides))
            .with_pattern("%Y-%m-%d")
            .unwrap();
        let mut buffer = TokenBuffer::new();
        let date = day(2021, 3, 14);

        codec.write_date(&mut buffer, Some(&date), None);
        assert_eq!(buffer.peek(), Some(&JsonToken::String("2021-03-14".to_string())));

        let decoded = codec.read_date(&mut buffer, None).unwrap();
        assert_eq!(decoded, Some(date));
        assert!(buffer.is_empty());
    }

    #[test]
    fn null_token_is_consumed() {
        let codec = StreamDateCodec::new(Arc::new(NoOverrides));
        let mut buffer = TokenBuffer::from_tokens([JsonToken::Null, JsonToken::EndObject]);

        assert_eq!(codec.read_date(&mut buffer, None).unwrap(), None);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn structural_tokens_are_left_in_place() {
        let codec = StreamDateCodec::new(Arc::new(NoOverrides));
        let mut buffer = TokenBuffer::from_tokens([JsonToken::BeginArray]);

        assert_eq!(codec.read_date(&mut buffer, None).unwrap(), None);
        // The surrounding decoder still sees the array.
        assert_eq!(buffer.peek(), Some(&JsonToken::BeginArray));
    }

    #[test]
    fn exhausted_source_reads_none() {
        let codec = StreamDateCodec::new(Arc::new(NoOverrides));
        let mut buffer = TokenBuffer::new();

        assert_eq!(codec.read_date(&mut buffer, None).unwrap(), None);
    }

    #[test]
    fn field_override_applies_per_call() {
        let mut table = TableLookup::new();
        table
            .insert_pattern(DialectId::STREAM, "Event", "at", "%Y-%m-%d")
            .unwrap();

        let codec = StreamDateCodec::new(Arc::new(table));
        let date = day(2021, 3, 14);
        let mut buffer = TokenBuffer::new();

        // Bound to the overridden field: pattern text.
        codec.write_date(&mut buffer, Some(&date), Some(FieldRef::new("Event", "at")));
        assert_eq!(
            buffer.next_token(),
            Some(JsonToken::String("2021-03-14".to_string()))
        );

        // A different field on the next call: back to epoch millis. No
        // state lingers from the previous call.
        codec.write_date(
            &mut buffer,
            Some(&date),
            Some(FieldRef::new("Event", "seen")),
        );
        assert_eq!(
            buffer.next_token(),
            Some(JsonToken::Number(date.timestamp_millis().into()))
        );
    }
}
