//! Date format specs: patterns and compiled formatters.

use std::fmt;
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::Error;

/// A compiled format/parse object bound to a specific pattern and zone.
///
/// One instance must apply the same pattern, locale, and timezone decisions
/// to both directions: text produced by `format` should be accepted by
/// `parse` on the same instance. The `Send + Sync` bound makes sharing an
/// `Arc<dyn DateFormatter>` across concurrent conversions safe by
/// construction.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn DateFormatter>`.
///
/// # Implementing Custom Formatters
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use datewire_core::{DateFormatter, Error};
///
/// /// Formats dates as whole epoch seconds.
/// struct EpochSeconds;
///
/// impl DateFormatter for EpochSeconds {
///     fn format(&self, value: &DateTime<Utc>) -> String {
///         value.timestamp().to_string()
///     }
///
///     fn parse(&self, text: &str) -> Result<DateTime<Utc>, Error> {
///         let secs: i64 = text.parse().map_err(|_| Error::Parse {
///             input: text.to_string(),
///         })?;
///         DateTime::from_timestamp(secs, 0).ok_or(Error::Parse {
///             input: text.to_string(),
///         })
///     }
/// }
/// ```
pub trait DateFormatter: Send + Sync {
    /// Render a date as text.
    fn format(&self, value: &DateTime<Utc>) -> String;

    /// Parse text back into a date.
    fn parse(&self, text: &str) -> Result<DateTime<Utc>, Error>;
}

/// A validated strftime pattern, compiled once at configuration time.
///
/// Construction rejects blank patterns and malformed specifiers, so
/// formatting with a `PatternFormat` cannot fail later. Parsing tolerates
/// reduced precision: a date-only pattern like `"%Y-%m-%d"` parses to
/// midnight UTC.
#[derive(Clone, Debug)]
pub struct PatternFormat {
    pattern: String,
}

impl PatternFormat {
    /// Compile a pattern.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if the pattern is blank or contains
    /// a malformed specifier.
    pub fn new(pattern: impl Into<String>) -> Result<Self, Error> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(Error::InvalidPattern {
                pattern,
                message: "pattern is blank".to_string(),
            });
        }
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            return Err(Error::InvalidPattern {
                pattern,
                message: "malformed strftime specifier".to_string(),
            });
        }
        Ok(Self { pattern })
    }

    /// The pattern string this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl DateFormatter for PatternFormat {
    fn format(&self, value: &DateTime<Utc>) -> String {
        value.format(&self.pattern).to_string()
    }

    fn parse(&self, text: &str) -> Result<DateTime<Utc>, Error> {
        // Try the richest interpretation first, then degrade: zoned
        // datetime, naive datetime (assumed UTC), date-only (midnight UTC).
        if let Ok(zoned) = DateTime::parse_from_str(text, &self.pattern) {
            return Ok(zoned.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, &self.pattern) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, &self.pattern) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
        Err(Error::Parse {
            input: text.to_string(),
        })
    }
}

/// The adapter-level date format, if any.
///
/// Exactly one formatting source is carried per variant; `None` defers to
/// the context fallback (canonical text or epoch milliseconds). Specs are
/// immutable once built and cheap to share across conversions.
#[derive(Clone, Default)]
pub enum DateFormatSpec {
    /// No adapter-level format; fall through to the context fallback.
    #[default]
    None,
    /// A pattern, validated and compiled at configuration time.
    Pattern(PatternFormat),
    /// An opaque pre-built formatter.
    Formatter(Arc<dyn DateFormatter>),
}

impl DateFormatSpec {
    /// Build a spec from the adapter configuration surface.
    ///
    /// A compiled formatter takes precedence when both are given. A
    /// supplied pattern is validated eagerly.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPattern` if a pattern is supplied and does
    /// not compile.
    pub fn from_config(
        pattern: Option<&str>,
        formatter: Option<Arc<dyn DateFormatter>>,
    ) -> Result<Self, Error> {
        if let Some(formatter) = formatter {
            return Ok(DateFormatSpec::Formatter(formatter));
        }
        match pattern {
            Some(pattern) => Ok(DateFormatSpec::Pattern(PatternFormat::new(pattern)?)),
            None => Ok(DateFormatSpec::None),
        }
    }

    /// Check if this spec carries no format.
    pub fn is_none(&self) -> bool {
        matches!(self, DateFormatSpec::None)
    }

    /// Render a date with this spec, if one is carried.
    pub fn format(&self, value: &DateTime<Utc>) -> Option<String> {
        match self {
            DateFormatSpec::None => None,
            DateFormatSpec::Pattern(pattern) => Some(pattern.format(value)),
            DateFormatSpec::Formatter(formatter) => Some(formatter.format(value)),
        }
    }

    /// Parse text with this spec, if one is carried.
    pub fn parse(&self, text: &str) -> Option<Result<DateTime<Utc>, Error>> {
        match self {
            DateFormatSpec::None => None,
            DateFormatSpec::Pattern(pattern) => Some(pattern.parse(text)),
            DateFormatSpec::Formatter(formatter) => Some(formatter.parse(text)),
        }
    }
}

impl fmt::Debug for DateFormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFormatSpec::None => f.write_str("DateFormatSpec::None"),
            DateFormatSpec::Pattern(pattern) => f
                .debug_tuple("DateFormatSpec::Pattern")
                .field(&pattern.pattern())
                .finish(),
            DateFormatSpec::Formatter(_) => f.write_str("DateFormatSpec::Formatter(..)"),
        }
    }
}
