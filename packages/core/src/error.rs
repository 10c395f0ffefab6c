//! Error types for date format construction and conversion.

/// Errors raised while building format specs or converting date values.
///
/// Decode-time parse failures against a configured format are not surfaced
/// through the codec: they are logged and the field resolves to `None`.
/// `Parse` exists so formatter implementations have a typed failure and so
/// direct users of `PatternFormat` see a real error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The supplied date pattern is blank or contains a malformed specifier.
    ///
    /// Raised at construction time; fatal to that construction call.
    #[error("invalid date pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The offending pattern string.
        pattern: String,
        /// What was wrong with it.
        message: String,
    },

    /// A formatter could not parse the input string as a date.
    #[error("cannot parse {input:?} as a date")]
    Parse {
        /// The text that failed to parse.
        input: String,
    },

    /// The epoch-millisecond fallback could not coerce the token.
    ///
    /// There is no further fallback, so this propagates to the caller.
    #[error("cannot decode {token:?} as epoch milliseconds")]
    NotNumeric {
        /// Text form of the offending token.
        token: String,
    },

    /// The token was numeric but outside the representable date range.
    #[error("epoch millisecond value {millis} is out of range")]
    MillisOutOfRange {
        /// The out-of-range value.
        millis: i64,
    },
}
