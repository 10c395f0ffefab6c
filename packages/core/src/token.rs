//! Streaming tokens, scalar classification, and the encoded scalar.

use serde_json::Number;

/// One event from a streaming JSON reader, or to a streaming JSON writer.
///
/// The minimal vocabulary the streaming shim needs, mirroring the token
/// sets of pull-parser JSON readers.
#[derive(Clone, Debug, PartialEq)]
pub enum JsonToken {
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// An object key.
    Name(String),
    Bool(bool),
    Number(Number),
    String(String),
    Null,
    /// The end of the document.
    EndDocument,
}

/// A scalar permissible as a date decode source.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarToken {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl ScalarToken {
    /// The string form used when parsing against a configured format:
    /// text as-is, numbers in decimal notation, bools as `true`/`false`.
    ///
    /// `None` for the null scalar, which never reaches a format.
    pub fn text_form(&self) -> Option<String> {
        match self {
            ScalarToken::Null => None,
            ScalarToken::Bool(b) => Some(b.to_string()),
            ScalarToken::Number(n) => Some(n.to_string()),
            ScalarToken::Text(s) => Some(s.clone()),
        }
    }

    /// Coerce to epoch milliseconds for the numeric fallback.
    ///
    /// Whole-valued floats are accepted, and so is numeric text, the way
    /// lenient streaming readers accept quoted longs.
    pub fn as_millis(&self) -> Option<i64> {
        match self {
            ScalarToken::Number(n) => match n.as_i64() {
                Some(millis) => Some(millis),
                None => n
                    .as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64),
            },
            ScalarToken::Text(s) => s.trim().parse::<i64>().ok(),
            ScalarToken::Null | ScalarToken::Bool(_) => None,
        }
    }
}

/// The classifier's verdict on an incoming token.
///
/// Structural tokens are rejected rather than erroring: a mismatched date
/// field decodes to `None` instead of aborting the surrounding document.
#[derive(Clone, Debug, PartialEq)]
pub enum Classified {
    /// A scalar the decode path may consume.
    Scalar(ScalarToken),
    /// A structural token: array/object boundaries, an object key, or the
    /// end of the document.
    Rejected,
}

impl Classified {
    /// Classify a streaming token.
    pub fn of_token(token: &JsonToken) -> Classified {
        match token {
            JsonToken::Null => Classified::Scalar(ScalarToken::Null),
            JsonToken::Bool(b) => Classified::Scalar(ScalarToken::Bool(*b)),
            JsonToken::Number(n) => Classified::Scalar(ScalarToken::Number(n.clone())),
            JsonToken::String(s) => Classified::Scalar(ScalarToken::Text(s.clone())),
            JsonToken::BeginArray
            | JsonToken::EndArray
            | JsonToken::BeginObject
            | JsonToken::EndObject
            | JsonToken::Name(_)
            | JsonToken::EndDocument => Classified::Rejected,
        }
    }

    /// Classify a tree-model value. Arrays and objects reject.
    pub fn of_value(value: &serde_json::Value) -> Classified {
        match value {
            serde_json::Value::Null => Classified::Scalar(ScalarToken::Null),
            serde_json::Value::Bool(b) => Classified::Scalar(ScalarToken::Bool(*b)),
            serde_json::Value::Number(n) => Classified::Scalar(ScalarToken::Number(n.clone())),
            serde_json::Value::String(s) => Classified::Scalar(ScalarToken::Text(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => Classified::Rejected,
        }
    }

    /// Check if this token was rejected as structural.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Classified::Rejected)
    }
}

/// The JSON scalar produced by an encode call.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// JSON null, for a missing date.
    Null,
    /// A formatted or canonical-text date.
    Text(String),
    /// Epoch milliseconds.
    Millis(i64),
}

impl From<Scalar> for serde_json::Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => serde_json::Value::Null,
            Scalar::Text(s) => serde_json::Value::String(s),
            Scalar::Millis(millis) => serde_json::Value::Number(millis.into()),
        }
    }
}

impl From<Scalar> for JsonToken {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Null => JsonToken::Null,
            Scalar::Text(s) => JsonToken::String(s),
            Scalar::Millis(millis) => JsonToken::Number(millis.into()),
        }
    }
}
