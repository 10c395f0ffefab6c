//! Streaming-token adapter for datewire.
//!
//! This shim converts dates to and from streaming JSON tokens, delegating
//! all format resolution to `datewire_core::DateCodec`. The host reader
//! and writer are reached through the minimal [`TokenSource`] and
//! [`TokenSink`] seam.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use datewire_core::{JsonToken, NoOverrides};
//! use datewire_stream::{StreamDateCodec, TokenBuffer};
//!
//! let codec = StreamDateCodec::new(Arc::new(NoOverrides));
//! let mut buffer = TokenBuffer::from_tokens([JsonToken::Null]);
//!
//! assert_eq!(codec.read_date(&mut buffer, None).unwrap(), None);
//! ```

mod adapter;
mod io;

pub use adapter::StreamDateCodec;
pub use io::{TokenBuffer, TokenSink, TokenSource};

// Re-export the core types callers meet at this boundary.
pub use datewire_core::{
    CodecConfigLookup, DateFormatter, DialectId, Error, FieldRef, JsonToken, NoOverrides,
    TableLookup,
};
