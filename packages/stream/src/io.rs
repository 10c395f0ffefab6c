//! The token stream seam: source, sink, and an in-memory buffer.

use std::collections::VecDeque;

use datewire_core::JsonToken;

/// Pull tokens from a streaming JSON reader.
///
/// The seam the shim needs from a host pull parser: look at the next
/// token without consuming it, then consume it once classified.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn TokenSource>`.
pub trait TokenSource: Send + Sync {
    /// Look at the next token without consuming it. `None` when exhausted.
    fn peek(&self) -> Option<&JsonToken>;

    /// Consume and return the next token. `None` when exhausted.
    fn next_token(&mut self) -> Option<JsonToken>;
}

/// Push tokens to a streaming JSON writer.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn TokenSink>`.
pub trait TokenSink: Send + Sync {
    /// Emit one token.
    fn write_token(&mut self, token: JsonToken);
}

// Blanket implementations for references and boxes

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn peek(&self) -> Option<&JsonToken> {
        (**self).peek()
    }

    fn next_token(&mut self) -> Option<JsonToken> {
        (**self).next_token()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn peek(&self) -> Option<&JsonToken> {
        self.as_ref().peek()
    }

    fn next_token(&mut self) -> Option<JsonToken> {
        self.as_mut().next_token()
    }
}

impl<T: TokenSink + ?Sized> TokenSink for &mut T {
    fn write_token(&mut self, token: JsonToken) {
        (*self).write_token(token)
    }
}

impl<T: TokenSink + ?Sized> TokenSink for Box<T> {
    fn write_token(&mut self, token: JsonToken) {
        self.as_mut().write_token(token)
    }
}

/// A queue-backed token stream implementing both ends of the seam.
///
/// Tokens written in come back out in order. Useful in tests and as a
/// capture buffer between a producer and a consumer.
#[derive(Debug, Default)]
pub struct TokenBuffer {
    tokens: VecDeque<JsonToken>,
}

impl TokenBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer preloaded with tokens.
    pub fn from_tokens(tokens: impl IntoIterator<Item = JsonToken>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
        }
    }

    /// Number of buffered tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Check whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokenSource for TokenBuffer {
    fn peek(&self) -> Option<&JsonToken> {
        self.tokens.front()
    }

    fn next_token(&mut self) -> Option<JsonToken> {
        self.tokens.pop_front()
    }
}

impl TokenSink for TokenBuffer {
    fn write_token(&mut self, token: JsonToken) {
        self.tokens.push_back(token);
    }
}
