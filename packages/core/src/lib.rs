//! datewire core: date-value codec resolution and conversion.
//!
//! This crate decides, for a given field and dialect, which format governs
//! the conversion of a date value to or from its JSON scalar form, and
//! performs that conversion:
//!
//! - [`DateFormatSpec`] / [`DateFormatter`]: pattern-based and compiled
//!   formats
//! - [`CodecConfigLookup`]: the per-field override capability
//! - [`DateCodec`]: the conversion engine and its resolution order
//! - [`Classified`] / [`ScalarToken`]: the scalar token classifier
//!
//! The adapter shims for the two host styles live in `datewire-tree` and
//! `datewire-stream`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use datewire_core::{ConversionContext, DateCodec, DialectId, NoOverrides, Scalar};
//!
//! let codec = DateCodec::new(Arc::new(NoOverrides));
//! let ctx = ConversionContext::unbound(&DialectId::TREE);
//!
//! // A missing date is JSON null, whatever the configuration.
//! assert_eq!(codec.encode(None, &ctx), Scalar::Null);
//! ```

mod codec;
mod context;
mod dialect;
mod error;
mod format;
mod lookup;
mod token;

pub use codec::DateCodec;
pub use context::{ConversionContext, FieldRef};
pub use dialect::DialectId;
pub use error::Error;
pub use format::{DateFormatSpec, DateFormatter, PatternFormat};
pub use lookup::{CodecConfigLookup, FieldOverride, NoOverrides, OverrideEntry, TableLookup};
pub use token::{Classified, JsonToken, Scalar, ScalarToken};

// Re-export the date types conversions go through, for convenience.
pub use chrono::{DateTime, Utc};
