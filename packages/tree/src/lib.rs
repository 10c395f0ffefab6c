//! Tree-model adapter for datewire.
//!
//! This shim converts dates to and from `serde_json::Value`, the tree
//! representation, delegating all format resolution to
//! `datewire_core::DateCodec`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use datewire_core::{FieldRef, NoOverrides};
//! use datewire_tree::TreeDateCodec;
//!
//! let codec = TreeDateCodec::new(Arc::new(NoOverrides));
//! assert!(codec.serialize(None, None).is_null());
//! ```

mod adapter;

pub use adapter::TreeDateCodec;

// Re-export the core types callers meet at this boundary.
pub use datewire_core::{
    CodecConfigLookup, DateFormatter, DialectId, Error, FieldRef, NoOverrides, TableLookup,
};
