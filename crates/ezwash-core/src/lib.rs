#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod provider;
mod token;

pub mod types;

pub use error::{
    BoxedError, Error, ErrorBody, ErrorKind, FieldErrors, GENERIC_ERROR_MESSAGE, Result,
};
pub use provider::{ApiProvider, ApiService};
pub use token::{FileTokenStore, MemoryTokenStore, TokenPair, TokenStore};

/// Tracing target for token storage operations.
pub const TRACING_TARGET_TOKENS: &str = "ezwash_core::tokens";
