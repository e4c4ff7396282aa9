#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod config;
mod error;
mod provider;

pub use client::{ApiClient, TRACING_TARGET};
pub use config::{ClientConfig, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{Error, Result};
