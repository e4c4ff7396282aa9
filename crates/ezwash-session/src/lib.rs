#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod guard;
mod manager;
mod route;

pub use guard::{Access, authorize};
pub use manager::{SessionManager, SessionState};
pub use route::Route;

pub(crate) const TRACING_TARGET: &str = "ezwash_session::manager";
