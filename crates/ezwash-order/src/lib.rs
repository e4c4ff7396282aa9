#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod catalog;
mod composer;

pub use catalog::{CATALOG, CatalogItem, catalog_item, format_money};
pub use composer::{OrderComposer, Selection, SelectionUpdate, Submission};

pub(crate) const TRACING_TARGET: &str = "ezwash_order::composer";
