//! catalogd - a minimal file-backed product catalog service.
//!
//! An in-memory list of product records is persisted wholesale to a single
//! JSON file and exposed through two HTTP read endpoints. Every request
//! reloads the file, so responses always reflect the latest on-disk
//! snapshot; mutations are available only on the [`store::ProductStore`]
//! API and rewrite the whole file on each change.

pub mod config;
pub mod product;
pub mod server;
pub mod store;
