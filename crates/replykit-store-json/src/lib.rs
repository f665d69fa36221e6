//! JSON-file backend for the replykit rule store.
//!
//! Three documents under one data directory, rewritten in full after every
//! mutation: `triggers.json` and `responses.json` (objects keyed by id) and
//! `mappings.json` (an array).

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::JsonStore;

#[cfg(test)]
mod tests;
