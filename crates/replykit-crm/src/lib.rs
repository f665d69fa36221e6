//! Customer directory — the CRM collaborator of the reply engine.
//!
//! A JSON-file-backed collection of customer records keyed by messenger
//! handle. The resolver never talks to this crate directly; callers look up
//! a customer, flatten it to a rendering context with
//! [`Customer::to_context`], and pass that into
//! [`Resolver::resolve`](replykit_core::resolver::Resolver::resolve).

mod customer;
mod directory;

pub mod error;

pub use customer::{Customer, CustomerId, NewCustomer};
pub use directory::CustomerDirectory;
pub use error::{Error, Result};
