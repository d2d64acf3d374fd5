//! Storage module
//!
//! Durable JSON-file persistence for the quote collection and selected
//! filter, plus an in-process session store for ephemeral values.

pub mod quote_store;
pub mod session;

pub use quote_store::QuoteStore;
pub use session::SessionStore;
