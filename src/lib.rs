//! QuoteVault library
//!
//! Core of a quote display application: an owned quote collection with
//! category filtering, durable persistence, import/export, and periodic
//! server-wins synchronization against a remote source. Presentation is
//! an external collaborator driven through `app::QuoteApp` and the
//! notification channel.

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod services;
pub mod storage;
