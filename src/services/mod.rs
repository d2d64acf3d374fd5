//! Services module
//!
//! Business logic services that coordinate between the presentation
//! boundary, the storage layer, and the remote source.

pub mod categories;
pub mod quotes;
pub mod remote;
pub mod scheduler;
pub mod sync;
pub mod transfer;

pub use quotes::QuoteService;
pub use remote::{HttpRemoteSource, RemoteSource};
pub use scheduler::{SyncFrequency, SyncScheduler};
pub use sync::{SyncEngine, SyncOutcome, SyncState};
pub use transfer::TransferService;
