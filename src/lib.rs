//! # listfeed
//!
//! Retry-capable fetcher for a remote JSON item list, grouped and sorted for
//! display.
//!
//! listfeed downloads a JSON array of `{id, listId, name}` records from a
//! fixed endpoint, decodes each element as it is parsed, drops records with
//! blank or missing names, groups the rest by `listId` in ascending order,
//! and sorts every group by name. The fetch runs on a single background task
//! that retries indefinitely with a fixed delay, publishing each
//! loading/error/ready transition to the embedding application in order.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Strict schema, lenient content** - A malformed record fails the whole
//!   batch; a record with a blank name is silently skipped
//! - **Never gives up** - Failed attempts surface as status messages, then
//!   the loop retries after a constant delay
//!
//! ## Quick Start
//!
//! ```no_run
//! use listfeed::{Config, FetchState, Fetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = Fetcher::new(Config::default())?;
//!     let mut handle = fetcher.spawn();
//!
//!     while let Some(state) = handle.states.recv().await {
//!         match state {
//!             FetchState::Ready(groups) => {
//!                 for (list_id, items) in groups.iter() {
//!                     println!("List {list_id}: {} items", items.len());
//!                 }
//!                 break;
//!             }
//!             other => {
//!                 if let Some(status) = other.status_message() {
//!                     println!("{status}");
//!                 }
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Fetch-retry loop and state publication
pub mod fetch;
/// Streaming grouping of feed records
pub mod grouper;
/// Record decoding
pub mod record;

// Re-export commonly used types
pub use config::{Config, DEFAULT_ENDPOINT, RetryConfig};
pub use error::{Error, FailureKind, Result};
pub use fetch::{
    FetchHandle, FetchState, Fetcher, GENERIC_ERROR_STATUS, NETWORK_ERROR_STATUS, StateSink,
};
pub use grouper::GroupedItems;
pub use record::{DecodeError, Item, ListId, Record};
