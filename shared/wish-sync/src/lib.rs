//! Sync adapter for the realtime wish store
//!
//! The hosted sync service is a black box. This crate defines the narrow
//! surface the wall needs from it (live queries, single-record transactions
//! and id generation) plus an in-process implementation of that surface.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
pub mod memory;
mod types;

use async_trait::async_trait;
use futures::stream::BoxStream;

pub use error::{SyncError, SyncResult};
pub use memory::MemorySyncClient;
pub use types::{Collection, Order, QueryState, Upsert, WishQuery, DEFAULT_QUERY_LIMIT};

/// Produces fresh globally unique record identifiers without coordination
pub trait IdGenerator: Send + Sync {
    /// Returns a new identifier
    fn generate_id(&self) -> String;
}

/// UUID v4 identifiers, the format the sync service issues
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn generate_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Client handle to the sync service
///
/// Constructed once at startup and shared for the lifetime of the process.
#[async_trait]
pub trait SyncClient: IdGenerator {
    /// Subscribes to a live query.
    ///
    /// Every item is the complete current result and supersedes the previous one.
    fn subscribe(&self, query: WishQuery) -> BoxStream<'static, QueryState>;

    /// Creates or replaces exactly one record
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the service rejects or cannot accept the write
    async fn transact(&self, upsert: Upsert) -> SyncResult<()>;
}
