use serde_json::{Map, Value};
use strum::Display;
use wish_schema::Wish;

use crate::error::SyncResult;

/// Number of most recent wishes a wall subscribes to
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// Collections known to the wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    /// Wish records
    Wishes,
}

/// Result ordering, by the server assigned creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    /// Newest first
    ServerCreatedAtDesc,
}

/// A live query over the wishes collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WishQuery {
    /// Maximum number of records in each snapshot
    pub limit: usize,
    /// Ordering applied before the limit
    pub order: Order,
}

impl WishQuery {
    /// The most recent wishes, newest first
    #[must_use]
    pub const fn recent(limit: usize) -> Self {
        Self {
            limit,
            order: Order::ServerCreatedAtDesc,
        }
    }
}

impl Default for WishQuery {
    fn default() -> Self {
        Self::recent(DEFAULT_QUERY_LIMIT)
    }
}

/// State of a live query subscription
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState {
    /// No snapshot has been delivered yet
    Loading,
    /// The subscription reported a failure
    Failed(String),
    /// Current result set. Documents are untyped because the store does not
    /// enforce the wish schema.
    Ready(Vec<Value>),
}

/// Transaction that creates or replaces one record
#[derive(Debug, Clone, PartialEq)]
pub struct Upsert {
    /// Target collection
    pub collection: Collection,
    /// Record identifier
    pub id: String,
    /// Full set of attributes to store
    pub attributes: Map<String, Value>,
}

impl Upsert {
    /// Builds the transaction storing a wish under its own id
    ///
    /// # Errors
    ///
    /// Returns `SyncError` if the wish cannot be serialized into a document
    pub fn wish(wish: &Wish) -> SyncResult<Self> {
        let attributes = serde_json::from_value(serde_json::to_value(wish)?)?;
        Ok(Self {
            collection: Collection::Wishes,
            id: wish.id.clone(),
            attributes,
        })
    }
}
