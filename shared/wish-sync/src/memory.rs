//! In-process sync store
//!
//! Behaves like the hosted service from the wall's point of view: documents are
//! schemaless, the server stamps each new record with its creation order, and
//! live queries re-deliver the full result after every change.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use serde_json::Value;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::{
    IdGenerator, Order, QueryState, SyncClient, SyncError, SyncResult, Upsert, UuidGenerator,
    WishQuery,
};

#[derive(Debug, Clone)]
struct StoredDocument {
    /// Server creation order, assigned on first write of an id
    sequence: u64,
    id: String,
    document: Value,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    documents: Arc<Vec<StoredDocument>>,
    next_sequence: u64,
    failure: Option<String>,
}

impl StoreState {
    fn upsert(&mut self, id: String, document: Value) {
        let documents = Arc::make_mut(&mut self.documents);
        if let Some(existing) = documents.iter_mut().find(|stored| stored.id == id) {
            existing.document = document;
            return;
        }

        documents.push(StoredDocument {
            sequence: self.next_sequence,
            id,
            document,
        });
        self.next_sequence += 1;
    }

    fn evaluate(&self, query: &WishQuery) -> QueryState {
        if let Some(reason) = &self.failure {
            return QueryState::Failed(reason.clone());
        }

        let mut matching: Vec<&StoredDocument> = self.documents.iter().collect();
        match query.order {
            Order::ServerCreatedAtDesc => {
                matching.sort_by_key(|stored| std::cmp::Reverse(stored.sequence));
            }
        }

        QueryState::Ready(
            matching
                .into_iter()
                .take(query.limit)
                .map(|stored| stored.document.clone())
                .collect(),
        )
    }
}

/// Sync client backed by process memory
pub struct MemorySyncClient {
    state: watch::Sender<StoreState>,
}

impl MemorySyncClient {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self { state }
    }

    /// Writes an arbitrary document, bypassing the typed transaction path.
    ///
    /// Used to model records that do not conform to the wish schema.
    pub fn insert_raw(&self, id: impl Into<String>, document: Value) {
        let id = id.into();
        debug!(id = %id, "Inserting raw document");
        self.state.send_modify(|state| state.upsert(id, document));
    }

    /// Makes every subscription report a failure until `recover` is called
    pub fn fail(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Sync store failing subscriptions: {reason}");
        self.state.send_modify(|state| state.failure = Some(reason));
    }

    /// Clears a failure set by `fail`
    pub fn recover(&self) {
        info!("Sync store recovered");
        self.state.send_modify(|state| state.failure = None);
    }

    /// Number of stored documents
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().documents.len()
    }

    /// Whether the store holds no documents
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemorySyncClient {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for MemorySyncClient {
    fn generate_id(&self) -> String {
        UuidGenerator.generate_id()
    }
}

#[async_trait]
impl SyncClient for MemorySyncClient {
    fn subscribe(&self, query: WishQuery) -> BoxStream<'static, QueryState> {
        let snapshots =
            WatchStream::new(self.state.subscribe()).map(move |state| state.evaluate(&query));

        stream::once(async { QueryState::Loading })
            .chain(snapshots)
            .boxed()
    }

    async fn transact(&self, upsert: Upsert) -> SyncResult<()> {
        let failure = self.state.borrow().failure.clone();
        if let Some(reason) = failure {
            return Err(SyncError::Unavailable(reason));
        }

        debug!(
            collection = %upsert.collection,
            id = %upsert.id,
            "Applying upsert"
        );
        self.state.send_modify(|state| {
            state.upsert(upsert.id, Value::Object(upsert.attributes));
        });

        Ok(())
    }
}
