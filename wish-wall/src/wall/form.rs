use std::sync::Arc;

use tracing::{info, instrument};
use wish_schema::Wish;
use wish_sync::{SyncClient, Upsert};

use crate::types::WishResult;
use crate::wish::WishFactory;

/// Prompt shown in the empty text input
pub const INPUT_PLACEHOLDER: &str = "What do you really want?";

/// Text entry that turns submissions into stored wishes
pub struct WishForm {
    factory: WishFactory,
    client: Arc<dyn SyncClient>,
}

impl WishForm {
    /// Creates a form writing through `client`
    #[must_use]
    pub fn new(factory: WishFactory, client: Arc<dyn SyncClient>) -> Self {
        Self { factory, client }
    }

    /// Builds a wish from `text` and stores it.
    ///
    /// The transaction is only sent once the record is fully built and valid.
    ///
    /// # Errors
    ///
    /// Returns `WishError` if construction fails or the sync service rejects the write
    #[instrument(skip(self, text))]
    pub async fn submit(&self, text: &str) -> WishResult<Wish> {
        let wish = self.factory.construct(text).await?;

        self.client.transact(Upsert::wish(&wish)?).await?;
        info!(id = %wish.id, "Wish submitted");

        Ok(wish)
    }
}
