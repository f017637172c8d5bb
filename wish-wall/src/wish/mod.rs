//! Construction of new wish records

mod sources;

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};
use wish_schema::{Wish, WishAttribute};
use wish_sync::IdGenerator;

pub use sources::{Clock, RandomSource, SeededRandom, SystemClock, ThreadRandom};

use crate::ip_lookup::IpLookup;
use crate::types::WishResult;

/// Number of distinct positions per axis; coordinates are hundredths of a percent
pub const COORDINATE_STEPS: u32 = 10_000;

/// Assembles validated wishes from user text
pub struct WishFactory {
    ids: Arc<dyn IdGenerator>,
    random: Arc<dyn RandomSource>,
    clock: Arc<dyn Clock>,
    ip_lookup: Arc<dyn IpLookup>,
}

impl WishFactory {
    /// Creates a factory from its collaborators
    #[must_use]
    pub fn new(
        ids: Arc<dyn IdGenerator>,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
        ip_lookup: Arc<dyn IpLookup>,
    ) -> Self {
        Self {
            ids,
            random,
            clock,
            ip_lookup,
        }
    }

    /// Builds a new wish for `text` at a random canvas position.
    ///
    /// Performs one IP lookup. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `WishError::Network` if the IP lookup fails and
    /// `WishError::Validation` if the assembled record violates the schema,
    /// which for user input means the text is longer than `MAX_TEXT_CHARS`.
    #[instrument(skip(self, text), fields(text_units = text.encode_utf16().count()))]
    pub async fn construct(&self, text: &str) -> WishResult<Wish> {
        let location_x = self.draw_coordinate();
        let location_y = self.draw_coordinate();

        let ip_address = self
            .ip_lookup
            .lookup()
            .await
            .inspect_err(|err| warn!("Failed to resolve caller IP: {err}"))?;

        #[allow(clippy::cast_precision_loss)]
        let wish = Wish {
            id: self.ids.generate_id(),
            text: text.to_owned(),
            location_x,
            location_y,
            ip_address,
            created_at: self.clock.now_millis() as f64,
        };

        if let Err(err) = wish.check() {
            if err.violates(WishAttribute::LocationX) || err.violates(WishAttribute::LocationY) {
                error!("Generated coordinates failed validation: {err}");
            } else if err.is_text_too_long() {
                debug!("Rejected over-length wish");
            } else {
                warn!("Assembled wish failed validation: {err}");
            }
            return Err(err.into());
        }

        debug!(id = %wish.id, x = wish.location_x, y = wish.location_y, "Constructed wish");
        Ok(wish)
    }

    fn draw_coordinate(&self) -> f64 {
        f64::from(self.random.draw(COORDINATE_STEPS)) / 100.0
    }
}
