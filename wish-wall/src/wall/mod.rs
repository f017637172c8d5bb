//! Presentation state for the wish wall
//!
//! The wall never trusts the store: every snapshot is re-parsed against the
//! wish schema on delivery and records that fail are left out of the view.

mod form;

use std::fmt;

use futures::{Stream, StreamExt};
use serde_json::Value;
use tracing::{debug, warn};
use wish_schema::Wish;
use wish_sync::{QueryState, SyncClient, WishQuery};

pub use form::{WishForm, INPUT_PLACEHOLDER};

/// Shown until the first snapshot arrives
pub const LOADING_MESSAGE: &str = "Loading Wishes...";

/// Shown when the live query fails
pub const UNAVAILABLE_MESSAGE: &str = "Oops, please try again later";

/// A valid wish positioned on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Record id, stable across snapshots
    pub id: String,
    /// Label text
    pub text: String,
    /// Offset from the left edge, percent of canvas width
    pub left: f64,
    /// Offset from the top edge, percent of canvas height
    pub top: f64,
}

impl Placement {
    /// CSS `left` value, e.g. `23.54%`
    #[must_use]
    pub fn left_css(&self) -> String {
        format!("{}%", self.left)
    }

    /// CSS `top` value, e.g. `76.89%`
    #[must_use]
    pub fn top_css(&self) -> String {
        format!("{}%", self.top)
    }
}

impl From<Wish> for Placement {
    fn from(wish: Wish) -> Self {
        Self {
            id: wish.id,
            text: wish.text,
            left: wish.location_x,
            top: wish.location_y,
        }
    }
}

/// What the wall currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum WallView {
    /// Waiting for the first snapshot
    Loading,
    /// The live query failed
    Unavailable,
    /// Valid wishes of the latest snapshot
    Wishes(Vec<Placement>),
}

impl WallView {
    /// Derives the view from a query state, replacing whatever was shown before
    #[must_use]
    pub fn from_state(state: QueryState) -> Self {
        match state {
            QueryState::Loading => Self::Loading,
            QueryState::Failed(reason) => {
                warn!("Wish query failed: {reason}");
                Self::Unavailable
            }
            QueryState::Ready(documents) => Self::Wishes(place(&documents)),
        }
    }

    /// Placements shown, empty unless wishes are displayed
    #[must_use]
    pub fn placements(&self) -> &[Placement] {
        match self {
            Self::Wishes(placements) => placements,
            Self::Loading | Self::Unavailable => &[],
        }
    }
}

impl fmt::Display for WallView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => f.write_str(LOADING_MESSAGE),
            Self::Unavailable => f.write_str(UNAVAILABLE_MESSAGE),
            Self::Wishes(placements) => {
                for placement in placements {
                    writeln!(
                        f,
                        "[{:>7} {:>7}] {}",
                        placement.left_css(),
                        placement.top_css(),
                        placement.text
                    )?;
                }
                Ok(())
            }
        }
    }
}

/// Parses a snapshot, keeping only documents that satisfy the wish schema
#[must_use]
pub fn place(documents: &[Value]) -> Vec<Placement> {
    let placements: Vec<Placement> = documents
        .iter()
        .filter_map(|document| Wish::parse(document).ok())
        .map(Placement::from)
        .collect();

    let dropped = documents.len() - placements.len();
    if dropped > 0 {
        debug!(dropped, total = documents.len(), "Dropped invalid wish records");
    }

    placements
}

/// Live views of the wall for a query
pub fn wall_views(
    client: &dyn SyncClient,
    query: WishQuery,
) -> impl Stream<Item = WallView> + Send + 'static {
    client.subscribe(query).map(WallView::from_state)
}
