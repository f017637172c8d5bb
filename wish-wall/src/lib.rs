//! Wish wall client
//!
//! Users submit short wishes that are placed at random positions on a shared
//! canvas and shown live to every viewer. Storage and fan-out are delegated to
//! a realtime sync service reached through [`wish_sync::SyncClient`].

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Caller IP resolution
pub mod ip_lookup;

/// Configuration and error types
pub mod types;

/// Wall and form view-models
pub mod wall;

/// Wish construction
pub mod wish;
