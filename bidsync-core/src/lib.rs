//! Core data types for the bidsync resource synchronization layer.
//!
//! This crate holds the pieces shared by every other bidsync crate:
//!
//! - [`Resource`]: an opaque JSON-shaped record managed by the remote API
//! - [`CollectionSpec`]: REST paths, id resolution, and cache key templates
//!   for one resource collection
//! - [`SyncError`] / [`SyncResult`]: the error taxonomy
//! - [`SyncConfig`]: client/cache tuning knobs
//!
//! Resources are deliberately opaque: the synchronization layer only ever
//! interprets the id and display-name fields. Everything else belongs to
//! the UI collaborators consuming the data.

mod collection;
mod config;
mod error;
mod resource;

pub use collection::CollectionSpec;
pub use config::{ConfigError, SyncConfig};
pub use error::{SyncError, SyncResult};
pub use resource::Resource;
