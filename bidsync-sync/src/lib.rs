//! Resource synchronizer: the single point of truth for "the list of
//! resources" and "the currently selected resource".
//!
//! The [`ResourceSynchronizer`] mediates every read and write through the
//! bounded TTL cache and the retrying client, and fans updates out to any
//! number of registered [`Selector`]s, independent UI fragments that stay
//! consistent without knowing about each other. Cross-cutting consumers
//! subscribe to [`SyncEvent`] notifications instead.

mod event;
mod selector;
mod synchronizer;

pub use event::{ListenerId, SyncEvent};
pub use selector::Selector;
pub use synchronizer::ResourceSynchronizer;
