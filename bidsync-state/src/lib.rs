//! Cross-page state store for the tender-bid workflow.
//!
//! Holds the state that must survive navigation between otherwise
//! independent page views: the selected company and project, per-type
//! uploaded-file metadata, the AI model choice, and the long-running
//! human-in-the-loop task id. Each of the five categories carries its own
//! independent subscriber list; a failing subscriber is logged and skipped,
//! never allowed to break fan-out to the rest.
//!
//! [`StateHandle`] is the explicit context object constructed once at
//! startup and passed into every consumer; there is no ambient global.
//! [`LegacyStateAdapter`] keeps old flat-property call sites working during
//! migration, logging a deprecation warning per access.

mod category;
mod handle;
mod legacy;
mod store;

pub use category::{FileSlot, StateCategory};
pub use handle::StateHandle;
pub use legacy::LegacyStateAdapter;
pub use store::{
    AiState, BulkUpdate, CrossPageStore, FileSlots, HitlState, Selection, StateEvent,
    SubscriberError, SubscriptionId, UploadedFile,
};
