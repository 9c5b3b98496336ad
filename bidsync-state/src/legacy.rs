//! Flat-property compatibility adapter for unmigrated call sites.
//!
//! Legacy pages accessed the cross-page state as flat properties
//! (`company_id`, `ai_model`, ...). This adapter keeps those call sites
//! working unmodified while new code uses the categorized
//! [`CrossPageStore`] API. It is a forwarding shim, not a data copy:
//! writes reach the canonical store immediately and trigger exactly the
//! same notifications as direct calls. Every access logs one deprecation
//! warning so the remaining call sites can be found and migrated.

use crate::category::{FileSlot, StateCategory};
use crate::handle::StateHandle;
use crate::store::{StateEvent, SubscriberError, SubscriptionId, UploadedFile};

macro_rules! deprecated_access {
    ($accessor:literal, $replacement:literal) => {
        tracing::warn!(
            accessor = $accessor,
            replacement = $replacement,
            "Deprecated flat state accessor"
        );
    };
}

pub struct LegacyStateAdapter {
    handle: StateHandle,
}

impl LegacyStateAdapter {
    pub fn new(handle: StateHandle) -> Self {
        Self { handle }
    }

    // ------------------------------------------------------------------
    // Company
    // ------------------------------------------------------------------

    pub fn company_id(&self) -> Option<String> {
        deprecated_access!("company_id", "CrossPageStore::company");
        self.handle.company().id
    }

    pub fn set_company_id(&self, id: Option<String>) {
        deprecated_access!("set_company_id", "CrossPageStore::set_company");
        let mut selection = self.handle.company();
        selection.id = id;
        self.handle.set_company(selection);
    }

    pub fn company_name(&self) -> Option<String> {
        deprecated_access!("company_name", "CrossPageStore::company");
        self.handle.company().name
    }

    pub fn set_company_name(&self, name: Option<String>) {
        deprecated_access!("set_company_name", "CrossPageStore::set_company");
        let mut selection = self.handle.company();
        selection.name = name;
        self.handle.set_company(selection);
    }

    // ------------------------------------------------------------------
    // Project
    // ------------------------------------------------------------------

    pub fn project_id(&self) -> Option<String> {
        deprecated_access!("project_id", "CrossPageStore::project");
        self.handle.project().id
    }

    pub fn set_project_id(&self, id: Option<String>) {
        deprecated_access!("set_project_id", "CrossPageStore::set_project");
        let mut selection = self.handle.project();
        selection.id = id;
        self.handle.set_project(selection);
    }

    pub fn project_name(&self) -> Option<String> {
        deprecated_access!("project_name", "CrossPageStore::project");
        self.handle.project().name
    }

    pub fn set_project_name(&self, name: Option<String>) {
        deprecated_access!("set_project_name", "CrossPageStore::set_project");
        let mut selection = self.handle.project();
        selection.name = name;
        self.handle.set_project(selection);
    }

    // ------------------------------------------------------------------
    // Files / AI / HITL
    // ------------------------------------------------------------------

    pub fn file(&self, slot: FileSlot) -> Option<UploadedFile> {
        deprecated_access!("file", "CrossPageStore::files");
        self.handle.files().get(slot).cloned()
    }

    pub fn set_file(&self, slot: FileSlot, file: Option<UploadedFile>) {
        deprecated_access!("set_file", "CrossPageStore::set_file");
        self.handle.set_file(slot, file);
    }

    pub fn ai_model(&self) -> Option<String> {
        deprecated_access!("ai_model", "CrossPageStore::ai");
        self.handle.ai().model
    }

    pub fn set_ai_model(&self, model: Option<String>) {
        deprecated_access!("set_ai_model", "CrossPageStore::set_ai_model");
        self.handle.set_ai_model(model);
    }

    pub fn hitl_task_id(&self) -> Option<String> {
        deprecated_access!("hitl_task_id", "CrossPageStore::hitl");
        self.handle.hitl().task_id
    }

    pub fn set_hitl_task_id(&self, task_id: Option<String>) {
        deprecated_access!("set_hitl_task_id", "CrossPageStore::set_hitl_task");
        self.handle.set_hitl_task(task_id);
    }

    // ------------------------------------------------------------------
    // Stringly-typed subscription bridge
    // ------------------------------------------------------------------

    /// Legacy pages subscribe by category name. Invalid names are logged
    /// and become a no-op rather than panicking an unrelated page.
    pub fn subscribe_str(
        &self,
        category: &str,
        callback: impl FnMut(&StateEvent) -> Result<(), SubscriberError> + 'static,
    ) -> Option<SubscriptionId> {
        deprecated_access!("subscribe_str", "CrossPageStore::subscribe");
        match category.parse::<StateCategory>() {
            Ok(category) => Some(self.handle.subscribe(category, callback)),
            Err(()) => {
                tracing::warn!(category, "Unknown state category, subscription ignored");
                None
            }
        }
    }
}
