//! Shared handle to the cross-page store.

use crate::category::{FileSlot, StateCategory};
use crate::store::{
    AiState, BulkUpdate, CrossPageStore, FileSlots, HitlState, Selection, StateEvent,
    SubscriberError, SubscriptionId, UploadedFile,
};
use std::cell::RefCell;
use std::rc::Rc;

/// The explicit context object replacing a window-attached singleton:
/// constructed once at startup and cloned into every consumer. All clones
/// share one [`CrossPageStore`].
///
/// Subscriber callbacks run while the store is borrowed, so they must not
/// call back into any handle clone.
#[derive(Clone, Default)]
pub struct StateHandle {
    store: Rc<RefCell<CrossPageStore>>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_company(&self, selection: Selection) {
        self.store.borrow_mut().set_company(selection);
    }

    pub fn company(&self) -> Selection {
        self.store.borrow().company()
    }

    pub fn clear_company(&self) {
        self.store.borrow_mut().clear_company();
    }

    pub fn set_project(&self, selection: Selection) {
        self.store.borrow_mut().set_project(selection);
    }

    pub fn project(&self) -> Selection {
        self.store.borrow().project()
    }

    pub fn clear_project(&self) {
        self.store.borrow_mut().clear_project();
    }

    pub fn set_file(&self, slot: FileSlot, file: Option<UploadedFile>) {
        self.store.borrow_mut().set_file(slot, file);
    }

    pub fn set_files(&self, files: FileSlots) {
        self.store.borrow_mut().set_files(files);
    }

    pub fn files(&self) -> FileSlots {
        self.store.borrow().files()
    }

    pub fn clear_files(&self) {
        self.store.borrow_mut().clear_files();
    }

    pub fn set_ai_model(&self, model: Option<String>) {
        self.store.borrow_mut().set_ai_model(model);
    }

    pub fn ai(&self) -> AiState {
        self.store.borrow().ai()
    }

    pub fn clear_ai(&self) {
        self.store.borrow_mut().clear_ai();
    }

    pub fn set_hitl_task(&self, task_id: Option<String>) {
        self.store.borrow_mut().set_hitl_task(task_id);
    }

    pub fn hitl(&self) -> HitlState {
        self.store.borrow().hitl()
    }

    pub fn clear_hitl(&self) {
        self.store.borrow_mut().clear_hitl();
    }

    pub fn set_bulk(&self, update: BulkUpdate) {
        self.store.borrow_mut().set_bulk(update);
    }

    pub fn clear_all(&self) {
        self.store.borrow_mut().clear_all();
    }

    pub fn subscribe(
        &self,
        category: StateCategory,
        callback: impl FnMut(&StateEvent) -> Result<(), SubscriberError> + 'static,
    ) -> SubscriptionId {
        self.store.borrow_mut().subscribe(category, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.borrow_mut().unsubscribe(id);
    }
}
