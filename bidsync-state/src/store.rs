//! The category-partitioned observer store.

use crate::category::{FileSlot, StateCategory};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Selected company or project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Selection {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.name.is_none()
    }
}

/// Metadata for one uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_name: String,
    pub file_path: String,
    pub file_url: String,
    pub file_size: u64,
    pub uploaded_at: DateTime<Utc>,
}

/// The five named upload slots, each independently nullable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSlots {
    pub original_tender: Option<UploadedFile>,
    pub technical: Option<UploadedFile>,
    pub business: Option<UploadedFile>,
    pub point_to_point: Option<UploadedFile>,
    pub tech_proposal: Option<UploadedFile>,
}

impl FileSlots {
    pub fn get(&self, slot: FileSlot) -> Option<&UploadedFile> {
        match slot {
            FileSlot::OriginalTender => self.original_tender.as_ref(),
            FileSlot::Technical => self.technical.as_ref(),
            FileSlot::Business => self.business.as_ref(),
            FileSlot::PointToPoint => self.point_to_point.as_ref(),
            FileSlot::TechProposal => self.tech_proposal.as_ref(),
        }
    }

    pub fn set(&mut self, slot: FileSlot, file: Option<UploadedFile>) {
        match slot {
            FileSlot::OriginalTender => self.original_tender = file,
            FileSlot::Technical => self.technical = file,
            FileSlot::Business => self.business = file,
            FileSlot::PointToPoint => self.point_to_point = file,
            FileSlot::TechProposal => self.tech_proposal = file,
        }
    }
}

/// AI model choice for document generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiState {
    pub model: Option<String>,
}

/// Long-running human-in-the-loop task tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitlState {
    pub task_id: Option<String>,
}

/// Delivered to subscribers: a copy of the category's new state.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    Company(Selection),
    Project(Selection),
    Files(FileSlots),
    Ai(AiState),
    Hitl(HitlState),
}

impl StateEvent {
    pub fn category(&self) -> StateCategory {
        match self {
            StateEvent::Company(_) => StateCategory::Company,
            StateEvent::Project(_) => StateCategory::Project,
            StateEvent::Files(_) => StateCategory::Files,
            StateEvent::Ai(_) => StateCategory::Ai,
            StateEvent::Hitl(_) => StateCategory::Hitl,
        }
    }
}

/// Reported by a subscriber callback; logged, never propagated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SubscriberError(pub String);

impl From<&str> for SubscriberError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Handle for removing exactly one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId {
    category: StateCategory,
    seq: u64,
}

impl SubscriptionId {
    pub fn category(&self) -> StateCategory {
        self.category
    }
}

type Subscriber = Box<dyn FnMut(&StateEvent) -> Result<(), SubscriberError>>;

/// Partial update applied across several categories in one call. Each
/// present field goes through the corresponding setter, so each touched
/// category notifies its own subscribers exactly once; there is no
/// combined notification.
#[derive(Default)]
pub struct BulkUpdate {
    pub company: Option<Selection>,
    pub project: Option<Selection>,
    pub files: Option<FileSlots>,
    pub ai: Option<AiState>,
    pub hitl: Option<HitlState>,
}

impl BulkUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(mut self, selection: Selection) -> Self {
        self.company = Some(selection);
        self
    }

    pub fn project(mut self, selection: Selection) -> Self {
        self.project = Some(selection);
        self
    }

    pub fn files(mut self, files: FileSlots) -> Self {
        self.files = Some(files);
        self
    }

    pub fn ai(mut self, ai: AiState) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn hitl(mut self, hitl: HitlState) -> Self {
        self.hitl = Some(hitl);
        self
    }
}

/// Process-wide, category-partitioned observer store.
///
/// Getters return clones, never live references, so callers cannot mutate
/// state behind the notification fabric's back. Setters notify the
/// category's subscribers synchronously, in subscription order, before
/// returning. Subscriber callbacks must not call back into the store.
#[derive(Default)]
pub struct CrossPageStore {
    company: Selection,
    project: Selection,
    files: FileSlots,
    ai: AiState,
    hitl: HitlState,
    subscribers: HashMap<StateCategory, Vec<(u64, Subscriber)>>,
    next_seq: u64,
}

impl CrossPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Company / project
    // ------------------------------------------------------------------

    pub fn set_company(&mut self, selection: Selection) {
        self.company = selection;
        self.notify(StateCategory::Company);
    }

    pub fn company(&self) -> Selection {
        self.company.clone()
    }

    pub fn clear_company(&mut self) {
        self.set_company(Selection::default());
    }

    pub fn set_project(&mut self, selection: Selection) {
        self.project = selection;
        self.notify(StateCategory::Project);
    }

    pub fn project(&self) -> Selection {
        self.project.clone()
    }

    pub fn clear_project(&mut self) {
        self.set_project(Selection::default());
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    pub fn set_file(&mut self, slot: FileSlot, file: Option<UploadedFile>) {
        self.files.set(slot, file);
        self.notify(StateCategory::Files);
    }

    pub fn set_files(&mut self, files: FileSlots) {
        self.files = files;
        self.notify(StateCategory::Files);
    }

    pub fn files(&self) -> FileSlots {
        self.files.clone()
    }

    pub fn clear_files(&mut self) {
        self.set_files(FileSlots::default());
    }

    // ------------------------------------------------------------------
    // AI / HITL
    // ------------------------------------------------------------------

    pub fn set_ai_model(&mut self, model: Option<String>) {
        self.ai.model = model;
        self.notify(StateCategory::Ai);
    }

    pub fn ai(&self) -> AiState {
        self.ai.clone()
    }

    pub fn clear_ai(&mut self) {
        self.set_ai_model(None);
    }

    pub fn set_hitl_task(&mut self, task_id: Option<String>) {
        self.hitl.task_id = task_id;
        self.notify(StateCategory::Hitl);
    }

    pub fn hitl(&self) -> HitlState {
        self.hitl.clone()
    }

    pub fn clear_hitl(&mut self) {
        self.set_hitl_task(None);
    }

    // ------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------

    /// Apply a partial update across categories. Sequential internally;
    /// each touched category notifies independently.
    pub fn set_bulk(&mut self, update: BulkUpdate) {
        if let Some(company) = update.company {
            self.set_company(company);
        }
        if let Some(project) = update.project {
            self.set_project(project);
        }
        if let Some(files) = update.files {
            self.set_files(files);
        }
        if let Some(ai) = update.ai {
            self.ai = ai;
            self.notify(StateCategory::Ai);
        }
        if let Some(hitl) = update.hitl {
            self.hitl = hitl;
            self.notify(StateCategory::Hitl);
        }
    }

    /// Reset every category. One notification per category.
    pub fn clear_all(&mut self) {
        self.clear_company();
        self.clear_project();
        self.clear_files();
        self.clear_ai();
        self.clear_hitl();
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    pub fn subscribe(
        &mut self,
        category: StateCategory,
        callback: impl FnMut(&StateEvent) -> Result<(), SubscriberError> + 'static,
    ) -> SubscriptionId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.subscribers
            .entry(category)
            .or_default()
            .push((seq, Box::new(callback)));
        SubscriptionId { category, seq }
    }

    /// Remove exactly the subscription the id was issued for. Unknown ids
    /// are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        if let Some(subs) = self.subscribers.get_mut(&id.category) {
            subs.retain(|(seq, _)| *seq != id.seq);
        }
    }

    pub fn subscriber_count(&self, category: StateCategory) -> usize {
        self.subscribers.get(&category).map_or(0, Vec::len)
    }

    fn snapshot(&self, category: StateCategory) -> StateEvent {
        match category {
            StateCategory::Company => StateEvent::Company(self.company.clone()),
            StateCategory::Project => StateEvent::Project(self.project.clone()),
            StateCategory::Files => StateEvent::Files(self.files.clone()),
            StateCategory::Ai => StateEvent::Ai(self.ai.clone()),
            StateCategory::Hitl => StateEvent::Hitl(self.hitl.clone()),
        }
    }

    fn notify(&mut self, category: StateCategory) {
        let event = self.snapshot(category);
        if let Some(subs) = self.subscribers.get_mut(&category) {
            for (seq, callback) in subs.iter_mut() {
                if let Err(err) = callback(&event) {
                    // One bad subscriber never breaks fan-out to the rest.
                    tracing::warn!(
                        category = %category,
                        subscriber = seq,
                        error = %err,
                        "State subscriber failed, continuing fan-out"
                    );
                }
            }
        }
    }
}
