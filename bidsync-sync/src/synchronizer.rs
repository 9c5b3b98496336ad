//! Orchestration of cache, client, selectors, and notifications.

use crate::event::{ListenerId, SyncEvent};
use crate::selector::Selector;
use bidsync_cache::BoundedTtlCache;
use bidsync_client::{
    parse_detail, parse_list, parse_mutation, ApiRequest, MutationOutcome, RetryingClient,
    Transport,
};
use bidsync_core::{CollectionSpec, Resource, SyncConfig, SyncResult};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::time::Duration;

type Listener = Box<dyn FnMut(&SyncEvent)>;

/// Single point of truth for one resource collection.
///
/// All state lives behind interior mutability so interleaved callers on one
/// event loop share an instance through `&self` (the whole layer follows
/// the single-threaded cooperative model; the type is intentionally not
/// `Send`). Selector fan-out and event emission are synchronous and
/// complete, in registration order, before the triggering call returns.
/// Listeners and selectors must not call back into the synchronizer.
///
/// The `loading` flag guards against redundant fetches only: a `load_all`
/// that observes a load in flight returns the pre-load snapshot
/// immediately. It is not mutual exclusion: concurrent mutations both
/// proceed, and the last invalidate-and-reload wins.
pub struct ResourceSynchronizer<T: Transport> {
    spec: CollectionSpec,
    client: RetryingClient<T>,
    cache: RefCell<BoundedTtlCache>,
    selectors: RefCell<Vec<(String, Box<dyn Selector>)>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    resources: RefCell<Vec<Resource>>,
    current: RefCell<Option<String>>,
    loading: Cell<bool>,
    loaded: Cell<bool>,
    next_listener: Cell<u64>,
}

impl<T: Transport> ResourceSynchronizer<T> {
    pub fn new(spec: CollectionSpec, transport: T, config: &SyncConfig) -> Self {
        Self {
            spec,
            client: RetryingClient::new(transport, config),
            cache: RefCell::new(BoundedTtlCache::new(
                Duration::from_millis(config.cache_ttl_ms),
                config.cache_max_entries,
            )),
            selectors: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            resources: RefCell::new(Vec::new()),
            current: RefCell::new(None),
            loading: Cell::new(false),
            loaded: Cell::new(false),
            next_listener: Cell::new(0),
        }
    }

    pub fn spec(&self) -> &CollectionSpec {
        &self.spec
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get()
    }

    /// Snapshot of the in-memory list.
    pub fn resources(&self) -> Vec<Resource> {
        self.resources.borrow().clone()
    }

    pub fn current_selection(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Load the full resource list.
    ///
    /// If a load is already in flight, returns the last known list
    /// immediately; callers arriving during a load get the stale snapshot,
    /// not the eventual result. Otherwise consults the cache (unless
    /// forced), fetches on miss, updates every registered selector, applies
    /// the auto-selection heuristic, and emits [`SyncEvent::Loaded`].
    pub async fn load_all(&self, force_reload: bool) -> SyncResult<Vec<Resource>> {
        if self.loading.get() {
            tracing::debug!(
                collection = %self.spec.collection(),
                "Load already in flight, returning current snapshot"
            );
            return Ok(self.resources.borrow().clone());
        }

        self.loading.set(true);
        let result = self.load_all_inner(force_reload).await;
        self.loading.set(false);

        result.map_err(|err| {
            tracing::error!(
                collection = %self.spec.collection(),
                error = %err,
                "Failed to load resource list"
            );
            err
        })
    }

    async fn load_all_inner(&self, force_reload: bool) -> SyncResult<Vec<Resource>> {
        let list_key = self.spec.list_key();
        let cached = if force_reload {
            None
        } else {
            self.cache.borrow_mut().get(&list_key)
        };

        let resources = match cached {
            Some(Value::Array(items)) => items.into_iter().map(Resource::new).collect(),
            Some(_) | None => {
                let request = ApiRequest::get(self.spec.list_path());
                let body = self.client.request(&request).await?;
                let resources = parse_list(&body, &request.operation())?;
                let raw = Value::Array(resources.iter().map(|r| r.as_value().clone()).collect());
                self.cache.borrow_mut().set(list_key, raw);
                resources
            }
        };

        *self.resources.borrow_mut() = resources.clone();
        self.loaded.set(true);

        {
            let mut selectors = self.selectors.borrow_mut();
            for (_, selector) in selectors.iter_mut() {
                selector.load_options(&resources);
            }
        }

        // Auto-select a sole resource, strictly after load_options so the
        // set_value lands on fully-populated selectors.
        if resources.len() == 1 && self.current.borrow().is_none() {
            if let Some(id) = self.spec.id_of(&resources[0]).map(str::to_string) {
                tracing::debug!(
                    collection = %self.spec.collection(),
                    id = %id,
                    "Auto-selecting sole resource"
                );
                self.set_current_selection(Some(&id));
            }
        }

        self.emit(SyncEvent::Loaded {
            resources: resources.clone(),
        });
        Ok(resources)
    }

    /// Fetch one entity, through the cache.
    pub async fn get_detail(&self, id: &str, force_reload: bool) -> SyncResult<Resource> {
        let key = self.spec.detail_key(id);
        if !force_reload {
            if let Some(value) = self.cache.borrow_mut().get(&key) {
                return Ok(Resource::new(value));
            }
        }

        let request = ApiRequest::get(self.spec.detail_path(id));
        let body = self.client.request(&request).await?;
        let resource = parse_detail(&body, self.spec.singular(), &request.operation())?;
        self.cache.borrow_mut().set(key, resource.as_value().clone());
        Ok(resource)
    }

    /// Fetch a nested sub-resource collection (e.g. a company's
    /// qualifications), through the cache. Invalidated together with the
    /// owning entity.
    pub async fn get_subresource(
        &self,
        id: &str,
        subresource: &str,
        force_reload: bool,
    ) -> SyncResult<Vec<Resource>> {
        let key = self.spec.subresource_key(id, subresource);
        if !force_reload {
            if let Some(Value::Array(items)) = self.cache.borrow_mut().get(&key) {
                return Ok(items.into_iter().map(Resource::new).collect());
            }
        }

        let request = ApiRequest::get(self.spec.subresource_path(id, subresource));
        let body = self.client.request(&request).await?;
        let resources = parse_list(&body, &request.operation())?;
        let raw = Value::Array(resources.iter().map(|r| r.as_value().clone()).collect());
        self.cache.borrow_mut().set(key, raw);
        Ok(resources)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create (no id) or update (with id) an entity. On success the
    /// entity's cache keys are invalidated, the list is reloaded, and
    /// [`SyncEvent::Saved`] is emitted with the raw server envelope.
    pub async fn save(&self, data: Value, id: Option<&str>) -> SyncResult<MutationOutcome> {
        let request = match id {
            Some(id) => ApiRequest::put(self.spec.detail_path(id), data),
            None => ApiRequest::post(self.spec.list_path(), data),
        };
        let operation = request.operation();
        let body = self.client.request(&request).await?;
        let outcome = parse_mutation(&body, self.spec.id_field(), &operation)?;

        let entity_id = outcome.id.clone().or_else(|| id.map(str::to_string));
        match &entity_id {
            Some(entity_id) => {
                self.cache.borrow_mut().invalidate_entity(&self.spec, entity_id);
            }
            // Without an id only the aggregate list can be stale.
            None => self.cache.borrow_mut().invalidate(&self.spec.list_key()),
        }

        self.load_all(true).await?;
        self.emit(SyncEvent::Saved {
            id: entity_id,
            result: outcome.raw.clone(),
        });
        Ok(outcome)
    }

    /// Delete an entity. On success: invalidate, reload, emit
    /// [`SyncEvent::Deleted`].
    pub async fn delete(&self, id: &str) -> SyncResult<MutationOutcome> {
        let request = ApiRequest::delete(self.spec.detail_path(id));
        let operation = request.operation();
        let body = self.client.request(&request).await?;
        let outcome = parse_mutation(&body, self.spec.id_field(), &operation)?;

        self.cache.borrow_mut().invalidate_entity(&self.spec, id);
        self.load_all(true).await?;
        self.emit(SyncEvent::Deleted {
            id: id.to_string(),
            result: outcome.raw.clone(),
        });
        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Selectors
    // ------------------------------------------------------------------

    /// Register a selector under a caller-chosen id, replacing any previous
    /// registration with the same id. If data is already loaded, the
    /// current list and selection are pushed immediately, without waiting
    /// for the next load.
    pub fn register_selector(&self, id: impl Into<String>, mut selector: Box<dyn Selector>) {
        let id = id.into();
        if self.loaded.get() {
            selector.load_options(&self.resources.borrow());
            selector.set_value(self.current.borrow().as_deref());
        }

        let mut selectors = self.selectors.borrow_mut();
        if let Some(slot) = selectors.iter_mut().find(|(sid, _)| *sid == id) {
            slot.1 = selector;
        } else {
            selectors.push((id, selector));
        }
    }

    /// Remove a selector registration. Unknown ids are a no-op.
    pub fn unregister_selector(&self, id: &str) {
        self.selectors.borrow_mut().retain(|(sid, _)| sid != id);
    }

    pub fn selector_count(&self) -> usize {
        self.selectors.borrow().len()
    }

    /// Change the current selection.
    ///
    /// A no-op when unchanged. Otherwise every registered selector receives
    /// `set_value` (in registration order, before this call returns), and a
    /// [`SyncEvent::SelectionChanged`] is emitted carrying the id and the
    /// full resource resolved from the in-memory list.
    pub fn set_current_selection(&self, id: Option<&str>) {
        if self.current.borrow().as_deref() == id {
            return;
        }
        *self.current.borrow_mut() = id.map(str::to_string);

        {
            let mut selectors = self.selectors.borrow_mut();
            for (_, selector) in selectors.iter_mut() {
                selector.set_value(id);
            }
        }

        let resource = id.and_then(|id| {
            self.resources
                .borrow()
                .iter()
                .find(|r| self.spec.id_of(r) == Some(id))
                .cloned()
        });
        self.emit(SyncEvent::SelectionChanged {
            id: id.map(str::to_string),
            resource,
        });
    }

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    pub fn subscribe(&self, listener: impl FnMut(&SyncEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn emit(&self, event: SyncEvent) {
        tracing::debug!(
            collection = %self.spec.collection(),
            event = event.name(),
            "Emitting sync event"
        );
        let mut listeners = self.listeners.borrow_mut();
        for (_, listener) in listeners.iter_mut() {
            listener(&event);
        }
    }
}
