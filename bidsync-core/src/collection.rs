//! Per-collection REST paths, id resolution, and cache key templates.

use crate::Resource;

/// Describes one remote resource collection.
///
/// A `CollectionSpec` owns everything that varies between entity types: the
/// REST path segments, the name of the id field in the JSON envelope, the
/// display-name field, and the fixed set of sub-resources. Cache keys are
/// derived from a statically-enumerated template set so that invalidation
/// scope stays auditable; there is no wildcard or pattern scan anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSpec {
    /// Plural path segment, e.g. `companies`.
    collection: String,
    /// Singular envelope field, e.g. `company`.
    singular: String,
    /// Primary id field on resources and mutation envelopes, e.g. `company_id`.
    id_field: String,
    /// Display-name field, e.g. `company_name`.
    display_field: String,
    /// Fixed set of nested sub-resources, e.g. `qualifications`.
    subresources: Vec<String>,
}

impl CollectionSpec {
    pub fn new(
        collection: impl Into<String>,
        singular: impl Into<String>,
        id_field: impl Into<String>,
        display_field: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            singular: singular.into(),
            id_field: id_field.into(),
            display_field: display_field.into(),
            subresources: Vec::new(),
        }
    }

    pub fn with_subresource(mut self, name: impl Into<String>) -> Self {
        self.subresources.push(name.into());
        self
    }

    /// The tender-domain company collection.
    pub fn companies() -> Self {
        Self::new("companies", "company", "company_id", "company_name")
            .with_subresource("qualifications")
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn singular(&self) -> &str {
        &self.singular
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn subresources(&self) -> &[String] {
        &self.subresources
    }

    // ------------------------------------------------------------------
    // REST paths
    // ------------------------------------------------------------------

    pub fn list_path(&self) -> String {
        format!("/{}", self.collection)
    }

    pub fn detail_path(&self, id: &str) -> String {
        format!("/{}/{}", self.collection, id)
    }

    pub fn subresource_path(&self, id: &str, subresource: &str) -> String {
        format!("/{}/{}/{}", self.collection, id, subresource)
    }

    pub fn subresource_item_path(&self, id: &str, subresource: &str, key: &str) -> String {
        format!("/{}/{}/{}/{}", self.collection, id, subresource, key)
    }

    // ------------------------------------------------------------------
    // Cache key templates
    // ------------------------------------------------------------------

    pub fn list_key(&self) -> String {
        format!("{}:list", self.singular)
    }

    pub fn detail_key(&self, id: &str) -> String {
        format!("{}:{}", self.singular, id)
    }

    pub fn subresource_key(&self, id: &str, subresource: &str) -> String {
        format!("{}:{}:{}", self.singular, id, subresource)
    }

    /// Every cache key affected by a mutation of the given entity: the
    /// detail key, one key per sub-resource, and the aggregate list key.
    pub fn invalidation_keys(&self, id: &str) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.subresources.len() + 2);
        keys.push(self.detail_key(id));
        for sub in &self.subresources {
            keys.push(self.subresource_key(id, sub));
        }
        keys.push(self.list_key());
        keys
    }

    // ------------------------------------------------------------------
    // Resource field resolution
    // ------------------------------------------------------------------

    /// Resolve a resource's id: the collection's id field first, then the
    /// generic `id` fallback.
    pub fn id_of<'a>(&self, resource: &'a Resource) -> Option<&'a str> {
        resource
            .str_field(&self.id_field)
            .or_else(|| resource.str_field("id"))
    }

    /// Resolve a resource's display name, falling back to `name`.
    pub fn display_name_of<'a>(&self, resource: &'a Resource) -> Option<&'a str> {
        resource
            .str_field(&self.display_field)
            .or_else(|| resource.str_field("name"))
    }
}
