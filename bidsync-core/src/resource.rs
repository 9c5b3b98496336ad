//! Opaque server-managed records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque JSON-shaped record identified by an id field.
///
/// The synchronization layer never interprets fields beyond the id and
/// display name (resolved through [`crate::CollectionSpec`]); all other
/// interpretation is caller-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Resource(Value);

impl Resource {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw field lookup. Returns `None` for non-object resources.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.as_object().and_then(|obj| obj.get(field))
    }

    /// Field lookup for string-valued fields.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Resource {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_access() {
        let resource = Resource::new(json!({
            "company_id": "C-17",
            "company_name": "Acme Construction",
            "rating": 4,
        }));
        assert_eq!(resource.str_field("company_id"), Some("C-17"));
        assert_eq!(resource.str_field("rating"), None);
        assert_eq!(resource.get("rating"), Some(&json!(4)));
        assert_eq!(resource.get("missing"), None);
    }

    #[test]
    fn test_non_object_resource_has_no_fields() {
        let resource = Resource::new(json!("just a string"));
        assert_eq!(resource.get("id"), None);
    }
}
