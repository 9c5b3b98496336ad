//! Decoding of the API's `{ success: bool, ... }` response envelopes.
//!
//! Every endpoint wraps its payload in a success envelope: lists carry
//! `data`, detail reads carry the singular entity field, mutations carry
//! the id field plus optional `message`/`error` text. A `success: false`
//! body on a 2xx response is an application-level rejection and is
//! surfaced immediately; the retry layer never sees it.

use bidsync_core::{Resource, SyncError, SyncResult};
use serde_json::Value;

/// Result of a create/update/delete call.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationOutcome {
    /// Entity id echoed by the server, when present.
    pub id: Option<String>,
    /// Human-readable server message, when present.
    pub message: Option<String>,
    /// The raw envelope, for callers that need more than id/message.
    pub raw: Value,
}

fn check_success(body: &Value, operation: &str) -> SyncResult<()> {
    match body.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(()),
        Some(false) => {
            let message = body
                .get("error")
                .or_else(|| body.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("server reported failure")
                .to_string();
            Err(SyncError::rejected(operation, message))
        }
        None => Err(SyncError::invalid_response(
            operation,
            "missing `success` field in envelope",
        )),
    }
}

/// Decode a `GET /{collection}` envelope into resources.
pub fn parse_list(body: &Value, operation: &str) -> SyncResult<Vec<Resource>> {
    check_success(body, operation)?;
    let data = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| SyncError::invalid_response(operation, "missing `data` array"))?;
    Ok(data.iter().cloned().map(Resource::new).collect())
}

/// Decode a `GET /{collection}/{id}` envelope into one resource. The
/// payload field is the collection's singular name (e.g. `company`).
pub fn parse_detail(body: &Value, singular: &str, operation: &str) -> SyncResult<Resource> {
    check_success(body, operation)?;
    let entity = body.get(singular).ok_or_else(|| {
        SyncError::invalid_response(operation, format!("missing `{}` field", singular))
    })?;
    Ok(Resource::new(entity.clone()))
}

/// Decode a mutation envelope (POST/PUT/DELETE).
pub fn parse_mutation(body: &Value, id_field: &str, operation: &str) -> SyncResult<MutationOutcome> {
    check_success(body, operation)?;
    let id = body
        .get(id_field)
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .filter(|s| !s.is_empty() && s != "null");
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);
    Ok(MutationOutcome {
        id,
        message,
        raw: body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_list() {
        let body = json!({
            "success": true,
            "data": [
                {"company_id": "C-1", "company_name": "Acme"},
                {"company_id": "C-2", "company_name": "Borealis"},
            ],
        });
        let resources = parse_list(&body, "GET /companies").unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].str_field("company_id"), Some("C-1"));
    }

    #[test]
    fn test_parse_list_rejection_carries_server_error() {
        let body = json!({"success": false, "error": "tenant suspended"});
        let err = parse_list(&body, "GET /companies").unwrap_err();
        assert!(matches!(err, SyncError::ApiRejected { .. }));
        assert!(format!("{}", err).contains("tenant suspended"));
    }

    #[test]
    fn test_parse_list_rejection_falls_back_to_message_field() {
        let body = json!({"success": false, "message": "not allowed"});
        let err = parse_list(&body, "GET /companies").unwrap_err();
        assert!(format!("{}", err).contains("not allowed"));
    }

    #[test]
    fn test_parse_list_without_envelope_is_invalid() {
        let body = json!([{"company_id": "C-1"}]);
        let err = parse_list(&body, "GET /companies").unwrap_err();
        assert!(matches!(err, SyncError::InvalidResponse { .. }));
    }

    #[test]
    fn test_parse_detail_uses_singular_field() {
        let body = json!({
            "success": true,
            "company": {"company_id": "C-1", "company_name": "Acme"},
        });
        let resource = parse_detail(&body, "company", "GET /companies/C-1").unwrap();
        assert_eq!(resource.str_field("company_name"), Some("Acme"));
    }

    #[test]
    fn test_parse_detail_missing_singular_field() {
        let body = json!({"success": true, "item": {}});
        let err = parse_detail(&body, "company", "GET /companies/C-1").unwrap_err();
        assert!(format!("{}", err).contains("`company`"));
    }

    #[test]
    fn test_parse_mutation_string_id() {
        let body = json!({"success": true, "company_id": "C-7", "message": "created"});
        let outcome = parse_mutation(&body, "company_id", "POST /companies").unwrap();
        assert_eq!(outcome.id.as_deref(), Some("C-7"));
        assert_eq!(outcome.message.as_deref(), Some("created"));
    }

    #[test]
    fn test_parse_mutation_numeric_id_is_stringified() {
        let body = json!({"success": true, "company_id": 42});
        let outcome = parse_mutation(&body, "company_id", "POST /companies").unwrap();
        assert_eq!(outcome.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_parse_mutation_without_id() {
        let body = json!({"success": true, "message": "deleted"});
        let outcome = parse_mutation(&body, "company_id", "DELETE /companies/C-1").unwrap();
        assert_eq!(outcome.id, None);
        assert_eq!(outcome.message.as_deref(), Some("deleted"));
    }
}
