use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Fields owned by the store; clients may not write them
const SYSTEM_FIELDS: &[&str] = &["id", "_id", "created_at", "updated_at"];

/// Always forced to the requester, so any client value is dropped silently
const OWNER_FIELD: &str = "owner";

/// Errors raised while turning API input into log content
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("System field '{0}' cannot be set via API input")]
    SystemFieldNotAllowed(String),
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),
    #[error("Invalid log identifier: {0}")]
    InvalidId(String),
}

/// Request body for create and update: `{ "log": { ... } }`
#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub log: Value,
}

/// Sanitized content fields ready for the store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogPayload {
    fields: Map<String, Value>,
}

impl LogPayload {
    /// Build content for a new log.
    ///
    /// Drops `owner`, rejects system fields and requires every name in
    /// `required` to be present and non-null.
    pub fn for_create(input: Value, required: &[String]) -> Result<Self, RecordError> {
        let mut fields = into_object(input)?;
        fields.remove(OWNER_FIELD);
        reject_system_fields(&fields)?;

        for name in required {
            match fields.get(name) {
                Some(value) if !value.is_null() => {}
                _ => return Err(RecordError::MissingRequiredField(name.clone())),
            }
        }

        Ok(Self { fields })
    }

    /// Build the change set for an existing log.
    ///
    /// An empty string means "leave this field alone" and is removed before
    /// anything else is checked. `null` is kept and stored as-is.
    pub fn for_update(input: Value) -> Result<Self, RecordError> {
        let mut fields = into_object(input)?;
        fields.remove(OWNER_FIELD);
        fields.retain(|_, value| !matches!(value, Value::String(s) if s.is_empty()));
        reject_system_fields(&fields)?;

        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// Parse a path identifier. A malformed id is a client error, not a miss.
pub fn parse_log_id(raw: &str) -> Result<Uuid, RecordError> {
    Uuid::parse_str(raw).map_err(|_| RecordError::InvalidId(raw.to_string()))
}

fn into_object(input: Value) -> Result<Map<String, Value>, RecordError> {
    match input {
        Value::Object(map) => Ok(map),
        _ => Err(RecordError::InvalidJson("Expected 'log' to be a JSON object".to_string())),
    }
}

fn reject_system_fields(fields: &Map<String, Value>) -> Result<(), RecordError> {
    match SYSTEM_FIELDS.iter().find(|name| fields.contains_key(**name)) {
        Some(name) => Err(RecordError::SystemFieldNotAllowed(name.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn required() -> Vec<String> {
        vec!["title".to_string()]
    }

    #[test]
    fn create_drops_client_owner() {
        let payload = LogPayload::for_create(
            json!({ "title": "Run", "owner": "someone-else" }),
            &required(),
        )
        .unwrap();

        assert_eq!(payload.fields().get("title"), Some(&json!("Run")));
        assert!(payload.fields().get("owner").is_none());
    }

    #[test]
    fn create_requires_configured_fields() {
        let err = LogPayload::for_create(json!({ "body": "no title" }), &required()).unwrap_err();
        assert!(matches!(err, RecordError::MissingRequiredField(f) if f == "title"));

        let err = LogPayload::for_create(json!({ "title": null }), &required()).unwrap_err();
        assert!(matches!(err, RecordError::MissingRequiredField(_)));
    }

    #[test]
    fn create_rejects_system_fields() {
        let err = LogPayload::for_create(json!({ "title": "x", "created_at": "2020-01-01" }), &required())
            .unwrap_err();
        assert!(matches!(err, RecordError::SystemFieldNotAllowed(f) if f == "created_at"));
    }

    #[test]
    fn create_rejects_non_object() {
        let err = LogPayload::for_create(json!(["title"]), &required()).unwrap_err();
        assert!(matches!(err, RecordError::InvalidJson(_)));
    }

    #[test]
    fn update_strips_empty_strings_and_owner() {
        let payload = LogPayload::for_update(json!({
            "title": "",
            "body": "new body",
            "mood": null,
            "owner": "x",
            "count": 0,
        }))
        .unwrap();

        let fields = payload.fields();
        assert!(fields.get("title").is_none());
        assert!(fields.get("owner").is_none());
        assert_eq!(fields.get("body"), Some(&json!("new body")));
        assert_eq!(fields.get("mood"), Some(&Value::Null));
        assert_eq!(fields.get("count"), Some(&json!(0)));
    }

    #[test]
    fn update_of_only_blanks_is_empty() {
        let payload = LogPayload::for_update(json!({ "title": "", "owner": "x" })).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn update_ignores_blank_system_fields() {
        assert!(LogPayload::for_update(json!({ "id": "" })).unwrap().is_empty());
        assert!(LogPayload::for_update(json!({ "id": "abc" })).is_err());
    }

    #[test]
    fn parses_ids() {
        let id = Uuid::new_v4();
        assert_eq!(parse_log_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_log_id("5a7db6c74d55bc51bdf39793"), Err(RecordError::InvalidId(_))));
    }
}
