use chrono::{DateTime, Utc};
use kanban_core::{KanbanError, KanbanResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Layout of a stored collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatVersion {
    /// Bare JSON array, written before collections were versioned.
    Legacy,
    V1,
}

impl FormatVersion {
    pub const CURRENT: FormatVersion = FormatVersion::V1;

    pub fn as_u32(self) -> u32 {
        match self {
            FormatVersion::Legacy => 0,
            FormatVersion::V1 => 1,
        }
    }

    pub fn from_u32(version: u32) -> Option<Self> {
        match version {
            0 => Some(FormatVersion::Legacy),
            1 => Some(FormatVersion::V1),
            _ => None,
        }
    }
}

/// On-disk wrapper for one collection: `{"version", "saved_at", "items"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnvelope<T> {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub items: Vec<T>,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    saved_at: DateTime<Utc>,
    items: &'a [T],
}

/// A decoded collection plus what it was stored as.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub version: FormatVersion,
    pub saved_at: Option<DateTime<Utc>>,
    pub items: Vec<T>,
}

/// Works out which layout `value` was written in.
pub fn detect_version(value: &Value) -> KanbanResult<FormatVersion> {
    if value.is_array() {
        return Ok(FormatVersion::Legacy);
    }
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .ok_or_else(|| KanbanError::Serialization("missing format version".to_string()))?;
    u32::try_from(version)
        .ok()
        .and_then(FormatVersion::from_u32)
        .filter(|v| *v != FormatVersion::Legacy)
        .ok_or_else(|| KanbanError::Serialization(format!("Unsupported format version: {}", version)))
}

pub fn encode<T: Serialize>(items: &[T]) -> KanbanResult<String> {
    let envelope = EnvelopeRef {
        version: FormatVersion::CURRENT.as_u32(),
        saved_at: Utc::now(),
        items,
    };
    serde_json::to_string(&envelope).map_err(|e| KanbanError::Serialization(e.to_string()))
}

/// Parses a stored value in any supported layout. Legacy arrays are upgraded
/// in memory; the next save writes them back as a current envelope.
pub fn decode<T: DeserializeOwned>(raw: &str) -> KanbanResult<Decoded<T>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| KanbanError::Serialization(e.to_string()))?;

    match detect_version(&value)? {
        FormatVersion::Legacy => {
            let items = serde_json::from_value(value)
                .map_err(|e| KanbanError::Serialization(e.to_string()))?;
            Ok(Decoded {
                version: FormatVersion::Legacy,
                saved_at: None,
                items,
            })
        }
        FormatVersion::V1 => {
            let envelope: CollectionEnvelope<T> = serde_json::from_value(value)
                .map_err(|e| KanbanError::Serialization(e.to_string()))?;
            Ok(Decoded {
                version: FormatVersion::V1,
                saved_at: Some(envelope.saved_at),
                items: envelope.items,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{seed, Column, Task};
    use serde_json::json;

    #[test]
    fn test_encode_writes_current_envelope() {
        let raw = encode(&seed::default_columns()).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], json!(1));
        assert!(value["saved_at"].is_string());
        assert_eq!(value["items"][0], json!({"id": "todo", "title": "To Do"}));
    }

    #[test]
    fn test_decode_current_envelope() {
        let raw = encode(&seed::default_tasks()).unwrap();
        let decoded: Decoded<Task> = decode(&raw).unwrap();
        assert_eq!(decoded.version, FormatVersion::V1);
        assert!(decoded.saved_at.is_some());
        assert_eq!(decoded.items, seed::default_tasks());
    }

    #[test]
    fn test_decode_legacy_array_with_numeric_ids() {
        let raw = r#"[{"id": 7, "columnId": "todo", "content": "Legacy task"}]"#;
        let decoded: Decoded<Task> = decode(raw).unwrap();
        assert_eq!(decoded.version, FormatVersion::Legacy);
        assert!(decoded.saved_at.is_none());
        assert_eq!(decoded.items[0].id, "7");
        assert_eq!(decoded.items[0].content, "Legacy task");
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let raw = r#"{"version": 9, "saved_at": "2024-01-01T00:00:00Z", "items": []}"#;
        assert!(matches!(
            decode::<Column>(raw),
            Err(KanbanError::Serialization(_))
        ));
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        assert!(decode::<Column>("not json").is_err());
        assert!(decode::<Column>(r#"{"items": []}"#).is_err());
        assert!(decode::<Column>(r#"[{"title": "no id"}]"#).is_err());
        assert!(decode::<Column>(r#"{"version": 0, "items": []}"#).is_err());
    }

    #[test]
    fn test_detect_version() {
        assert_eq!(detect_version(&json!([])).unwrap(), FormatVersion::Legacy);
        assert_eq!(
            detect_version(&json!({"version": 1})).unwrap(),
            FormatVersion::V1
        );
        assert!(detect_version(&json!({"version": "1"})).is_err());
    }
}
