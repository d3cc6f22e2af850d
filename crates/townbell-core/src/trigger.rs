use serde::{Deserialize, Serialize};

/// Record-creation notification for a new event document.
///
/// Delivered by the trigger mechanism after the record is durably committed,
/// at-least-once. The envelope carries the store-assigned identifier plus the
/// field data of the new record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreated {
    #[serde(rename = "eventId")]
    pub event_id: String,

    /// Field data of the created record. `None` when the trigger fired for a
    /// record with no readable data — the pipeline treats that as a no-op.
    #[serde(default)]
    pub data: Option<EventData>,
}

/// Field data of a new event record. Fields beyond the two the pipeline reads
/// are preserved verbatim in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventData {
    /// Identifier of the business that owns the event.
    #[serde(rename = "adminId", default)]
    pub admin_id: String,

    #[serde(rename = "eventName", default)]
    pub event_name: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_parses_with_extra_fields() {
        let json = r#"{
            "eventId": "ev-123",
            "data": {
                "adminId": "biz-1",
                "eventName": "Live Jazz Night",
                "venue": "Main Hall",
                "capacity": 120
            }
        }"#;
        let trigger: EventCreated = serde_json::from_str(json).unwrap();
        assert_eq!(trigger.event_id, "ev-123");

        let data = trigger.data.unwrap();
        assert_eq!(data.admin_id, "biz-1");
        assert_eq!(data.event_name, "Live Jazz Night");
        assert_eq!(data.extra["venue"], "Main Hall");
    }

    #[test]
    fn missing_data_is_none_not_an_error() {
        let trigger: EventCreated = serde_json::from_str(r#"{"eventId":"ev-9"}"#).unwrap();
        assert!(trigger.data.is_none());
    }
}
