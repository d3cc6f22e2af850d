//! Notification composer — pure function of the resolved inputs.

use std::collections::BTreeMap;

use townbell_push::{MulticastMessage, Notification};

/// Click-routing marker understood by the mobile client.
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";
/// Type tag identifying a new-event notification.
pub const TYPE_NEW_EVENT: &str = "new_event";

/// Fixed call-to-action line appended to the notification body.
const CALL_TO_ACTION: &str = "詳細をチェックしてみよう！";

/// Build the multicast payload for a newly registered event.
///
/// Deterministic: same inputs, same payload. No I/O.
pub fn compose_new_event_message(
    business_name: &str,
    event_name: &str,
    event_id: &str,
    business_id: &str,
    tokens: Vec<String>,
) -> MulticastMessage {
    let data = BTreeMap::from([
        ("click_action".to_string(), CLICK_ACTION.to_string()),
        ("type".to_string(), TYPE_NEW_EVENT.to_string()),
        ("eventId".to_string(), event_id.to_string()),
        ("businessId".to_string(), business_id.to_string()),
    ]);

    MulticastMessage {
        notification: Notification {
            title: format!("{business_name} が新しいイベントを登録しました！"),
            body: format!("{event_name}\n{CALL_TO_ACTION}"),
        },
        data,
        tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_and_body_follow_the_template() {
        let msg = compose_new_event_message(
            "Cafe Lumo",
            "Live Jazz Night",
            "ev-1",
            "biz-1",
            vec!["tA".into()],
        );

        assert_eq!(
            msg.notification.title,
            "Cafe Lumo が新しいイベントを登録しました！"
        );
        assert_eq!(
            msg.notification.body,
            "Live Jazz Night\n詳細をチェックしてみよう！"
        );
    }

    #[test]
    fn data_carries_routing_fields_and_identifiers() {
        let msg = compose_new_event_message("n", "e", "ev-7", "biz-7", Vec::new());

        assert_eq!(msg.data["click_action"], CLICK_ACTION);
        assert_eq!(msg.data["type"], TYPE_NEW_EVENT);
        assert_eq!(msg.data["eventId"], "ev-7");
        assert_eq!(msg.data["businessId"], "biz-7");
    }

    #[test]
    fn composition_is_deterministic() {
        let a = compose_new_event_message("n", "e", "ev", "biz", vec!["t".into()]);
        let b = compose_new_event_message("n", "e", "ev", "biz", vec!["t".into()]);
        assert_eq!(a, b);
    }
}
