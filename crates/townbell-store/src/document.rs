//! Firestore REST document model.
//!
//! Only the slice of the wire format this service reads is modelled: document
//! names, string fields, and list pages. Every other value kind deserializes
//! into `FieldValue` with all slots `None` and is simply ignored.

use std::collections::HashMap;

use serde::Deserialize;

/// One document as returned by the Firestore REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Full resource name, e.g.
    /// `projects/p/databases/(default)/documents/businesses/biz-1`.
    pub name: String,

    #[serde(default)]
    pub fields: HashMap<String, FieldValue>,
}

/// A typed field value. Firestore encodes each value as a single-key object
/// (`{"stringValue": "..."}`); non-string kinds are ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    #[serde(default)]
    pub string_value: Option<String>,
}

/// One page of a collection listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    /// Absent entirely when the collection (or page) is empty.
    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl Document {
    /// The document identifier — the last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Return a string field, treating empty and whitespace-only values as
    /// absent.
    pub fn string_field(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|v| v.string_value.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> Document {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn id_is_last_name_segment() {
        let d = doc(r#"{"name":"projects/p/databases/(default)/documents/users/u-42"}"#);
        assert_eq!(d.id(), "u-42");
    }

    #[test]
    fn string_field_extracts_string_value() {
        let d = doc(
            r#"{"name":"x/businesses/b","fields":{"admin_name":{"stringValue":"Cafe Lumo"}}}"#,
        );
        assert_eq!(d.string_field("admin_name"), Some("Cafe Lumo"));
    }

    #[test]
    fn empty_string_field_reads_as_absent() {
        let d = doc(r#"{"name":"x/b","fields":{"admin_name":{"stringValue":"   "}}}"#);
        assert_eq!(d.string_field("admin_name"), None);
    }

    #[test]
    fn non_string_field_reads_as_absent() {
        let d = doc(r#"{"name":"x/b","fields":{"capacity":{"integerValue":"120"}}}"#);
        assert_eq!(d.string_field("capacity"), None);
    }

    #[test]
    fn missing_field_reads_as_absent() {
        let d = doc(r#"{"name":"x/b"}"#);
        assert_eq!(d.string_field("fcmToken"), None);
    }

    #[test]
    fn empty_list_page_has_no_documents() {
        let page: ListPage = serde_json::from_str("{}").unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn list_page_parses_documents_and_token() {
        let page: ListPage = serde_json::from_str(
            r#"{"documents":[{"name":"x/followers/u-1"},{"name":"x/followers/u-2"}],
                "nextPageToken":"tok"}"#,
        )
        .unwrap();
        let ids: Vec<&str> = page.documents.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["u-1", "u-2"]);
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));
    }
}
