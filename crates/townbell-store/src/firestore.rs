//! Firestore REST backend for [`RecordStore`].
//!
//! Point gets hit `GET {base}/{doc path}`; sub-collection scans hit the same
//! path with `pageSize`/`pageToken` and follow `nextPageToken` until the
//! store stops returning one.

use async_trait::async_trait;
use tracing::debug;

use townbell_core::config::StoreConfig;

use crate::document::{Document, ListPage};
use crate::error::{Result, StoreError};
use crate::store::{Business, RecordStore, User};

const BUSINESSES: &str = "businesses";
const USERS: &str = "users";
const FOLLOWERS: &str = "followers";

/// Field carrying a business display name.
const FIELD_ADMIN_NAME: &str = "admin_name";
/// Field carrying a user's push-delivery token.
const FIELD_FCM_TOKEN: &str = "fcmToken";

pub struct FirestoreStore {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    database_id: String,
    auth_token: Option<String>,
    page_size: u32,
}

impl FirestoreStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            project_id: config.project_id.clone(),
            database_id: config.database_id.clone(),
            auth_token: config.auth_token.clone(),
            page_size: config.page_size.max(1),
        }
    }

    fn documents_url(&self, path: &str) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.base_url, self.project_id, self.database_id, path
        )
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// Fetch one document. `Ok(None)` on 404.
    async fn get_document(&self, path: &str) -> Result<Option<Document>> {
        let url = self.documents_url(path);
        debug!(%path, "store: point get");

        let resp = self.apply_auth(self.client.get(&url)).send().await?;

        if resp.status().as_u16() == 404 {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(StoreError::Api { status, message });
        }

        let doc: Document = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;
        Ok(Some(doc))
    }

    /// Enumerate every document id in a sub-collection, following pagination.
    async fn list_collection_ids(&self, path: &str) -> Result<Vec<String>> {
        let url = self.documents_url(path);
        let mut ids = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .get(&url)
                .query(&[("pageSize", self.page_size.to_string())]);
            if let Some(ref token) = page_token {
                req = req.query(&[("pageToken", token.as_str())]);
            }

            let resp = self.apply_auth(req).send().await?;

            // A 404 here means the parent document has no such sub-collection,
            // which is the same as an empty follower set.
            if resp.status().as_u16() == 404 {
                return Ok(ids);
            }
            if !resp.status().is_success() {
                let status = resp.status().as_u16();
                let message = resp.text().await.unwrap_or_default();
                return Err(StoreError::Api { status, message });
            }

            let page: ListPage = resp
                .json()
                .await
                .map_err(|e| StoreError::Parse(e.to_string()))?;

            ids.extend(page.documents.iter().map(|d| d.id().to_string()));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(%path, count = ids.len(), "store: collection scan complete");
        Ok(ids)
    }
}

#[async_trait]
impl RecordStore for FirestoreStore {
    async fn fetch_business(&self, business_id: &str) -> Result<Option<Business>> {
        let doc = self
            .get_document(&format!("{BUSINESSES}/{business_id}"))
            .await?;
        Ok(doc.map(|d| Business {
            id: d.id().to_string(),
            admin_name: d.string_field(FIELD_ADMIN_NAME).map(String::from),
        }))
    }

    async fn list_follower_ids(&self, business_id: &str) -> Result<Vec<String>> {
        self.list_collection_ids(&format!("{BUSINESSES}/{business_id}/{FOLLOWERS}"))
            .await
    }

    async fn fetch_user(&self, user_id: &str) -> Result<Option<User>> {
        let doc = self.get_document(&format!("{USERS}/{user_id}")).await?;
        Ok(doc.map(|d| User {
            id: d.id().to_string(),
            fcm_token: d.string_field(FIELD_FCM_TOKEN).map(String::from),
        }))
    }
}
