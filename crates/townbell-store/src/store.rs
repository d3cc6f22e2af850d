use async_trait::async_trait;

use crate::error::Result;

/// A business record, as far as this pipeline reads it.
#[derive(Debug, Clone)]
pub struct Business {
    pub id: String,
    /// Display name shown in notification titles (`admin_name` field).
    /// Absent or empty means the caller should fall back to a default label.
    pub admin_name: Option<String>,
}

/// A user record, as far as this pipeline reads it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    /// Push-delivery token (`fcmToken` field). A user with no token is a
    /// normal state, not an error.
    pub fcm_token: Option<String>,
}

/// Read-only access to the persistent record store.
///
/// Implementations must be `Send + Sync` so a single client can be shared as
/// an `Arc<dyn RecordStore>` across concurrent pipeline runs.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup of one business record. `Ok(None)` when the record does
    /// not exist.
    async fn fetch_business(&self, business_id: &str) -> Result<Option<Business>>;

    /// Enumerate the follower sub-collection of one business and return the
    /// follower user identifiers.
    ///
    /// The result is one logical set — implementations may page internally.
    /// Order carries no meaning and callers must not rely on it.
    async fn list_follower_ids(&self, business_id: &str) -> Result<Vec<String>>;

    /// Point lookup of one user record. `Ok(None)` when the record does not
    /// exist.
    async fn fetch_user(&self, user_id: &str) -> Result<Option<User>>;
}
