//! Read-side resolvers: business display name, follower set, token set.
//!
//! All three are best-effort readers over the record store. Name and token
//! resolution absorb their own failures (a bad record must not deny delivery
//! to everyone else); only the follower scan propagates errors, because there
//! is no sensible fallback for "we could not learn who to notify".

use std::collections::HashSet;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, warn};

use townbell_store::{RecordStore, StoreError};

/// Label used when a business record or its display name is missing.
pub const DEFAULT_BUSINESS_NAME: &str = "事業者";

/// In-flight cap for the per-follower user reads.
const MAX_CONCURRENT_USER_READS: usize = 16;

/// Resolve a business identifier to its display name.
///
/// Missing record, missing/empty name field, and read errors all degrade to
/// [`DEFAULT_BUSINESS_NAME`] — this step never fails the pipeline.
pub async fn resolve_business_name(store: &dyn RecordStore, business_id: &str) -> String {
    match store.fetch_business(business_id).await {
        Ok(Some(business)) => match business.admin_name {
            Some(name) => name,
            None => {
                debug!(business_id, "business has no display name; using default");
                DEFAULT_BUSINESS_NAME.to_string()
            }
        },
        Ok(None) => {
            debug!(business_id, "business record not found; using default name");
            DEFAULT_BUSINESS_NAME.to_string()
        }
        Err(e) => {
            warn!(business_id, error = %e, "business read failed; using default name");
            DEFAULT_BUSINESS_NAME.to_string()
        }
    }
}

/// Enumerate the follower user identifiers of one business.
///
/// An empty set is a valid terminal state for the pipeline. Store errors
/// propagate to the orchestrator.
pub async fn enumerate_followers(
    store: &dyn RecordStore,
    business_id: &str,
) -> Result<Vec<String>, StoreError> {
    let ids = store.list_follower_ids(business_id).await?;
    debug!(business_id, followers = ids.len(), "followers enumerated");
    Ok(ids)
}

/// Resolve a follower-identifier set to the set of push tokens.
///
/// One independent user read per follower, at most
/// [`MAX_CONCURRENT_USER_READS`] in flight, joined before returning. Missing
/// records, missing token fields, and individual read errors contribute
/// nothing and never abort the join. Duplicate tokens are collapsed.
pub async fn resolve_tokens(store: &dyn RecordStore, follower_ids: &[String]) -> Vec<String> {
    // Named helper instead of a closure returning an async block: the closure
    // form trips rustc's "implementation of `FnOnce` is not general enough"
    // higher-ranked lifetime limitation when this future is spawned.
    async fn resolve_one(store: &dyn RecordStore, user_id: &str) -> Option<String> {
        match store.fetch_user(user_id).await {
            Ok(Some(user)) => {
                if user.fcm_token.is_none() {
                    debug!(user_id, "follower has no push token");
                }
                user.fcm_token
            }
            Ok(None) => {
                debug!(user_id, "follower user record not found");
                None
            }
            Err(e) => {
                warn!(user_id, error = %e, "follower user read failed; skipping");
                None
            }
        }
    }

    let resolved: Vec<Option<String>> = stream::iter(follower_ids.iter().cloned())
        .map(|user_id| async move { resolve_one(store, &user_id).await })
        .buffer_unordered(MAX_CONCURRENT_USER_READS)
        .collect()
        .await;

    // Merge after the join: collapse duplicates, drop the misses.
    let mut seen = HashSet::new();
    resolved
        .into_iter()
        .flatten()
        .filter(|token| !token.is_empty())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use async_trait::async_trait;
    use townbell_store::{Business, User};

    /// Store fake: fixed user map, optional per-user read error, no businesses.
    struct UserMapStore {
        users: HashMap<String, Option<String>>,
        failing: HashSet<String>,
    }

    impl UserMapStore {
        fn new(entries: &[(&str, Option<&str>)]) -> Self {
            Self {
                users: entries
                    .iter()
                    .map(|(id, token)| (id.to_string(), token.map(String::from)))
                    .collect(),
                failing: HashSet::new(),
            }
        }

        fn failing(mut self, user_id: &str) -> Self {
            self.failing.insert(user_id.to_string());
            self
        }
    }

    #[async_trait]
    impl RecordStore for UserMapStore {
        async fn fetch_business(
            &self,
            _business_id: &str,
        ) -> townbell_store::Result<Option<Business>> {
            Ok(None)
        }

        async fn list_follower_ids(
            &self,
            _business_id: &str,
        ) -> townbell_store::Result<Vec<String>> {
            Ok(self.users.keys().cloned().collect())
        }

        async fn fetch_user(&self, user_id: &str) -> townbell_store::Result<Option<User>> {
            if self.failing.contains(user_id) {
                return Err(StoreError::Api {
                    status: 503,
                    message: "backend unavailable".into(),
                });
            }
            Ok(self.users.get(user_id).map(|token| User {
                id: user_id.to_string(),
                fcm_token: token.clone(),
            }))
        }
    }

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn tokenless_followers_are_omitted() {
        let store = UserMapStore::new(&[("u1", Some("tA")), ("u2", None)]);
        let tokens = resolve_tokens(&store, &ids(&["u1", "u2"])).await;
        assert_eq!(tokens, vec!["tA"]);
    }

    #[tokio::test]
    async fn missing_user_records_are_omitted() {
        let store = UserMapStore::new(&[("u1", Some("tA"))]);
        let tokens = resolve_tokens(&store, &ids(&["u1", "ghost"])).await;
        assert_eq!(tokens, vec!["tA"]);
    }

    #[tokio::test]
    async fn read_failure_degrades_instead_of_aborting() {
        let store =
            UserMapStore::new(&[("u1", Some("tA")), ("u2", Some("tB")), ("u3", Some("tC"))])
                .failing("u2");
        let mut tokens = resolve_tokens(&store, &ids(&["u1", "u2", "u3"])).await;
        tokens.sort();
        assert_eq!(tokens, vec!["tA", "tC"]);
    }

    #[tokio::test]
    async fn shared_tokens_are_collapsed() {
        let store = UserMapStore::new(&[("u1", Some("tX")), ("u2", Some("tX"))]);
        let tokens = resolve_tokens(&store, &ids(&["u1", "u2"])).await;
        assert_eq!(tokens, vec!["tX"]);
    }

    #[tokio::test]
    async fn empty_follower_set_resolves_to_nothing() {
        let store = UserMapStore::new(&[]);
        let tokens = resolve_tokens(&store, &[]).await;
        assert!(tokens.is_empty());
    }

    #[tokio::test]
    async fn business_name_defaults_when_record_missing() {
        let store = UserMapStore::new(&[]);
        let name = resolve_business_name(&store, "nope").await;
        assert_eq!(name, DEFAULT_BUSINESS_NAME);
    }
}
