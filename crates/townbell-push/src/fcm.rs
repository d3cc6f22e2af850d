//! FCM multicast backend for [`PushTransport`].
//!
//! Uses the legacy HTTP endpoint: one POST with `registration_ids` (max 500)
//! authenticated by `Authorization: key=<server key>`. The response carries
//! aggregate `success`/`failure` counts plus a per-token `results` array in
//! request order.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use townbell_core::config::PushConfig;

use crate::error::{PushError, Result};
use crate::transport::{PushTransport, MULTICAST_BATCH_MAX};
use crate::types::{DispatchReport, MulticastMessage, Notification, TokenOutcome};

pub struct FcmTransport {
    client: reqwest::Client,
    endpoint: String,
    server_key: String,
}

impl FcmTransport {
    pub fn new(config: &PushConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            server_key: config.server_key.clone(),
        }
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn send_multicast(&self, message: &MulticastMessage) -> Result<DispatchReport> {
        let body = FcmRequest::from_message(message);
        debug!(tokens = message.tokens.len(), "sending FCM multicast");

        let resp = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("key={}", self.server_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "FCM API error");
            return Err(PushError::Api {
                status,
                message: text,
            });
        }

        let api_resp: FcmResponse = resp
            .json()
            .await
            .map_err(|e| PushError::Parse(e.to_string()))?;

        Ok(api_resp.into_report(&message.tokens))
    }

    fn max_tokens_per_call(&self) -> usize {
        MULTICAST_BATCH_MAX
    }
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct FcmRequest<'a> {
    registration_ids: &'a [String],
    notification: &'a Notification,
    data: &'a BTreeMap<String, String>,
}

impl<'a> FcmRequest<'a> {
    fn from_message(message: &'a MulticastMessage) -> Self {
        Self {
            registration_ids: &message.tokens,
            notification: &message.notification,
            data: &message.data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FcmResponse {
    #[serde(default)]
    success: usize,
    #[serde(default)]
    failure: usize,
    #[serde(default)]
    results: Vec<FcmResult>,
}

#[derive(Debug, Deserialize)]
struct FcmResult {
    #[serde(default)]
    error: Option<String>,
}

impl FcmResponse {
    /// Pair the positional results with the tokens they were sent for.
    fn into_report(self, tokens: &[String]) -> DispatchReport {
        let outcomes = self
            .results
            .into_iter()
            .zip(tokens.iter())
            .map(|(result, token)| TokenOutcome {
                token: token.clone(),
                error: result.error,
            })
            .collect();

        DispatchReport {
            success_count: self.success,
            failure_count: self.failure,
            outcomes,
        }
    }
}
