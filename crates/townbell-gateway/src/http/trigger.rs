//! Trigger ingress endpoint — POST /triggers/event-created.
//!
//! Receives the record-creation notification for a new event document,
//! authenticates it per `gateway.trigger` config, and runs the fan-out
//! pipeline as a detached task. The response never reflects pipeline
//! outcome: delivery is best-effort and the trigger mechanism must treat
//! the invocation as completed regardless (otherwise an at-least-once
//! upstream would retry forever on our internal failures).

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use hmac::{Hmac, Mac};
use serde_json::{json, Value};
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::AppState;
use townbell_core::config::TriggerAuthMode;
use townbell_core::trigger::EventCreated;

type HmacSha256 = Hmac<Sha256>;

/// POST /triggers/event-created
///
/// Returns 202 as soon as the envelope is parsed and the pipeline task is
/// spawned; 401 on auth failure; 400 on a malformed envelope.
pub async fn trigger_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let trigger_cfg = &state.config.gateway.trigger;

    match &trigger_cfg.auth_mode {
        TriggerAuthMode::HmacSha256 => {
            verify_hmac_sha256(&headers, &body, trigger_cfg.secret.as_deref())
                .map_err(|e| auth_error(&e))?;
        }
        TriggerAuthMode::BearerToken => {
            verify_bearer_token(&headers, trigger_cfg.secret.as_deref())
                .map_err(|e| auth_error(&e))?;
        }
        TriggerAuthMode::None => {
            // No authentication — operator explicitly opted out.
        }
    }

    let trigger: EventCreated = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "invalid JSON in trigger body");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid trigger envelope"})),
        )
    })?;

    info!(event_id = %trigger.event_id, bytes = body.len(), "event-created trigger accepted");

    // Detach the run: the trigger is acknowledged now, the pipeline logs its
    // own outcome and never reports failure back.
    tokio::spawn(async move {
        let outcome = state.pipeline.handle_event_created(&trigger).await;
        tracing::debug!(event_id = %trigger.event_id, ?outcome, "pipeline run finished");
    });

    Ok((StatusCode::ACCEPTED, Json(json!({"ok": true}))))
}

// ── Auth helpers ──────────────────────────────────────────────────────────────

/// Verify GitHub-style HMAC-SHA256: `sha256=<hex>` in X-Hub-Signature-256.
fn verify_hmac_sha256(
    headers: &HeaderMap,
    body: &Bytes,
    secret: Option<&str>,
) -> Result<(), String> {
    let secret = secret.ok_or_else(|| "no HMAC secret configured for triggers".to_string())?;

    let sig_header = headers
        .get("x-hub-signature-256")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| "missing X-Hub-Signature-256 header".to_string())?;

    let sig_hex = sig_header
        .strip_prefix("sha256=")
        .ok_or_else(|| "malformed X-Hub-Signature-256 header".to_string())?;

    let expected =
        hex::decode(sig_hex).map_err(|_| "X-Hub-Signature-256 is not valid hex".to_string())?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| "invalid HMAC key length".to_string())?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| "HMAC signature mismatch".to_string())
}

/// Verify a static bearer token in the `Authorization: Bearer <token>` header.
fn verify_bearer_token(headers: &HeaderMap, secret: Option<&str>) -> Result<(), String> {
    let expected = secret.ok_or_else(|| "no bearer token configured for triggers".to_string())?;

    let auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| "missing Authorization header".to_string())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| "Authorization header must use Bearer scheme".to_string())?;

    if token == expected {
        Ok(())
    } else {
        Err("bearer token mismatch".to_string())
    }
}

fn auth_error(reason: &str) -> (StatusCode, Json<Value>) {
    warn!(reason = %reason, "trigger authentication failed");
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "authentication failed", "reason": reason})),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with(name: &'static str, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, value.parse().unwrap());
        headers
    }

    #[test]
    fn bearer_token_accepts_exact_match() {
        let headers = headers_with("authorization", "Bearer s3cret");
        assert!(verify_bearer_token(&headers, Some("s3cret")).is_ok());
    }

    #[test]
    fn bearer_token_rejects_mismatch_and_missing_header() {
        let headers = headers_with("authorization", "Bearer wrong");
        assert!(verify_bearer_token(&headers, Some("s3cret")).is_err());
        assert!(verify_bearer_token(&HeaderMap::new(), Some("s3cret")).is_err());
    }

    #[test]
    fn hmac_verifies_signature_over_raw_body() {
        let body = Bytes::from_static(b"{\"eventId\":\"ev-1\"}");
        let mut mac = HmacSha256::new_from_slice(b"topsecret").unwrap();
        mac.update(&body);
        let sig = hex::encode(mac.finalize().into_bytes());

        let headers = headers_with("x-hub-signature-256", &format!("sha256={sig}"));
        assert!(verify_hmac_sha256(&headers, &body, Some("topsecret")).is_ok());

        let bad = headers_with("x-hub-signature-256", "sha256=00ff");
        assert!(verify_hmac_sha256(&bad, &body, Some("topsecret")).is_err());
    }
}
