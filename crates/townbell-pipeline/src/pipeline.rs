//! Pipeline orchestrator — one run per triggering event.
//!
//! Sequence: validate trigger data → resolve business name → enumerate
//! followers → resolve tokens → compose → dispatch, with early exits on
//! empty follower and token sets. Systemic errors after validation are
//! logged with context and contained; the caller always gets a normal
//! return so the trigger mechanism never retries on our account.

use std::sync::Arc;

use tracing::{debug, error, info};

use townbell_core::trigger::{EventCreated, EventData};
use townbell_push::PushTransport;
use townbell_store::RecordStore;

use crate::compose::compose_new_event_message;
use crate::dispatch::dispatch_multicast;
use crate::error::PipelineError;
use crate::outcome::PipelineOutcome;
use crate::resolve::{enumerate_followers, resolve_business_name, resolve_tokens};

/// Fan-out notification pipeline.
///
/// Holds only the shared client handles built once at process start; carries
/// no per-run state, so concurrent runs are fully independent.
pub struct NotifyPipeline {
    store: Arc<dyn RecordStore>,
    transport: Arc<dyn PushTransport>,
}

impl NotifyPipeline {
    pub fn new(store: Arc<dyn RecordStore>, transport: Arc<dyn PushTransport>) -> Self {
        Self { store, transport }
    }

    /// Run the pipeline for one record-creation trigger.
    ///
    /// Fire-and-forget contract: this never returns an error. Every failure
    /// path collapses into [`PipelineOutcome::Failed`] after being logged.
    pub async fn handle_event_created(&self, trigger: &EventCreated) -> PipelineOutcome {
        let Some(data) = &trigger.data else {
            info!(event_id = %trigger.event_id, "trigger carried no event data; nothing to do");
            return PipelineOutcome::NoEventData;
        };

        info!(
            event_id = %trigger.event_id,
            event_name = %data.event_name,
            business_id = %data.admin_id,
            "new event received"
        );

        match self.run(&trigger.event_id, data).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(
                    event_id = %trigger.event_id,
                    business_id = %data.admin_id,
                    error = %e,
                    "pipeline run failed; error contained"
                );
                PipelineOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn run(&self, event_id: &str, data: &EventData) -> Result<PipelineOutcome, PipelineError> {
        let business_id = &data.admin_id;

        let business_name = resolve_business_name(self.store.as_ref(), business_id).await;

        let follower_ids = enumerate_followers(self.store.as_ref(), business_id)
            .await
            .map_err(PipelineError::Followers)?;
        if follower_ids.is_empty() {
            info!(business_id = %business_id, "no followers found; stopping");
            return Ok(PipelineOutcome::NoFollowers);
        }

        let tokens = resolve_tokens(self.store.as_ref(), &follower_ids).await;
        if tokens.is_empty() {
            info!(
                business_id = %business_id,
                followers = follower_ids.len(),
                "no push tokens resolved; stopping"
            );
            return Ok(PipelineOutcome::NoTokens);
        }
        debug!(tokens = ?tokens, "resolved target tokens");

        let message = compose_new_event_message(
            &business_name,
            &data.event_name,
            event_id,
            business_id,
            tokens,
        );

        let report = dispatch_multicast(self.transport.as_ref(), &message)
            .await
            .map_err(PipelineError::Dispatch)?;

        info!(
            event_id = %event_id,
            success = report.success_count,
            failure = report.failure_count,
            "notification fan-out complete"
        );
        Ok(PipelineOutcome::Dispatched(report))
    }
}
