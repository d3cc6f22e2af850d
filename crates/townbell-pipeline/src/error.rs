use thiserror::Error;

use townbell_push::PushError;
use townbell_store::StoreError;

/// Systemic failures a pipeline run can hit after the data guard.
///
/// Only two steps can raise: follower enumeration (one store scan with no
/// local fallback) and dispatch (whole-call transport rejection). Business
/// name and token resolution absorb their own read failures. The orchestrator
/// contains every variant — nothing here crosses the pipeline boundary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("follower enumeration failed: {0}")]
    Followers(#[source] StoreError),

    #[error("multicast dispatch failed: {0}")]
    Dispatch(#[source] PushError),
}
