//! Multicast dispatcher — shards the token set to the transport's batch
//! bound and aggregates the per-call reports.

use tracing::{debug, info};

use townbell_push::{DispatchReport, MulticastMessage, PushError, PushTransport};

/// Send `message` to every token it carries, splitting into sequential
/// batched calls when the token set exceeds the transport bound.
///
/// A whole-call rejection of any batch aborts the dispatch step and
/// propagates; per-token failures inside accepted calls only show up in the
/// aggregated counts. No retries, no token invalidation.
pub async fn dispatch_multicast(
    transport: &dyn PushTransport,
    message: &MulticastMessage,
) -> Result<DispatchReport, PushError> {
    let batch_max = transport.max_tokens_per_call().max(1);
    let mut report = DispatchReport::default();

    for batch in message.tokens.chunks(batch_max) {
        let call = MulticastMessage {
            notification: message.notification.clone(),
            data: message.data.clone(),
            tokens: batch.to_vec(),
        };
        debug!(tokens = batch.len(), "dispatching multicast batch");
        report.merge(transport.send_multicast(&call).await?);
    }

    info!(
        success = report.success_count,
        failure = report.failure_count,
        "multicast dispatch complete"
    );
    Ok(report)
}
