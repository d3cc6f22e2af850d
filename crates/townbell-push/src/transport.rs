use async_trait::async_trait;

use crate::error::Result;
use crate::types::{DispatchReport, MulticastMessage};

/// FCM caps one multicast call at 500 registration tokens.
pub const MULTICAST_BATCH_MAX: usize = 500;

/// A push-delivery transport capable of one bounded multicast send.
///
/// Implementations must be `Send + Sync` so a single client can be shared as
/// an `Arc<dyn PushTransport>` across concurrent pipeline runs. Callers are
/// responsible for keeping `message.tokens` within
/// [`max_tokens_per_call`](PushTransport::max_tokens_per_call) — the
/// dispatcher shards larger sets before calling in.
#[async_trait]
pub trait PushTransport: Send + Sync {
    /// Send one multicast call and report per-token outcomes.
    ///
    /// An `Err` means the whole call was rejected; token-level failures
    /// inside an accepted call come back in the [`DispatchReport`].
    async fn send_multicast(&self, message: &MulticastMessage) -> Result<DispatchReport>;

    /// Upper bound on tokens per call for this transport.
    fn max_tokens_per_call(&self) -> usize {
        MULTICAST_BATCH_MAX
    }
}
