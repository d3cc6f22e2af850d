use townbell_push::DispatchReport;

/// How one pipeline run ended.
///
/// Every run produces exactly one of these as a normal return — the pipeline
/// never raises across its boundary. The skip variants are expected early
/// terminations, not errors; `Failed` is a contained systemic failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The multicast went out; counts come from the transport.
    Dispatched(DispatchReport),

    /// The trigger carried no event data. No-op.
    NoEventData,

    /// The business has no followers. Nothing to notify.
    NoFollowers,

    /// No follower had a usable push token.
    NoTokens,

    /// A systemic error was caught, logged, and swallowed.
    Failed { reason: String },
}

impl PipelineOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, PipelineOutcome::Dispatched(_))
    }
}
