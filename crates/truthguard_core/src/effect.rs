use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the two-phase research flow (timeline, then bias) for a topic.
    StartResearch { request_id: RequestId, topic: String },
    /// Start a single fact-check verification for a claim.
    StartVerification { request_id: RequestId, topic: String },
    /// Tear down the poll loop of a superseded analysis.
    ///
    /// Always emitted before the `Start*` effect that replaces it, so at most
    /// one poll loop is ever active.
    CancelAnalysis { request_id: RequestId },
}
