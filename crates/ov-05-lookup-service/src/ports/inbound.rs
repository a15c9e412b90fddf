//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{
    AdmissionEvent, AdmissionOutcome, LookupAnswer, LookupQuestion, ServiceMetaData, SpendEvent,
};
use crate::domain::errors::LookupServiceError;
use async_trait::async_trait;
use overlay_types::Outpoint;

/// Hooks the overlay engine drives, plus the query entry point.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait LookupService: Send + Sync {
    /// An output was admitted under `event.topic`.
    ///
    /// Never an error: invalid outputs come back as
    /// [`AdmissionOutcome::Rejected`].
    async fn output_admitted_by_topic(&self, event: &AdmissionEvent) -> AdmissionOutcome;

    /// An output was spent. Idempotent.
    async fn output_spent(&self, event: &SpendEvent) -> Result<(), LookupServiceError>;

    /// The overlay stopped tracking an output. Idempotent.
    async fn output_evicted(&self, outpoint: &Outpoint) -> Result<(), LookupServiceError>;

    /// Answer a lookup question.
    async fn lookup(&self, question: &LookupQuestion) -> Result<LookupAnswer, LookupServiceError>;

    fn get_meta_data(&self) -> ServiceMetaData;

    fn get_documentation(&self) -> &'static str;
}
