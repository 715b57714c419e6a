//! Scoring service: parse a patient document, score it, log the outcome.

use std::sync::Arc;

use serde_json::Value;

use crate::adapters::json;
use crate::domain::{Assessment, PatientRiskRecord};
use crate::engine::ScoreEngine;
use crate::ports::RiskModel;

/// Service for scoring patient records against a risk model.
///
/// Cheap to clone; clones share the underlying model.
pub struct ScoringService<M = ScoreEngine>
where
    M: RiskModel,
{
    model: Arc<M>,
}

impl<M: RiskModel> Clone for ScoringService<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}

impl Default for ScoringService<ScoreEngine> {
    fn default() -> Self {
        Self::new(Arc::new(ScoreEngine::new()))
    }
}

impl<M: RiskModel> ScoringService<M> {
    /// Create a new scoring service.
    pub fn new(model: Arc<M>) -> Self {
        Self { model }
    }

    /// Name of the model behind this service.
    #[must_use]
    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Score a record that has already been built.
    #[must_use]
    pub fn assess(&self, record: &PatientRiskRecord) -> Assessment {
        let assessment = self.model.assess(record);
        tracing::debug!(
            model = self.model.name(),
            linear_predictor = assessment.linear_predictor,
            "Linear predictor computed"
        );
        tracing::info!(
            "Assessment complete: probability={:?}, diseases={}, medications={}",
            assessment.probability,
            record.diseases().len(),
            record.medication_groups().len()
        );
        assessment
    }

    /// Build a record from a JSON document and score it.
    ///
    /// # Errors
    /// Returns `PrmError::Record` if the document does not describe a valid
    /// record; the model is not invoked in that case.
    pub fn assess_document(
        &self,
        document: &Value,
    ) -> crate::Result<(PatientRiskRecord, Assessment)> {
        let record = json::record_from_value(document).map_err(|e| {
            tracing::warn!("Rejected patient document: {}", e);
            e
        })?;
        let assessment = self.assess(&record);
        Ok((record, assessment))
    }

    /// Read a JSON document, build a record and score it.
    ///
    /// # Errors
    /// Returns `PrmError::Json` for malformed input and `PrmError::Record`
    /// for invalid documents.
    pub fn assess_reader<R: std::io::Read>(
        &self,
        reader: R,
    ) -> crate::Result<(PatientRiskRecord, Assessment)> {
        let document: Value = serde_json::from_reader(reader)?;
        self.assess_document(&document)
    }
}
