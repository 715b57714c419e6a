//! Risk model port: scores a complete patient record.

use crate::domain::{Assessment, PatientRiskRecord};

/// A fitted hospitalisation risk model.
///
/// Implementations are pure: the same record always yields the same
/// assessment, and scoring a successfully constructed record never fails.
pub trait RiskModel: Send + Sync {
    /// Short stable identifier of the model, used in logs.
    fn name(&self) -> &'static str;

    /// Score a record.
    fn assess(&self, record: &PatientRiskRecord) -> Assessment;
}
