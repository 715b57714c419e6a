//! Domain layer: patient risk factors and scoring results.
//!
//! Pure types with no I/O. Every categorical value set is closed, and
//! populating a record is the only place a domain error can arise.

mod assessment;
mod category;
mod disease;
mod record;

pub use assessment::Assessment;
pub(crate) use category::categorical;
pub use category::{Categorical, RecordError};
pub use disease::{extract_disease_groups, Disease, DiseaseGroup};
pub use record::{
    AlcoholStatus, BmiCategory, Ethnicity, IrsadDecile, MedicationGroup, PathologyCategory,
    PathologyResults, PathologyTest, PatientRiskRecord, SmokingStatus,
};
