//! # hch-prm
//!
//! Health Care Homes hospitalisation risk calculator (the "predictive risk
//! model", PRM).
//!
//! A patient's coded risk factors (age, sex, ethnicity, BMI band, smoking
//! and alcohol status, socio-economic decile, medication classes, chronic
//! diagnoses and banded pathology results) are combined by a fixed logistic
//! regression into the probability of hospitalisation.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: patient risk record, categorical value sets, disease groups
//! - `ports`: the [`RiskModel`](ports::RiskModel) trait
//! - `engine`: coefficient table, linear predictor, logistic transform
//! - `application`: [`ScoringService`](application::ScoringService), shared by every entry point
//! - `adapters`: JSON documents, HTTP router, log redaction
//!
//! ```
//! use hch_prm::domain::{Disease, PatientRiskRecord};
//! use hch_prm::ScoreEngine;
//!
//! let mut record = PatientRiskRecord::new();
//! record.set_age(70.0)?.set_is_female(true).set_diseases([Disease::Copd]);
//! let p = ScoreEngine::new().compute_probability(&record);
//! assert!((0.0..=1.0).contains(&p));
//! # Ok::<(), hch_prm::domain::RecordError>(())
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod engine;
pub mod logging;
pub mod ports;

pub use domain::{Assessment, PatientRiskRecord, RecordError};
pub use engine::ScoreEngine;

/// Result type for PRM operations
pub type Result<T> = std::result::Result<T, PrmError>;

/// Main error type for PRM operations
#[derive(Debug, thiserror::Error)]
pub enum PrmError {
    #[error("invalid patient record: {0}")]
    Record(#[from] RecordError),

    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
