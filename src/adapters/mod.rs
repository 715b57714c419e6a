//! Adapters layer: translation between the outside world and the domain.
//!
//! - `json`: patient JSON document to [`PatientRiskRecord`](crate::domain::PatientRiskRecord)
//! - `http`: axum router exposing the scoring service
//! - `sanitize`: identifier redaction for log output

pub mod http;
pub mod json;
pub mod sanitize;
