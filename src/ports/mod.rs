//! Ports layer: trait definitions at the boundary of the scoring core.
//!
//! The application layer depends on these traits, not on the concrete
//! engine, so alternative model versions can be swapped in by adapters.

mod risk_model;

pub use risk_model::RiskModel;
