//! Application layer: use cases shared by every entry point.
//!
//! The CLI and the HTTP server both go through [`ScoringService`], so
//! parsing, scoring and logging behave identically regardless of transport.

mod scoring;

pub use scoring::ScoringService;
