//! Output of scoring a patient record.

use serde::Serialize;

/// Hospitalisation risk computed for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    /// Predicted probability of hospitalisation, rounded to 8 decimal places.
    pub probability: f64,

    /// Linear predictor (log-odds) before the logistic transform.
    pub linear_predictor: f64,
}

impl Assessment {
    #[must_use]
    pub fn new(probability: f64, linear_predictor: f64) -> Self {
        Self {
            probability,
            linear_predictor,
        }
    }
}

impl std::fmt::Display for Assessment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "probability={:?} (log-odds {:.6})",
            self.probability, self.linear_predictor
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let assessment = Assessment::new(1.0, 36.188348860924);
        assert_eq!(assessment.to_string(), "probability=1.0 (log-odds 36.188349)");
    }
}
