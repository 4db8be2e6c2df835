//! Prediction service: validated form input in, rendered label out
//!
//! The model is injected once at startup and shared read-only by every
//! request handled through the same `PredictionService`.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::features::{BookingFeatures, FeatureRow, FormInputError};

/// Failure inside the model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("model returned {got} label(s) for {expected} row(s)")]
    LabelCount { expected: usize, got: usize },

    #[error("model failure: {0}")]
    Model(String),
}

/// A loaded classifier
pub trait Predictor: Send + Sync {
    /// One label per input row
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<String>, PredictionError>;
}

/// What a form submission produced
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Label(String),
    Error(String),
}

impl PredictionOutcome {
    /// Text shown to the user
    pub fn render(&self) -> String {
        match self {
            PredictionOutcome::Label(label) => label.clone(),
            PredictionOutcome::Error(message) => format!("Error: {}", message),
        }
    }
}

impl From<FormInputError> for PredictionOutcome {
    fn from(err: FormInputError) -> Self {
        PredictionOutcome::Error(err.to_string())
    }
}

/// Handles form submissions against a shared model
#[derive(Clone)]
pub struct PredictionService {
    predictor: Arc<dyn Predictor>,
}

impl PredictionService {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self { predictor }
    }

    /// Predict a single validated booking
    pub fn predict(&self, features: &BookingFeatures) -> Result<String, PredictionError> {
        let labels = self.predictor.predict(&[features.to_row()])?;
        match labels.as_slice() {
            [label] => Ok(label.clone()),
            _ => Err(PredictionError::LabelCount {
                expected: 1,
                got: labels.len(),
            }),
        }
    }

    /// Validate a submitted form and predict. Never panics on bad input.
    pub fn handle_form(&self, form: &HashMap<String, String>) -> PredictionOutcome {
        let features = match BookingFeatures::from_form(form) {
            Ok(features) => features,
            Err(err) => {
                tracing::warn!(field = err.field(), error = %err, "Rejected form input");
                return err.into();
            }
        };

        match self.predict(&features) {
            Ok(label) => {
                tracing::debug!(label = %label, "Prediction served");
                PredictionOutcome::Label(label)
            }
            Err(err) => {
                tracing::error!(error = %err, "Prediction failed");
                PredictionOutcome::Error(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cancels bookings made more than 100 days ahead
    struct LeadTimeRule;

    impl Predictor for LeadTimeRule {
        fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<String>, PredictionError> {
            Ok(rows
                .iter()
                .map(|r| (if r[0] > 100.0 { "1" } else { "0" }).to_string())
                .collect())
        }
    }

    struct Silent;

    impl Predictor for Silent {
        fn predict(&self, _rows: &[FeatureRow]) -> Result<Vec<String>, PredictionError> {
            Ok(Vec::new())
        }
    }

    fn form(lead_time: &str) -> HashMap<String, String> {
        [
            ("lead_time", lead_time),
            ("no_of_special_request", "1"),
            ("avg_price_per_room", "99.5"),
            ("arrival_month", "7"),
            ("arrival_date", "14"),
            ("market_segment_type", "4"),
            ("no_of_week_nights", "3"),
            ("no_of_weekend_nights", "2"),
            ("type_of_meal_plan", "0"),
            ("room_type_reserved", "1"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_handle_form_returns_label() {
        let service = PredictionService::new(Arc::new(LeadTimeRule));
        assert_eq!(service.handle_form(&form("150")).render(), "1");
        assert_eq!(service.handle_form(&form("5")).render(), "0");
    }

    #[test]
    fn test_bad_input_renders_error() {
        let service = PredictionService::new(Arc::new(LeadTimeRule));
        let outcome = service.handle_form(&form("soon"));

        assert!(matches!(outcome, PredictionOutcome::Error(_)));
        assert!(outcome.render().starts_with("Error: "));
        assert!(outcome.render().contains("lead_time"));
    }

    #[test]
    fn test_label_count_mismatch() {
        let service = PredictionService::new(Arc::new(Silent));
        let outcome = service.handle_form(&form("10"));
        assert_eq!(
            outcome,
            PredictionOutcome::Error("model returned 0 label(s) for 1 row(s)".to_string())
        );
    }
}
