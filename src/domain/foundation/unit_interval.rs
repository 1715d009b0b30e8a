//! Scores on the closed unit interval.
//!
//! Both the sentiment service and the QnA service report scores that the
//! policy compares against fixed thresholds, so both are validated on entry.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

fn check_unit_interval(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() {
        return Err(ValidationError::not_a_number(field));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::out_of_range(field, 0.0, 1.0, value));
    }
    Ok(value)
}

/// Sentiment polarity in `[0, 1]`; higher is more positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SentimentScore(f64);

impl SentimentScore {
    /// Creates a score, rejecting NaN and values outside `[0, 1]`.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        check_unit_interval("sentiment_score", value).map(Self)
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for SentimentScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<SentimentScore> for f64 {
    fn from(score: SentimentScore) -> Self {
        score.0
    }
}

impl fmt::Display for SentimentScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Confidence of a knowledge-base answer in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a confidence, rejecting NaN and values outside `[0, 1]`.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        check_unit_interval("confidence", value).map(Self)
    }

    /// Creates a confidence from the 0-100 scale the QnA service reports.
    pub fn from_percent(value: f64) -> Result<Self, ValidationError> {
        if value.is_nan() {
            return Err(ValidationError::not_a_number("confidence"));
        }
        if !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("confidence", 0.0, 100.0, value));
        }
        Ok(Self(value / 100.0))
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_score_accepts_bounds() {
        assert_eq!(SentimentScore::try_new(0.0).unwrap().value(), 0.0);
        assert_eq!(SentimentScore::try_new(0.5).unwrap().value(), 0.5);
        assert_eq!(SentimentScore::try_new(1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn sentiment_score_rejects_out_of_range() {
        assert!(matches!(
            SentimentScore::try_new(1.01),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            SentimentScore::try_new(-0.1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn sentiment_score_rejects_nan() {
        assert!(matches!(
            SentimentScore::try_new(f64::NAN),
            Err(ValidationError::NotANumber { .. })
        ));
    }

    #[test]
    fn sentiment_score_deserializes_through_validation() {
        let ok: SentimentScore = serde_json::from_str("0.42").unwrap();
        assert_eq!(ok.value(), 0.42);
        assert!(serde_json::from_str::<SentimentScore>("4.2").is_err());
    }

    #[test]
    fn confidence_from_percent_scales_down() {
        let confidence = Confidence::from_percent(87.5).unwrap();
        assert!((confidence.value() - 0.875).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_from_percent_rejects_out_of_range() {
        assert!(Confidence::from_percent(100.5).is_err());
        assert!(Confidence::from_percent(-1.0).is_err());
    }

    #[test]
    fn confidence_displays_as_percent() {
        assert_eq!(Confidence::try_new(0.42).unwrap().to_string(), "42%");
    }
}
