use cardioguard_util::finite::Finite;
use std::convert::TryFrom;
use thiserror::Error;

/// A successful answer from the prediction service.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PredictionResult {
	pub prediction: Prediction,
	pub probability: Probability,
	#[serde(default)]
	pub status: Option<String>,
	#[serde(default)]
	pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Prediction {
	/// The model found no sign of heart disease.
	Negative,
	/// The model predicts heart disease.
	Positive,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("prediction must be 0 or 1, got {0}")]
pub struct InvalidPrediction(pub u8);

impl TryFrom<u8> for Prediction {
	type Error = InvalidPrediction;
	fn try_from(value: u8) -> Result<Self, Self::Error> {
		match value {
			0 => Ok(Prediction::Negative),
			1 => Ok(Prediction::Positive),
			value => Err(InvalidPrediction(value)),
		}
	}
}

impl From<Prediction> for u8 {
	fn from(value: Prediction) -> u8 {
		match value {
			Prediction::Negative => 0,
			Prediction::Positive => 1,
		}
	}
}

/// A finite probability between zero and one inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(Finite<f64>);

#[derive(Debug, Error, PartialEq)]
#[error("probability must be between 0 and 1, got {0}")]
pub struct InvalidProbability(pub f64);

impl Probability {
	pub fn new(value: f64) -> Result<Self, InvalidProbability> {
		match Finite::new(value) {
			Ok(finite) if (0.0..=1.0).contains(&value) => Ok(Probability(finite)),
			_ => Err(InvalidProbability(value)),
		}
	}

	pub fn get(self) -> f64 {
		self.0.get()
	}

	/// Format as a percentage with two decimal places, so 0.87 becomes `87.00%`.
	pub fn percent(self) -> String {
		format!("{:.2}%", self.get() * 100.0)
	}
}

impl TryFrom<f64> for Probability {
	type Error = InvalidProbability;
	fn try_from(value: f64) -> Result<Self, Self::Error> {
		Probability::new(value)
	}
}

impl From<Probability> for f64 {
	fn from(value: Probability) -> f64 {
		value.get()
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse_result() {
		let result: PredictionResult = serde_json::from_str(
			r#"{"prediction":1,"probability":0.87,"status":"High Risk","message":"See a cardiologist."}"#,
		)
		.unwrap();
		assert_eq!(result.prediction, Prediction::Positive);
		assert_eq!(result.probability.get(), 0.87);
		assert_eq!(result.status.as_deref(), Some("High Risk"));
		assert_eq!(result.message.as_deref(), Some("See a cardiologist."));
	}

	#[test]
	fn test_parse_result_minimal() {
		let result: PredictionResult =
			serde_json::from_str(r#"{"prediction":0,"probability":0.1}"#).unwrap();
		assert_eq!(result.prediction, Prediction::Negative);
		assert_eq!(result.status, None);
		assert_eq!(result.message, None);
	}

	#[test]
	fn test_parse_result_rejects() {
		for body in &[
			r#"{"probability":0.5}"#,
			r#"{"prediction":1}"#,
			r#"{"prediction":2,"probability":0.5}"#,
			r#"{"prediction":1,"probability":1.5}"#,
			r#"{"prediction":1,"probability":-0.01}"#,
			r#"{"prediction":"yes","probability":0.5}"#,
		] {
			assert!(serde_json::from_str::<PredictionResult>(body).is_err(), "{}", body);
		}
	}

	#[test]
	fn test_percent() {
		assert_eq!(Probability::new(0.87).unwrap().percent(), "87.00%");
		assert_eq!(Probability::new(0.0).unwrap().percent(), "0.00%");
		assert_eq!(Probability::new(1.0).unwrap().percent(), "100.00%");
		assert!(Probability::new(f64::NAN).is_err());
		assert!(Probability::new(f64::INFINITY).is_err());
	}
}
