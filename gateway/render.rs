/*!
This module describes what the result area of the form shows. It holds no styling, only the text and the tone of the card.
*/

use crate::{
	gateway::Outcome,
	response::{Prediction, PredictionResult},
};

pub const DEFAULT_MESSAGE: &str = "Prediction completed based on clinical data.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
	Risk,
	Safe,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultView {
	pub tone: Tone,
	pub heading: String,
	pub confidence: String,
	pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum View {
	Result(ResultView),
	/// An error to show the user. The form stays usable.
	Alert(String),
}

impl From<&PredictionResult> for ResultView {
	fn from(result: &PredictionResult) -> ResultView {
		let tone = match result.prediction {
			Prediction::Positive => Tone::Risk,
			Prediction::Negative => Tone::Safe,
		};
		let status = match result.status.as_deref() {
			Some(status) if !status.trim().is_empty() => status,
			_ => match tone {
				Tone::Risk => "High Risk",
				Tone::Safe => "Low Risk",
			},
		};
		let message = match result.message.as_deref() {
			Some(message) if !message.is_empty() => message.to_owned(),
			_ => DEFAULT_MESSAGE.to_owned(),
		};
		ResultView {
			tone,
			heading: format!("{} Detected", status),
			confidence: result.probability.percent(),
			message,
		}
	}
}

impl From<&Outcome> for View {
	fn from(outcome: &Outcome) -> View {
		match outcome {
			Outcome::Success(result) => View::Result(result.into()),
			Outcome::RemoteError(message) | Outcome::ConnectivityError(message) => {
				View::Alert(message.clone())
			}
		}
	}
}

impl std::fmt::Display for ResultView {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		writeln!(f, "{}", self.heading)?;
		writeln!(f, "Confidence Score: {}", self.confidence)?;
		write!(f, "{}", self.message)
	}
}

impl std::fmt::Display for View {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			View::Result(result) => write!(f, "{}", result),
			View::Alert(message) => write!(f, "{}", message),
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::gateway::CONNECTIVITY_ERROR_MESSAGE;

	fn result(json: &str) -> PredictionResult {
		serde_json::from_str(json).unwrap()
	}

	#[test]
	fn test_high_risk() {
		let view = ResultView::from(&result(
			r#"{"prediction":1,"probability":0.87,"status":"High Risk"}"#,
		));
		assert_eq!(
			view,
			ResultView {
				tone: Tone::Risk,
				heading: "High Risk Detected".to_owned(),
				confidence: "87.00%".to_owned(),
				message: DEFAULT_MESSAGE.to_owned(),
			}
		);
		assert_eq!(
			view.to_string(),
			"High Risk Detected\nConfidence Score: 87.00%\nPrediction completed based on clinical data."
		);
	}

	#[test]
	fn test_low_risk_with_message() {
		let view = ResultView::from(&result(
			r#"{"prediction":0,"probability":0.125,"status":"Low Risk","message":"Keep it up."}"#,
		));
		assert_eq!(view.tone, Tone::Safe);
		assert_eq!(view.confidence, "12.50%");
		assert_eq!(view.message, "Keep it up.");
	}

	#[test]
	fn test_missing_status() {
		let view = ResultView::from(&result(r#"{"prediction":1,"probability":0.5}"#));
		assert_eq!(view.heading, "High Risk Detected");
		let view = ResultView::from(&result(r#"{"prediction":0,"probability":0.5,"status":""}"#));
		assert_eq!(view.heading, "Low Risk Detected");
	}

	#[test]
	fn test_alerts() {
		assert_eq!(
			View::from(&Outcome::RemoteError("Invalid input".to_owned())),
			View::Alert("Invalid input".to_owned())
		);
		let view = View::from(&Outcome::ConnectivityError(
			CONNECTIVITY_ERROR_MESSAGE.to_owned(),
		));
		assert_eq!(view.to_string(), CONNECTIVITY_ERROR_MESSAGE);
	}
}
