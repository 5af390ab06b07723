use crate::{config::GatewayConfig, response::PredictionResult};
use cardioguard_form::RequestPayload;
use log::{debug, info, trace, warn};
use reqwest::StatusCode;
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

pub const REMOTE_ERROR_MESSAGE: &str = "The prediction service rejected the request.";
pub const INVALID_RESPONSE_MESSAGE: &str = "The prediction service returned an invalid response.";
pub const CONNECTIVITY_ERROR_MESSAGE: &str =
	"Connection error. The prediction service may be unreachable.";

#[derive(Debug, Error)]
pub enum GatewayError {
	#[error("invalid configuration: {0}")]
	Config(String),
	#[error("failed to build the http client: {0}")]
	Client(#[from] reqwest::Error),
}

/// Returned by [`Gateway::submit`] when another submission on the same gateway has not finished.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("a submission is already in progress")]
pub struct Busy;

/// Everything that can come of one submission.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
	Success(PredictionResult),
	/// The service answered but did not produce a prediction. The message is the service's own when it sent one.
	RemoteError(String),
	/// No answer was received.
	ConnectivityError(String),
}

impl Outcome {
	pub fn result(&self) -> Option<&PredictionResult> {
		match self {
			Outcome::Success(result) => Some(result),
			_ => None,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub enum Status {
	Idle,
	Submitting,
	Succeeded(PredictionResult),
	RemoteFailed(String),
	ConnectivityFailed(String),
}

impl Status {
	pub fn is_submitting(&self) -> bool {
		matches!(self, Status::Submitting)
	}

	/// The result currently on display, if the last submission succeeded.
	pub fn result(&self) -> Option<&PredictionResult> {
		match self {
			Status::Succeeded(result) => Some(result),
			_ => None,
		}
	}
}

impl From<Outcome> for Status {
	fn from(outcome: Outcome) -> Status {
		match outcome {
			Outcome::Success(result) => Status::Succeeded(result),
			Outcome::RemoteError(message) => Status::RemoteFailed(message),
			Outcome::ConnectivityError(message) => Status::ConnectivityFailed(message),
		}
	}
}

/**
A `Gateway` posts prediction requests for one form. It allows a single request in flight at a time and remembers how the most recent one ended.
*/
pub struct Gateway {
	config: GatewayConfig,
	client: reqwest::Client,
	status: Mutex<Status>,
}

impl Gateway {
	pub fn new(config: GatewayConfig) -> Result<Gateway, GatewayError> {
		let mut builder = reqwest::Client::builder().timeout(config.timeout);
		if !config.system_proxy {
			builder = builder.no_proxy();
		}
		let client = builder.build()?;
		Ok(Gateway {
			config,
			client,
			status: Mutex::new(Status::Idle),
		})
	}

	pub fn config(&self) -> &GatewayConfig {
		&self.config
	}

	pub fn status(&self) -> Status {
		self.lock_status().clone()
	}

	/**
	Post `payload` to the configured endpoint. While this future is pending, any other call returns `Err(Busy)` without sending anything. If this future is dropped before it completes, the gateway returns to [`Status::Idle`].
	*/
	pub async fn submit(&self, payload: &RequestPayload) -> Result<Outcome, Busy> {
		let in_flight = self.begin()?;
		let outcome = self.send(payload).await;
		in_flight.finish(outcome.clone());
		Ok(outcome)
	}

	fn begin(&self) -> Result<InFlight<'_>, Busy> {
		let mut status = self.lock_status();
		if status.is_submitting() {
			warn!("rejected a submission while another is in flight");
			return Err(Busy);
		}
		// Entering Submitting discards the previous result.
		*status = Status::Submitting;
		Ok(InFlight {
			status: &self.status,
			finished: false,
		})
	}

	async fn send(&self, payload: &RequestPayload) -> Outcome {
		debug!("POST {}", self.config.endpoint);
		trace!("prediction payload {:?}", payload);
		let response = self
			.client
			.post(self.config.endpoint.clone())
			.json(payload)
			.send()
			.await;
		let response = match response {
			Ok(response) => response,
			Err(error) => {
				warn!("prediction request failed: {}", error);
				return Outcome::ConnectivityError(CONNECTIVITY_ERROR_MESSAGE.to_owned());
			}
		};
		let status = response.status();
		let body = match response.bytes().await {
			Ok(body) => body,
			Err(error) => {
				warn!("failed to read the prediction response: {}", error);
				return Outcome::ConnectivityError(CONNECTIVITY_ERROR_MESSAGE.to_owned());
			}
		};
		let outcome = classify(status, &body);
		match &outcome {
			Outcome::Success(result) => info!(
				"prediction {:?} with probability {}",
				result.prediction,
				result.probability.get()
			),
			Outcome::RemoteError(message) => warn!("{} {}", status, message),
			Outcome::ConnectivityError(_) => {}
		}
		outcome
	}

	fn lock_status(&self) -> MutexGuard<'_, Status> {
		self.status
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

#[derive(serde::Deserialize)]
struct ErrorBody {
	error: Option<String>,
}

/// Interpret a response that was received in full.
pub fn classify(status: StatusCode, body: &[u8]) -> Outcome {
	if status.is_success() {
		match serde_json::from_slice::<PredictionResult>(body) {
			Ok(result) => Outcome::Success(result),
			Err(error) => {
				warn!("unexpected prediction response: {}", error);
				Outcome::RemoteError(INVALID_RESPONSE_MESSAGE.to_owned())
			}
		}
	} else {
		let message = serde_json::from_slice::<ErrorBody>(body)
			.ok()
			.and_then(|body| body.error)
			.unwrap_or_else(|| REMOTE_ERROR_MESSAGE.to_owned());
		Outcome::RemoteError(message)
	}
}

/// Marks a submission in flight. Dropping it without calling `finish` means the submission was cancelled.
struct InFlight<'a> {
	status: &'a Mutex<Status>,
	finished: bool,
}

impl<'a> InFlight<'a> {
	fn finish(mut self, outcome: Outcome) {
		self.set(outcome.into());
		self.finished = true;
	}

	fn set(&self, value: Status) {
		let mut status = self
			.status
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner());
		*status = value;
	}
}

impl<'a> Drop for InFlight<'a> {
	fn drop(&mut self) {
		if !self.finished {
			debug!("submission cancelled");
			self.set(Status::Idle);
		}
	}
}
