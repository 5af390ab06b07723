/*!
This crate sends a finalized [`RequestPayload`](cardioguard_form::RequestPayload) to the remote prediction service and turns whatever happens into an [`Outcome`]. The [`render`] module turns an outcome into what the result card shows.
*/

mod config;
mod gateway;
pub mod render;
mod response;

pub use self::config::{GatewayConfig, DEFAULT_TIMEOUT, ENDPOINT_VAR, TIMEOUT_VAR};
pub use self::gateway::{
	classify, Busy, Gateway, GatewayError, Outcome, Status, CONNECTIVITY_ERROR_MESSAGE,
	INVALID_RESPONSE_MESSAGE, REMOTE_ERROR_MESSAGE,
};
pub use self::response::{
	InvalidPrediction, InvalidProbability, Prediction, PredictionResult, Probability,
};
