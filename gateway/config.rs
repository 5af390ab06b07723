use crate::gateway::GatewayError;
use std::time::Duration;
use url::Url;

/// How long to wait for the prediction service. Hosted model services can take most of a minute to wake from idle.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const ENDPOINT_VAR: &str = "CARDIOGUARD_API_URL";
pub const TIMEOUT_VAR: &str = "CARDIOGUARD_TIMEOUT_SECS";

#[derive(Clone, Debug, PartialEq)]
pub struct GatewayConfig {
	/// The URL that prediction requests are posted to.
	pub endpoint: Url,
	pub timeout: Duration,
	/// Whether to honor the `HTTP_PROXY` family of environment variables.
	pub system_proxy: bool,
}

impl GatewayConfig {
	pub fn new(endpoint: Url) -> Self {
		Self {
			endpoint,
			timeout: DEFAULT_TIMEOUT,
			system_proxy: true,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn without_proxy(mut self) -> Self {
		self.system_proxy = false;
		self
	}

	/// Read the configuration from `CARDIOGUARD_API_URL` and, optionally, `CARDIOGUARD_TIMEOUT_SECS`.
	pub fn from_env() -> Result<Self, GatewayError> {
		Self::from_vars(|key| std::env::var(key).ok())
	}

	fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, GatewayError> {
		let endpoint = var(ENDPOINT_VAR)
			.ok_or_else(|| GatewayError::Config(format!("{} is not set", ENDPOINT_VAR)))?;
		let endpoint: Url = endpoint.parse().map_err(|error| {
			GatewayError::Config(format!("{} is not a valid url: {}", ENDPOINT_VAR, error))
		})?;
		let mut config = Self::new(endpoint);
		if let Some(timeout) = var(TIMEOUT_VAR) {
			let seconds: u64 = timeout.trim().parse().map_err(|_| {
				GatewayError::Config(format!(
					"{} must be a whole number of seconds, got {:?}",
					TIMEOUT_VAR, timeout
				))
			})?;
			config.timeout = Duration::from_secs(seconds);
		}
		Ok(config)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::collections::BTreeMap;

	fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let map: BTreeMap<String, String> = pairs
			.iter()
			.map(|(key, value)| (key.to_string(), value.to_string()))
			.collect();
		move |key: &str| map.get(key).cloned()
	}

	#[test]
	fn test_from_vars() {
		let config = GatewayConfig::from_vars(vars(&[
			("CARDIOGUARD_API_URL", "https://example.com/predict"),
			("CARDIOGUARD_TIMEOUT_SECS", "5"),
		]))
		.unwrap();
		assert_eq!(config.endpoint.as_str(), "https://example.com/predict");
		assert_eq!(config.timeout, Duration::from_secs(5));
		assert!(config.system_proxy);
	}

	#[test]
	fn test_from_vars_defaults_timeout() {
		let config =
			GatewayConfig::from_vars(vars(&[("CARDIOGUARD_API_URL", "http://localhost:5000/predict")]))
				.unwrap();
		assert_eq!(config.timeout, DEFAULT_TIMEOUT);
	}

	#[test]
	fn test_from_vars_errors() {
		assert!(matches!(
			GatewayConfig::from_vars(vars(&[])),
			Err(GatewayError::Config(_))
		));
		assert!(matches!(
			GatewayConfig::from_vars(vars(&[("CARDIOGUARD_API_URL", "not a url")])),
			Err(GatewayError::Config(_))
		));
		assert!(matches!(
			GatewayConfig::from_vars(vars(&[
				("CARDIOGUARD_API_URL", "http://localhost:5000/predict"),
				("CARDIOGUARD_TIMEOUT_SECS", "soon"),
			])),
			Err(GatewayError::Config(_))
		));
	}
}
