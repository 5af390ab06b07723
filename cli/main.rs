//! This module contains the main entrypoint to the cardioguard cli.

use self::output::{print_fields, print_view};
use anyhow::{format_err, Result};
use cardioguard_form::FormState;
use cardioguard_gateway::{
	render::View, Gateway, GatewayConfig, Outcome, ENDPOINT_VAR, TIMEOUT_VAR,
};
use clap::{Args, Parser};
use colored::Colorize;
use std::time::Duration;
use url::Url;

mod interactive;
mod output;

#[derive(Parser)]
#[clap(
	about = "Estimate heart disease risk from thirteen clinical measurements.",
	version,
	disable_help_subcommand = true
)]
enum Options {
	#[clap(name = "fields", about = "list the form fields, their defaults and their choices")]
	Fields,
	#[clap(name = "predict", about = "fill in the form from the command line and submit it once")]
	Predict(Box<PredictOptions>),
	#[clap(name = "interactive", about = "edit the form and submit it from a prompt")]
	Interactive(Box<ServiceOptions>),
}

#[derive(Args, Debug)]
pub struct ServiceOptions {
	#[clap(
		long,
		env = ENDPOINT_VAR,
		default_value = "http://localhost:5000/predict",
		help = "the url of the prediction endpoint"
	)]
	url: Url,
	#[clap(
		long,
		env = TIMEOUT_VAR,
		default_value = "60",
		help = "how many seconds to wait for the prediction service"
	)]
	timeout: u64,
}

impl ServiceOptions {
	fn gateway(&self) -> Result<Gateway> {
		let config =
			GatewayConfig::new(self.url.clone()).with_timeout(Duration::from_secs(self.timeout));
		Ok(Gateway::new(config)?)
	}
}

#[derive(Args, Debug)]
struct PredictOptions {
	#[clap(flatten)]
	service: ServiceOptions,
	#[clap(
		short = 's',
		long = "set",
		value_name = "FIELD=VALUE",
		help = "set a field, applied in order starting from the defaults. an empty value clears the field"
	)]
	edits: Vec<Edit>,
	#[clap(long, help = "reject values that are not entirely a number")]
	strict: bool,
	#[clap(long, help = "check every value against its plausible range before submitting")]
	validate: bool,
	#[clap(long, help = "print the payload and the outcome as json")]
	json: bool,
}

/// One `FIELD=VALUE` argument.
#[derive(Clone, Debug, PartialEq)]
struct Edit {
	field: String,
	value: String,
}

impl std::str::FromStr for Edit {
	type Err = String;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (field, value) = s
			.split_once('=')
			.ok_or_else(|| format!("expected FIELD=VALUE, got \"{}\"", s))?;
		Ok(Edit {
			field: field.trim().to_owned(),
			value: value.to_owned(),
		})
	}
}

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
		.format_timestamp_millis()
		.init();
	let options = Options::parse();
	let result = match options {
		Options::Fields => {
			print_fields();
			Ok(())
		}
		Options::Predict(options) => cli_predict(*options),
		Options::Interactive(options) => interactive::run(&options),
	};
	if let Err(error) = result {
		eprintln!("{}: {}", "error".red().bold(), error);
		error
			.chain()
			.skip(1)
			.for_each(|cause| eprintln!("  {} {}", "->".red().bold(), cause));
		std::process::exit(1);
	}
}

fn cli_predict(options: PredictOptions) -> Result<()> {
	// Apply the edits in order, exactly as if they had been typed into the form.
	let mut state = FormState::new();
	for edit in options.edits.iter() {
		state = if options.strict {
			state.edit_strict(&edit.field, &edit.value)?
		} else {
			state.edit(&edit.field, &edit.value)?
		};
	}
	let payload = state.finalize();
	if options.validate {
		payload.validate()?;
	}
	let gateway = options.service.gateway()?;
	let runtime = tokio::runtime::Runtime::new()?;
	let outcome = runtime.block_on(gateway.submit(&payload))?;
	if options.json {
		let error = match &outcome {
			Outcome::Success(_) => None,
			Outcome::RemoteError(message) | Outcome::ConnectivityError(message) => Some(message),
		};
		let output = serde_json::json!({
			"payload": payload,
			"result": outcome.result(),
			"error": error,
		});
		println!("{}", serde_json::to_string_pretty(&output)?);
	}
	match outcome {
		Outcome::Success(_) => {
			if !options.json {
				print_view(&View::from(&outcome));
			}
			Ok(())
		}
		Outcome::RemoteError(message) | Outcome::ConnectivityError(message) => {
			Err(format_err!(message))
		}
	}
}

#[test]
fn test_parse_edit() {
	assert_eq!(
		"age=63".parse::<Edit>(),
		Ok(Edit {
			field: "age".to_owned(),
			value: "63".to_owned(),
		})
	);
	assert_eq!(
		"chol=".parse::<Edit>(),
		Ok(Edit {
			field: "chol".to_owned(),
			value: "".to_owned(),
		})
	);
	assert_eq!(
		"oldpeak=1.5=2".parse::<Edit>().map(|edit| edit.value),
		Ok("1.5=2".to_owned())
	);
	assert!("age".parse::<Edit>().is_err());
}

#[test]
fn test_options() {
	use clap::CommandFactory;
	Options::command().debug_assert();
	let options = Options::try_parse_from(&[
		"cardioguard",
		"predict",
		"--url",
		"http://localhost:9000/predict",
		"--set",
		"age=63",
		"-s",
		"oldpeak=",
		"--validate",
	])
	.unwrap();
	match options {
		Options::Predict(options) => {
			assert_eq!(options.service.url.as_str(), "http://localhost:9000/predict");
			assert_eq!(options.edits.len(), 2);
			assert_eq!(options.edits[1].field, "oldpeak");
			assert!(options.validate);
			assert!(!options.strict);
		}
		_ => panic!(),
	}
}

#[test]
fn test_service_options_env() {
	use clap::CommandFactory;
	let command = Options::command();
	let predict = command.find_subcommand("predict").unwrap();
	let env = |id: &str| {
		predict
			.get_arguments()
			.find(|arg| arg.get_id() == id)
			.and_then(|arg| arg.get_env())
			.map(|env| env.to_owned())
	};
	assert_eq!(env("url"), Some(ENDPOINT_VAR.into()));
	assert_eq!(env("timeout"), Some(TIMEOUT_VAR.into()));
}
