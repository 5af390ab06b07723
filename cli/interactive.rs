use crate::{
	output::{print_form, print_view},
	ServiceOptions,
};
use anyhow::Result;
use cardioguard_form::{Field, FormState};
use cardioguard_gateway::render::View;
use colored::Colorize;
use rustyline::error::ReadlineError;

const HELP: &str = "\
commands:
  <field> <value>  set a field, for example `age 63` or `oldpeak 2.3`
  clear <field>    empty a field. empty fields are sent as 0
  show             print the form
  payload          print the request that submit would send
  submit           send the form to the prediction service
  reset            restore the default values
  help             print this message
  quit             leave";

#[derive(Debug, PartialEq)]
enum Command {
	Edit { field: String, value: String },
	Show,
	Payload,
	Submit,
	Reset,
	Help,
	Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
	let line = line.trim();
	if line.is_empty() {
		return Ok(None);
	}
	let (word, rest) = match line.split_once(char::is_whitespace) {
		Some((word, rest)) => (word, rest.trim()),
		None => (line, ""),
	};
	let command = match (word, rest) {
		("show", "") => Command::Show,
		("payload", "") => Command::Payload,
		("submit", "") => Command::Submit,
		("reset", "") => Command::Reset,
		("help", "") => Command::Help,
		("quit", "") | ("exit", "") => Command::Quit,
		("clear", "") => return Err("usage: clear <field>".to_owned()),
		("clear", field) => Command::Edit {
			field: field.to_owned(),
			value: String::new(),
		},
		(word, "") if word.parse::<Field>().is_ok() => {
			return Err(format!("usage: {} <value>, or `clear {}`", word, word))
		}
		(_, "") => return Err(format!("unknown command \"{}\". type `help`", word)),
		(field, value) => Command::Edit {
			field: field.to_owned(),
			value: value.to_owned(),
		},
	};
	Ok(Some(command))
}

pub fn run(options: &ServiceOptions) -> Result<()> {
	let gateway = options.gateway()?;
	let runtime = tokio::runtime::Runtime::new()?;
	let mut editor = rustyline::Editor::<()>::new();
	let mut state = FormState::new();
	println!("Predictions are sent to {}.", gateway.config().endpoint);
	println!("{}", HELP);
	loop {
		let line = match editor.readline("cardioguard> ") {
			Ok(line) => line,
			Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
			Err(error) => return Err(error.into()),
		};
		editor.add_history_entry(line.as_str());
		let command = match parse_command(&line) {
			Ok(Some(command)) => command,
			Ok(None) => continue,
			Err(message) => {
				eprintln!("{}", message.yellow());
				continue;
			}
		};
		match command {
			Command::Edit { field, value } => match state.edit(&field, &value) {
				Ok(edited) => state = edited,
				// The form keeps its previous values.
				Err(error) => eprintln!("{}", error.to_string().yellow()),
			},
			Command::Show => print_form(&state),
			Command::Payload => println!("{}", serde_json::to_string_pretty(&state.finalize())?),
			Command::Submit => {
				println!("{}", "Analyzing medical data...".dimmed());
				match runtime.block_on(gateway.submit(&state.finalize())) {
					Ok(outcome) => print_view(&View::from(&outcome)),
					Err(busy) => eprintln!("{}", busy.to_string().yellow()),
				}
			}
			Command::Reset => state = FormState::new(),
			Command::Help => println!("{}", HELP),
			Command::Quit => break,
		}
	}
	Ok(())
}

#[test]
fn test_parse_command() {
	fn edit(field: &str, value: &str) -> Result<Option<Command>, String> {
		Ok(Some(Command::Edit {
			field: field.to_owned(),
			value: value.to_owned(),
		}))
	}
	assert_eq!(parse_command(""), Ok(None));
	assert_eq!(parse_command("  show "), Ok(Some(Command::Show)));
	assert_eq!(parse_command("submit"), Ok(Some(Command::Submit)));
	assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
	assert_eq!(parse_command("age 63"), edit("age", "63"));
	assert_eq!(parse_command("age   63 years"), edit("age", "63 years"));
	assert_eq!(parse_command("clear chol"), edit("chol", ""));
	assert!(parse_command("clear").is_err());
	assert_eq!(
		parse_command("age"),
		Err("usage: age <value>, or `clear age`".to_owned())
	);
	assert_eq!(
		parse_command("frobnicate"),
		Err("unknown command \"frobnicate\". type `help`".to_owned())
	);
}
