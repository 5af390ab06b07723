use cardioguard_form::{Field, FieldKind, FieldValue, FormState};
use cardioguard_gateway::render::{Tone, View};
use colored::Colorize;

pub fn print_fields() {
	println!(
		"{:<10} {:<25} {:<8} {:<5} {:<8} choices",
		"field", "label", "kind", "step", "default"
	);
	for field in Field::ALL.iter() {
		let kind = match field.kind() {
			FieldKind::Integer => "integer",
			FieldKind::Decimal => "decimal",
		};
		let choices = field
			.choices()
			.map(|choices| {
				choices
					.iter()
					.map(|choice| format!("{} {}", choice.value, choice.label))
					.collect::<Vec<_>>()
					.join(", ")
			})
			.unwrap_or_default();
		println!(
			"{:<10} {:<25} {:<8} {:<5} {:<8} {}",
			field.name(),
			field.label(),
			kind,
			field.step(),
			field.default_value().display(),
			choices
		);
	}
}

pub fn print_form(state: &FormState) {
	for (field, value) in state.iter() {
		println!(
			"  {:<10} {:<25} {}",
			field.name(),
			field.label(),
			describe_value(field, value)
		);
	}
}

/// Show a value the way the form shows it, naming the selected choice for select fields.
fn describe_value(field: Field, value: FieldValue) -> String {
	let choice = value.as_integer().and_then(|value| {
		field
			.choices()?
			.iter()
			.find(|choice| choice.value == value)
			.map(|choice| choice.label)
	});
	match (value, choice) {
		(FieldValue::Empty, _) => "(empty)".dimmed().to_string(),
		(FieldValue::NotANumber, _) => "NaN".yellow().to_string(),
		(value, Some(label)) => format!("{} ({})", value, label),
		(value, None) => value.to_string(),
	}
}

pub fn print_view(view: &View) {
	match view {
		View::Result(result) => {
			let heading = match result.tone {
				Tone::Risk => result.heading.red().bold(),
				Tone::Safe => result.heading.green().bold(),
			};
			println!("{}", heading);
			println!("Confidence Score: {}", result.confidence.bold());
			println!("{}", result.message);
		}
		View::Alert(message) => {
			eprintln!("{} {}", "!".yellow().bold(), message);
		}
	}
}

#[test]
fn test_describe_value() {
	colored::control::set_override(false);
	assert_eq!(
		describe_value(Field::Sex, FieldValue::Integer(0)),
		"0 (Female)"
	);
	assert_eq!(
		describe_value(Field::Cp, FieldValue::Integer(3)),
		"3 (Asymptomatic)"
	);
	assert_eq!(describe_value(Field::Cp, FieldValue::Integer(9)), "9");
	assert_eq!(describe_value(Field::Age, FieldValue::Empty), "(empty)");
	assert_eq!(describe_value(Field::Age, FieldValue::NotANumber), "NaN");
}
