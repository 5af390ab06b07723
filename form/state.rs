use crate::{
	field::{Field, FieldKind, ParseFieldError},
	payload::RequestPayload,
};
use cardioguard_util::{
	finite::Finite,
	number::{parse_decimal, parse_integer, ParseNumberError, Parsing},
};
use log::{debug, warn};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue {
	/// The user cleared the input and has not typed anything since.
	Empty,
	Integer(i64),
	Decimal(Finite<f64>),
	/// The user typed text that does not start with a number.
	NotANumber,
}

impl FieldValue {
	/// The text an input box shows for this value.
	pub fn display(&self) -> String {
		match self {
			FieldValue::Empty => String::new(),
			FieldValue::Integer(value) => value.to_string(),
			// Keep the fraction so whole decimals still read as decimals.
			FieldValue::Decimal(value) => format!("{:?}", value.get()),
			FieldValue::NotANumber => "NaN".to_owned(),
		}
	}

	pub fn as_integer(&self) -> Option<i64> {
		match self {
			FieldValue::Integer(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_decimal(&self) -> Option<f64> {
		match self {
			FieldValue::Decimal(value) => Some(value.get()),
			_ => None,
		}
	}
}

impl std::fmt::Display for FieldValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.display())
	}
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
	#[error(transparent)]
	UnknownField(#[from] ParseFieldError),
	#[error("invalid value for {field}: {source}")]
	InvalidNumber {
		field: Field,
		source: ParseNumberError,
	},
}

/**
The values of all thirteen form fields. A `FormState` is never modified in place. Each edit returns a new state, so a caller that receives an [`EditError`] still holds the state from before the edit.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
	values: [FieldValue; 13],
}

impl Default for FormState {
	fn default() -> Self {
		let mut values = [FieldValue::Empty; 13];
		for field in Field::ALL.iter() {
			values[field.index()] = field.default_value();
		}
		Self { values }
	}
}

impl FormState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, field: Field) -> FieldValue {
		self.values[field.index()]
	}

	pub fn iter(&self) -> impl Iterator<Item = (Field, FieldValue)> + '_ {
		Field::ALL
			.iter()
			.map(move |field| (*field, self.values[field.index()]))
	}

	/// Apply the raw text of an input box to the field named `field_name`, parsing numbers permissively.
	pub fn edit(&self, field_name: &str, raw_input: &str) -> Result<FormState, EditError> {
		let field: Field = field_name.parse()?;
		Ok(self.edit_field(field, raw_input))
	}

	/// Like [`FormState::edit`], but reject input that is not entirely a number instead of storing [`FieldValue::NotANumber`] or dropping trailing characters.
	pub fn edit_strict(&self, field_name: &str, raw_input: &str) -> Result<FormState, EditError> {
		let field: Field = field_name.parse()?;
		let value = coerce(field, raw_input, Parsing::Strict)
			.map_err(|source| EditError::InvalidNumber { field, source })?;
		Ok(self.with_value(field, value))
	}

	pub fn edit_field(&self, field: Field, raw_input: &str) -> FormState {
		let value = match coerce(field, raw_input, Parsing::Permissive) {
			Ok(value) => value,
			Err(error) => {
				warn!("{} {:?} is not a number: {}", field, raw_input, error);
				FieldValue::NotANumber
			}
		};
		self.with_value(field, value)
	}

	fn with_value(&self, field: Field, value: FieldValue) -> FormState {
		debug!("{} = {:?}", field, value);
		let mut state = self.clone();
		state.values[field.index()] = value;
		state
	}

	/// Produce the payload to submit. Empty and unparsable values become zero. Call this once, when the user submits, so that a field the user is in the middle of retyping is not replaced.
	pub fn finalize(&self) -> RequestPayload {
		let integer = |field: Field| match self.get(field) {
			FieldValue::Integer(value) => value,
			FieldValue::Decimal(value) => value.get().trunc() as i64,
			FieldValue::Empty | FieldValue::NotANumber => 0,
		};
		let decimal = |field: Field| match self.get(field) {
			FieldValue::Decimal(value) => value,
			FieldValue::Integer(value) => Finite::new(value as f64).unwrap_or(Finite::ZERO),
			FieldValue::Empty | FieldValue::NotANumber => Finite::ZERO,
		};
		RequestPayload {
			age: integer(Field::Age),
			sex: integer(Field::Sex),
			cp: integer(Field::Cp),
			trestbps: integer(Field::Trestbps),
			chol: integer(Field::Chol),
			fbs: integer(Field::Fbs),
			restecg: integer(Field::Restecg),
			thalach: integer(Field::Thalach),
			exang: integer(Field::Exang),
			oldpeak: decimal(Field::Oldpeak),
			slope: integer(Field::Slope),
			ca: integer(Field::Ca),
			thal: integer(Field::Thal),
		}
	}
}

fn coerce(field: Field, raw_input: &str, parsing: Parsing) -> Result<FieldValue, ParseNumberError> {
	if raw_input.is_empty() {
		return Ok(FieldValue::Empty);
	}
	match field.kind() {
		FieldKind::Integer => parse_integer(raw_input, parsing).map(FieldValue::Integer),
		FieldKind::Decimal => parse_decimal(raw_input, parsing).map(FieldValue::Decimal),
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_edit_integer_fields() {
		let state = FormState::new();
		for field in Field::ALL.iter().filter(|field| **field != Field::Oldpeak) {
			let edited = state.edit(field.name(), "7").unwrap();
			assert_eq!(edited.get(*field), FieldValue::Integer(7));
		}
	}

	#[test]
	fn test_edit_oldpeak() {
		let state = FormState::new().edit("oldpeak", "1.5").unwrap();
		assert_eq!(state.get(Field::Oldpeak).as_decimal(), Some(1.5));
	}

	#[test]
	fn test_decimal_display_keeps_fraction() {
		let state = FormState::new();
		assert_eq!(state.get(Field::Oldpeak).display(), "1.0");
		assert_eq!(state.get(Field::Age).display(), "50");
		let state = state.edit("oldpeak", "2.3").unwrap();
		assert_eq!(state.get(Field::Oldpeak).to_string(), "2.3");
	}

	#[test]
	fn test_edit_leaves_other_fields() {
		let before = FormState::new();
		let after = before.edit("chol", "240").unwrap();
		for (field, value) in after.iter() {
			if field == Field::Chol {
				assert_eq!(value, FieldValue::Integer(240));
			} else {
				assert_eq!(value, before.get(field));
			}
		}
	}

	#[test]
	fn test_clear_defers_to_empty() {
		let state = FormState::new().edit("trestbps", "").unwrap();
		assert_eq!(state.get(Field::Trestbps), FieldValue::Empty);
		assert_eq!(state.get(Field::Trestbps).display(), "");
		let state = state.edit("trestbps", "1").unwrap().edit("trestbps", "13").unwrap();
		assert_eq!(state.get(Field::Trestbps), FieldValue::Integer(13));
	}

	#[test]
	fn test_permissive_parsing() {
		let state = FormState::new()
			.edit("age", "63 years")
			.unwrap()
			.edit("ca", "2.7")
			.unwrap()
			.edit("oldpeak", "2.3mm")
			.unwrap();
		assert_eq!(state.get(Field::Age), FieldValue::Integer(63));
		assert_eq!(state.get(Field::Ca), FieldValue::Integer(2));
		assert_eq!(state.get(Field::Oldpeak).as_decimal(), Some(2.3));
	}

	#[test]
	fn test_garbage_becomes_not_a_number() {
		let state = FormState::new().edit("thalach", "fast").unwrap();
		assert_eq!(state.get(Field::Thalach), FieldValue::NotANumber);
		assert_eq!(state.get(Field::Thalach).display(), "NaN");
		assert_eq!(state.finalize().thalach, 0);
	}

	#[test]
	fn test_unknown_field() {
		let state = FormState::new();
		let result = state.edit("heart_rate", "80");
		assert_eq!(
			result,
			Err(EditError::UnknownField(ParseFieldError(
				"heart_rate".to_owned()
			)))
		);
		assert_eq!(state, FormState::new());
	}

	#[test]
	fn test_edit_strict() {
		let state = FormState::new();
		assert_eq!(
			state.edit_strict("age", "63 years"),
			Err(EditError::InvalidNumber {
				field: Field::Age,
				source: ParseNumberError::TrailingCharacters,
			})
		);
		assert_eq!(
			state.edit_strict("oldpeak", "x"),
			Err(EditError::InvalidNumber {
				field: Field::Oldpeak,
				source: ParseNumberError::NoDigits,
			})
		);
		let state = state.edit_strict("age", " 63 ").unwrap();
		assert_eq!(state.get(Field::Age), FieldValue::Integer(63));
		let state = state.edit_strict("age", "").unwrap();
		assert_eq!(state.get(Field::Age), FieldValue::Empty);
	}

	#[test]
	fn test_clear_then_finalize() {
		let defaults = FormState::new().finalize();
		for field in Field::ALL.iter() {
			let payload = FormState::new().edit(field.name(), "").unwrap().finalize();
			for other in Field::ALL.iter() {
				if other == field {
					assert_eq!(payload.get(*other), 0.0);
				} else {
					assert_eq!(payload.get(*other), defaults.get(*other));
				}
			}
		}
	}

	#[test]
	fn test_finalize_is_idempotent() {
		let state = FormState::new()
			.edit("age", "")
			.unwrap()
			.edit("oldpeak", "3.1")
			.unwrap();
		assert_eq!(state.finalize(), state.finalize());
	}

	#[test]
	fn test_finalize_defaults() {
		let payload = FormState::new().finalize();
		assert_eq!(
			payload,
			RequestPayload {
				age: 50,
				sex: 1,
				cp: 0,
				trestbps: 120,
				chol: 200,
				fbs: 0,
				restecg: 1,
				thalach: 150,
				exang: 0,
				oldpeak: Finite::ONE,
				slope: 1,
				ca: 0,
				thal: 2,
			}
		);
	}
}
