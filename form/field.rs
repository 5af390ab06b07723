use crate::state::FieldValue;
use cardioguard_util::finite::Finite;
use thiserror::Error;

/// The thirteen clinical measurements collected by the form, in the order they are displayed and serialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
	Age,
	Sex,
	Cp,
	Trestbps,
	Chol,
	Fbs,
	Restecg,
	Thalach,
	Exang,
	Oldpeak,
	Slope,
	Ca,
	Thal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
	Integer,
	Decimal,
}

/// One option of a field that the form presents as a select rather than a free number.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Choice {
	pub value: i64,
	pub label: &'static str,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field \"{0}\"")]
pub struct ParseFieldError(pub String);

const SEX_CHOICES: &[Choice] = &[
	Choice {
		value: 1,
		label: "Male",
	},
	Choice {
		value: 0,
		label: "Female",
	},
];

const CP_CHOICES: &[Choice] = &[
	Choice {
		value: 0,
		label: "Typical Angina",
	},
	Choice {
		value: 1,
		label: "Atypical Angina",
	},
	Choice {
		value: 2,
		label: "Non-anginal Pain",
	},
	Choice {
		value: 3,
		label: "Asymptomatic",
	},
];

impl Field {
	pub const ALL: [Field; 13] = [
		Field::Age,
		Field::Sex,
		Field::Cp,
		Field::Trestbps,
		Field::Chol,
		Field::Fbs,
		Field::Restecg,
		Field::Thalach,
		Field::Exang,
		Field::Oldpeak,
		Field::Slope,
		Field::Ca,
		Field::Thal,
	];

	pub fn index(self) -> usize {
		self as usize
	}

	/// The key used for this field in the request payload.
	pub fn name(self) -> &'static str {
		match self {
			Field::Age => "age",
			Field::Sex => "sex",
			Field::Cp => "cp",
			Field::Trestbps => "trestbps",
			Field::Chol => "chol",
			Field::Fbs => "fbs",
			Field::Restecg => "restecg",
			Field::Thalach => "thalach",
			Field::Exang => "exang",
			Field::Oldpeak => "oldpeak",
			Field::Slope => "slope",
			Field::Ca => "ca",
			Field::Thal => "thal",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Field::Age => "Age",
			Field::Sex => "Gender",
			Field::Cp => "Chest Pain Type",
			Field::Trestbps => "Resting Blood Pressure",
			Field::Chol => "Cholesterol Level",
			Field::Fbs => "Fasting Blood Sugar",
			Field::Restecg => "Resting ECG",
			Field::Thalach => "Maximum Heart Rate",
			Field::Exang => "Exercise Induced Angina",
			Field::Oldpeak => "ST Depression",
			Field::Slope => "Slope of ST Segment",
			Field::Ca => "Major Vessels",
			Field::Thal => "Thalassemia",
		}
	}

	pub fn kind(self) -> FieldKind {
		match self {
			Field::Oldpeak => FieldKind::Decimal,
			_ => FieldKind::Integer,
		}
	}

	/// The increment an input box for this field steps by.
	pub fn step(self) -> f64 {
		match self.kind() {
			FieldKind::Decimal => 0.1,
			FieldKind::Integer => 1.0,
		}
	}

	pub fn choices(self) -> Option<&'static [Choice]> {
		match self {
			Field::Sex => Some(SEX_CHOICES),
			Field::Cp => Some(CP_CHOICES),
			_ => None,
		}
	}

	pub fn default_value(self) -> FieldValue {
		match self {
			Field::Age => FieldValue::Integer(50),
			Field::Sex => FieldValue::Integer(1),
			Field::Cp => FieldValue::Integer(0),
			Field::Trestbps => FieldValue::Integer(120),
			Field::Chol => FieldValue::Integer(200),
			Field::Fbs => FieldValue::Integer(0),
			Field::Restecg => FieldValue::Integer(1),
			Field::Thalach => FieldValue::Integer(150),
			Field::Exang => FieldValue::Integer(0),
			Field::Oldpeak => FieldValue::Decimal(Finite::ONE),
			Field::Slope => FieldValue::Integer(1),
			Field::Ca => FieldValue::Integer(0),
			Field::Thal => FieldValue::Integer(2),
		}
	}

	/// The inclusive range of plausible values, used by [`RequestPayload::validate`](crate::RequestPayload::validate).
	pub fn valid_range(self) -> (f64, f64) {
		match self {
			Field::Age => (1.0, 120.0),
			Field::Sex => (0.0, 1.0),
			Field::Cp => (0.0, 3.0),
			Field::Trestbps => (50.0, 250.0),
			Field::Chol => (100.0, 600.0),
			Field::Fbs => (0.0, 1.0),
			Field::Restecg => (0.0, 2.0),
			Field::Thalach => (50.0, 250.0),
			Field::Exang => (0.0, 1.0),
			Field::Oldpeak => (0.0, 10.0),
			Field::Slope => (0.0, 2.0),
			Field::Ca => (0.0, 4.0),
			Field::Thal => (0.0, 3.0),
		}
	}
}

impl std::str::FromStr for Field {
	type Err = ParseFieldError;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Field::ALL
			.iter()
			.copied()
			.find(|field| field.name() == s)
			.ok_or_else(|| ParseFieldError(s.to_owned()))
	}
}

impl std::fmt::Display for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

#[test]
fn test_parse_field() {
	for field in Field::ALL.iter() {
		assert_eq!(field.name().parse::<Field>(), Ok(*field));
	}
	assert_eq!(
		"cholesterol".parse::<Field>(),
		Err(ParseFieldError("cholesterol".to_owned()))
	);
	assert!("Age".parse::<Field>().is_err());
}

#[test]
fn test_field_order() {
	for (index, field) in Field::ALL.iter().enumerate() {
		assert_eq!(field.index(), index);
	}
	assert_eq!(Field::Oldpeak.kind(), FieldKind::Decimal);
	assert_eq!(Field::Thal.kind(), FieldKind::Integer);
	assert_eq!(Field::Oldpeak.step(), 0.1);
	assert_eq!(Field::Chol.step(), 1.0);
}
