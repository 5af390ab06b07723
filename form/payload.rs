use crate::field::Field;
use cardioguard_util::finite::Finite;
use thiserror::Error;

/// The body of a prediction request. Every field holds a number. The JSON keys are the [`Field`] names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RequestPayload {
	pub age: i64,
	pub sex: i64,
	pub cp: i64,
	pub trestbps: i64,
	pub chol: i64,
	pub fbs: i64,
	pub restecg: i64,
	pub thalach: i64,
	pub exang: i64,
	pub oldpeak: Finite<f64>,
	pub slope: i64,
	pub ca: i64,
	pub thal: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OutOfRange {
	pub field: Field,
	pub value: f64,
	pub min: f64,
	pub max: f64,
}

impl std::fmt::Display for OutOfRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{} ({}) must be between {} and {}, got {}",
			self.field.label(),
			self.field,
			self.min,
			self.max,
			self.value
		)
	}
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("{}", describe(.0))]
pub struct ValidationError(pub Vec<OutOfRange>);

fn describe(issues: &[OutOfRange]) -> String {
	issues
		.iter()
		.map(|issue| issue.to_string())
		.collect::<Vec<_>>()
		.join("; ")
}

impl RequestPayload {
	pub fn get(&self, field: Field) -> f64 {
		match field {
			Field::Age => self.age as f64,
			Field::Sex => self.sex as f64,
			Field::Cp => self.cp as f64,
			Field::Trestbps => self.trestbps as f64,
			Field::Chol => self.chol as f64,
			Field::Fbs => self.fbs as f64,
			Field::Restecg => self.restecg as f64,
			Field::Thalach => self.thalach as f64,
			Field::Exang => self.exang as f64,
			Field::Oldpeak => self.oldpeak.get(),
			Field::Slope => self.slope as f64,
			Field::Ca => self.ca as f64,
			Field::Thal => self.thal as f64,
		}
	}

	/// Check every field against its plausible range. The prediction service remains the authority on what it accepts, so this is only run when a caller asks for it.
	pub fn validate(&self) -> Result<(), ValidationError> {
		let issues: Vec<OutOfRange> = Field::ALL
			.iter()
			.filter_map(|field| {
				let value = self.get(*field);
				let (min, max) = field.valid_range();
				if value < min || value > max {
					Some(OutOfRange {
						field: *field,
						value,
						min,
						max,
					})
				} else {
					None
				}
			})
			.collect();
		if issues.is_empty() {
			Ok(())
		} else {
			Err(ValidationError(issues))
		}
	}
}

#[cfg(test)]
mod test {
	use crate::FormState;

	#[test]
	fn test_payload_json() {
		let payload = FormState::new().finalize();
		let json = serde_json::to_string(&payload).unwrap();
		insta::assert_snapshot!(json, @r###"{"age":50,"sex":1,"cp":0,"trestbps":120,"chol":200,"fbs":0,"restecg":1,"thalach":150,"exang":0,"oldpeak":1.0,"slope":1,"ca":0,"thal":2}"###);
	}

	#[test]
	fn test_payload_json_after_edits() {
		let payload = FormState::new()
			.edit("age", "")
			.unwrap()
			.edit("oldpeak", "2.5")
			.unwrap()
			.edit("thal", "three")
			.unwrap()
			.finalize();
		let json = serde_json::to_string(&payload).unwrap();
		insta::assert_snapshot!(json, @r###"{"age":0,"sex":1,"cp":0,"trestbps":120,"chol":200,"fbs":0,"restecg":1,"thalach":150,"exang":0,"oldpeak":2.5,"slope":1,"ca":0,"thal":0}"###);
	}

	#[test]
	fn test_validate_defaults() {
		assert_eq!(FormState::new().finalize().validate(), Ok(()));
	}

	#[test]
	fn test_validate_reports_every_field() {
		let payload = FormState::new()
			.edit("age", "")
			.unwrap()
			.edit("cp", "7")
			.unwrap()
			.edit("oldpeak", "-1")
			.unwrap()
			.finalize();
		let error = payload.validate().unwrap_err();
		let fields: Vec<_> = error.0.iter().map(|issue| issue.field.name()).collect();
		assert_eq!(fields, vec!["age", "cp", "oldpeak"]);
		assert_eq!(
			error.0[1].to_string(),
			"Chest Pain Type (cp) must be between 0 and 3, got 7"
		);
	}
}
