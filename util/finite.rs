use num_traits::Float;
use std::cmp::{Ord, Ordering};
use thiserror::Error;

/// A float that is known not to be NaN or infinite. Both the `oldpeak` form value and the probability returned by the prediction service are carried as `Finite`, so neither can reach the wire or the display as `NaN`.
#[derive(Clone, Copy, Debug)]
pub struct Finite<T>(T)
where
	T: Float;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("not finite")]
pub struct NotFiniteError;

impl<T> Finite<T>
where
	T: Float,
{
	pub fn new(value: T) -> Result<Self, NotFiniteError> {
		if value.is_finite() {
			Ok(Self(value))
		} else {
			Err(NotFiniteError)
		}
	}

	pub fn get(self) -> T {
		self.0
	}
}

impl Finite<f64> {
	pub const ZERO: Self = Finite(0.0);
	pub const ONE: Self = Finite(1.0);
}

impl<T> std::fmt::Display for Finite<T>
where
	T: Float + std::fmt::Display,
{
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl<T> PartialEq for Finite<T>
where
	T: Float,
{
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.0.eq(&other.0)
	}
}

impl<T> Eq for Finite<T> where T: Float {}

impl<T> PartialOrd for Finite<T>
where
	T: Float,
{
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl<T> Ord for Finite<T>
where
	T: Float,
{
	fn cmp(&self, other: &Self) -> Ordering {
		// Neither side can be NaN.
		self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal)
	}
}

impl<T> serde::Serialize for Finite<T>
where
	T: Float + serde::Serialize,
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		self.0.serialize(serializer)
	}
}

impl<'de, T> serde::Deserialize<'de> for Finite<T>
where
	T: Float + serde::Deserialize<'de>,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let value = T::deserialize(deserializer)?;
		Finite::new(value).map_err(serde::de::Error::custom)
	}
}

pub trait ToFinite<T>
where
	T: Float,
{
	/// If the value is finite, return `Ok(Finite(self))`, otherwise return `Err(NotFiniteError)`.
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError>;
}

impl<T> ToFinite<T> for T
where
	T: Float,
{
	fn to_finite(self) -> Result<Finite<T>, NotFiniteError> {
		Finite::new(self)
	}
}

#[test]
fn test_finite() {
	assert_eq!(1.5f64.to_finite().map(Finite::get), Ok(1.5));
	assert_eq!(f64::NAN.to_finite(), Err(NotFiniteError));
	assert_eq!(f64::INFINITY.to_finite(), Err(NotFiniteError));
	assert!(Finite::new(0.25f32).unwrap() < Finite::new(0.5f32).unwrap());
}

#[test]
fn test_finite_serde() {
	let value: Finite<f64> = serde_json::from_str("0.87").unwrap();
	assert_eq!(value.get(), 0.87);
	assert_eq!(serde_json::to_string(&value).unwrap(), "0.87");
	assert!(serde_json::from_str::<Finite<f64>>("\"high\"").is_err());
}
