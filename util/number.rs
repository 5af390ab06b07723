/*!
This module parses numbers typed into form fields.

Two modes are supported. [`Parsing::Permissive`] reads the longest numeric prefix of the text and ignores whatever follows, the way browser `parseInt` and `parseFloat` do. [`Parsing::Strict`] requires the whole text, less surrounding whitespace, to be a number.

| text     | integer         | decimal         |
|----------|-----------------|-----------------|
| `7`      | 7               | 7.0             |
| ` 12abc` | 12              | 12.0            |
| `1.9`    | 1               | 1.9             |
| `2.3mm`  | 2               | 2.3             |
| `.5`     | no digits       | 0.5             |
| `1e3`    | 1               | 1000.0          |
| `abc`    | no digits       | no digits       |
*/

use crate::finite::{Finite, ToFinite};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parsing {
	Permissive,
	Strict,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ParseNumberError {
	#[error("no digits found")]
	NoDigits,
	#[error("unexpected characters after the number")]
	TrailingCharacters,
	#[error("number out of range")]
	OutOfRange,
	#[error("number is not finite")]
	NotFinite,
}

pub fn parse_integer(text: &str, parsing: Parsing) -> Result<i64, ParseNumberError> {
	let text = text.trim_start();
	let prefix = scan(text, false).ok_or(ParseNumberError::NoDigits)?;
	check_trailing(text, &prefix, parsing)?;
	lexical::parse::<i64, _>(prefix.normalized.as_bytes()).map_err(|_| ParseNumberError::OutOfRange)
}

pub fn parse_decimal(text: &str, parsing: Parsing) -> Result<Finite<f64>, ParseNumberError> {
	let text = text.trim_start();
	let prefix = scan(text, true).ok_or(ParseNumberError::NoDigits)?;
	check_trailing(text, &prefix, parsing)?;
	let value = lexical::parse::<f64, _>(prefix.normalized.as_bytes())
		.map_err(|_| ParseNumberError::OutOfRange)?;
	value.to_finite().map_err(|_| ParseNumberError::NotFinite)
}

struct Prefix {
	/// The number of bytes of the input that belong to the number.
	len: usize,
	/// The number rewritten so that it always has integer digits and never has a leading `+` or a dangling `.`.
	normalized: String,
}

fn check_trailing(text: &str, prefix: &Prefix, parsing: Parsing) -> Result<(), ParseNumberError> {
	if parsing == Parsing::Strict && !text[prefix.len..].trim().is_empty() {
		return Err(ParseNumberError::TrailingCharacters);
	}
	Ok(())
}

fn scan(text: &str, decimal: bool) -> Option<Prefix> {
	let bytes = text.as_bytes();
	let mut index = 0;
	let mut normalized = String::new();
	match bytes.first() {
		Some(b'-') => {
			normalized.push('-');
			index += 1;
		}
		Some(b'+') => {
			index += 1;
		}
		_ => {}
	}
	let integer_digits = count_digits(&bytes[index..]);
	normalized.push_str(&text[index..index + integer_digits]);
	index += integer_digits;
	if !decimal {
		if integer_digits == 0 {
			return None;
		}
		return Some(Prefix {
			len: index,
			normalized,
		});
	}
	let mut len = index;
	if bytes.get(index) == Some(&b'.') {
		let fraction_digits = count_digits(&bytes[index + 1..]);
		if integer_digits == 0 && fraction_digits == 0 {
			return None;
		}
		if integer_digits == 0 {
			normalized.push('0');
		}
		if fraction_digits > 0 {
			normalized.push('.');
			normalized.push_str(&text[index + 1..index + 1 + fraction_digits]);
		}
		len = index + 1 + fraction_digits;
	} else if integer_digits == 0 {
		return None;
	}
	// An exponent only counts when at least one digit follows it.
	if let Some(b'e') | Some(b'E') = bytes.get(len) {
		let mut exponent_index = len + 1;
		let mut exponent = String::from("e");
		match bytes.get(exponent_index) {
			Some(b'-') => {
				exponent.push('-');
				exponent_index += 1;
			}
			Some(b'+') => {
				exponent_index += 1;
			}
			_ => {}
		}
		let exponent_digits = count_digits(&bytes[exponent_index..]);
		if exponent_digits > 0 {
			exponent.push_str(&text[exponent_index..exponent_index + exponent_digits]);
			normalized.push_str(&exponent);
			len = exponent_index + exponent_digits;
		}
	}
	Some(Prefix { len, normalized })
}

fn count_digits(bytes: &[u8]) -> usize {
	bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}

#[test]
fn test_parse_integer() {
	fn test(text: &str, expected: Result<i64, ParseNumberError>) {
		assert_eq!(parse_integer(text, Parsing::Permissive), expected, "{:?}", text);
	}
	test("7", Ok(7));
	test("  12abc", Ok(12));
	test("1.9", Ok(1));
	test("1e3", Ok(1));
	test("-40", Ok(-40));
	test("+3", Ok(3));
	test("abc", Err(ParseNumberError::NoDigits));
	test("-", Err(ParseNumberError::NoDigits));
	test("", Err(ParseNumberError::NoDigits));
	test("99999999999999999999999", Err(ParseNumberError::OutOfRange));
}

#[test]
fn test_parse_decimal() {
	fn test(text: &str, expected: Result<f64, ParseNumberError>) {
		assert_eq!(
			parse_decimal(text, Parsing::Permissive).map(Finite::get),
			expected,
			"{:?}",
			text
		);
	}
	test("1.5", Ok(1.5));
	test("2.3mm", Ok(2.3));
	test("3", Ok(3.0));
	test("4.", Ok(4.0));
	test(".5", Ok(0.5));
	test("-1.25", Ok(-1.25));
	test("1e3", Ok(1000.0));
	test("2e", Ok(2.0));
	test("2e-1x", Ok(0.2));
	test(".", Err(ParseNumberError::NoDigits));
	test("abc", Err(ParseNumberError::NoDigits));
}

#[test]
fn test_strict() {
	assert_eq!(parse_integer(" 42 ", Parsing::Strict), Ok(42));
	assert_eq!(
		parse_integer("42kg", Parsing::Strict),
		Err(ParseNumberError::TrailingCharacters)
	);
	assert_eq!(
		parse_integer("1.5", Parsing::Strict),
		Err(ParseNumberError::TrailingCharacters)
	);
	assert_eq!(
		parse_decimal("1.5", Parsing::Strict).map(Finite::get),
		Ok(1.5)
	);
	assert_eq!(
		parse_decimal("1.5.2", Parsing::Strict),
		Err(ParseNumberError::TrailingCharacters)
	);
}
