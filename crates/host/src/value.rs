//! Raw field values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The raw value of a single settings field.
///
/// Hosts expose heterogeneous field types; this enum covers the shapes the
/// reconciliation engine needs to compare and round-trip. Equality drives
/// the engine's no-op detection, so two values are only "the same" when
/// both the variant and the payload match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	/// On/off toggle.
	Bool(bool),
	/// Whole number (bitrates, buffer sizes, port numbers).
	Int(i64),
	/// Fractional number (multipliers, non-integer frame rates).
	Float(f64),
	/// Free-form or enumerated text (mode selectors, encoder names).
	String(String),
}

impl FieldValue {
	/// The contained toggle, or `None` for non-`Bool` values.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(v) => Some(*v),
			_ => None,
		}
	}

	/// The contained whole number, or `None` for non-`Int` values.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// The contained fractional number, or `None` for non-`Float` values.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			Self::Float(v) => Some(*v),
			_ => None,
		}
	}

	/// The contained text, or `None` for non-`String` values.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(v) => Some(v),
			_ => None,
		}
	}

	/// Human-readable name of the contained type, for diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "bool",
			Self::Int(_) => "int",
			Self::Float(_) => "float",
			Self::String(_) => "string",
		}
	}
}

impl fmt::Display for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Bool(v) => write!(f, "{v}"),
			Self::Int(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::String(v) => f.write_str(v),
		}
	}
}

impl From<bool> for FieldValue {
	fn from(v: bool) -> Self {
		Self::Bool(v)
	}
}

impl From<i64> for FieldValue {
	fn from(v: i64) -> Self {
		Self::Int(v)
	}
}

impl From<i32> for FieldValue {
	fn from(v: i32) -> Self {
		Self::Int(i64::from(v))
	}
}

impl From<f64> for FieldValue {
	fn from(v: f64) -> Self {
		Self::Float(v)
	}
}

impl From<&str> for FieldValue {
	fn from(v: &str) -> Self {
		Self::String(v.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(v: String) -> Self {
		Self::String(v)
	}
}
