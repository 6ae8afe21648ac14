//! Category form data as exposed by the host settings store.

use serde::{Deserialize, Serialize};

use crate::value::FieldValue;

/// The live form data of one settings category.
///
/// This is the unit of exchange with the host store: reads return a whole
/// category, writes submit a whole category. Which fields are present
/// depends on the host's current state — conditional fields only appear
/// while their parent field holds the matching value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryFormData {
	/// Sub-categories in the host's display order.
	pub sub_categories: Vec<SubCategory>,
}

/// A named group of fields inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
	/// Sub-category name (e.g. "Streaming", "Recording").
	pub name: String,
	/// Fields in the host's display order.
	pub fields: Vec<Field>,
}

/// A single named field with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
	/// Field name inside the sub-category.
	pub name: String,
	/// Current value.
	pub value: FieldValue,
}

impl CategoryFormData {
	/// Locates a field by sub-category and name.
	pub fn field(&self, sub_category: &str, name: &str) -> Option<&Field> {
		self.sub_categories
			.iter()
			.find(|s| s.name == sub_category)?
			.fields
			.iter()
			.find(|f| f.name == name)
	}

	/// Locates a field for mutation.
	pub fn field_mut(&mut self, sub_category: &str, name: &str) -> Option<&mut Field> {
		self.sub_categories
			.iter_mut()
			.find(|s| s.name == sub_category)?
			.fields
			.iter_mut()
			.find(|f| f.name == name)
	}

	/// Convenience read of a field's current value.
	pub fn field_value(&self, sub_category: &str, name: &str) -> Option<&FieldValue> {
		self.field(sub_category, name).map(|f| &f.value)
	}
}

impl SubCategory {
	/// Creates an empty sub-category.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), fields: Vec::new() }
	}

	/// Appends a field, builder-style.
	pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
		self.fields.push(Field { name: name.into(), value: value.into() });
		self
	}
}
