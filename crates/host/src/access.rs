//! Accessor capability over the host settings store.

use crate::error::Result;
use crate::form::CategoryFormData;

/// Narrow capability onto the host application's settings store.
///
/// Implementations hand out the *current* form data for a category and
/// accept whole-category writes back. Hosts with conditional fields are
/// expected to recompute which fields exist from durable state on every
/// [`form_data`](Self::form_data) call — the engine's pivot/flush
/// discipline relies on that.
///
/// Field-level lookup is not part of the capability; it lives on
/// [`CategoryFormData`] itself.
pub trait SettingsAccessor {
	/// Reads the current form data of one category.
	fn form_data(&mut self, category: &str) -> Result<CategoryFormData>;

	/// Durably writes a whole category's form data back to the store.
	fn set_form_data(&mut self, category: &str, data: &CategoryFormData) -> Result<()>;
}
