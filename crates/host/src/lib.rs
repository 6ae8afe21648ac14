//! Host-boundary types for settings reconciliation.
//!
//! The reconciliation engine never talks to the host application's settings
//! store directly. Everything crosses two narrow capabilities defined here:
//!
//! - [`SettingsAccessor`]: read and write one category's form data at a time.
//! - [`Translator`]: resolve a localization path, echoing the input back
//!   when no translation exists.
//!
//! The data model ([`CategoryFormData`], [`SubCategory`], [`Field`],
//! [`FieldValue`]) mirrors the host store's category / sub-category / field
//! schema. Form data crosses the boundary as a whole-category payload, so
//! the types carry serde derives.

pub mod access;
pub mod error;
pub mod form;
pub mod translate;
pub mod value;

pub use access::SettingsAccessor;
pub use error::{AccessError, Result};
pub use form::{CategoryFormData, Field, SubCategory};
pub use translate::{NoTranslations, Translator};
pub use value::FieldValue;
