//! Errors surfaced by the host settings-store accessor.

use thiserror::Error;

/// Errors a host accessor can return.
///
/// The reconciliation engine absorbs these at its cache boundary (logged,
/// never propagated to callers), but hosts get a typed error to construct.
#[derive(Debug, Error)]
pub enum AccessError {
	/// The requested category does not exist in the store.
	#[error("unknown settings category: {0}")]
	UnknownCategory(String),

	/// The store refused a form-data write.
	#[error("store rejected form data for {category}: {reason}")]
	Rejected {
		/// Category the write was addressed to.
		category: String,
		/// Host-provided reason.
		reason: String,
	},
}

/// Result type for accessor operations.
pub type Result<T> = std::result::Result<T, AccessError>;
