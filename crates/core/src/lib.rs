//! Dependency-aware settings reconciliation.
//!
//! This crate reads, reconciles, and writes a declared set of fields in a
//! host application's settings store, where some fields only exist while
//! a parent field holds a particular value. It provides:
//!
//! - **Definition model** ([`FieldDef`], [`Branch`]): a static tree
//!   declaring every manageable field and its conditional children.
//! - **Tree walker** ([`flatten`], [`touches`], [`validate`]): pure
//!   traversal utilities over the tree.
//! - **Category cache & write-back ledger** ([`CategoryCache`]):
//!   per-operation read-through cache plus dirty tracking.
//! - **[`Optimizer`]**: the engine facade — exhaustive snapshot reads,
//!   dependency-ordered batch writes, and per-category change summaries.
//!
//! # Example
//!
//! ```ignore
//! use reconf_core::{Branch, FieldDef, Optimizer, Snapshot};
//!
//! let defs = vec![
//!     FieldDef::new(Key::OutputMode, "Output", "Untitled", "Mode")
//!         .with_dependents(vec![Branch::new("Advanced", vec![
//!             FieldDef::new(Key::VideoBitrate, "Output", "Streaming", "Bitrate"),
//!         ])]),
//! ];
//! let mut optimizer = Optimizer::new(accessor, translator, defs);
//!
//! let current = optimizer.current_settings();
//! let target = Snapshot::from([
//!     (Key::OutputMode, "Advanced".into()),
//!     (Key::VideoBitrate, 2500.into()),
//! ]);
//! for group in optimizer.optimize_info(&current, &target) {
//!     // render the proposed changes
//! }
//! optimizer.optimize(&target);
//! ```
//!
//! All failure modes are non-fatal: missing fields, unknown categories,
//! and missing translations are logged and the batch continues. Every
//! public entry point runs to completion.

pub mod cache;
pub mod defs;
mod read;
pub mod report;
mod write;

use std::collections::HashMap;

pub use cache::CategoryCache;
pub use defs::{Branch, FieldDef, SettingKey, flatten, touches, validate};
pub use reconf_host::{
	AccessError, CategoryFormData, Field, FieldValue, NoTranslations, SettingsAccessor,
	SubCategory, Translator,
};
pub use report::{CategoryDiff, SettingItem};

/// A complete or partial mapping from field key to raw value.
///
/// Presence of a key in a target snapshot means "set this field"; absence
/// means "leave unspecified".
pub type Snapshot<K> = HashMap<K, FieldValue>;

/// The reconciliation engine.
///
/// Owns the definition tree, the translator, and one category cache. The
/// cache and its dirty ledger are scoped to this instance and reset at
/// the start of each logical operation; there is no internal locking, so
/// callers serialize operations on one instance (or use one instance per
/// concurrent operation).
pub struct Optimizer<K, A, T> {
	defs: Vec<FieldDef<K>>,
	cache: CategoryCache<A>,
	translator: T,
}

impl<K: SettingKey, A: SettingsAccessor, T: Translator> Optimizer<K, A, T> {
	/// Creates an engine over a host accessor, a translator, and the
	/// definition tree.
	///
	/// Does not validate the tree; call [`Optimizer::validate`] once from
	/// the composition root.
	pub fn new(accessor: A, translator: T, defs: Vec<FieldDef<K>>) -> Self {
		Self { defs, cache: CategoryCache::new(accessor), translator }
	}

	/// Soft integrity check: returns (and logs) every declared key the
	/// definition tree does not reach.
	pub fn validate(&self) -> Vec<K> {
		defs::validate(&self.defs)
	}

	/// The definition tree.
	pub fn definitions(&self) -> &[FieldDef<K>] {
		&self.defs
	}

	/// The wrapped host accessor.
	pub fn accessor(&self) -> &A {
		self.cache.accessor()
	}

	/// Reads a complete snapshot of every declared field.
	///
	/// Fields under inactive branches are read by temporarily pivoting
	/// their parent into each branch; the active branch is restored
	/// before returning.
	pub fn current_settings(&mut self) -> Snapshot<K> {
		self.cache.reset();
		let mut snapshot = Snapshot::new();
		read::read_into(&mut self.cache, &self.defs, &mut snapshot);
		snapshot
	}

	/// Applies a target snapshot to the store.
	///
	/// Descends only into branches the target names fields in, sets
	/// parents before their children, and flushes every modified category
	/// — including categories touched only transiently during branch
	/// traversal — before returning.
	pub fn optimize(&mut self, target: &Snapshot<K>) {
		self.cache.reset();
		write::write_batch(&mut self.cache, target, &self.defs);
		self.cache.flush_all();
	}

	/// Builds a display-ready, per-category summary of the changes
	/// `target` proposes over `current`.
	pub fn optimize_info(&self, current: &Snapshot<K>, target: &Snapshot<K>) -> Vec<CategoryDiff<K>> {
		report::describe(&self.translator, &self.defs, current, target)
	}
}
