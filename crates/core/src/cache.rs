//! Per-operation category cache and write-back ledger.

use std::collections::{HashMap, HashSet};

use reconf_host::{CategoryFormData, SettingsAccessor};
use tracing::{debug, error};

/// Read-through cache of category form data plus a dirty-category ledger.
///
/// One instance is owned by one [`Optimizer`](crate::Optimizer) and holds
/// state for the duration of a single logical operation. A cached
/// [`CategoryFormData`] is the single shared mutable view of that
/// category: field writes mutate it in place and mark the category dirty;
/// [`flush`](Self::flush) sends it back to the store.
///
/// Invariant: flush before any [`forget`](Self::forget), and before
/// pivoting a parent whose branch children live in that category —
/// otherwise in-memory edits are lost when the host swaps children.
pub struct CategoryCache<A> {
	accessor: A,
	entries: HashMap<&'static str, CategoryFormData>,
	dirty: HashSet<&'static str>,
}

impl<A: SettingsAccessor> CategoryCache<A> {
	/// Wraps a host accessor with an empty cache.
	pub fn new(accessor: A) -> Self {
		Self { accessor, entries: HashMap::new(), dirty: HashSet::new() }
	}

	/// The wrapped accessor.
	pub fn accessor(&self) -> &A {
		&self.accessor
	}

	/// Returns the cached form data for `category`, fetching from the
	/// store on a miss or when `force` is set.
	///
	/// A forced reload discards local edits for the category. A fetch
	/// failure is logged and yields `None`; callers skip the field and
	/// continue with the rest of the batch.
	pub fn load(&mut self, category: &'static str, force: bool) -> Option<&mut CategoryFormData> {
		if force {
			self.entries.remove(category);
			self.dirty.remove(category);
		}
		if !self.entries.contains_key(category) {
			match self.accessor.form_data(category) {
				Ok(data) => {
					self.entries.insert(category, data);
				}
				Err(err) => {
					error!(category, %err, "failed to load category form data");
					return None;
				}
			}
		}
		self.entries.get_mut(category)
	}

	/// Records that `category`'s cached form data has unflushed edits.
	pub fn mark_dirty(&mut self, category: &'static str) {
		self.dirty.insert(category);
	}

	/// Whether any category has unflushed edits.
	pub fn has_pending(&self) -> bool {
		!self.dirty.is_empty()
	}

	/// Writes `category`'s cached form data back to the store if it is
	/// dirty; no-op otherwise.
	///
	/// A rejected write is logged and the dirty flag dropped — there is
	/// no retry or rollback path.
	pub fn flush(&mut self, category: &'static str) {
		if !self.dirty.remove(category) {
			return;
		}
		let Some(data) = self.entries.get(category) else {
			debug!(category, "dirty category has no cached form data; nothing to flush");
			return;
		};
		if let Err(err) = self.accessor.set_form_data(category, data) {
			error!(category, %err, "failed to write category form data back to the store");
		}
	}

	/// Flushes every dirty category.
	pub fn flush_all(&mut self) {
		let pending: Vec<&'static str> = self.dirty.iter().copied().collect();
		for category in pending {
			self.flush(category);
		}
	}

	/// Drops the cached entry and dirty flag for `category` without
	/// flushing.
	///
	/// Used when a branch pivot has invalidated the category's shape: the
	/// next [`load`](Self::load) fetches the freshly materialized form.
	pub fn forget(&mut self, category: &'static str) {
		self.entries.remove(category);
		self.dirty.remove(category);
	}

	/// Drops all cached state.
	///
	/// Each logical operation starts from a fresh view of the store; the
	/// cache never outlives one read, optimize, or diff.
	pub fn reset(&mut self) {
		self.entries.clear();
		self.dirty.clear();
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use pretty_assertions::assert_eq;
	use reconf_host::{AccessError, FieldValue, SubCategory};

	use super::*;

	struct CountingStore {
		categories: HashMap<&'static str, CategoryFormData>,
		loads: usize,
		writes: usize,
	}

	impl CountingStore {
		fn new() -> Self {
			let output = CategoryFormData {
				sub_categories: vec![SubCategory::new("Streaming").with_field("VBitrate", 2500)],
			};
			Self { categories: HashMap::from([("Output", output)]), loads: 0, writes: 0 }
		}
	}

	impl SettingsAccessor for CountingStore {
		fn form_data(&mut self, category: &str) -> reconf_host::Result<CategoryFormData> {
			self.loads += 1;
			self.categories
				.get(category)
				.cloned()
				.ok_or_else(|| AccessError::UnknownCategory(category.to_string()))
		}

		fn set_form_data(&mut self, category: &str, data: &CategoryFormData) -> reconf_host::Result<()> {
			self.writes += 1;
			match self.categories.get_mut(category) {
				Some(entry) => {
					*entry = data.clone();
					Ok(())
				}
				None => Err(AccessError::UnknownCategory(category.to_string())),
			}
		}
	}

	#[test]
	fn test_load_is_read_through() {
		let mut cache = CategoryCache::new(CountingStore::new());
		assert!(cache.load("Output", false).is_some());
		assert!(cache.load("Output", false).is_some());
		assert_eq!(cache.accessor().loads, 1);
		assert!(cache.load("Output", true).is_some());
		assert_eq!(cache.accessor().loads, 2);
	}

	#[test]
	fn test_load_unknown_category_is_absent() {
		let mut cache = CategoryCache::new(CountingStore::new());
		assert!(cache.load("Nope", false).is_none());
	}

	#[test]
	fn test_flush_only_writes_dirty_categories() {
		let mut cache = CategoryCache::new(CountingStore::new());
		cache.load("Output", false).unwrap().field_mut("Streaming", "VBitrate").unwrap().value = FieldValue::Int(6000);
		cache.flush("Output");
		assert_eq!(cache.accessor().writes, 0); // never marked dirty

		cache.mark_dirty("Output");
		cache.flush("Output");
		assert_eq!(cache.accessor().writes, 1);
		assert_eq!(
			cache.accessor().categories["Output"].field_value("Streaming", "VBitrate"),
			Some(&FieldValue::Int(6000)),
		);

		// Flushing again is a no-op: the dirty flag was consumed.
		cache.flush("Output");
		assert_eq!(cache.accessor().writes, 1);
	}

	#[test]
	fn test_forget_discards_edits_without_flushing() {
		let mut cache = CategoryCache::new(CountingStore::new());
		cache.load("Output", false).unwrap().field_mut("Streaming", "VBitrate").unwrap().value = FieldValue::Int(6000);
		cache.mark_dirty("Output");
		cache.forget("Output");
		assert!(!cache.has_pending());
		cache.flush_all();
		assert_eq!(cache.accessor().writes, 0);

		// Next load re-fetches the untouched store state.
		let value = cache.load("Output", false).unwrap().field_value("Streaming", "VBitrate").cloned();
		assert_eq!(value, Some(FieldValue::Int(2500)));
	}

	#[test]
	fn test_flush_all_clears_the_ledger() {
		let mut cache = CategoryCache::new(CountingStore::new());
		cache.load("Output", false).unwrap().field_mut("Streaming", "VBitrate").unwrap().value = FieldValue::Int(9000);
		cache.mark_dirty("Output");
		assert!(cache.has_pending());
		cache.flush_all();
		assert!(!cache.has_pending());
		assert_eq!(cache.accessor().writes, 1);
	}
}
