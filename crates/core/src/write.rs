//! Dependency-ordered application of a target snapshot.
//!
//! Writes are minimal: the writer descends only into branches the target
//! actually names fields in (unlike reads, which descend everywhere).
//! The delicate part is [`set_value`]'s flush/forget discipline around
//! branching fields — switching a parent's value makes the host store
//! recompute which child fields exist, so pending edits under the old
//! shape must reach the store before the pivot and stale cached shapes
//! must be dropped after it.

use reconf_host::{FieldValue, SettingsAccessor};
use tracing::{debug, error, warn};

use crate::Snapshot;
use crate::cache::CategoryCache;
use crate::defs::{FieldDef, SettingKey, flatten, touches};

/// Applies every targeted field under `nodes`.
///
/// For a branching node the current value is remembered as the fallback,
/// each branch the target reaches into is pivoted to and descended, and
/// the node finally lands on the target's explicit value (or the
/// fallback). When the target explicitly names the branching node's own
/// key, only the branch its value selects is descended; targeted fields
/// under non-selected branches are ignored, not applied.
pub(crate) fn write_batch<K: SettingKey, A: SettingsAccessor>(
	cache: &mut CategoryCache<A>,
	target: &Snapshot<K>,
	nodes: &[FieldDef<K>],
) {
	for node in nodes {
		if node.is_branching() {
			let fallback = current_value(cache, node);
			let pinned = target.get(&node.key);
			for branch in &node.dependents {
				if !touches(target, &branch.children) {
					continue;
				}
				if let Some(selected) = pinned
					&& *selected != branch.selector
				{
					debug!(key = ?node.key, selector = %branch.selector, "ignoring targeted fields under a non-selected branch");
					continue;
				}
				set_value(cache, node, branch.selector.clone());
				write_batch(cache, target, &branch.children);
			}
			if let Some(value) = pinned.cloned().or(fallback) {
				set_value(cache, node, value);
			}
		} else if let Some(value) = target.get(&node.key) {
			set_value(cache, node, value.clone());
		}
	}
}

/// Reads a field's current value through the cache.
///
/// An absent field is a schema drift or store-version mismatch: logged,
/// and the caller skips the node.
pub(crate) fn current_value<K: SettingKey, A: SettingsAccessor>(
	cache: &mut CategoryCache<A>,
	def: &FieldDef<K>,
) -> Option<FieldValue> {
	let data = cache.load(def.category, false)?;
	let value = data.field_value(def.sub_category, def.setting).cloned();
	if value.is_none() {
		error!(
			key = ?def.key,
			category = def.category,
			sub_category = def.sub_category,
			setting = def.setting,
			"field has no value in the store",
		);
	}
	value
}

/// Sets one field in its category's cached form data.
///
/// Idempotent: a value equal to the stored one is a no-op. For branching
/// nodes the mutation is bracketed by the write-back discipline:
///
/// 1. flush every category referenced anywhere under any branch — the
///    pivot is about to orphan unflushed edits to the old branch's
///    categories;
/// 2. mutate the cached field and mark its own category dirty;
/// 3. flush the node's own category so the store commits the swap, then
///    forget every branch-referenced category so the next load picks up
///    the freshly materialized shape.
pub(crate) fn set_value<K: SettingKey, A: SettingsAccessor>(
	cache: &mut CategoryCache<A>,
	def: &FieldDef<K>,
	value: FieldValue,
) {
	{
		let Some(data) = cache.load(def.category, false) else { return };
		match data.field_value(def.sub_category, def.setting) {
			Some(current) if *current == value => return,
			Some(_) => {}
			None => {
				warn!(
					key = ?def.key,
					category = def.category,
					sub_category = def.sub_category,
					setting = def.setting,
					"field not found in category form data; skipping",
				);
				return;
			}
		}
	}

	let branch_categories = dependent_categories(def);
	for category in branch_categories.iter().copied() {
		cache.flush(category);
	}

	let Some(data) = cache.load(def.category, false) else { return };
	let Some(field) = data.field_mut(def.sub_category, def.setting) else { return };
	field.value = value;
	cache.mark_dirty(def.category);

	if def.is_branching() {
		// The swap must be durable before any child category is re-read
		// under the new shape.
		cache.flush(def.category);
		for category in branch_categories {
			cache.forget(category);
		}
	}
}

/// Categories referenced anywhere under any branch of `def`, in
/// first-encountered order. Empty for leaves.
fn dependent_categories<K>(def: &FieldDef<K>) -> Vec<&'static str> {
	let mut out = Vec::new();
	for branch in &def.dependents {
		for child in flatten(&branch.children) {
			if !out.contains(&child.category) {
				out.push(child.category);
			}
		}
	}
	out
}
