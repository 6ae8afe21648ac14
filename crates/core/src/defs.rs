//! Static settings definition model and tree walker.
//!
//! A [`FieldDef`] tree declares every field the engine manages: where the
//! field lives in the host store, how to label it, and — for branching
//! nodes — which child definitions exist for each value the field can
//! take. The tree is built once and shared read-only by every operation.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use reconf_host::FieldValue;
use tracing::warn;

use crate::Snapshot;

/// Stable identifier for a manageable field.
///
/// Callers supply an enumeration (typically derived with
/// `strum::VariantArray`) so [`validate`] can check the definition tree
/// against the full declared key set.
pub trait SettingKey: Copy + Eq + Hash + fmt::Debug + 'static {
	/// Every key the definition tree is expected to cover.
	fn all() -> &'static [Self];
}

/// One node of the definition tree.
#[derive(Debug, Clone)]
pub struct FieldDef<K> {
	/// Unique key of this field.
	pub key: K,
	/// Store category the field lives in.
	pub category: &'static str,
	/// Sub-category inside the category.
	pub sub_category: &'static str,
	/// Field name inside the sub-category.
	pub setting: &'static str,
	/// Localization path for the display name. `None` falls back to the
	/// raw field name without a lookup.
	pub label: Option<&'static str>,
	/// Whether display values go through a localization lookup keyed by
	/// `category.sub_category.setting.raw`.
	pub lookup_display_value: bool,
	/// Conditional children, keyed by the value that activates them.
	/// Non-empty makes this a *branching* node: exactly one branch is
	/// materialized in the host store at a time.
	pub dependents: Vec<Branch<K>>,
}

/// One conditional branch of a branching node.
#[derive(Debug, Clone)]
pub struct Branch<K> {
	/// Parent value that makes this branch's children exist.
	pub selector: FieldValue,
	/// Definitions only meaningful while the branch is active.
	pub children: Vec<FieldDef<K>>,
}

impl<K> FieldDef<K> {
	/// Creates a leaf definition.
	pub fn new(key: K, category: &'static str, sub_category: &'static str, setting: &'static str) -> Self {
		Self {
			key,
			category,
			sub_category,
			setting,
			label: None,
			lookup_display_value: false,
			dependents: Vec::new(),
		}
	}

	/// Sets the localization path used for the display name.
	pub fn with_label(mut self, label: &'static str) -> Self {
		self.label = Some(label);
		self
	}

	/// Enables display-value localization lookups for this field.
	pub fn with_display_lookup(mut self) -> Self {
		self.lookup_display_value = true;
		self
	}

	/// Attaches conditional branches, making this a branching node.
	pub fn with_dependents(mut self, dependents: Vec<Branch<K>>) -> Self {
		self.dependents = dependents;
		self
	}

	/// Whether this node's value selects conditional children.
	pub fn is_branching(&self) -> bool {
		!self.dependents.is_empty()
	}
}

impl<K> Branch<K> {
	/// Creates a branch activated by `selector`.
	pub fn new(selector: impl Into<FieldValue>, children: Vec<FieldDef<K>>) -> Self {
		Self { selector: selector.into(), children }
	}
}

/// Flattens the tree depth-first, parent before children.
///
/// Branch-agnostic: every branch's children are yielded regardless of
/// which branch the store currently materializes. Used for exhaustive
/// operations like diffing.
pub fn flatten<K>(nodes: &[FieldDef<K>]) -> Vec<&FieldDef<K>> {
	let mut out = Vec::new();
	collect(nodes, &mut out);
	out
}

fn collect<'a, K>(nodes: &'a [FieldDef<K>], out: &mut Vec<&'a FieldDef<K>>) {
	for node in nodes {
		out.push(node);
		for branch in &node.dependents {
			collect(&branch.children, out);
		}
	}
}

/// Whether `target` names any key inside `nodes`, recursively through
/// every branch.
///
/// Decides, for a branching node, if a branch must be entered during a
/// write because the target names a field somewhere inside it.
pub fn touches<K: SettingKey>(target: &Snapshot<K>, nodes: &[FieldDef<K>]) -> bool {
	nodes.iter().any(|node| {
		target.contains_key(&node.key) || node.dependents.iter().any(|b| touches(target, &b.children))
	})
}

/// Soft integrity check of the definition tree.
///
/// Compares the keys reachable from `roots` against the full declared
/// enumeration and returns the missing ones. A mismatch is reported, not
/// fatal: the engine still operates on the keys it has. Call this once
/// from the composition root.
pub fn validate<K: SettingKey>(roots: &[FieldDef<K>]) -> Vec<K> {
	let reachable: HashSet<K> = flatten(roots).iter().map(|d| d.key).collect();
	let missing: Vec<K> = K::all().iter().copied().filter(|k| !reachable.contains(k)).collect();
	if !missing.is_empty() {
		warn!(count = missing.len(), keys = ?missing, "definition tree does not cover every declared key");
	}
	missing
}
