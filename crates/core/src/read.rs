//! Exhaustive snapshot reads with branch pivoting.
//!
//! Unlike writes, reads descend into *every* branch of every branching
//! node: the snapshot must cover fields the host store is not currently
//! materializing. Inactive branches are made visible by temporarily
//! pivoting the parent to their selector value; the original value is
//! restored once all branches of a node are exhausted, so the store's
//! actually-active branch is unchanged after the read returns.

use reconf_host::SettingsAccessor;

use crate::Snapshot;
use crate::cache::CategoryCache;
use crate::defs::{FieldDef, SettingKey};
use crate::write::{current_value, set_value};

/// Reads every field under `nodes` into `out`, depth-first.
///
/// A field whose value cannot be found is logged (by [`current_value`])
/// and omitted; for a branching node that also skips its children, since
/// there is no original value to restore after pivoting.
pub(crate) fn read_into<K: SettingKey, A: SettingsAccessor>(
	cache: &mut CategoryCache<A>,
	nodes: &[FieldDef<K>],
	out: &mut Snapshot<K>,
) {
	for node in nodes {
		let Some(value) = current_value(cache, node) else { continue };
		out.insert(node.key, value.clone());
		if node.is_branching() {
			for branch in &node.dependents {
				set_value(cache, node, branch.selector.clone());
				read_into(cache, &branch.children, out);
			}
			set_value(cache, node, value);
		}
	}
}
