//! Human-readable change summaries.
//!
//! Joins a current and a target snapshot against the flattened definition
//! tree into a per-category report, resolving display names and display
//! values through the translation capability with graceful fallback.

use indexmap::IndexMap;
use reconf_host::{FieldValue, Translator};
use tracing::debug;

use crate::Snapshot;
use crate::defs::{FieldDef, SettingKey, flatten};

/// One field's row in a change summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingItem<K> {
	/// The field's key.
	pub key: K,
	/// Localized display name, or the raw field name when no translation
	/// exists.
	pub name: String,
	/// Display rendering of the current value, when the current snapshot
	/// has one.
	pub current: Option<String>,
	/// Display rendering of the proposed value; present iff the target
	/// snapshot names this key.
	pub new: Option<String>,
}

/// All summary rows of one store category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDiff<K> {
	/// The store category.
	pub category: &'static str,
	/// Rows in flattened-tree order.
	pub items: Vec<SettingItem<K>>,
}

/// Builds the per-category change summary.
///
/// One row per definition-tree node, grouped by category in
/// first-encountered order.
pub(crate) fn describe<K: SettingKey, T: Translator>(
	translator: &T,
	roots: &[FieldDef<K>],
	current: &Snapshot<K>,
	target: &Snapshot<K>,
) -> Vec<CategoryDiff<K>> {
	let mut groups: IndexMap<&'static str, Vec<SettingItem<K>>> = IndexMap::new();
	for def in flatten(roots) {
		let item = SettingItem {
			key: def.key,
			name: display_name(translator, def),
			current: current.get(&def.key).map(|v| display_value(translator, def, v)),
			new: target.get(&def.key).map(|v| display_value(translator, def, v)),
		};
		groups.entry(def.category).or_default().push(item);
	}
	groups
		.into_iter()
		.map(|(category, items)| CategoryDiff { category, items })
		.collect()
}

fn display_name<K: SettingKey, T: Translator>(translator: &T, def: &FieldDef<K>) -> String {
	let Some(label) = def.label else {
		return def.setting.to_string();
	};
	match translator.lookup(label) {
		Some(name) => name,
		None => {
			debug!(key = ?def.key, label, "no translation for label; using raw field name");
			def.setting.to_string()
		}
	}
}

fn display_value<K: SettingKey, T: Translator>(translator: &T, def: &FieldDef<K>, value: &FieldValue) -> String {
	if def.lookup_display_value {
		let path = format!("{}.{}.{}.{}", def.category, def.sub_category, def.setting, value);
		if let Some(label) = translator.lookup(&path) {
			return label;
		}
	}
	value.to_string()
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::defs::Branch;

	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	enum Key {
		Mode,
		Rate,
		Fps,
	}

	impl SettingKey for Key {
		fn all() -> &'static [Self] {
			&[Key::Mode, Key::Rate, Key::Fps]
		}
	}

	struct MapTranslator(HashMap<&'static str, &'static str>);

	impl Translator for MapTranslator {
		fn translate(&self, path: &str) -> String {
			self.0.get(path).map_or_else(|| path.to_string(), |s| s.to_string())
		}
	}

	fn tree() -> Vec<FieldDef<Key>> {
		vec![
			FieldDef::new(Key::Mode, "Output", "Untitled", "Mode")
				.with_label("Settings.Output.Mode")
				.with_dependents(vec![Branch::new("Advanced", vec![
					FieldDef::new(Key::Rate, "Output", "Streaming", "Bitrate"),
				])]),
			FieldDef::new(Key::Fps, "Video", "Untitled", "FPSCommon")
				.with_label("Settings.Video.FPSCommon")
				.with_display_lookup(),
		]
	}

	fn translator() -> MapTranslator {
		MapTranslator(HashMap::from([
			("Settings.Output.Mode", "Output Mode"),
			("Video.Untitled.FPSCommon.30", "30 frames per second"),
		]))
	}

	#[test]
	fn test_one_row_per_key_grouped_by_category() {
		let tree = tree();
		let current = Snapshot::from([
			(Key::Mode, "Simple".into()),
			(Key::Rate, 6000.into()),
			(Key::Fps, "30".into()),
		]);
		let target = Snapshot::from([(Key::Mode, "Advanced".into())]);

		let report = describe(&translator(), &tree, &current, &target);
		let categories: Vec<&str> = report.iter().map(|g| g.category).collect();
		assert_eq!(categories, vec!["Output", "Video"]);
		assert_eq!(report[0].items.len(), 2);
		assert_eq!(report[1].items.len(), 1);

		let mode = &report[0].items[0];
		assert_eq!(mode.name, "Output Mode");
		assert_eq!(mode.current.as_deref(), Some("Simple"));
		assert_eq!(mode.new.as_deref(), Some("Advanced"));

		// Rate was not targeted: no proposed value.
		let rate = &report[0].items[1];
		assert_eq!(rate.name, "Bitrate"); // no label, raw field name
		assert_eq!(rate.current.as_deref(), Some("6000"));
		assert_eq!(rate.new, None);
	}

	#[test]
	fn test_display_value_lookup_with_fallback() {
		let tree = tree();
		let current = Snapshot::from([(Key::Fps, "30".into())]);
		let target = Snapshot::from([(Key::Fps, "60".into())]);

		let report = describe(&translator(), &tree, &current, &target);
		let fps = &report[1].items[0];
		// Label path missing from the translator: raw field name.
		assert_eq!(fps.name, "FPSCommon");
		// "30" has a display translation, "60" falls back to the raw value.
		assert_eq!(fps.current.as_deref(), Some("30 frames per second"));
		assert_eq!(fps.new.as_deref(), Some("60"));
	}

	#[test]
	fn test_absent_current_value_renders_as_none() {
		let tree = tree();
		let report = describe(&translator(), &tree, &Snapshot::new(), &Snapshot::new());
		assert!(report.iter().flat_map(|g| &g.items).all(|i| i.current.is_none() && i.new.is_none()));
		let total: usize = report.iter().map(|g| g.items.len()).sum();
		assert_eq!(total, Key::all().len());
	}
}
