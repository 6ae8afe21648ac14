//! Localization capability.

/// Translate-or-fallback lookup of display strings.
///
/// The contract mirrors common host localization layers: when no
/// translation exists for a path, the path itself comes back unchanged.
/// Callers that need to distinguish "translated" from "missing" use
/// [`lookup`](Self::lookup).
pub trait Translator {
	/// Resolves a localization path, echoing it back when unknown.
	fn translate(&self, path: &str) -> String;

	/// Resolves a path, returning `None` when no translation exists.
	fn lookup(&self, path: &str) -> Option<String> {
		let translated = self.translate(path);
		(translated != path).then_some(translated)
	}
}

/// Translator for hosts without a localization layer: every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTranslations;

impl Translator for NoTranslations {
	fn translate(&self, path: &str) -> String {
		path.to_string()
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use pretty_assertions::assert_eq;

	use super::*;

	struct MapTranslator(HashMap<&'static str, &'static str>);

	impl Translator for MapTranslator {
		fn translate(&self, path: &str) -> String {
			self.0.get(path).map_or_else(|| path.to_string(), |s| s.to_string())
		}
	}

	#[test]
	fn test_lookup_treats_echo_as_missing() {
		let translator = MapTranslator(HashMap::from([("a.b", "Label")]));
		assert_eq!(translator.lookup("a.b"), Some("Label".to_string()));
		assert_eq!(translator.lookup("a.c"), None);
	}

	#[test]
	fn test_no_translations_always_misses() {
		assert_eq!(NoTranslations.translate("x.y"), "x.y");
		assert_eq!(NoTranslations.lookup("x.y"), None);
	}
}
