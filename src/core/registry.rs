//! Translation registry and resource emitter.
//!
//! The registry is the only mutable state shared between concurrently
//! processed files. It is insert-only: a key, once taken, is never updated
//! or removed during a run.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::locale::Locale;
use crate::{error::Result, utils::write_atomic};

/// Synchronized key → original text store for one run.
#[derive(Debug, Default)]
pub struct TranslationRegistry {
    entries: Mutex<BTreeMap<String, String>>,
}

impl TranslationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned lock only means another worker panicked mid-insert;
        // the map itself is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert `key → text` unless `key` is already taken.
    ///
    /// Returns false on a collision; the existing entry is left untouched.
    pub fn try_insert(&self, key: String, text: String) -> bool {
        use std::collections::btree_map::Entry;

        match self.lock().entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(text);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consume the registry, returning its entries sorted by key.
    pub fn into_entries(self) -> BTreeMap<String, String> {
        self.entries.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    /// Snapshot of the current entries sorted by key.
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.lock().clone()
    }
}

/// Format of the emitted resource module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `export default { ... };` in a `.js` file.
    #[default]
    Js,
    /// `export default { ... };` in a `.ts` file.
    Ts,
    /// A plain JSON object.
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Js => "js",
            OutputFormat::Ts => "ts",
            OutputFormat::Json => "json",
        }
    }
}

/// Path of the resource module for `locale` under `output_dir`.
pub fn output_path(output_dir: &Path, locale: Locale, format: OutputFormat) -> PathBuf {
    output_dir.join(format!("{}.{}", locale.code(), format.extension()))
}

/// Render the resource module text.
pub fn render_resource(entries: &BTreeMap<String, String>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            let map: Map<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            // Serializing a map of strings cannot fail.
            let body = serde_json::to_string_pretty(&Value::Object(map)).unwrap_or_default();
            format!("{}\n", body)
        }
        OutputFormat::Js | OutputFormat::Ts => {
            let mut out = String::from("export default {\n");
            for (key, text) in entries {
                out.push_str("  ");
                out.push_str(&json_string(key));
                out.push_str(": ");
                out.push_str(&json_string(text));
                out.push_str(",\n");
            }
            out.push_str("};\n");
            out
        }
    }
}

/// JSON string escaping is also a valid JS string literal.
fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Write the registry to `<output_dir>/<locale>.<ext>`.
///
/// Any existing file is replaced; entries from earlier runs are not merged.
pub fn emit(
    registry: TranslationRegistry,
    output_dir: &Path,
    locale: Locale,
    format: OutputFormat,
) -> Result<PathBuf> {
    let path = output_path(output_dir, locale, format);
    let entries = registry.into_entries();
    tracing::debug!(path = %path.display(), entries = entries.len(), "emitting resource module");
    write_atomic(&path, &render_resource(&entries, format))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc, thread};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn registry_with(entries: &[(&str, &str)]) -> TranslationRegistry {
        let registry = TranslationRegistry::new();
        for (k, v) in entries {
            assert!(registry.try_insert(k.to_string(), v.to_string()));
        }
        registry
    }

    #[test]
    fn test_insert_refuses_taken_key() {
        let registry = registry_with(&[("app.00000001", "你好")]);

        assert!(!registry.try_insert("app.00000001".to_string(), "世界".to_string()));
        assert_eq!(registry.get("app.00000001").as_deref(), Some("你好"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_inserts_are_not_lost() {
        let registry = Arc::new(TranslationRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for i in 0..250 {
                        registry.try_insert(format!("k{}.{}", t, i), "文本".to_string());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 2000);
    }

    #[test]
    fn test_render_js_module() {
        let registry = registry_with(&[("b.00000002", "世界"), ("a.00000001", "说\"你好\"\n")]);
        let text = render_resource(&registry.entries(), OutputFormat::Js);
        assert_eq!(
            text,
            "export default {\n  \"a.00000001\": \"说\\\"你好\\\"\\n\",\n  \"b.00000002\": \"世界\",\n};\n"
        );
    }

    #[test]
    fn test_render_json() {
        let registry = registry_with(&[("a.00000001", "你好")]);
        let text = render_resource(&registry.entries(), OutputFormat::Json);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["a.00000001"], "你好");
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_empty_module() {
        let text = render_resource(&BTreeMap::new(), OutputFormat::Ts);
        assert_eq!(text, "export default {\n};\n");
    }

    #[test]
    fn test_emit_overwrites_previous_run() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("locales");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("zh.js"), "export default { \"old.00000000\": \"旧\" };\n").unwrap();

        let registry = registry_with(&[("new.00000001", "新")]);
        let path = emit(registry, &out_dir, Locale::Zh, OutputFormat::Js).unwrap();

        assert_eq!(path, out_dir.join("zh.js"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"new.00000001\": \"新\""));
        assert!(!content.contains("old.00000000"));
    }

    #[test]
    fn test_output_path_uses_locale_and_extension() {
        assert_eq!(
            output_path(Path::new("out"), Locale::Fr, OutputFormat::Ts),
            PathBuf::from("out/fr.ts")
        );
        assert_eq!(
            output_path(Path::new("out"), Locale::Zh, OutputFormat::Json),
            PathBuf::from("out/zh.json")
        );
    }
}
