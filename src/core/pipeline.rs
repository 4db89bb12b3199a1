//! File pipeline: enumerate files, run the engine on each, emit the registry.

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::{
    engine::{Engine, FileOutcome},
    file_scanner::{DirectoryWalker, Excludes, FsWalker, collect_files},
    formatter::{Formatter, SourceFormatter},
    registry::{TranslationRegistry, emit},
};
use crate::{config::Config, error::Result};

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// One outcome per processed file, in scan order.
    pub files: Vec<FileOutcome>,
    /// Number of registry entries.
    pub translations: usize,
    /// Resource module written, `None` in check mode.
    pub output: Option<PathBuf>,
}

impl RunSummary {
    /// Files that contain (or contained) translatable text.
    pub fn changed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.rewrites > 0)
    }

    pub fn rewrites(&self) -> usize {
        self.files.iter().map(|f| f.rewrites).sum()
    }
}

/// Run over the real filesystem with the built-in formatter.
pub fn run(config: &Config, root: &Path, check: bool) -> Result<RunSummary> {
    run_with(config, root, check, &FsWalker, &SourceFormatter)
}

/// Process every file below the configured entries on the rayon pool.
///
/// The first fatal error stops scheduling further files and is returned once
/// the files already in progress finish. The resource module is only written
/// after every file succeeded. Files already rewritten are not rolled back.
pub fn run_with(
    config: &Config,
    root: &Path,
    check: bool,
    walker: &dyn DirectoryWalker,
    formatter: &dyn Formatter,
) -> Result<RunSummary> {
    config.validate()?;

    let output_dir = root.join(&config.output_dir);
    let entries: Vec<PathBuf> = config.entries.iter().map(PathBuf::from).collect();
    let excludes = Excludes::new(&config.excludes)?;
    let files: Vec<PathBuf> = collect_files(root, &entries, &excludes, walker)?
        .into_iter()
        // The generated resource module is full of source-language text.
        .filter(|file| !file.starts_with(&output_dir))
        .collect();
    tracing::debug!(files = files.len(), "collected source files");

    let options = config.engine_options(!check);
    let registry = TranslationRegistry::new();
    let engine = Engine::new(&options, &registry, formatter);

    let outcomes = files
        .par_iter()
        .map(|file| engine.process_file(file))
        .collect::<Result<Vec<_>>>()?;

    let translations = registry.len();
    let output = if check {
        None
    } else {
        Some(emit(
            registry,
            &output_dir,
            config.locale,
            config.output_format,
        )?)
    };

    Ok(RunSummary {
        files: outcomes,
        translations,
        output,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::{
        core::{locale::Locale, registry::OutputFormat},
        error::Error,
    };

    fn config() -> Config {
        Config {
            entries: vec!["src".to_string()],
            output_dir: "src/locales".to_string(),
            locale: Locale::Zh,
            key_prefix: Some("app".to_string()),
            output_format: OutputFormat::Json,
            ..Default::default()
        }
    }

    fn project(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for (path, content) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_run_rewrites_files_and_emits_registry() {
        let dir = project(&[
            ("src/a.ts", "export const a = \"你好\";\n"),
            ("src/b/index.tsx", "export const B = () => <p>世界</p>;\n"),
            ("src/c.ts", "export const c = 1;\n"),
        ]);

        let summary = run(&config(), dir.path(), false).unwrap();

        assert_eq!(summary.files.len(), 3);
        assert_eq!(summary.rewrites(), 2);
        assert_eq!(summary.translations, 2);
        assert_eq!(summary.changed().count(), 2);

        let output = summary.output.unwrap();
        assert_eq!(output, dir.path().join("src/locales/zh.json"));
        let emitted: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let mut texts: Vec<_> = emitted.values().filter_map(|v| v.as_str()).collect();
        texts.sort();
        assert_eq!(texts, vec!["世界", "你好"]);

        for key in emitted.keys() {
            let in_a = fs::read_to_string(dir.path().join("src/a.ts")).unwrap();
            let in_b = fs::read_to_string(dir.path().join("src/b/index.tsx")).unwrap();
            assert_eq!(in_a.matches(key.as_str()).count() + in_b.matches(key.as_str()).count(), 1);
        }
    }

    #[test]
    fn test_second_run_leaves_sources_and_empties_module() {
        let dir = project(&[("src/a.ts", "export const a = \"你好\";\n")]);
        let cfg = Config {
            output_format: OutputFormat::Js,
            ..config()
        };
        let module = dir.path().join("src/locales/zh.js");

        run(&cfg, dir.path(), false).unwrap();
        let after_first = fs::read_to_string(dir.path().join("src/a.ts")).unwrap();
        assert!(fs::read_to_string(&module).unwrap().contains("\"你好\""));

        let summary = run(&cfg, dir.path(), false).unwrap();
        assert_eq!(summary.rewrites(), 0);
        assert_eq!(summary.translations, 0);
        assert_eq!(summary.output, Some(module.clone()));
        assert_eq!(fs::read_to_string(&module).unwrap(), "export default {\n};\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("src/a.ts")).unwrap(),
            after_first
        );
    }

    #[test]
    fn test_check_mode_writes_nothing() {
        let dir = project(&[("src/a.ts", "export const a = \"你好\";\n")]);

        let summary = run(&config(), dir.path(), true).unwrap();

        assert_eq!(summary.rewrites(), 1);
        assert_eq!(summary.output, None);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/a.ts")).unwrap(),
            "export const a = \"你好\";\n"
        );
        assert!(!dir.path().join("src/locales").exists());
    }

    #[test]
    fn test_parse_error_aborts_before_emit() {
        let dir = project(&[
            ("src/a.ts", "export const a = \"你好\";\n"),
            ("src/broken.ts", "export const = ;\n"),
        ]);

        let err = run(&config(), dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }), "got {:?}", err);
        assert!(!dir.path().join("src/locales/zh.json").exists());
    }

    #[test]
    fn test_missing_entry_touches_nothing() {
        let dir = project(&[("src/a.ts", "export const a = \"你好\";\n")]);
        let cfg = Config {
            entries: vec!["src".to_string(), "missing".to_string()],
            ..config()
        };

        let err = run(&cfg, dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {:?}", err);
        assert_eq!(
            fs::read_to_string(dir.path().join("src/a.ts")).unwrap(),
            "export const a = \"你好\";\n"
        );
    }
}
