use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        engine::EngineOptions,
        file_scanner::Excludes,
        formatter::FormatterOptions,
        locale::Locale,
        registry::OutputFormat,
    },
    error::{Error, Result},
};

pub const CONFIG_FILE_NAME: &str = ".i18nifyrc.json";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Files and directories to process, relative to the project root.
    #[serde(default = "default_entries")]
    pub entries: Vec<String>,
    /// Directory the resource module is written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Language the source text is written in.
    #[serde(default)]
    pub locale: Locale,
    /// Module specifier the translation function is imported from.
    #[serde(default = "default_import_path")]
    pub import_path: String,
    #[serde(default = "default_translate_identifier")]
    pub translate_identifier: String,
    /// Key prefix for every file; each file's name is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_prefix: Option<String>,
    /// Path fragments, or glob patterns when they contain `*` or `?`.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,
    /// Callees whose arguments are left alone (`logger.debug`).
    #[serde(default)]
    pub ignored_callees: Vec<String>,
    #[serde(default = "default_ignored_attributes")]
    pub ignored_attributes: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default)]
    pub output_format: OutputFormat,
    #[serde(default)]
    pub formatter: FormatterOptions,
}

fn default_entries() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_output_dir() -> String {
    "src/locales".to_string()
}

fn default_import_path() -> String {
    "@/i18n".to_string()
}

fn default_translate_identifier() -> String {
    "t".to_string()
}

fn default_excludes() -> Vec<String> {
    [
        "node_modules",
        "**/*.test.*",
        "**/*.spec.*",
        "**/__tests__/**",
    ]
    .map(String::from)
    .to_vec()
}

fn default_ignored_attributes() -> Vec<String> {
    ["className", "style", "key", "id", "href", "src", "type", "data-testid"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            output_dir: default_output_dir(),
            locale: Locale::default(),
            import_path: default_import_path(),
            translate_identifier: default_translate_identifier(),
            key_prefix: None,
            excludes: default_excludes(),
            ignored_callees: Vec::new(),
            ignored_attributes: default_ignored_attributes(),
            ignore_texts: Vec::new(),
            output_format: OutputFormat::default(),
            formatter: FormatterOptions::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::config("'entries' must not be empty"));
        }
        if self.import_path.trim().is_empty() {
            return Err(Error::config("'importPath' must not be empty"));
        }
        if !is_identifier(&self.translate_identifier) {
            return Err(Error::config(format!(
                "'translateIdentifier' is not a valid identifier: \"{}\"",
                self.translate_identifier
            )));
        }
        if let Some(prefix) = &self.key_prefix
            && (prefix.is_empty() || prefix.contains(char::is_whitespace))
        {
            return Err(Error::config(format!(
                "'keyPrefix' must be non-empty and contain no whitespace: \"{}\"",
                prefix
            )));
        }
        // Compiles the glob excludes.
        Excludes::new(&self.excludes).map_err(|e| match e {
            Error::Config(message) => Error::config(format!("in 'excludes': {}", message)),
            other => other,
        })?;
        Ok(())
    }

    /// Engine settings for a run. `write` is off in check mode.
    pub fn engine_options(&self, write: bool) -> EngineOptions {
        EngineOptions {
            locale: self.locale,
            import_path: self.import_path.clone(),
            translate_ident: self.translate_identifier.clone(),
            key_prefix: self.key_prefix.clone(),
            ignored_callees: self.ignored_callees.iter().cloned().collect(),
            ignored_attributes: self.ignored_attributes.iter().cloned().collect(),
            ignore_texts: self
                .ignore_texts
                .iter()
                .map(|text| text.trim().to_string())
                .collect(),
            formatter: self.formatter.clone(),
            write,
        }
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config)
        .map_err(|e| Error::config(format!("failed to generate default config: {}", e)))
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the configuration came from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                Error::config(format!("failed to parse {}: {}", path.display(), e))
            })?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
