use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use colored::Colorize;

use super::{
    args::{Arguments, Command, RunArgs},
    exit_status::ExitStatus,
    report::{SUCCESS_MARK, print_summary},
};
use crate::{
    config::{CONFIG_FILE_NAME, Config, default_config_json, load_config},
    core::pipeline,
};

/// Dispatches to the command handler.
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Run(args)) => extract(args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}

fn extract(args: RunArgs) -> Result<ExitStatus> {
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("Project root does not exist: {}", args.root.display()))?;

    let loaded = load_config(&root)?;
    // Entries in a config file are relative to the directory holding it.
    let project_root = loaded
        .path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.clone());
    match &loaded.path {
        Some(path) => tracing::debug!(path = %path.display(), "loaded config"),
        None => tracing::debug!("no {} found, using defaults", CONFIG_FILE_NAME),
    }

    let config = apply_overrides(loaded.config, &args, &root);
    let summary = pipeline::run(&config, &project_root, args.check)?;
    print_summary(&summary, &project_root, args.check, args.verbose);

    if args.check && summary.rewrites() > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// CLI flags win over the config file. Paths given on the command line are
/// relative to `root`.
fn apply_overrides(mut config: Config, args: &RunArgs, root: &Path) -> Config {
    let resolve = |path: &PathBuf| root.join(path).to_string_lossy().into_owned();

    if !args.paths.is_empty() {
        config.entries = args.paths.iter().map(resolve).collect();
    }
    if let Some(out_dir) = &args.out_dir {
        config.output_dir = resolve(out_dir);
    }
    if let Some(locale) = args.locale {
        config.locale = locale;
    }
    if let Some(import_path) = &args.import_path {
        config.import_path = import_path.clone();
    }
    if let Some(format) = args.format {
        config.output_format = format;
    }
    config
}

fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );

    Ok(ExitStatus::Success)
}
