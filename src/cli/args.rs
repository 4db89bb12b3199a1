//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `run`: Replace hardcoded text with translation calls and write the resource module
//! - `init`: Initialize i18nify configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::{locale::Locale, registry::OutputFormat};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Run(args)) => args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Files or directories to process (overrides `entries` in the config file)
    pub paths: Vec<PathBuf>,

    /// Language of the hardcoded text (overrides config file)
    #[arg(long, value_enum)]
    pub locale: Option<Locale>,

    /// Directory for the generated resource module (overrides config file)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Module the translation function is imported from (overrides config file)
    #[arg(long)]
    pub import_path: Option<String>,

    /// Format of the generated resource module (overrides config file)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Project root; the config file is looked up from here
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Report extractable text without writing anything; exits with 1 if any is found
    #[arg(long)]
    pub check: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace hardcoded text with translation calls
    Run(RunArgs),
    /// Initialize a new .i18nifyrc.json configuration file
    Init,
}
