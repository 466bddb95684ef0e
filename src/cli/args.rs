//! CLI argument definitions using clap.
//!
//! - `flatten`: print the flat key mapping of a translation file
//! - `resolve`: normalize a lookup request and print the matching value

use std::path::PathBuf;

use clap::{
    Args,
    Parser,
    Subcommand,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Directory containing `.i18n-flatten.json` (defaults to the current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the flattened key → value mapping as JSON
    Flatten(FlattenArgs),
    /// Print the flat key (and its value) a lookup request resolves to
    Resolve(ResolveArgs),
}

/// Arguments shared by every command.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Translation file (JSON)
    pub file: PathBuf,

    /// Locale the file belongs to
    #[arg(short, long, default_value = "en")]
    pub locale: String,
}

#[derive(Debug, Clone, Args)]
pub struct FlattenArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Keep intermediate subtrees as entries (overrides config file)
    #[arg(long)]
    pub subtree: bool,

    /// Do not escape separators inside key segments (overrides config file)
    #[arg(long)]
    pub no_escape: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Lookup key
    #[arg(short, long)]
    pub key: String,

    /// Scope segment prepended to the key; repeat for nested scopes
    #[arg(short, long)]
    pub scope: Vec<String>,

    /// Separator used inside `--key` and `--scope` (overrides config file)
    #[arg(long)]
    pub separator: Option<char>,
}
