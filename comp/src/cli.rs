//! CLI argument parsing for comp

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result, eyre};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "comp")]
#[command(author, version, about = "Render named template components", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Where to look for a component
#[derive(Args, Debug, Clone, Default)]
pub struct LookupArgs {
    /// Components directory relative to each root
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Search root, may be repeated (first wins); replaces the configured roots
    #[arg(short, long = "root")]
    pub roots: Vec<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a component to stdout
    Render {
        /// Template name (case sensitive)
        #[arg(required = true)]
        name: String,

        /// Argument as key=value; the value is parsed as JSON when possible
        #[arg(short, long = "arg")]
        args: Vec<String>,

        /// JSON file with the arguments; --arg entries are merged over it
        #[arg(long)]
        args_file: Option<PathBuf>,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Print the file a component resolves to
    Locate {
        /// Template name (case sensitive)
        #[arg(required = true)]
        name: String,

        #[command(flatten)]
        lookup: LookupArgs,
    },

    /// Render the demonstration page
    Demo,
}

/// Build a component's arguments from an optional JSON file and `key=value` pairs
///
/// Pairs are applied in order over the file's object, so later keys win.
/// Values that parse as JSON keep their type (`n=3`, `tags=["a"]`), anything
/// else becomes a string. No file and no pairs means no arguments at all.
pub fn build_args(pairs: &[String], args_file: Option<&Path>) -> Result<Option<Value>> {
    let mut args = match args_file {
        Some(path) => {
            let content = std::fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?;
            let value: Value = serde_json::from_str(&content).context(format!("Invalid JSON in {}", path.display()))?;
            match value {
                Value::Object(map) => map,
                _ => return Err(eyre!("{} must contain a JSON object", path.display())),
            }
        }
        None if pairs.is_empty() => return Ok(None),
        None => Map::new(),
    };

    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| eyre!("Invalid argument '{}', expected key=value", pair))?;
        if key.is_empty() {
            return Err(eyre!("Invalid argument '{}', key is empty", pair));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        args.insert(key.to_string(), value);
    }

    Ok(Some(Value::Object(args)))
}
