//! Tagfall CLI
//!
//! Resolves catalog entries for a ranked list of locales:
//! - `resolve`: look up a property path with locale fallback and `${name}` params
//! - `decompose`: show how locale tags split into language/script/region
//! - `chain`: list the dictionary keys tried for one locale
//! - `config`: print the effective configuration

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::commands::ResolveOptions;
use crate::config::TagfallConfig;

/// Locale fallback resolution for string catalogs
#[derive(Parser, Debug)]
#[command(name = "tagfall")]
#[command(about = "Resolve localized catalog values with locale fallback")]
#[command(version)]
struct Args {
    /// Config file or directory containing tagfall.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a property path from a catalog
    Resolve {
        /// Property path, e.g. `menu.items[0].label`
        path: String,

        /// Catalog file (.yaml/.yml/.json); overrides `catalog.path`
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Preferred locale; overrides `locales.preferred`
        #[arg(short, long)]
        preferred: Option<String>,

        /// User locale, most preferred first (repeatable)
        #[arg(short, long = "locale")]
        locales: Vec<String>,

        /// Placeholder value as name=value (repeatable)
        #[arg(long = "param", value_parser = commands::parse_param)]
        params: Vec<(String, tagfall::Param)>,

        /// Report which locale, step and key matched
        #[arg(long)]
        explain: bool,

        /// Exit with an error instead of echoing the path when nothing matches
        #[arg(long)]
        strict: bool,
    },

    /// Split locale tags into subtags
    Decompose {
        #[arg(required = true)]
        locales: Vec<String>,
    },

    /// List the fallback keys for a locale
    Chain { locale: String },

    /// Print the effective configuration
    Config,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = TagfallConfig::load_or_default(args.config.as_deref())?;

    let output = match args.command {
        Command::Resolve {
            path,
            catalog,
            preferred,
            locales,
            params,
            explain,
            strict,
        } => {
            let catalog_path = catalog
                .or_else(|| config.catalog.path.clone())
                .context("No catalog given. Pass --catalog or set catalog.path in tagfall.toml")?;
            let catalog = commands::load_catalog(&catalog_path)?;
            tracing::info!(
                catalog = %catalog_path.display(),
                locales = catalog.len(),
                "Loaded catalog"
            );
            commands::resolve(
                &config,
                &catalog,
                ResolveOptions {
                    path,
                    preferred,
                    locales,
                    params,
                    explain,
                    strict,
                },
            )?
        }
        Command::Decompose { locales } => commands::decompose_all(&locales),
        Command::Chain { locale } => commands::chain(&locale),
        Command::Config => config.to_toml()?,
    };

    println!("{}", output.trim_end_matches('\n'));
    Ok(())
}
