//! patchlog - classify game patch-note announcements and query the result.
//!
//! `build` parses every announcement in the changelogs directory against
//! the entity catalog and writes one classified JSON file per changelog
//! plus an index. `query` runs the same pipeline in memory and applies
//! hero/item/search filters, printing what a browsing UI would show.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

mod ingest;
mod pipeline;
mod settings;

#[derive(Parser)]
#[command(version, about = "Classify and query game patch notes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every announcement and write classified changelog JSON
    Build {
        /// Directory containing heroes.json and items.json
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
        /// Directory of announcement TOML files
        #[arg(long)]
        changelogs_dir: Option<PathBuf>,
        /// Output directory for classified JSON
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Filter changelogs by hero/item/search criteria
    Query {
        #[arg(long)]
        catalog_dir: Option<PathBuf>,
        #[arg(long)]
        changelogs_dir: Option<PathBuf>,
        /// Comma-separated hero names
        #[arg(long, default_value = "")]
        hero: String,
        /// Comma-separated item names
        #[arg(long, default_value = "")]
        item: String,
        /// Free-text search query
        #[arg(short, long, default_value = "")]
        query: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = settings::load();

    let result = match cli.command {
        Commands::Build {
            catalog_dir,
            changelogs_dir,
            output_dir,
        } => {
            let catalog_dir = catalog_dir.unwrap_or(settings.catalog_dir);
            let changelogs_dir = changelogs_dir.unwrap_or(settings.changelogs_dir);
            let output_dir = output_dir.unwrap_or(settings.output_dir);
            pipeline::build(&catalog_dir, &changelogs_dir, &output_dir).map(|summary| {
                println!("Build complete");
                println!("  Changelogs: {}", summary.changelog_count);
                println!("  Hero refs:  {}", summary.hero_refs);
                println!("  Item refs:  {}", summary.item_refs);
            })
        }
        Commands::Query {
            catalog_dir,
            changelogs_dir,
            hero,
            item,
            query,
        } => {
            let catalog_dir = catalog_dir.unwrap_or(settings.catalog_dir);
            let changelogs_dir = changelogs_dir.unwrap_or(settings.changelogs_dir);
            pipeline::query(&catalog_dir, &changelogs_dir, &hero, &item, &query)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}
