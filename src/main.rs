mod catalog;
mod emit;
mod extract;
mod fetch;
mod naming;
mod pipeline;
mod report;

use anyhow::Result;
use catalog::{CatalogOptions, Variant};
use clap::{Parser, Subcommand};
use pipeline::GenerateOptions;
use report::Console;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "svg2tsx")]
#[command(about = "Generate React TSX icon components from Material Symbols SVGs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the icon catalog and generate one component per icon
    Generate {
        /// Output directory for the generated icon tree
        #[arg(short, long, default_value = "./icons")]
        icons_dir: PathBuf,

        /// Only generate a single variant instead of all three
        #[arg(long, value_enum)]
        variant: Option<Variant>,

        /// Cached catalog manifest; skips scraping when present
        #[arg(long, default_value = "./_data/versions.json")]
        manifest: PathBuf,

        /// WebDriver endpoint used for catalog scraping
        #[arg(long, default_value = "http://localhost:9515")]
        webdriver_url: String,

        /// Catalog page URL
        #[arg(long, default_value = "https://fonts.google.com/icons")]
        catalog_url: String,

        /// Base URL for the vector assets
        #[arg(
            long,
            default_value = "https://fonts.gstatic.com/s/i/short-term/release"
        )]
        base_url: String,

        /// Icons fetched concurrently per chunk
        #[arg(long, default_value_t = 50)]
        chunk_size: usize,

        /// Timeout in seconds for navigation and each fetch
        #[arg(long, default_value_t = 120)]
        timeout_secs: u64,
    },

    /// Generate index files over already-emitted components
    Indexes {
        /// Directory holding the generated icon tree
        #[arg(short, long, default_value = "./icons")]
        icons_dir: PathBuf,
    },

    /// Generate lazy-loading wrapper components from the outlined set
    Wrappers {
        /// Directory holding the generated icon tree
        #[arg(short, long, default_value = "./icons")]
        icons_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let reporter = Console;

    match cli.command {
        Commands::Generate {
            icons_dir,
            variant,
            manifest,
            webdriver_url,
            catalog_url,
            base_url,
            chunk_size,
            timeout_secs,
        } => {
            let timeout = Duration::from_secs(timeout_secs);
            let opts = GenerateOptions {
                icons_dir,
                chunk_size,
                base_url,
                timeout,
                catalog: CatalogOptions {
                    manifest_path: manifest,
                    webdriver_url,
                    catalog_url,
                    timeout,
                },
            };

            pipeline::run_generate(&opts, variant, &reporter).await?;
        }
        Commands::Indexes { icons_dir } => {
            pipeline::run_indexes(&icons_dir, &reporter)?;
        }
        Commands::Wrappers { icons_dir } => {
            pipeline::run_wrappers(&icons_dir, &reporter)?;
        }
    }

    Ok(())
}
