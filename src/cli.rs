use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::{SourceQuery, UsageMonth, DEFAULT_BIND_ADDRESS, DEFAULT_MONTH};
use commands::{fetch, serve};

#[derive(Parser)]
#[command(name = "ridership")]
#[command(about = "Seoul subway ridership proxy and dashboard server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Where the ridership statistics come from
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Full upstream URL
    ///
    /// Overrides --month, --start-row and --end-row when set.
    #[arg(long, env = "RIDERSHIP_SOURCE_URL")]
    pub source_url: Option<String>,

    /// Usage month to query (YYYYMM)
    #[arg(long, env = "RIDERSHIP_MONTH", default_value = DEFAULT_MONTH)]
    pub month: UsageMonth,

    /// First row of the queried range (1-based)
    #[arg(long, default_value_t = 1)]
    pub start_row: u32,

    /// Last row of the queried range (inclusive)
    #[arg(long, default_value_t = 5)]
    pub end_row: u32,
}

impl SourceArgs {
    pub fn resolve_url(&self) -> Result<String> {
        if let Some(url) = &self.source_url {
            return Ok(url.clone());
        }
        let query = SourceQuery::default()
            .with_month(self.month)
            .with_rows(self.start_row, self.end_row)?;
        Ok(query.url())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = DEFAULT_BIND_ADDRESS)]
        bind_address: String,

        /// Directory holding the built dashboard (trunk `dist/`)
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },
    /// Fetch the statistics once and print them
    ///
    /// Prints the converted JSON document, or the hourly table of one station
    /// when --station is given.
    Fetch {
        /// Station to print
        #[arg(short, long)]
        station: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { bind_address, static_dir, source } => {
                serve(&bind_address, &source.resolve_url()?, static_dir.as_deref()).await?;
            }
            Commands::Fetch { station, source } => {
                fetch(&source.resolve_url()?, station.as_deref()).await?;
            }
        }
        Ok(())
    }
}
