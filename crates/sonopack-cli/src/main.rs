use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod completion;
mod flows;
mod process;
mod render;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "sonopack")]
#[command(about = "Upgrade and archive migration tool for the ultrasound console", long_about = None)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    data_root: Option<PathBuf>,
    #[arg(long)]
    media: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Check {
        #[arg(long)]
        current: Option<String>,
        #[arg(long)]
        json: bool,
    },
    Stage {
        #[arg(long)]
        current: Option<String>,
    },
    FirstBoot {
        #[arg(long)]
        product: String,
        #[arg(long)]
        keep_legacy_data: bool,
        #[arg(long)]
        discard_legacy_data: bool,
    },
    Relocate {
        source: String,
        target: String,
    },
    Doctor,
    Completions {
        shell: Shell,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    flows::run(cli)
}
