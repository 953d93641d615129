mod commands;
mod script;
mod setup;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sectionnav")]
#[command(version, about = "Sectionnav CLI - settings navigation tooling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command
#[derive(Args, Clone)]
pub struct CommonArgs {
    /// Config file (defaults to ./sectionnav.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route manifest (overrides the config)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Enable a feature flag (repeatable)
    #[arg(short, long = "feature")]
    features: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route tree with each route's category
    Routes {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Replay a navigation script against a headless page
    Replay {
        #[command(flatten)]
        common: CommonArgs,

        /// Script file: one URL per line, `back`, `popstate <url>` or `scroll <px>`
        script: PathBuf,

        /// URL the page is loaded at
        #[arg(long, default_value = "/")]
        start: String,

        /// Section rendered lazily after N frames, as `name=frames` (repeatable)
        #[arg(long = "lazy")]
        lazy: Vec<String>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Routes { common } => {
            let ctx = setup::load(&common)?;
            commands::routes::execute(&ctx)?;
        }
        Commands::Replay {
            common,
            script,
            start,
            lazy,
            json,
        } => {
            let ctx = setup::load(&common)?;
            commands::replay::execute(&ctx, &script, &start, &lazy, json)?;
        }
    }

    Ok(())
}
