//! Config, logging and registry setup shared by the commands

use crate::CommonArgs;
use anyhow::{Context, Result};
use sectionnav::NavConfig;
use sectionnav_router::{RouteManifest, RouteRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

pub struct Session {
    pub config: NavConfig,
    pub registry: Arc<RouteRegistry>,
}

pub fn load(args: &CommonArgs) -> Result<Session> {
    let mut config = match &args.config {
        Some(path) => NavConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            let cwd = std::env::current_dir()?;
            NavConfig::load_from_dir(&cwd).context("failed to load sectionnav.toml")?
        }
    };

    init_tracing(&config.log_filter);

    for feature in &args.features {
        config.features = config.features.clone().enable(feature.as_str());
    }

    let manifest_path = args
        .manifest
        .clone()
        .or_else(|| config.manifest.clone())
        .context("no route manifest given (use --manifest or set `manifest` in sectionnav.toml)")?;

    let manifest = RouteManifest::from_file(&manifest_path)
        .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;
    let registry = RouteRegistry::build(&manifest, &config.features)
        .with_context(|| format!("invalid route tree in {}", manifest_path.display()))?;

    tracing::debug!(routes = registry.len(), manifest = %manifest_path.display(), "registry built");

    Ok(Session {
        config,
        registry: Arc::new(registry),
    })
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
