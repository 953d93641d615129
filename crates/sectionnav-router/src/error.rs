use thiserror::Error;

/// Errors raised while building the route tree
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("empty path segment under {parent}")]
    EmptySegment { parent: String },

    #[error("section entry {path} has an empty section name")]
    EmptySection { path: String },

    #[error("invalid route manifest: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("failed to read route manifest: {0}")]
    Io(#[from] std::io::Error),
}
