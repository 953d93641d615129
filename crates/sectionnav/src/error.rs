use sectionnav_router::{RegistryError, RouteCategory};
use thiserror::Error;

/// Errors raised by the router and the navigation controller
///
/// `InvalidTransition`, `MissingRoute` and `MissingSection` are invariant
/// violations: they mean the route registry or the host's `contains_route`
/// predicate is inconsistent. They abort the navigation before any visual
/// change is made and are never meant to reach an end user.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("invalid route transition {from} -> {to}")]
    InvalidTransition {
        from: RouteCategory,
        to: RouteCategory,
    },

    #[error("transition out of {0} requires a previous route")]
    MissingRoute(RouteCategory),

    #[error("route {0} has no section to render")]
    MissingSection(String),

    #[error("section {section} was not rendered after {frames} frames")]
    RenderTimeout { section: String, frames: u32 },

    #[error("no route registered for {0}")]
    UnknownRoute(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl NavigationError {
    /// True for errors that indicate an inconsistent route setup rather
    /// than a runtime condition
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            NavigationError::InvalidTransition { .. }
                | NavigationError::MissingRoute(_)
                | NavigationError::MissingSection(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, NavigationError>;
