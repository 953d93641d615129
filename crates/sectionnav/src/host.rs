//! Collaborator interfaces the controller depends on
//!
//! The page host supplies these; the controller receives them through its
//! constructor. [`crate::headless::HeadlessPage`] is an in-memory
//! implementation of all of them.

use crate::error::Result;
use async_trait::async_trait;
use sectionnav_router::Route;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Handle to a rendered section of the page
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionElement {
    section: String,
}

impl SectionElement {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }
}

/// Receives every committed navigation
#[async_trait]
pub trait RouteObserver: Send + Sync {
    /// `old_route` is `None` only for the first delivery after registering
    async fn on_route_changed(
        &self,
        new_route: &Arc<Route>,
        old_route: Option<&Arc<Route>>,
    ) -> Result<()>;
}

/// The rendered page: ownership predicate, section lookup and visual state
#[async_trait]
pub trait PageSurface: Send + Sync {
    /// Whether `route` belongs to this page
    fn contains_route(&self, route: Option<&Route>) -> bool;

    /// Looks up a rendered section by name
    fn query_section(&self, section: &str) -> Option<SectionElement>;

    /// Force-renders on-demand content needed to show `route`
    fn request_render(&self, route: &Route);

    /// Suspends until the next render opportunity
    async fn next_frame(&self);

    /// Toggles the "showing subpage" visual state
    fn set_showing_subpage(&self, showing: bool);

    /// Toggles the expanded state of a section
    fn set_section_expanded(&self, section: &SectionElement, expanded: bool);

    /// Scrolls a section into view
    fn scroll_into_view(&self, section: &SectionElement);
}

/// The scrollable container holding the page
pub trait ScrollContainer: Send + Sync {
    fn scroll_top(&self) -> u32;

    fn set_scroll_top(&self, top: u32);
}
