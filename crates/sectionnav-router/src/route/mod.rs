//! Route tree nodes
//!
//! A [`Route`] is one URL-addressable location in the static navigation
//! tree. Routes are built once by the registry and shared as `Arc<Route>`;
//! a child holds its parent, never the other way around.
pub mod category;
pub mod transition;

pub use category::{classify, RouteCategory, RouteClassifier};
pub use transition::{is_valid_transition, TransitionTable};

use crate::path::{join_path, normalize_path};
use std::fmt;
use std::sync::Arc;

/// One navigable location
pub struct Route {
    path: String,
    title: Option<String>,
    section: String,
    depth: usize,
    is_navigable_dialog: bool,
    parent: Option<Arc<Route>>,
}

impl Route {
    /// Creates a parentless route at depth 0
    ///
    /// ```
    /// use sectionnav_router::Route;
    ///
    /// let basic = Route::root("/");
    /// assert_eq!(basic.depth(), 0);
    /// assert!(basic.parent().is_none());
    /// ```
    pub fn root(path: &str) -> Arc<Self> {
        Arc::new(Route {
            path: normalize_path(path).into_owned(),
            title: None,
            section: String::new(),
            depth: 0,
            is_navigable_dialog: false,
            parent: None,
        })
    }

    /// Derives a child route that inherits this route's section
    ///
    /// ```
    /// use sectionnav_router::Route;
    ///
    /// let basic = Route::root("/");
    /// let internet = basic.create_section("internet", "internet", None);
    /// let networks = internet.create_child("networks");
    ///
    /// assert_eq!(networks.path(), "/internet/networks");
    /// assert_eq!(networks.section(), "internet");
    /// assert_eq!(networks.depth(), 2);
    /// assert!(internet.contains(&networks));
    /// ```
    pub fn create_child(self: &Arc<Self>, path: &str) -> Arc<Route> {
        self.derive(path, self.section.clone(), None, false)
    }

    /// Derives a child route that starts a new section
    pub fn create_section(
        self: &Arc<Self>,
        path: &str,
        section: &str,
        title: Option<&str>,
    ) -> Arc<Route> {
        self.derive(path, section.to_string(), title.map(str::to_string), false)
    }

    /// Derives a child route rendered as a modal dialog
    pub fn create_dialog(self: &Arc<Self>, path: &str) -> Arc<Route> {
        self.derive(path, self.section.clone(), None, true)
    }

    pub(crate) fn derive(
        self: &Arc<Self>,
        path: &str,
        section: String,
        title: Option<String>,
        is_navigable_dialog: bool,
    ) -> Arc<Route> {
        Arc::new(Route {
            path: join_path(&self.path, path),
            title,
            section,
            depth: self.depth + 1,
            is_navigable_dialog,
            parent: Some(Arc::clone(self)),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Legacy grouping label; empty when the route has none
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_navigable_dialog(&self) -> bool {
        self.is_navigable_dialog
    }

    pub fn parent(&self) -> Option<&Arc<Route>> {
        self.parent.as_ref()
    }

    /// Returns true if `route` is this route or one of its descendants
    ///
    /// Compares by identity, not by path.
    pub fn contains(&self, route: &Route) -> bool {
        route.ancestors().any(|r| std::ptr::eq(self, r))
    }

    /// A subpage is a non-dialog route that shares a non-empty section
    /// with its parent
    pub fn is_subpage(&self) -> bool {
        if self.is_navigable_dialog || self.section.is_empty() {
            return false;
        }

        self.parent
            .as_ref()
            .map(|parent| parent.section == self.section)
            .unwrap_or(false)
    }

    /// Walks from this route up to its root (inclusive on both ends)
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            current: Some(self),
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("section", &self.section)
            .field("depth", &self.depth)
            .field("is_navigable_dialog", &self.is_navigable_dialog)
            .field("parent", &self.parent.as_ref().map(|p| p.path.as_str()))
            .finish()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Iterator returned by [`Route::ancestors`]
pub struct Ancestors<'a> {
    current: Option<&'a Route>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Route;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.parent.as_deref();
        Some(current)
    }
}
