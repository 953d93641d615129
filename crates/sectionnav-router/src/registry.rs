//! Route registry
//!
//! Builds the full route tree once from a [`RouteManifest`] and the enabled
//! [`FeatureFlags`], then answers lookups. Path uniqueness is enforced here,
//! not by [`Route`].

use crate::error::RegistryError;
use crate::manifest::{ChildEntry, ChildKind, FeatureFlags, Mount, RouteManifest};
use crate::path::{normalize_path, PathHierarchy};
use crate::route::{Route, RouteClassifier};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Path of the BASIC sentinel
pub const BASIC_PATH: &str = "/";

/// The static route tree
#[derive(Debug, Clone)]
pub struct RouteRegistry {
    basic: Arc<Route>,
    about: Arc<Route>,
    routes: BTreeMap<String, Arc<Route>>,
}

impl RouteRegistry {
    /// Builds the tree, skipping entries whose feature is disabled
    ///
    /// ```
    /// use sectionnav_router::{FeatureFlags, RouteManifest, RouteRegistry};
    ///
    /// let manifest = RouteManifest::from_str(r#"
    ///     [[sections]]
    ///     path = "internet"
    ///     section = "internet"
    ///
    ///     [[sections.children]]
    ///     path = "networks"
    /// "#).unwrap();
    ///
    /// let registry = RouteRegistry::build(&manifest, &FeatureFlags::new()).unwrap();
    /// let networks = registry.get("/internet/networks").unwrap();
    /// assert!(networks.is_subpage());
    /// ```
    pub fn build(manifest: &RouteManifest, flags: &FeatureFlags) -> Result<Self, RegistryError> {
        let basic = Route::root(BASIC_PATH);
        let about = Route::root(&manifest.about_path);

        let mut registry = RouteRegistry {
            basic: Arc::clone(&basic),
            about: Arc::clone(&about),
            routes: BTreeMap::new(),
        };
        registry.insert(Arc::clone(&basic))?;
        registry.insert(Arc::clone(&about))?;

        for entry in &manifest.sections {
            if !flags.allows(entry.feature.as_deref()) {
                continue;
            }

            let mount = match entry.parent {
                Mount::Basic => &basic,
                Mount::About => &about,
            };
            check_segment(mount, &entry.path)?;
            if entry.section.is_empty() {
                return Err(RegistryError::EmptySection {
                    path: entry.path.clone(),
                });
            }

            let route = mount.create_section(&entry.path, &entry.section, entry.title.as_deref());
            registry.insert(Arc::clone(&route))?;
            registry.insert_children(&route, &entry.children, flags)?;
        }

        Ok(registry)
    }

    /// Builds a registry containing only the two sentinels
    pub fn empty() -> Self {
        let basic = Route::root(BASIC_PATH);
        let about = Route::root(&RouteManifest::default().about_path);
        let routes = [&basic, &about]
            .into_iter()
            .map(|route| (route.path().to_string(), Arc::clone(route)))
            .collect();

        Self {
            basic,
            about,
            routes,
        }
    }

    fn insert_children(
        &mut self,
        parent: &Arc<Route>,
        children: &[ChildEntry],
        flags: &FeatureFlags,
    ) -> Result<(), RegistryError> {
        for child in children {
            if !flags.allows(child.feature.as_deref()) {
                continue;
            }
            check_segment(parent, &child.path)?;

            let route = match child.kind {
                ChildKind::Subpage => {
                    parent.derive(&child.path, parent.section().to_string(), child.title.clone(), false)
                }
                ChildKind::Dialog => {
                    parent.derive(&child.path, parent.section().to_string(), child.title.clone(), true)
                }
                ChildKind::Section => {
                    let section = child
                        .section
                        .as_deref()
                        .filter(|s| !s.is_empty())
                        .ok_or_else(|| RegistryError::EmptySection {
                            path: child.path.clone(),
                        })?;
                    parent.create_section(&child.path, section, child.title.as_deref())
                }
            };

            self.insert(Arc::clone(&route))?;
            self.insert_children(&route, &child.children, flags)?;
        }

        Ok(())
    }

    fn insert(&mut self, route: Arc<Route>) -> Result<(), RegistryError> {
        let path = route.path().to_string();
        if self.routes.contains_key(&path) {
            return Err(RegistryError::DuplicatePath(path));
        }
        self.routes.insert(path, route);
        Ok(())
    }

    pub fn basic(&self) -> &Arc<Route> {
        &self.basic
    }

    pub fn about(&self) -> &Arc<Route> {
        &self.about
    }

    pub fn classifier(&self) -> RouteClassifier {
        RouteClassifier::new(Arc::clone(&self.basic), Arc::clone(&self.about))
    }

    /// Exact lookup after normalizing the path
    pub fn get(&self, path: &str) -> Option<&Arc<Route>> {
        self.routes.get(normalize_path(path).as_ref())
    }

    /// Closest registered route at or above `path`
    ///
    /// Always succeeds because BASIC sits at `/`.
    pub fn nearest(&self, path: &str) -> &Arc<Route> {
        let normalized = normalize_path(path);
        PathHierarchy::new(&normalized)
            .find_map(|candidate| self.routes.get(candidate))
            .unwrap_or(&self.basic)
    }

    /// All routes ordered by path
    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.values()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn check_segment(parent: &Route, segment: &str) -> Result<(), RegistryError> {
    if segment.trim_matches('/').is_empty() {
        return Err(RegistryError::EmptySegment {
            parent: parent.path().to_string(),
        });
    }
    Ok(())
}
