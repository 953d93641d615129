//! # Sectionnav Router
//!
//! Static route tree and navigation rules for a settings-style page made of
//! scrollable sections, drill-down subpages and navigable dialogs:
//!
//! - [`Route`]: immutable tree node with ancestry queries
//! - [`RouteRegistry`]: builds the tree once from a TOML [`RouteManifest`]
//! - [`classify`]: maps a route to a [`RouteCategory`]
//! - [`is_valid_transition`]: the permitted category transitions
//!
//! Everything here is synchronous and side-effect free. The runtime that
//! reacts to navigation lives in the `sectionnav` crate.
//!
//! ## Example
//!
//! ```
//! use sectionnav_router::{FeatureFlags, RouteCategory, RouteManifest, RouteRegistry};
//!
//! let manifest = RouteManifest::from_str(r#"
//!     [[sections]]
//!     path = "device"
//!     section = "device"
//!
//!     [[sections.children]]
//!     path = "storage"
//! "#).unwrap();
//!
//! let registry = RouteRegistry::build(&manifest, &FeatureFlags::new()).unwrap();
//! let classifier = registry.classifier();
//!
//! let storage = registry.get("/device/storage").map(|r| &**r);
//! assert_eq!(classifier.classify(storage), RouteCategory::Subpage);
//! assert_eq!(classifier.classify(None), RouteCategory::Initial);
//! ```

mod error;
pub mod manifest;
pub mod path;
pub mod registry;
pub mod route;

pub use error::RegistryError;
pub use manifest::{ChildEntry, ChildKind, FeatureFlags, Mount, RouteManifest, SectionEntry};
pub use path::{is_valid_path, join_path, normalize_path, split_url, PathHierarchy};
pub use registry::{RouteRegistry, BASIC_PATH};
pub use route::{
    classify, is_valid_transition, Route, RouteCategory, RouteClassifier, TransitionTable,
};
