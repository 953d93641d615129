//! # Sectionnav
//!
//! Route-driven navigation for settings-style pages: a main page of
//! scrollable sections, drill-down subpages and navigable dialogs.
//!
//! - [`Router`]: current location, back history, popstate flag, observers
//! - [`NavigationController`]: classifies each `(new, old)` route pair,
//!   validates it, then scrolls, expands or collapses the page
//! - [`PageSurface`], [`ScrollContainer`], [`EventSink`]: what the host page
//!   provides
//! - [`HeadlessPage`]: in-memory host for tools and tests
//!
//! ## Example
//!
//! ```rust
//! use sectionnav::{HeadlessPage, NavConfig, NavigationController, Router};
//! use sectionnav_router::{FeatureFlags, RouteManifest, RouteRegistry};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let manifest = RouteManifest::from_str(r#"
//!         [[sections]]
//!         path = "device"
//!         section = "device"
//!
//!         [[sections.children]]
//!         path = "storage"
//!     "#)?;
//!     let registry = Arc::new(RouteRegistry::build(&manifest, &FeatureFlags::new())?);
//!     let router = Router::new(Arc::clone(&registry));
//!
//!     let page = Arc::new(
//!         HeadlessPage::new(Arc::clone(registry.basic())).with_sections(["device"]),
//!     );
//!     let controller = Arc::new(NavigationController::new(
//!         registry.classifier(),
//!         page.clone(),
//!         page.clone(),
//!         page.clone(),
//!         router.popstate_flag(),
//!         NavConfig::default(),
//!     ));
//!     router.add_observer(controller).await?;
//!
//!     router.navigate_to_path("/device/storage").await?;
//!     assert!(page.is_showing_subpage());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod headless;
pub mod host;
pub mod router;

pub use config::NavConfig;
pub use controller::{NavigationController, ScrollAnchorState};
pub use error::{NavigationError, Result};
pub use events::{EventLog, EventSink, PageEvent};
pub use headless::HeadlessPage;
pub use host::{PageSurface, RouteObserver, ScrollContainer, SectionElement};
pub use router::{parse_query, ObserverId, PopstateFlag, QueryParams, Router};
