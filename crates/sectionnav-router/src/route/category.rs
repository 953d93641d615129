//! Route categories and the classifier
//!
//! Classification is a total, pure function of the route and the two
//! top-level sentinels (`BASIC` and `ABOUT`).
use super::Route;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// What kind of location a route is, from the page's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteCategory {
    /// No route observed yet
    Initial,
    /// Modal overlay route
    Dialog,
    /// Top-level scrollable section of the main page
    Section,
    /// Drill-down view nested under a section
    Subpage,
    /// One of the sentinel top-level pages
    TopLevel,
}

impl RouteCategory {
    pub const ALL: [RouteCategory; 5] = [
        RouteCategory::Initial,
        RouteCategory::Dialog,
        RouteCategory::Section,
        RouteCategory::Subpage,
        RouteCategory::TopLevel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RouteCategory::Initial => "INITIAL",
            RouteCategory::Dialog => "DIALOG",
            RouteCategory::Section => "SECTION",
            RouteCategory::Subpage => "SUBPAGE",
            RouteCategory::TopLevel => "TOP_LEVEL",
        }
    }
}

impl fmt::Display for RouteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a route
///
/// Rules, first match wins:
///
/// 1. `None` → `Initial`
/// 2. identical to `basic` or `about` → `TopLevel`
/// 3. [`Route::is_subpage`] → `Subpage`
/// 4. navigable dialog → `Dialog`
/// 5. anything else → `Section`
///
/// ```
/// use sectionnav_router::{classify, Route, RouteCategory};
///
/// let basic = Route::root("/");
/// let about = Route::root("/help");
/// let internet = basic.create_section("internet", "internet", None);
///
/// assert_eq!(classify(None, &basic, &about), RouteCategory::Initial);
/// assert_eq!(classify(Some(about.as_ref()), &basic, &about), RouteCategory::TopLevel);
/// assert_eq!(classify(Some(internet.as_ref()), &basic, &about), RouteCategory::Section);
/// ```
pub fn classify(route: Option<&Route>, basic: &Route, about: &Route) -> RouteCategory {
    let Some(route) = route else {
        return RouteCategory::Initial;
    };

    if std::ptr::eq(route, basic) || std::ptr::eq(route, about) {
        RouteCategory::TopLevel
    } else if route.is_subpage() {
        RouteCategory::Subpage
    } else if route.is_navigable_dialog() {
        RouteCategory::Dialog
    } else {
        RouteCategory::Section
    }
}

/// Holds the sentinels so callers can classify with one argument
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    basic: Arc<Route>,
    about: Arc<Route>,
}

impl RouteClassifier {
    pub fn new(basic: Arc<Route>, about: Arc<Route>) -> Self {
        Self { basic, about }
    }

    pub fn classify(&self, route: Option<&Route>) -> RouteCategory {
        classify(route, &self.basic, &self.about)
    }

    pub fn basic(&self) -> &Arc<Route> {
        &self.basic
    }

    pub fn about(&self) -> &Arc<Route> {
        &self.about
    }
}
