//! Permitted category-to-category transitions
//!
//! | from \ to | INITIAL | DIALOG | SECTION | SUBPAGE | TOP_LEVEL |
//! |-----------|---------|--------|---------|---------|-----------|
//! | INITIAL   | no      | yes    | yes     | yes     | yes       |
//! | DIALOG    | no      | no     | yes     | yes     | yes       |
//! | SECTION   | no      | yes    | yes     | yes     | yes       |
//! | SUBPAGE   | no      | yes    | yes     | yes     | yes       |
//! | TOP_LEVEL | no      | yes    | yes     | yes     | yes       |
//!
//! Nothing ever transitions back to `INITIAL`, and two navigable dialogs
//! never chain directly.
use super::RouteCategory;

/// Returns true if the page may move from `from` to `to`
///
/// ```
/// use sectionnav_router::{is_valid_transition, RouteCategory::*};
///
/// assert!(is_valid_transition(Initial, Subpage));
/// assert!(is_valid_transition(Dialog, TopLevel));
/// assert!(!is_valid_transition(Dialog, Dialog));
/// assert!(!is_valid_transition(Section, Initial));
/// ```
pub fn is_valid_transition(from: RouteCategory, to: RouteCategory) -> bool {
    use RouteCategory::*;

    match (from, to) {
        (_, Initial) => false,
        (Dialog, Dialog) => false,
        _ => true,
    }
}

/// Table view over [`is_valid_transition`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionTable;

impl TransitionTable {
    pub fn is_valid(&self, from: RouteCategory, to: RouteCategory) -> bool {
        is_valid_transition(from, to)
    }

    /// Destinations reachable from `from`, in declaration order
    pub fn destinations(&self, from: RouteCategory) -> Vec<RouteCategory> {
        RouteCategory::ALL
            .into_iter()
            .filter(|to| is_valid_transition(from, *to))
            .collect()
    }
}
