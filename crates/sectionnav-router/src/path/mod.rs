//! Path utilities for route paths
//!
//! All functions are pure: same input, same output, no side effects.
use std::borrow::Cow;

pub mod hierarchy;
pub use hierarchy::PathHierarchy;

/// Checks whether a route path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use sectionnav_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/internet"));
/// assert!(is_valid_path("/internet/networks"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("internet"));
/// assert!(!is_valid_path("/internet/"));
/// assert!(!is_valid_path("/internet//networks"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalizes a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical.
///
/// - Trailing slashes: `/storage/` → `/storage`
/// - Double slashes: `/device//storage` → `/device/storage`
/// - Backslashes: `\device\storage` → `/device/storage`
/// - Missing leading slash: `storage` → `/storage`
///
/// # Examples
///
/// ```
/// use sectionnav_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/storage"), Cow::Borrowed("/storage")));
/// assert_eq!(normalize_path("/storage/"), "/storage");
/// assert_eq!(normalize_path("device//storage"), "/device/storage");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Derives a child path from a parent path and a segment
///
/// A segment starting with `/` is taken as absolute; anything else is
/// appended to the parent. The result is always normalized.
///
/// ```
/// use sectionnav_router::path::join_path;
///
/// assert_eq!(join_path("/", "internet"), "/internet");
/// assert_eq!(join_path("/internet", "networks"), "/internet/networks");
/// assert_eq!(join_path("/internet", "/networks"), "/networks");
/// ```
pub fn join_path(parent: &str, segment: &str) -> String {
    if segment.starts_with('/') {
        return normalize_path(segment).into_owned();
    }

    normalize_path(&format!("{}/{}", parent, segment)).into_owned()
}

/// Splits a URL into its path and optional query string
///
/// ```
/// use sectionnav_router::path::split_url;
///
/// assert_eq!(split_url("/storage?search=disk"), ("/storage", Some("search=disk")));
/// assert_eq!(split_url("/storage"), ("/storage", None));
/// ```
pub fn split_url(url: &str) -> (&str, Option<&str>) {
    match url.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (url, None),
    }
}
