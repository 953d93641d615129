//! Router: current location, back history and observer fan-out
//!
//! Every committed navigation is delivered to the registered
//! [`RouteObserver`]s in registration order. Delivery is awaited, so an
//! observer's transition (including any frames it waits for) finishes
//! before the next navigation is processed.

use crate::error::{NavigationError, Result};
use crate::host::RouteObserver;
use sectionnav_router::{split_url, Route, RouteRegistry};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// Decoded query string parameters
pub type QueryParams = BTreeMap<String, String>;

/// Identifies a registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Shared read handle on "was the last route change a popstate?"
///
/// Written by the [`Router`] on every commit, read by controllers when they
/// decide between restoring a remembered scroll offset and scrolling to a
/// section.
#[derive(Debug, Clone, Default)]
pub struct PopstateFlag(Arc<AtomicBool>);

impl PopstateFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, popstate: bool) {
        self.0.store(popstate, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
struct Location {
    route: Arc<Route>,
    query: QueryParams,
}

/// What a commit did to the back history, so a rejected commit can undo it
#[derive(Debug)]
enum HistoryChange {
    Unchanged,
    Pushed,
    Popped(Location),
}

#[derive(Debug)]
struct RouterState {
    current: Location,
    history: Vec<Location>,
}

/// Navigation router over a [`RouteRegistry`]
pub struct Router {
    registry: Arc<RouteRegistry>,
    state: RwLock<RouterState>,
    popstate: PopstateFlag,
    observers: RwLock<Vec<(ObserverId, Arc<dyn RouteObserver>)>>,
    next_observer_id: AtomicU64,
}

impl Router {
    /// Creates a router positioned at BASIC
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        let current = Location {
            route: Arc::clone(registry.basic()),
            query: QueryParams::new(),
        };

        Self {
            registry,
            state: RwLock::new(RouterState {
                current,
                history: Vec::new(),
            }),
            popstate: PopstateFlag::new(),
            observers: RwLock::new(Vec::new()),
            next_observer_id: AtomicU64::new(1),
        }
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Handle controllers use to read the popstate bit
    pub fn popstate_flag(&self) -> PopstateFlag {
        self.popstate.clone()
    }

    pub fn last_route_change_was_popstate(&self) -> bool {
        self.popstate.get()
    }

    pub async fn current_route(&self) -> Arc<Route> {
        Arc::clone(&self.state.read().await.current.route)
    }

    pub async fn query_parameters(&self) -> QueryParams {
        self.state.read().await.current.query.clone()
    }

    /// Current location as a URL (`/path?key=value`)
    pub async fn current_url(&self) -> String {
        let state = self.state.read().await;
        format_url(&state.current.route, &state.current.query)
    }

    pub async fn history_len(&self) -> usize {
        self.state.read().await.history.len()
    }

    /// Registers an observer and immediately delivers the current route
    /// with no previous route
    pub async fn add_observer(&self, observer: Arc<dyn RouteObserver>) -> Result<ObserverId> {
        let id = ObserverId(self.next_observer_id.fetch_add(1, Ordering::SeqCst));
        self.observers.write().await.push((id, Arc::clone(&observer)));

        let current = self.current_route().await;
        observer.on_route_changed(&current, None).await?;
        Ok(id)
    }

    /// Returns false if the observer was not registered
    pub async fn remove_observer(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write().await;
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    /// Sets the initial location from a URL without touching history
    ///
    /// Unknown paths resolve to their closest registered ancestor.
    pub async fn initialize_from_url(&self, url: &str) -> Result<()> {
        let (path, query) = split_url(url);
        let location = Location {
            route: self.resolve(path),
            query: parse_query(query),
        };
        self.commit(location, false, HistoryChange::Unchanged).await
    }

    /// Forward navigation to `route`
    pub async fn navigate_to(&self, route: &Arc<Route>, query: QueryParams) -> Result<()> {
        let location = Location {
            route: Arc::clone(route),
            query,
        };
        self.commit(location, false, HistoryChange::Pushed).await
    }

    /// Forward navigation to a URL such as `/device/storage?search=disk`
    pub async fn navigate_to_path(&self, url: &str) -> Result<()> {
        let (path, query) = split_url(url);
        let route = self
            .registry
            .get(path)
            .cloned()
            .ok_or_else(|| NavigationError::UnknownRoute(path.to_string()))?;

        self.navigate_to(&route, parse_query(query)).await
    }

    /// Goes back if the previous location is not deeper than the current
    /// one; otherwise navigates forward to the current route's parent
    /// (or BASIC)
    pub async fn navigate_to_previous_route(&self) -> Result<()> {
        let back = {
            let mut state = self.state.write().await;
            let current_depth = state.current.route.depth();
            match state.history.last() {
                Some(previous) if previous.route.depth() <= current_depth => state.history.pop(),
                _ => None,
            }
        };

        if let Some(previous) = back {
            let target = previous.clone();
            return self
                .commit(target, true, HistoryChange::Popped(previous))
                .await;
        }

        let current = self.current_route().await;
        let parent = current
            .parent()
            .cloned()
            .unwrap_or_else(|| Arc::clone(self.registry.basic()));
        self.navigate_to(&parent, QueryParams::new()).await
    }

    /// Commits a back/forward history navigation to `url`
    pub async fn handle_popstate(&self, url: &str) -> Result<()> {
        let (path, query) = split_url(url);
        let route = self.resolve(path);

        let change = {
            let mut state = self.state.write().await;
            let matches_top = state
                .history
                .last()
                .map(|entry| Arc::ptr_eq(&entry.route, &route))
                .unwrap_or(false);
            if matches_top {
                state
                    .history
                    .pop()
                    .map(HistoryChange::Popped)
                    .unwrap_or(HistoryChange::Unchanged)
            } else {
                HistoryChange::Unchanged
            }
        };

        let location = Location {
            route,
            query: parse_query(query),
        };
        self.commit(location, true, change).await
    }

    /// Registered route for `path`, else its closest registered ancestor
    fn resolve(&self, path: &str) -> Arc<Route> {
        if let Some(route) = self.registry.get(path) {
            return Arc::clone(route);
        }

        let nearest = self.registry.nearest(path);
        warn!(path, resolved = nearest.path(), "unknown route, using closest ancestor");
        Arc::clone(nearest)
    }

    /// Moves to `next` and notifies observers
    ///
    /// If an observer rejects the pair as an invariant violation, the
    /// previous location, history and popstate bit are put back.
    async fn commit(&self, next: Location, popstate: bool, change: HistoryChange) -> Result<()> {
        let was_popstate = self.popstate.get();
        let (new_route, previous) = {
            let mut state = self.state.write().await;
            let previous = std::mem::replace(&mut state.current, next);
            if matches!(change, HistoryChange::Pushed) {
                state.history.push(previous.clone());
            }
            (Arc::clone(&state.current.route), previous)
        };

        self.popstate.set(popstate);
        debug!(
            from = previous.route.path(),
            to = new_route.path(),
            popstate,
            "route changed"
        );

        let result = self.notify(&new_route, Some(&previous.route)).await;
        if let Err(err) = &result {
            if err.is_invariant_violation() {
                warn!(
                    rejected = new_route.path(),
                    restored = previous.route.path(),
                    "navigation rejected, restoring previous location"
                );
                self.rollback(previous, change, was_popstate).await;
            }
        }
        result
    }

    async fn rollback(&self, previous: Location, change: HistoryChange, was_popstate: bool) {
        let mut state = self.state.write().await;
        state.current = previous;
        match change {
            HistoryChange::Pushed => {
                state.history.pop();
            }
            HistoryChange::Popped(entry) => state.history.push(entry),
            HistoryChange::Unchanged => {}
        }
        self.popstate.set(was_popstate);
    }

    async fn notify(&self, new_route: &Arc<Route>, old_route: Option<&Arc<Route>>) -> Result<()> {
        let observers: Vec<Arc<dyn RouteObserver>> = self
            .observers
            .read()
            .await
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();

        for observer in observers {
            if let Err(err) = observer.on_route_changed(new_route, old_route).await {
                error!(route = new_route.path(), %err, "route observer failed");
                return Err(err);
            }
        }

        Ok(())
    }
}

/// Parses `a=1&b=two%20words` into decoded pairs
///
/// Keys without `=` map to an empty value; undecodable pairs are kept raw.
pub fn parse_query(query: Option<&str>) -> QueryParams {
    query
        .unwrap_or("")
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(key), decode(value))
        })
        .collect()
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(spaced)
}

fn format_url(route: &Route, query: &QueryParams) -> String {
    if query.is_empty() {
        return route.path().to_string();
    }

    let encoded = query
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", route.path(), encoded)
}
