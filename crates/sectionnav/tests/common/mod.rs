//! Shared fixtures for sectionnav integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use sectionnav::*;
use sectionnav_router::{FeatureFlags, Route, RouteManifest, RouteRegistry};
use std::sync::{Arc, Mutex};

pub const MANIFEST: &str = r#"
[[sections]]
path = "internet"
section = "internet"

[[sections.children]]
path = "networks"

[[sections]]
path = "accounts"
section = "osPeople"

[[sections.children]]
path = "people"

[[sections]]
path = "device"
section = "device"

[[sections.children]]
path = "storage"

[[sections.children.children]]
path = "external"

[[sections.children.children]]
path = "clearData"
kind = "dialog"

[[sections]]
path = "privacy"
section = "privacy"

[[sections.children]]
path = "lockScreen"
kind = "dialog"

[[sections]]
path = "about"
section = "about"
parent = "about"
"#;

pub const ALL_SECTIONS: [&str; 4] = ["internet", "osPeople", "device", "privacy"];

pub fn registry() -> Arc<RouteRegistry> {
    let manifest = RouteManifest::from_str(MANIFEST).unwrap();
    Arc::new(RouteRegistry::build(&manifest, &FeatureFlags::new()).unwrap())
}

pub struct Harness {
    pub registry: Arc<RouteRegistry>,
    pub router: Router,
    pub page: Arc<HeadlessPage>,
    pub controller: Arc<NavigationController>,
}

impl Harness {
    pub fn route(&self, path: &str) -> Arc<Route> {
        Arc::clone(self.registry.get(path).unwrap())
    }
}

/// Starts at `url` with every section rendered and the page as event sink
pub async fn start(url: &str) -> Harness {
    start_with(url, |page| page.with_sections(ALL_SECTIONS), NavConfig::default(), None).await
}

/// Starts at `url`, attaching a controller to a page built by `configure`
pub async fn start_with(
    url: &str,
    configure: impl FnOnce(HeadlessPage) -> HeadlessPage,
    config: NavConfig,
    sink: Option<Arc<dyn EventSink>>,
) -> Harness {
    let registry = registry();
    let router = Router::new(Arc::clone(&registry));
    router.initialize_from_url(url).await.unwrap();

    let page = Arc::new(configure(HeadlessPage::new(Arc::clone(registry.basic()))));
    let events = sink.unwrap_or_else(|| page.clone() as Arc<dyn EventSink>);
    let controller = Arc::new(NavigationController::new(
        registry.classifier(),
        page.clone(),
        page.clone(),
        events,
        router.popstate_flag(),
        config,
    ));
    router.add_observer(controller.clone()).await.unwrap();

    Harness {
        registry,
        router,
        page,
        controller,
    }
}

/// Records each event with the page's frame counter at dispatch time
pub struct FrameStampedSink {
    page: Mutex<Option<Arc<HeadlessPage>>>,
    log: Mutex<Vec<(&'static str, u64)>>,
}

impl FrameStampedSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            page: Mutex::new(None),
            log: Mutex::new(Vec::new()),
        })
    }

    pub fn attach(&self, page: Arc<HeadlessPage>) {
        *self.page.lock().unwrap() = Some(page);
    }

    pub fn take(&self) -> Vec<(&'static str, u64)> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

impl EventSink for FrameStampedSink {
    fn dispatch(&self, event: PageEvent) {
        let frame = self
            .page
            .lock()
            .unwrap()
            .as_ref()
            .map(|page| page.frames())
            .unwrap_or(0);
        self.log.lock().unwrap().push((event.name(), frame));
    }
}

/// Observer that records `(new, old)` paths
#[derive(Default)]
pub struct RecordingObserver {
    pub seen: Mutex<Vec<(String, Option<String>)>>,
    pub fail_on: Option<String>,
    pub fail_from: Option<String>,
}

impl RecordingObserver {
    pub fn seen(&self) -> Vec<(String, Option<String>)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteObserver for RecordingObserver {
    async fn on_route_changed(
        &self,
        new_route: &Arc<Route>,
        old_route: Option<&Arc<Route>>,
    ) -> Result<()> {
        self.seen.lock().unwrap().push((
            new_route.path().to_string(),
            old_route.map(|r| r.path().to_string()),
        ));
        let old_path = old_route.map(|r| r.path());
        if self.fail_on.as_deref() == Some(new_route.path())
            || (self.fail_from.is_some() && self.fail_from.as_deref() == old_path)
        {
            return Err(NavigationError::MissingSection(new_route.path().to_string()));
        }
        Ok(())
    }
}
