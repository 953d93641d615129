//! In-memory page host
//!
//! Implements [`PageSurface`], [`ScrollContainer`] and [`EventSink`] without
//! any rendering. Sections are either rendered up front or lazily, becoming
//! visible a fixed number of frames after a forced render. `next_frame`
//! yields to the tokio scheduler.

use crate::events::{EventLog, EventSink, PageEvent};
use crate::host::{PageSurface, ScrollContainer, SectionElement};
use async_trait::async_trait;
use sectionnav_router::Route;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Sections {
    rendered: BTreeSet<String>,
    /// Lazy sections and the frames they need once rendering is requested
    lazy: BTreeMap<String, u32>,
    /// Requested lazy sections counting down to visibility
    pending: BTreeMap<String, u32>,
    expanded: BTreeSet<String>,
    render_requests: Vec<String>,
    scrolled_into_view: Vec<String>,
}

/// Headless page owning the subtree below `root`
pub struct HeadlessPage {
    root: Arc<Route>,
    sections: Mutex<Sections>,
    scroll_top: AtomicU32,
    showing_subpage: AtomicBool,
    frames: AtomicU64,
    events: EventLog,
}

impl HeadlessPage {
    pub fn new(root: Arc<Route>) -> Self {
        Self {
            root,
            sections: Mutex::new(Sections::default()),
            scroll_top: AtomicU32::new(0),
            showing_subpage: AtomicBool::new(false),
            frames: AtomicU64::new(0),
            events: EventLog::new(),
        }
    }

    /// Sections present from the start
    pub fn with_sections<I, S>(self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .rendered
            .extend(sections.into_iter().map(Into::into));
        self
    }

    /// A section that only appears `frames` frames after a forced render
    pub fn with_lazy_section(self, section: impl Into<String>, frames: u32) -> Self {
        self.lock().lazy.insert(section.into(), frames);
        self
    }

    pub fn root(&self) -> &Arc<Route> {
        &self.root
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn is_showing_subpage(&self) -> bool {
        self.showing_subpage.load(Ordering::SeqCst)
    }

    pub fn is_expanded(&self, section: &str) -> bool {
        self.lock().expanded.contains(section)
    }

    pub fn is_rendered(&self, section: &str) -> bool {
        self.lock().rendered.contains(section)
    }

    pub fn render_requests(&self) -> Vec<String> {
        self.lock().render_requests.clone()
    }

    pub fn scrolled_into_view(&self) -> Vec<String> {
        self.lock().scrolled_into_view.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Sections> {
        self.sections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tick(&self) {
        self.frames.fetch_add(1, Ordering::SeqCst);

        let mut sections = self.lock();
        let mut ready = Vec::new();
        for (name, remaining) in sections.pending.iter_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                ready.push(name.clone());
            }
        }
        for name in ready {
            sections.pending.remove(&name);
            sections.rendered.insert(name);
        }
    }
}

#[async_trait]
impl PageSurface for HeadlessPage {
    /// `None` (nothing observed yet) counts as this page
    fn contains_route(&self, route: Option<&Route>) -> bool {
        route.map(|route| self.root.contains(route)).unwrap_or(true)
    }

    fn query_section(&self, section: &str) -> Option<SectionElement> {
        self.lock()
            .rendered
            .contains(section)
            .then(|| SectionElement::new(section))
    }

    fn request_render(&self, route: &Route) {
        let mut sections = self.lock();
        let name = route.section().to_string();
        sections.render_requests.push(name.clone());

        if sections.rendered.contains(&name) || sections.pending.contains_key(&name) {
            return;
        }
        if let Some(frames) = sections.lazy.get(&name).copied() {
            if frames == 0 {
                sections.rendered.insert(name);
            } else {
                sections.pending.insert(name, frames);
            }
        }
    }

    async fn next_frame(&self) {
        tokio::task::yield_now().await;
        self.tick();
    }

    fn set_showing_subpage(&self, showing: bool) {
        self.showing_subpage.store(showing, Ordering::SeqCst);
    }

    fn set_section_expanded(&self, section: &SectionElement, expanded: bool) {
        let mut sections = self.lock();
        if expanded {
            sections.expanded.insert(section.section().to_string());
        } else {
            sections.expanded.remove(section.section());
        }
    }

    fn scroll_into_view(&self, section: &SectionElement) {
        self.lock()
            .scrolled_into_view
            .push(section.section().to_string());
    }
}

impl ScrollContainer for HeadlessPage {
    fn scroll_top(&self) -> u32 {
        self.scroll_top.load(Ordering::SeqCst)
    }

    fn set_scroll_top(&self, top: u32) {
        self.scroll_top.store(top, Ordering::SeqCst);
    }
}

impl EventSink for HeadlessPage {
    fn dispatch(&self, event: PageEvent) {
        self.events.dispatch(event);
    }
}
