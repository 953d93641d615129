//! Page events
//!
//! These are the observable output of the navigation state machine. Names
//! are part of the host contract and must not change.

use crate::host::SectionElement;
use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "detail", rename_all = "kebab-case")]
pub enum PageEvent {
    ShowContainer,
    HideContainer,
    SubpageExpand,
    SettingsSectionExpanded,
    /// Carries the section that was revealed
    ShowingSection(SectionElement),
    ShowingMainPage,
}

impl PageEvent {
    /// The event name as dispatched to the host
    pub fn name(&self) -> &'static str {
        match self {
            PageEvent::ShowContainer => "show-container",
            PageEvent::HideContainer => "hide-container",
            PageEvent::SubpageExpand => "subpage-expand",
            PageEvent::SettingsSectionExpanded => "settings-section-expanded",
            PageEvent::ShowingSection(_) => "showing-section",
            PageEvent::ShowingMainPage => "showing-main-page",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Destination for page events
pub trait EventSink: Send + Sync {
    fn dispatch(&self, event: PageEvent);
}

/// Sink that records events in dispatch order
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<PageEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.lock().clone()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.lock().iter().map(PageEvent::name).collect()
    }

    /// Returns and clears the recorded events
    pub fn take(&self) -> Vec<PageEvent> {
        std::mem::take(&mut *self.lock())
    }

    pub fn count(&self, name: &str) -> usize {
        self.lock().iter().filter(|e| e.name() == name).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PageEvent>> {
        // A panic while holding the lock cannot leave a Vec half-pushed.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for EventLog {
    fn dispatch(&self, event: PageEvent) {
        tracing::trace!(event = event.name(), "dispatch");
        self.lock().push(event);
    }
}
