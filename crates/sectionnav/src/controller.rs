//! Navigation controller
//!
//! Turns `(new, old)` route pairs into the visible page transition:
//! scrolling to a section, expanding a subpage, or collapsing back to the
//! main page.
//!
//! ## Transition resolution
//!
//! | old on page | new on page | pair                                   |
//! |-------------|-------------|----------------------------------------|
//! | no          | no          | nothing to do                          |
//! | yes         | no          | `(classify(old), TOP_LEVEL)`           |
//! | no          | yes         | `(TOP_LEVEL, classify(new))`           |
//! | yes         | yes         | `(classify(old), classify(new))`       |
//!
//! The pair is then checked against the transition table. An invalid pair
//! aborts before anything visible happens.

use crate::config::NavConfig;
use crate::error::{NavigationError, Result};
use crate::events::{EventSink, PageEvent};
use crate::host::{PageSurface, RouteObserver, ScrollContainer, SectionElement};
use crate::router::PopstateFlag;
use async_trait::async_trait;
use sectionnav_router::{is_valid_transition, Route, RouteCategory, RouteClassifier};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Scroll offset remembered while a subpage is shown
#[derive(Debug, Default)]
pub struct ScrollAnchorState {
    last_scroll_top: AtomicU32,
}

impl ScrollAnchorState {
    pub fn last_scroll_top(&self) -> u32 {
        self.last_scroll_top.load(Ordering::SeqCst)
    }

    fn save(&self, top: u32) {
        self.last_scroll_top.store(top, Ordering::SeqCst);
    }
}

/// Drives section/subpage transitions for one page
pub struct NavigationController {
    classifier: RouteClassifier,
    surface: Arc<dyn PageSurface>,
    scroller: Arc<dyn ScrollContainer>,
    events: Arc<dyn EventSink>,
    popstate: PopstateFlag,
    config: NavConfig,
    scroll_anchor: ScrollAnchorState,
}

impl NavigationController {
    pub fn new(
        classifier: RouteClassifier,
        surface: Arc<dyn PageSurface>,
        scroller: Arc<dyn ScrollContainer>,
        events: Arc<dyn EventSink>,
        popstate: PopstateFlag,
        config: NavConfig,
    ) -> Self {
        Self {
            classifier,
            surface,
            scroller,
            events,
            popstate,
            config,
            scroll_anchor: ScrollAnchorState::default(),
        }
    }

    pub fn scroll_anchor(&self) -> &ScrollAnchorState {
        &self.scroll_anchor
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Resolves the category pair for a navigation, or `None` when neither
    /// route belongs to this page
    pub fn transition_for(
        &self,
        new_route: &Route,
        old_route: Option<&Route>,
    ) -> Option<(RouteCategory, RouteCategory)> {
        let contains_old = self.surface.contains_route(old_route);
        let contains_new = self.surface.contains_route(Some(new_route));

        match (contains_old, contains_new) {
            (false, false) => None,
            (true, false) => Some((self.classifier.classify(old_route), RouteCategory::TopLevel)),
            (false, true) => Some((RouteCategory::TopLevel, self.classifier.classify(Some(new_route)))),
            (true, true) => Some((
                self.classifier.classify(old_route),
                self.classifier.classify(Some(new_route)),
            )),
        }
    }

    /// Handles one navigation; returns the pair that was acted on
    pub async fn handle_route_change(
        &self,
        new_route: &Arc<Route>,
        old_route: Option<&Arc<Route>>,
    ) -> Result<Option<(RouteCategory, RouteCategory)>> {
        let Some((from, to)) = self.transition_for(new_route, old_route.map(|r| &**r)) else {
            trace!(route = new_route.path(), "navigation does not concern this page");
            return Ok(None);
        };

        if !is_valid_transition(from, to) {
            error!(%from, %to, route = new_route.path(), "invalid route transition");
            return Err(NavigationError::InvalidTransition { from, to });
        }

        debug!(
            %from,
            %to,
            old = old_route.map(|r| r.path()),
            new = new_route.path(),
            "route transition"
        );

        self.run_transition(from, to, new_route, old_route).await?;
        Ok(Some((from, to)))
    }

    async fn run_transition(
        &self,
        from: RouteCategory,
        to: RouteCategory,
        new_route: &Route,
        old_route: Option<&Arc<Route>>,
    ) -> Result<()> {
        use RouteCategory::*;

        match (from, to) {
            (Initial | TopLevel | Section, Section) => self.scroll_to_section(new_route).await,
            (Initial | TopLevel | Section | Dialog, Subpage) => self.enter_subpage(new_route).await,
            (Section, TopLevel) => {
                self.scroller.set_scroll_top(0);
                Ok(())
            }
            (Subpage, Section) => {
                let old_route = old_route.ok_or(NavigationError::MissingRoute(from))?;
                self.enter_main_page(old_route).await?;
                // Back navigation restores the remembered offset instead.
                if !self.popstate.get() {
                    self.scroll_to_section(new_route).await?;
                }
                Ok(())
            }
            (Subpage, Subpage) => {
                let old_route = old_route.ok_or(NavigationError::MissingRoute(from))?;
                self.switch_subpage(old_route, new_route).await
            }
            // Dialogs never need the subpage-expanded state.
            (Subpage, TopLevel | Dialog) => {
                let old_route = old_route.ok_or(NavigationError::MissingRoute(from))?;
                self.enter_main_page(old_route).await
            }
            _ => Ok(()),
        }
    }

    async fn switch_subpage(&self, old_route: &Route, new_route: &Route) -> Result<()> {
        if !old_route.contains(new_route) && !new_route.contains(old_route) {
            // Unrelated subpages: the collapse must finish before the expand
            // starts touching the same visual state.
            self.enter_main_page(old_route).await?;
            return self.enter_subpage(new_route).await;
        }

        if old_route.contains(new_route) {
            self.scroller.set_scroll_top(0);
        }
        // Ascending to a parent subpage: the host's focus return restores
        // the position.
        Ok(())
    }

    async fn scroll_to_section(&self, route: &Route) -> Result<()> {
        let section = self.ensure_section_for_route(route).await?;
        self.surface.scroll_into_view(&section);
        self.events.dispatch(PageEvent::ShowingSection(section));
        self.events.dispatch(PageEvent::ShowContainer);
        Ok(())
    }

    async fn enter_subpage(&self, route: &Route) -> Result<()> {
        self.scroll_anchor.save(self.scroller.scroll_top());
        self.scroller.set_scroll_top(0);
        self.surface.set_showing_subpage(true);
        self.events.dispatch(PageEvent::SubpageExpand);

        let section = self.ensure_section_for_route(route).await?;
        self.surface.set_section_expanded(&section, true);
        self.events.dispatch(PageEvent::SettingsSectionExpanded);
        self.events.dispatch(PageEvent::ShowContainer);
        Ok(())
    }

    async fn enter_main_page(&self, old_route: &Route) -> Result<()> {
        self.events.dispatch(PageEvent::HideContainer);
        if let Some(section) = self.surface.query_section(old_route.section()) {
            self.surface.set_section_expanded(&section, false);
        }
        self.surface.set_showing_subpage(false);

        // Let the collapsed layout settle before touching the scroll offset.
        self.surface.next_frame().await;

        let top = if self.config.restore_scroll_on_popstate && self.popstate.get() {
            self.scroll_anchor.last_scroll_top()
        } else {
            0
        };
        self.scroller.set_scroll_top(top);
        self.events.dispatch(PageEvent::ShowingMainPage);
        self.events.dispatch(PageEvent::ShowContainer);
        Ok(())
    }

    /// Waits until the section that hosts `route` is rendered
    ///
    /// The first miss triggers a forced render; each further miss waits one
    /// frame and looks again.
    pub async fn ensure_section_for_route(&self, route: &Route) -> Result<SectionElement> {
        let name = route.section();
        if name.is_empty() {
            return Err(NavigationError::MissingSection(route.path().to_string()));
        }

        let mut frames = 0u32;
        loop {
            if let Some(section) = self.surface.query_section(name) {
                return Ok(section);
            }

            if frames == 0 {
                debug!(section = name, route = route.path(), "section not rendered yet");
                self.surface.request_render(route);
            }

            if let Some(limit) = self.config.render_retry_limit {
                if frames >= limit {
                    error!(section = name, frames, "section never rendered");
                    return Err(NavigationError::RenderTimeout {
                        section: name.to_string(),
                        frames,
                    });
                }
            }

            self.surface.next_frame().await;
            frames += 1;
        }
    }
}

#[async_trait]
impl RouteObserver for NavigationController {
    async fn on_route_changed(
        &self,
        new_route: &Arc<Route>,
        old_route: Option<&Arc<Route>>,
    ) -> Result<()> {
        self.handle_route_change(new_route, old_route).await.map(|_| ())
    }
}
