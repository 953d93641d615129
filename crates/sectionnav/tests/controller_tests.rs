//! Integration tests for the navigation controller
//!
//! Each test drives a real `Router` with a `HeadlessPage` host and checks
//! the visible outcome: events, scroll offset, expanded sections and the
//! showing-subpage state.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sectionnav::*;
use sectionnav_router::{Route, RouteCategory::*, RouteClassifier};
use std::sync::Arc;

fn names(page: &HeadlessPage) -> Vec<&'static str> {
    page.events().take().iter().map(PageEvent::name).collect()
}

// ============================================================================
// First navigation (INITIAL)
// ============================================================================

#[tokio::test]
async fn test_initial_load_on_subpage_expands() {
    let h = start("/device/storage").await;

    assert!(h.page.is_showing_subpage());
    assert!(h.page.is_expanded("device"));
    assert_eq!(
        names(&h.page),
        vec!["subpage-expand", "settings-section-expanded", "show-container"]
    );
}

#[tokio::test]
async fn test_initial_load_on_section_scrolls_to_it() {
    let h = start("/device").await;

    assert_eq!(h.page.scrolled_into_view(), vec!["device"]);
    assert_eq!(
        h.page.events().take(),
        vec![
            PageEvent::ShowingSection(SectionElement::new("device")),
            PageEvent::ShowContainer,
        ]
    );
}

#[tokio::test]
async fn test_initial_load_on_top_level_or_dialog_is_quiet() {
    for url in ["/", "/device/storage/clearData"] {
        let h = start(url).await;
        assert!(h.page.events().events().is_empty(), "{}", url);
        assert!(!h.page.is_showing_subpage());
    }
}

// ============================================================================
// Scenario A: SECTION → SUBPAGE
// ============================================================================

#[tokio::test]
async fn test_section_to_subpage_expands_after_section_renders() {
    let sink = FrameStampedSink::new();
    let h = start_with(
        "/internet",
        |page| page.with_sections(["internet"]).with_lazy_section("device", 3),
        NavConfig::default(),
        Some(sink.clone() as Arc<dyn EventSink>),
    )
    .await;
    sink.attach(h.page.clone());
    sink.take();
    h.page.set_scroll_top(120);

    let storage = h.route("/device/storage");
    let internet = h.route("/internet");
    assert_eq!(
        h.controller.transition_for(&storage, Some(&*internet)),
        Some((Section, Subpage))
    );

    h.router.navigate_to_path("/device/storage").await.unwrap();

    assert_eq!(h.controller.scroll_anchor().last_scroll_top(), 120);
    assert_eq!(h.page.scroll_top(), 0);
    assert!(h.page.is_showing_subpage());
    assert!(h.page.is_expanded("device"));
    assert_eq!(h.page.render_requests(), vec!["device"]);

    let stamped = sink.take();
    assert_eq!(
        stamped.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        vec!["subpage-expand", "settings-section-expanded", "show-container"]
    );
    // The expand notification goes out before the lazy section exists.
    assert_eq!(stamped[0].1, 0);
    assert_eq!(stamped[1].1, 3);
    assert_eq!(stamped[2].1, 3);
}

// ============================================================================
// Scenario B: entering the page from outside
// ============================================================================

#[tokio::test]
async fn test_entering_page_is_forced_to_top_level_origin() {
    let h = start("/help/about").await;
    assert!(h.page.events().events().is_empty());

    let about = h.route("/help/about");
    let device = h.route("/device");
    assert_eq!(
        h.controller.transition_for(&device, Some(&*about)),
        Some((TopLevel, Section))
    );

    h.router.navigate_to_path("/device").await.unwrap();

    assert_eq!(h.page.scrolled_into_view(), vec!["device"]);
    let events = names(&h.page);
    assert_eq!(events, vec!["showing-section", "show-container"]);
    assert!(!events.contains(&"hide-container"));
    assert!(!events.contains(&"showing-main-page"));
}

#[tokio::test]
async fn test_navigation_elsewhere_is_ignored() {
    let h = start("/help").await;
    let help = h.route("/help");
    let about = h.route("/help/about");

    assert_eq!(h.controller.transition_for(&about, Some(&*help)), None);
    assert_eq!(
        h.controller.handle_route_change(&about, Some(&help)).await.unwrap(),
        None
    );
    assert!(h.page.events().events().is_empty());
}

// ============================================================================
// Scenario C: SUBPAGE → unrelated SUBPAGE
// ============================================================================

#[tokio::test]
async fn test_unrelated_subpages_collapse_then_expand() {
    let sink = FrameStampedSink::new();
    let h = start_with(
        "/device/storage",
        |page| page.with_sections(["device"]).with_lazy_section("osPeople", 2),
        NavConfig::default(),
        Some(sink.clone() as Arc<dyn EventSink>),
    )
    .await;
    sink.attach(h.page.clone());
    sink.take();

    h.router.navigate_to_path("/accounts/people").await.unwrap();

    let stamped = sink.take();
    assert_eq!(
        stamped.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
        vec![
            "hide-container",
            "showing-main-page",
            "show-container",
            "subpage-expand",
            "settings-section-expanded",
            "show-container",
        ]
    );
    // Expansion starts only once the collapse has finished its frame.
    let collapse_done = stamped[2].1;
    assert!(stamped[3..].iter().all(|(_, frame)| *frame >= collapse_done));

    assert!(!h.page.is_expanded("device"));
    assert!(h.page.is_expanded("osPeople"));
    assert!(h.page.is_showing_subpage());
}

#[tokio::test]
async fn test_descending_into_sub_subpage_resets_scroll() {
    let h = start("/device/storage").await;
    h.page.events().take();
    h.page.set_scroll_top(500);

    h.router.navigate_to_path("/device/storage/external").await.unwrap();

    assert_eq!(h.page.scroll_top(), 0);
    assert!(h.page.events().events().is_empty());
    assert!(h.page.is_showing_subpage());
}

#[tokio::test]
async fn test_ascending_to_parent_subpage_takes_no_action() {
    let h = start("/device/storage/external").await;
    h.page.events().take();
    h.page.set_scroll_top(42);

    h.router.navigate_to_path("/device/storage").await.unwrap();

    assert_eq!(h.page.scroll_top(), 42);
    assert!(h.page.events().events().is_empty());
    assert!(h.page.is_showing_subpage());
}

// ============================================================================
// Scenario D: DIALOG → DIALOG
// ============================================================================

#[tokio::test]
async fn test_dialog_to_dialog_is_rejected_without_visual_change() {
    // Chained navigable dialogs are not supported by the transition table.
    let h = start("/device/storage/clearData").await;
    h.page.set_scroll_top(77);

    let err = h
        .router
        .navigate_to_path("/privacy/lockScreen")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        NavigationError::InvalidTransition {
            from: Dialog,
            to: Dialog
        }
    ));
    assert!(err.is_invariant_violation());
    assert!(h.page.events().events().is_empty());
    assert_eq!(h.page.scroll_top(), 77);
    assert!(!h.page.is_showing_subpage());
}

#[tokio::test]
async fn test_rejected_dialog_leaves_router_on_previous_dialog() {
    let h = start("/device/storage/clearData").await;

    h.router
        .navigate_to_path("/privacy/lockScreen")
        .await
        .unwrap_err();

    assert_eq!(
        h.router.current_route().await.path(),
        "/device/storage/clearData"
    );
    assert_eq!(h.router.history_len().await, 0);

    // The next navigation starts from the dialog the page actually shows.
    h.router.navigate_to_path("/device/storage").await.unwrap();
    assert!(h.page.is_showing_subpage());
    assert_eq!(
        names(&h.page),
        vec!["subpage-expand", "settings-section-expanded", "show-container"]
    );
}

// ============================================================================
// Leaving a subpage
// ============================================================================

#[tokio::test]
async fn test_top_level_subpage_round_trip_restores_scroll_on_back() {
    let h = start("/").await;
    h.page.set_scroll_top(350);

    h.router.navigate_to_path("/device/storage").await.unwrap();
    assert_eq!(h.page.scroll_top(), 0);

    h.router.navigate_to_previous_route().await.unwrap();

    assert!(h.router.last_route_change_was_popstate());
    assert_eq!(h.router.current_route().await.path(), "/");
    assert_eq!(h.page.scroll_top(), 350);
    assert!(!h.page.is_showing_subpage());
}

#[tokio::test]
async fn test_top_level_subpage_round_trip_forward_lands_at_top() {
    let h = start("/").await;
    h.page.set_scroll_top(350);

    h.router.navigate_to_path("/device/storage").await.unwrap();
    h.router.navigate_to_path("/").await.unwrap();

    assert!(!h.router.last_route_change_was_popstate());
    assert_eq!(h.page.scroll_top(), 0);
    assert!(!h.page.is_showing_subpage());
}

#[tokio::test]
async fn test_forward_return_from_scrolled_subpage_lands_at_top() {
    let h = start("/").await;
    h.page.set_scroll_top(350);

    h.router.navigate_to_path("/device/storage").await.unwrap();
    h.page.set_scroll_top(120);
    h.router.navigate_to_path("/").await.unwrap();

    assert_eq!(h.page.scroll_top(), 0);
    assert!(!h.page.is_showing_subpage());
}

#[tokio::test]
async fn test_restore_can_be_disabled() {
    let config = NavConfig {
        restore_scroll_on_popstate: false,
        ..NavConfig::default()
    };
    let h = start_with("/", |page| page.with_sections(ALL_SECTIONS), config, None).await;
    h.page.set_scroll_top(350);

    h.router.navigate_to_path("/device/storage").await.unwrap();
    h.page.set_scroll_top(90);
    h.router.navigate_to_previous_route().await.unwrap();

    assert!(h.router.last_route_change_was_popstate());
    assert_eq!(h.page.scroll_top(), 0);
}

#[tokio::test]
async fn test_subpage_to_section_forward_scrolls_to_section() {
    let h = start("/device/storage").await;
    h.page.events().take();

    h.router.navigate_to_path("/internet").await.unwrap();

    assert_eq!(
        h.page.events().take(),
        vec![
            PageEvent::HideContainer,
            PageEvent::ShowingMainPage,
            PageEvent::ShowContainer,
            PageEvent::ShowingSection(SectionElement::new("internet")),
            PageEvent::ShowContainer,
        ]
    );
    assert!(!h.page.is_expanded("device"));
    assert_eq!(h.page.scrolled_into_view(), vec!["internet"]);
}

#[tokio::test]
async fn test_subpage_to_section_on_back_restores_instead_of_scrolling() {
    let h = start("/device").await;
    h.page.set_scroll_top(240);
    h.router.navigate_to_path("/device/storage").await.unwrap();
    h.page.events().take();

    h.router.navigate_to_previous_route().await.unwrap();

    assert_eq!(
        names(&h.page),
        vec!["hide-container", "showing-main-page", "show-container"]
    );
    assert_eq!(h.page.scroll_top(), 240);
    // Only the initial load scrolled a section into view.
    assert_eq!(h.page.scrolled_into_view(), vec!["device"]);
}

#[tokio::test]
async fn test_subpage_to_dialog_collapses() {
    let h = start("/device/storage").await;
    h.page.events().take();

    h.router.navigate_to_path("/device/storage/clearData").await.unwrap();

    assert!(!h.page.is_showing_subpage());
    assert!(!h.page.is_expanded("device"));
    assert_eq!(
        names(&h.page),
        vec!["hide-container", "showing-main-page", "show-container"]
    );
}

#[tokio::test]
async fn test_dialog_to_subpage_expands() {
    let h = start("/device/storage/clearData").await;

    h.router.navigate_to_path("/device/storage").await.unwrap();

    assert!(h.page.is_showing_subpage());
    assert_eq!(
        names(&h.page),
        vec!["subpage-expand", "settings-section-expanded", "show-container"]
    );
}

#[tokio::test]
async fn test_leaving_page_from_subpage_collapses() {
    let h = start("/device/storage").await;
    h.page.events().take();

    h.router.navigate_to_path("/help/about").await.unwrap();

    assert!(!h.page.is_showing_subpage());
    assert_eq!(
        names(&h.page),
        vec!["hide-container", "showing-main-page", "show-container"]
    );
}

#[tokio::test]
async fn test_section_to_top_level_resets_scroll() {
    let h = start("/device").await;
    h.page.events().take();
    h.page.set_scroll_top(300);

    h.router.navigate_to_path("/").await.unwrap();

    assert_eq!(h.page.scroll_top(), 0);
    assert!(h.page.events().events().is_empty());
}

#[tokio::test]
async fn test_section_to_section_scrolls() {
    let h = start("/device").await;

    h.router.navigate_to_path("/privacy").await.unwrap();

    assert_eq!(h.page.scrolled_into_view(), vec!["device", "privacy"]);
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_render_retry_limit() {
    let config = NavConfig::default().with_render_retry_limit(2);
    let h = start_with("/", |page| page.with_lazy_section("device", 5), config, None).await;

    let err = h.router.navigate_to_path("/device").await.unwrap_err();

    assert!(matches!(
        err,
        NavigationError::RenderTimeout { ref section, frames: 2 } if section == "device"
    ));
    assert!(!err.is_invariant_violation());
    assert_eq!(h.page.render_requests(), vec!["device"]);
}

#[tokio::test]
async fn test_route_without_section_is_an_invariant_violation() {
    let root = Route::root("/");
    let orphan = root.create_child("orphan");
    let page = Arc::new(HeadlessPage::new(Arc::clone(&root)));
    let controller = NavigationController::new(
        RouteClassifier::new(Arc::clone(&root), Route::root("/help")),
        page.clone(),
        page.clone(),
        page.clone(),
        PopstateFlag::new(),
        NavConfig::default(),
    );

    let err = controller
        .handle_route_change(&orphan, Some(&root))
        .await
        .unwrap_err();

    assert!(matches!(err, NavigationError::MissingSection(ref p) if p == "/orphan"));
    assert!(page.events().events().is_empty());
}

// ============================================================================
// Transition resolution
// ============================================================================

#[rstest]
#[case(Some("/device"), "/device/storage", Some((Section, Subpage)))]
#[case(Some("/device/storage"), "/device/storage/clearData", Some((Subpage, Dialog)))]
#[case(Some("/device/storage"), "/help", Some((Subpage, TopLevel)))]
#[case(Some("/help"), "/device/storage", Some((TopLevel, Subpage)))]
#[case(Some("/"), "/internet", Some((TopLevel, Section)))]
#[case(None, "/internet/networks", Some((Initial, Subpage)))]
#[case(Some("/help"), "/help/about", None)]
#[tokio::test]
async fn test_transition_for(
    #[case] old: Option<&str>,
    #[case] new: &str,
    #[case] expected: Option<(sectionnav_router::RouteCategory, sectionnav_router::RouteCategory)>,
) {
    let h = start("/").await;
    let old = old.map(|path| h.route(path));
    let new = h.route(new);

    assert_eq!(h.controller.transition_for(&new, old.as_deref()), expected);
}
