use landing_rs::api::{PageController, PageControllerConfig, PanelTransition};
use landing_rs::dom::{Dom, ElementSpec, MemoryDom};
use landing_rs::interaction::PanelState;

struct Page {
    dom: MemoryDom,
    toggle: landing_rs::core::ElementRef,
    content: landing_rs::core::ElementRef,
}

fn page() -> Page {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let card = dom.append(body, ElementSpec::new("div").class("author-card"));
    let toggle = dom.append(card, ElementSpec::new("button").id("authorToggle"));
    let content = dom.append(
        card,
        ElementSpec::new("div").id("authorContent").scroll_height(240.0),
    );
    Page {
        dom,
        toggle,
        content,
    }
}

#[test]
fn panel_starts_expanded_with_open_class_and_measured_height() {
    let page = page();
    let controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(controller.author_panel_state(), Some(PanelState::Expanded));
    assert!(controller.dom().has_class(page.toggle, "open"));
    assert_eq!(
        controller.dom().style(page.content, "max-height").as_deref(),
        Some("240px")
    );
}

#[test]
fn toggle_alternates_between_collapsed_and_expanded() {
    let page = page();
    let mut controller =
        PageController::new(page.dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(controller.on_author_toggle_click(), Some(PanelState::Collapsed));
    assert!(!controller.dom().has_class(page.toggle, "open"));
    assert_eq!(
        controller.dom().style(page.content, "max-height").as_deref(),
        Some("0px")
    );

    controller.dom_mut().set_scroll_height(page.content, 310.0);
    assert_eq!(controller.on_author_toggle_click(), Some(PanelState::Expanded));
    assert!(controller.dom().has_class(page.toggle, "open"));
    assert_eq!(
        controller.dom().style(page.content, "max-height").as_deref(),
        Some("310px")
    );
}

#[test]
fn collapsed_initial_state_is_configurable() {
    let page = page();
    let config =
        PageControllerConfig::default().with_author_panel_initial_state(PanelState::Collapsed);
    let controller = PageController::new(page.dom, config).expect("controller init");

    assert_eq!(controller.author_panel_state(), Some(PanelState::Collapsed));
    assert!(!controller.dom().has_class(page.toggle, "open"));
    assert_eq!(
        controller.dom().style(page.content, "max-height").as_deref(),
        Some("0px")
    );
}

#[test]
fn fade_transition_defers_second_step() {
    let page = page();
    let config = PageControllerConfig::default()
        .with_author_panel_transition(PanelTransition::Fade { delay_ms: 10.0 });
    let mut controller = PageController::new(page.dom, config).expect("controller init");

    controller.on_author_toggle_click();
    assert_eq!(
        controller.dom().style(page.content, "opacity").as_deref(),
        Some("0")
    );
    assert_eq!(
        controller.dom().style(page.content, "display").as_deref(),
        Some("block")
    );
    assert_eq!(controller.pending_timer_count(), 1);

    controller.dom_mut().advance_clock(9.0);
    controller.tick();
    assert_eq!(
        controller.dom().style(page.content, "display").as_deref(),
        Some("block")
    );

    controller.dom_mut().advance_clock(1.0);
    controller.tick();
    assert_eq!(
        controller.dom().style(page.content, "display").as_deref(),
        Some("none")
    );
    assert!(!controller.has_pending_work());
}

#[test]
fn rapid_fade_toggles_never_apply_stale_steps() {
    let page = page();
    let config = PageControllerConfig::default()
        .with_author_panel_transition(PanelTransition::Fade { delay_ms: 10.0 });
    let mut controller = PageController::new(page.dom, config).expect("controller init");

    controller.on_author_toggle_click();
    controller.dom_mut().advance_clock(5.0);
    controller.on_author_toggle_click();
    assert_eq!(controller.pending_timer_count(), 1);

    controller.dom_mut().advance_clock(20.0);
    controller.tick();

    assert_eq!(controller.author_panel_state(), Some(PanelState::Expanded));
    assert_eq!(
        controller.dom().style(page.content, "display").as_deref(),
        Some("block")
    );
    assert_eq!(
        controller.dom().style(page.content, "opacity").as_deref(),
        Some("1")
    );
}

#[test]
fn missing_panel_is_a_no_op() {
    let mut controller = PageController::new(MemoryDom::new(), PageControllerConfig::default())
        .expect("controller init");

    assert_eq!(controller.author_panel_state(), None);
    assert_eq!(controller.on_author_toggle_click(), None);
}
