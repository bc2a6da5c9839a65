use landing_rs::api::{PageController, PageControllerConfig};
use landing_rs::core::{ElementRef, ScrollBehavior};
use landing_rs::dom::{Dom, ElementSpec, MemoryDom, ScrollRequest};
use landing_rs::interaction::{ControlVisibility, NavbarElevation};

const RESTING_SHADOW: &str = "0 2px 8px rgba(0, 80, 168, 0.12)";
const ELEVATED_SHADOW: &str = "0 4px 12px rgba(0, 80, 168, 0.18)";

fn page() -> (MemoryDom, ElementRef) {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let navbar = dom.append(body, ElementSpec::new("nav").class("navbar"));
    (dom, navbar)
}

fn scroll_to(controller: &mut PageController<MemoryDom>, offset: f64) {
    controller.dom_mut().set_scroll_y(offset);
    controller.on_scroll();
}

#[test]
fn navbar_shadow_follows_strict_threshold() {
    let (dom, navbar) = page();
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(controller.navbar_elevation(), Some(NavbarElevation::Resting));
    assert_eq!(
        controller.dom().style(navbar, "box-shadow").as_deref(),
        Some(RESTING_SHADOW)
    );

    scroll_to(&mut controller, 50.0);
    assert_eq!(controller.navbar_elevation(), Some(NavbarElevation::Resting));

    scroll_to(&mut controller, 51.0);
    assert_eq!(controller.navbar_elevation(), Some(NavbarElevation::Elevated));
    assert_eq!(
        controller.dom().style(navbar, "box-shadow").as_deref(),
        Some(ELEVATED_SHADOW)
    );

    scroll_to(&mut controller, 0.0);
    assert_eq!(
        controller.dom().style(navbar, "box-shadow").as_deref(),
        Some(RESTING_SHADOW)
    );
}

#[test]
fn scroll_top_button_is_created_hidden_at_end_of_body() {
    let (dom, _) = page();
    let controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    let button = controller.scroll_top_button().expect("button created");
    let dom = controller.dom();
    assert_eq!(dom.tag(button), Some("button"));
    assert_eq!(dom.element_id(button).as_deref(), Some("scrollToTop"));
    assert_eq!(dom.text_content(button), "↑");
    assert_eq!(dom.parent(button), Some(dom.root()));
    assert_eq!(dom.style(button, "display").as_deref(), Some("none"));
    assert_eq!(controller.scroll_top_visibility(), Some(ControlVisibility::Hidden));
}

#[test]
fn scroll_top_button_appears_past_threshold() {
    let (dom, _) = page();
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");
    let button = controller.scroll_top_button().expect("button created");

    scroll_to(&mut controller, 300.0);
    assert_eq!(controller.scroll_top_visibility(), Some(ControlVisibility::Hidden));

    scroll_to(&mut controller, 301.0);
    assert_eq!(controller.scroll_top_visibility(), Some(ControlVisibility::Visible));
    assert_eq!(
        controller.dom().style(button, "display").as_deref(),
        Some("flex")
    );

    scroll_to(&mut controller, 10.0);
    assert_eq!(
        controller.dom().style(button, "display").as_deref(),
        Some("none")
    );
}

#[test]
fn clicking_scroll_top_scrolls_window_smoothly() {
    let (dom, _) = page();
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");
    scroll_to(&mut controller, 900.0);

    controller.on_scroll_top_click();

    assert_eq!(
        controller.dom().scroll_requests(),
        &[ScrollRequest::ToTop {
            behavior: ScrollBehavior::Smooth
        }]
    );
    assert_eq!(controller.dom().scroll_y(), 0.0);
}

#[test]
fn hover_swaps_background_and_scale() {
    let (dom, _) = page();
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");
    let button = controller.scroll_top_button().expect("button created");

    controller.on_scroll_top_hover(true);
    assert_eq!(
        controller.dom().style(button, "background-color").as_deref(),
        Some("#00356f")
    );
    assert_eq!(
        controller.dom().style(button, "transform").as_deref(),
        Some("scale(1.1)")
    );

    controller.on_scroll_top_hover(false);
    assert_eq!(
        controller.dom().style(button, "background-color").as_deref(),
        Some("#0050a8")
    );
    assert_eq!(
        controller.dom().style(button, "transform").as_deref(),
        Some("scale(1)")
    );
}

#[test]
fn existing_scroll_top_element_is_adopted() {
    let (mut dom, _) = page();
    let body = dom.root();
    let existing = dom.append(body, ElementSpec::new("a").id("scrollToTop"));
    let controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(controller.scroll_top_button(), Some(existing));
}
