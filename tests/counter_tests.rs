use approx::assert_relative_eq;
use landing_rs::api::{
    CounterSuffix, CounterTargetSource, CounterTiming, PageController, PageControllerConfig,
};
use landing_rs::core::{ElementRef, IntersectionEntry, ObserverKind};
use landing_rs::dom::{Dom, ElementSpec, MemoryDom};
use landing_rs::interaction::CounterPhase;

fn counter_page(target: &str, text: &str) -> (MemoryDom, ElementRef) {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let stats = dom.append(body, ElementSpec::new("section").class("stats"));
    let counter = dom.append(
        stats,
        ElementSpec::new("span")
            .class("stat-number")
            .attr("data-target", target)
            .text(text),
    );
    (dom, counter)
}

fn start(controller: &mut PageController<MemoryDom>, counter: ElementRef) {
    controller.on_intersection(ObserverKind::Counter, &[IntersectionEntry::entering(counter)]);
}

fn advance(controller: &mut PageController<MemoryDom>, delta_ms: f64) -> String {
    controller.dom_mut().advance_clock(delta_ms);
    controller.tick();
    controller.dom().text_content(controller.bindings().counters[0])
}

#[test]
fn counter_is_observed_with_half_visibility_threshold() {
    let (dom, counter) = counter_page("150", "0");
    let controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    let options = controller
        .dom()
        .observer_options(ObserverKind::Counter, counter)
        .expect("observed");
    assert_relative_eq!(options.threshold, 0.5);
    assert_eq!(options.root_margin, "0px");
    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Idle));
    assert_eq!(controller.counter_target(counter), Some(150));
}

#[test]
fn counter_steps_forty_ticks_then_writes_exact_target_with_suffix() {
    let (dom, counter) = counter_page("150", "0");
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    start(&mut controller, counter);
    assert!(!controller.dom().is_observed(ObserverKind::Counter, counter));
    assert!(controller.has_pending_work());

    assert_eq!(advance(&mut controller, 29.0), "0");
    assert_eq!(advance(&mut controller, 1.0), "3+");
    assert_eq!(advance(&mut controller, 38.0 * 30.0), "146+");
    assert_eq!(advance(&mut controller, 30.0), "150+");

    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Finished));
    assert!(!controller.has_pending_work());

    assert_eq!(advance(&mut controller, 1000.0), "150+");
    let writes = controller.dom().text_writes(counter);
    controller.tick();
    assert_eq!(controller.dom().text_writes(counter), writes);
}

#[test]
fn counter_runs_only_once() {
    let (dom, counter) = counter_page("80", "0");
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    start(&mut controller, counter);
    advance(&mut controller, 2000.0);
    start(&mut controller, counter);

    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Finished));
    assert_eq!(controller.dom().text_content(counter), "80+");
}

#[test]
fn leaving_entries_do_not_start_counters() {
    let (dom, counter) = counter_page("80", "0");
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    controller.on_intersection(ObserverKind::Counter, &[IntersectionEntry::leaving(counter)]);
    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Idle));
    assert!(controller.dom().is_observed(ObserverKind::Counter, counter));
}

#[test]
fn missing_target_attribute_counts_as_zero() {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let counter = dom.append(body, ElementSpec::new("span").class("stat-number"));
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    start(&mut controller, counter);
    assert_eq!(advance(&mut controller, 30.0), "0+");
    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Finished));
}

#[test]
fn non_numeric_target_is_skipped() {
    let (dom, counter) = counter_page("lots", "lots");
    let mut controller =
        PageController::new(dom, PageControllerConfig::default()).expect("controller init");

    assert_eq!(controller.counter_phase(counter), None);
    assert!(!controller.dom().is_observed(ObserverKind::Counter, counter));
    start(&mut controller, counter);
    assert_eq!(advance(&mut controller, 5000.0), "lots");
}

#[test]
fn original_suffix_is_preserved_when_configured() {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    let counter = dom.append(
        body,
        ElementSpec::new("span").class("stat-number").text("98%"),
    );
    let mut config = PageControllerConfig::default()
        .with_counter_suffix(CounterSuffix::PreserveOriginal)
        .with_counter_timing(CounterTiming::Eased { duration_ms: 1000.0 });
    config.counters.target_source = CounterTargetSource::Text;
    let mut controller = PageController::new(dom, config).expect("controller init");

    start(&mut controller, counter);
    assert_eq!(advance(&mut controller, 500.0), "49%");
    assert_eq!(advance(&mut controller, 500.0), "98%");
    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Finished));
}

#[test]
fn preserved_suffix_comes_from_placeholder_when_target_is_an_attribute() {
    let (dom, counter) = counter_page("150", "0+");
    let config = PageControllerConfig::default()
        .with_counter_suffix(CounterSuffix::PreserveOriginal)
        .with_counter_timing(CounterTiming::Eased { duration_ms: 1000.0 });
    let mut controller = PageController::new(dom, config).expect("controller init");

    start(&mut controller, counter);
    assert_eq!(advance(&mut controller, 500.0), "75+");
    assert_eq!(advance(&mut controller, 500.0), "150+");
    assert_eq!(controller.counter_phase(counter), Some(CounterPhase::Finished));
}

#[test]
fn preserved_suffix_falls_back_to_attribute_suffix() {
    let (dom, counter) = counter_page("40%", "0");
    let mut config = PageControllerConfig::default()
        .with_counter_suffix(CounterSuffix::PreserveOriginal)
        .with_counter_timing(CounterTiming::Eased { duration_ms: 1000.0 });
    config.counters.target_source = CounterTargetSource::AttributeOrText {
        name: "data-target".to_owned(),
    };
    let mut controller = PageController::new(dom, config).expect("controller init");

    start(&mut controller, counter);
    assert_eq!(advance(&mut controller, 500.0), "20%");
    assert_eq!(advance(&mut controller, 500.0), "40%");
}
