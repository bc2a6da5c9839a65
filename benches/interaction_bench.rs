use criterion::{Criterion, criterion_group, criterion_main};
use landing_rs::api::{PageController, PageControllerConfig};
use landing_rs::core::{CounterTween, IntersectionEntry, ObserverKind, Selector};
use landing_rs::dom::{Dom, ElementSpec, MemoryDom};
use std::hint::black_box;

fn large_page(sections: usize) -> MemoryDom {
    let mut dom = MemoryDom::new();
    let body = dom.root();
    for i in 0..sections {
        let section = dom.append(
            body,
            ElementSpec::new("section")
                .id(&format!("section-{i}"))
                .class("animate-on-scroll"),
        );
        dom.append(
            section,
            ElementSpec::new("span")
                .class("stat-number")
                .attr("data-target", &(i * 10).to_string()),
        );
        dom.append(
            section,
            ElementSpec::new("a").attr("href", &format!("#section-{i}")),
        );
    }
    dom
}

fn bench_counter_tween_frames(c: &mut Criterion) {
    let tween = CounterTween::stepped(0.0, 25_000.0, 30.0, 40).expect("valid tween");

    c.bench_function("counter_tween_1k_frames", |b| {
        b.iter(|| {
            for frame in 0..1_000 {
                let _ = black_box(tween.frame_at(f64::from(frame) * 1.25));
            }
        })
    });
}

fn bench_selector_query_1k_sections(c: &mut Criterion) {
    let dom = large_page(1_000);
    let selector = Selector::parse(r#"a[href^="#"], .stat-number"#).expect("valid selector");

    c.bench_function("selector_query_1k_sections", |b| {
        b.iter(|| {
            let _ = black_box(dom.query_all(&selector));
        })
    });
}

fn bench_counter_animation_200(c: &mut Criterion) {
    c.bench_function("counter_animation_200", |b| {
        b.iter(|| {
            let mut controller = PageController::new(large_page(200), PageControllerConfig::default())
                .expect("controller init");
            let entries: Vec<IntersectionEntry> = controller
                .bindings()
                .counters
                .iter()
                .copied()
                .map(IntersectionEntry::entering)
                .collect();
            controller.on_intersection(ObserverKind::Counter, &entries);
            while controller.has_pending_work() {
                controller.dom_mut().advance_clock(16.0);
                controller.tick();
            }
            black_box(controller.snapshot());
        })
    });
}

criterion_group!(
    benches,
    bench_counter_tween_frames,
    bench_selector_query_1k_sections,
    bench_counter_animation_200
);
criterion_main!(benches);
