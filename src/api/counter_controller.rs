use tracing::{debug, warn};

use crate::core::{
    CounterTarget, CounterTween, ElementRef, IntersectionEntry, ObserverKind, parse_integer_prefix,
};
use crate::dom::Dom;
use crate::error::LandingResult;
use crate::extensions::InteractionEvent;
use crate::interaction::CounterPhase;

use super::controller::CounterRuntime;
use super::{CounterBehavior, CounterSuffix, CounterTargetSource, CounterTiming, PageController};

impl<D: Dom> PageController<D> {
    pub(super) fn init_counters(&mut self) {
        if !self.config.counters.enabled {
            return;
        }
        for &element in &self.bindings.counters {
            let Some(target) = read_counter_target(&self.dom, element, &self.config.counters)
            else {
                debug!(element = element.0, "counter target is not numeric; skipping");
                continue;
            };
            let tween = match build_tween(target.value, self.config.counters.timing) {
                Ok(tween) => tween,
                Err(err) => {
                    warn!(element = element.0, error = %err, "counter timing rejected");
                    continue;
                }
            };
            self.counters.insert(
                element,
                CounterRuntime {
                    target,
                    tween,
                    phase: CounterPhase::Idle,
                },
            );
            self.dom
                .observe(ObserverKind::Counter, element, &self.config.counters.options);
        }
    }

    #[must_use]
    pub fn counter_phase(&self, element: ElementRef) -> Option<CounterPhase> {
        self.counters.get(&element).map(|counter| counter.phase)
    }

    #[must_use]
    pub fn counter_target(&self, element: ElementRef) -> Option<i64> {
        self.counters.get(&element).map(|counter| counter.target.value)
    }

    pub(super) fn on_counter_entries(&mut self, entries: &[IntersectionEntry]) {
        let now_ms = self.dom.now_ms();
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let Some(counter) = self.counters.get_mut(&entry.target) else {
                continue;
            };
            if counter.phase != CounterPhase::Idle {
                continue;
            }
            counter.phase = CounterPhase::Running {
                started_at_ms: now_ms,
            };
            let target = counter.target.value;
            self.dom.unobserve(ObserverKind::Counter, entry.target);
            debug!(element = entry.target.0, target, "counter started");
            self.emit_plugin_event(InteractionEvent::CounterStarted {
                element: entry.target,
                target,
            });
        }
    }

    pub(super) fn advance_counters(&mut self, now_ms: f64) {
        let mut finished = Vec::new();
        for (&element, counter) in &mut self.counters {
            let CounterPhase::Running { started_at_ms } = counter.phase else {
                continue;
            };
            let Some(frame) = counter.tween.frame_at(now_ms - started_at_ms) else {
                continue;
            };

            let text = if frame.finished {
                match &self.config.counters.suffix {
                    CounterSuffix::Fixed { text } => format!("{}{text}", counter.target.value),
                    CounterSuffix::PreserveOriginal => counter.target.original_text.clone(),
                }
            } else {
                let suffix = match &self.config.counters.suffix {
                    CounterSuffix::Fixed { text } => text.as_str(),
                    CounterSuffix::PreserveOriginal => counter.target.suffix.as_str(),
                };
                format!("{}{suffix}", frame.displayed())
            };

            if self.dom.text_content(element) != text {
                self.dom.set_text_content(element, &text);
            }
            if frame.finished {
                counter.phase = CounterPhase::Finished;
                finished.push((element, counter.target.value));
            }
        }

        for (element, target) in finished {
            debug!(element = element.0, target, "counter finished");
            self.emit_plugin_event(InteractionEvent::CounterFinished { element, target });
        }
    }
}

fn read_counter_target<D: Dom>(
    dom: &D,
    element: ElementRef,
    behavior: &CounterBehavior,
) -> Option<CounterTarget> {
    let displayed = dom.text_content(element);
    let attribute = match &behavior.target_source {
        CounterTargetSource::Attribute { name } => {
            Some(dom.attribute(element, name).unwrap_or_else(|| "0".to_owned()))
        }
        CounterTargetSource::Text => None,
        CounterTargetSource::AttributeOrText { name } => dom.attribute(element, name),
    };
    let Some(source) = attribute else {
        return CounterTarget::parse(&displayed, &displayed);
    };

    // The placeholder text carries the unit when the value comes from an attribute.
    let (value, source_suffix) = parse_integer_prefix(&source)?;
    let suffix = parse_integer_prefix(&displayed)
        .map(|(_, suffix)| suffix)
        .filter(|suffix| !suffix.is_empty())
        .unwrap_or(source_suffix);
    Some(CounterTarget {
        value,
        suffix: suffix.to_owned(),
        original_text: format!("{value}{suffix}"),
    })
}

fn build_tween(target: i64, timing: CounterTiming) -> LandingResult<CounterTween> {
    let target = target as f64;
    match timing {
        CounterTiming::Stepped { tick_ms, steps } => CounterTween::stepped(0.0, target, tick_ms, steps),
        CounterTiming::Eased { duration_ms } => CounterTween::new(0.0, target, duration_ms, None),
    }
}
