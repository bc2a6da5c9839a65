use tracing::{debug, trace};

use crate::core::{ElementRef, IntersectionEntry, ObserverKind};
use crate::dom::Dom;
use crate::error::LandingResult;
use crate::extensions::InteractionEvent;
use crate::interaction::RevealState;

use super::{PageController, RevealEffect};

/// Keyframes referenced by the default reveal animation.
pub const FADE_IN_UP_KEYFRAMES: &str = "@keyframes fadeInUp {
    from {
        opacity: 0;
        transform: translateY(30px);
    }
    to {
        opacity: 1;
        transform: translateY(0);
    }
}
";

impl<D: Dom> PageController<D> {
    pub(super) fn init_reveal(&mut self) -> LandingResult<()> {
        let behavior = &self.config.reveal;
        if !behavior.enabled {
            return Ok(());
        }
        if behavior.inject_keyframes {
            self.dom.inject_style_block(FADE_IN_UP_KEYFRAMES)?;
        }
        for &target in &self.bindings.reveal_targets {
            self.reveals.insert(target, RevealState::Unrevealed);
            self.dom.observe(ObserverKind::Reveal, target, &behavior.options);
        }
        Ok(())
    }

    /// Routes intersection notifications to the feature owning `kind`.
    pub fn on_intersection(&mut self, kind: ObserverKind, entries: &[IntersectionEntry]) {
        match kind {
            ObserverKind::Reveal => self.on_reveal_entries(entries),
            ObserverKind::Counter => self.on_counter_entries(entries),
        }
    }

    #[must_use]
    pub fn reveal_state(&self, element: ElementRef) -> Option<RevealState> {
        self.reveals.get(&element).copied()
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.reveals
            .values()
            .filter(|state| **state == RevealState::Revealed)
            .count()
    }

    fn on_reveal_entries(&mut self, entries: &[IntersectionEntry]) {
        for entry in entries.iter().filter(|entry| entry.is_intersecting) {
            let target = entry.target;
            match self.reveals.get(&target) {
                Some(RevealState::Unrevealed) => {}
                Some(RevealState::Revealed) => {
                    trace!(element = target.0, "ignoring repeat reveal");
                    continue;
                }
                None => continue,
            }

            match &self.config.reveal.effect {
                RevealEffect::InlineAnimation { animation } => {
                    self.dom.set_style(target, "animation", animation);
                    self.dom.set_style(target, "opacity", "1");
                }
                RevealEffect::AddClass { class } => self.dom.add_class(target, class),
            }
            self.reveals.insert(target, RevealState::Revealed);
            self.dom.unobserve(ObserverKind::Reveal, target);
            debug!(element = target.0, "element revealed");
            self.emit_plugin_event(InteractionEvent::ElementRevealed { element: target });
        }
    }
}
