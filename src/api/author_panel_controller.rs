use tracing::debug;

use crate::dom::Dom;
use crate::extensions::InteractionEvent;
use crate::interaction::PanelState;

use super::bindings::AuthorPanelBinding;
use super::controller::PanelRuntime;
use super::scheduler::DeferredAction;
use super::{PageController, PanelTransition};

impl<D: Dom> PageController<D> {
    pub(super) fn init_author_panel(&mut self) {
        let Some(binding) = self.bindings.author_panel else {
            return;
        };
        let state = self.config.author_panel.initial_state;
        self.panel = Some(PanelRuntime {
            binding,
            state,
            generation: 0,
        });
        self.apply_panel_class(binding, state);
        match self.config.author_panel.transition {
            PanelTransition::MaxHeight => self.apply_panel_max_height(binding, state),
            PanelTransition::Fade { .. } => {
                let (display, opacity) = match state {
                    PanelState::Expanded => ("block", "1"),
                    PanelState::Collapsed => ("none", "0"),
                };
                self.dom.set_style(binding.content, "display", display);
                self.dom.set_style(binding.content, "opacity", opacity);
            }
        }
    }

    #[must_use]
    pub fn author_panel_state(&self) -> Option<PanelState> {
        self.panel.map(|panel| panel.state)
    }

    /// Flips the author panel. Returns the new state, or `None` when unbound.
    pub fn on_author_toggle_click(&mut self) -> Option<PanelState> {
        let panel = self.panel.as_mut()?;
        panel.state = panel.state.toggled();
        panel.generation += 1;
        let PanelRuntime {
            binding,
            state,
            generation,
        } = *panel;

        // A newer toggle supersedes any fade step still queued.
        self.timers
            .retain(|action| !matches!(action, DeferredAction::PanelStyle { .. }));

        self.apply_panel_class(binding, state);
        match self.config.author_panel.transition {
            PanelTransition::MaxHeight => self.apply_panel_max_height(binding, state),
            PanelTransition::Fade { delay_ms } => {
                let due_at_ms = self.dom.now_ms() + delay_ms;
                let (property, value) = match state {
                    PanelState::Expanded => {
                        self.dom.set_style(binding.content, "display", "block");
                        ("opacity", "1")
                    }
                    PanelState::Collapsed => {
                        self.dom.set_style(binding.content, "opacity", "0");
                        ("display", "none")
                    }
                };
                self.timers.schedule(
                    due_at_ms,
                    DeferredAction::PanelStyle {
                        element: binding.content,
                        property,
                        value,
                        generation,
                    },
                );
            }
        }

        debug!(?state, generation, "author panel toggled");
        self.emit_plugin_event(InteractionEvent::PanelToggled { state });
        Some(state)
    }

    pub(super) fn run_deferred(&mut self, action: DeferredAction) {
        match action {
            DeferredAction::PanelStyle {
                element,
                property,
                value,
                generation,
            } => {
                let current = self.panel.map(|panel| panel.generation);
                if current != Some(generation) {
                    debug!(generation, ?current, "dropping stale panel step");
                    return;
                }
                self.dom.set_style(element, property, value);
            }
        }
    }

    fn apply_panel_class(&mut self, binding: AuthorPanelBinding, state: PanelState) {
        let class = &self.config.author_panel.open_class;
        match state {
            PanelState::Expanded => self.dom.add_class(binding.toggle, class),
            PanelState::Collapsed => self.dom.remove_class(binding.toggle, class),
        }
    }

    fn apply_panel_max_height(&mut self, binding: AuthorPanelBinding, state: PanelState) {
        let max_height = match state {
            PanelState::Expanded => format!("{}px", self.dom.scroll_height(binding.content)),
            PanelState::Collapsed => "0px".to_owned(),
        };
        self.dom.set_style(binding.content, "max-height", &max_height);
    }
}
