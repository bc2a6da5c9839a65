use tracing::{debug, trace};

use crate::core::ElementRef;
use crate::dom::Dom;
use crate::extensions::InteractionEvent;
use crate::interaction::ModalState;

use super::PageController;

const ESCAPE_KEY: &str = "Escape";

impl<D: Dom> PageController<D> {
    pub(super) fn init_modals(&mut self) {
        if !self.config.modals.enabled {
            return;
        }
        let open_class = &self.config.modals.open_class;
        for binding in &self.bindings.modals {
            let state = if self.dom.has_class(binding.modal, open_class) {
                ModalState::Open
            } else {
                ModalState::Closed
            };
            self.modal_states.insert(binding.modal, state);
        }
        if self.open_modal_count() > 0 {
            self.engage_scroll_lock();
        }
    }

    #[must_use]
    pub fn modal_state(&self, modal: ElementRef) -> Option<ModalState> {
        self.modal_states.get(&modal).copied()
    }

    /// Open modals in binding order.
    #[must_use]
    pub fn open_modals(&self) -> Vec<ElementRef> {
        self.modal_states
            .iter()
            .filter(|(_, state)| **state == ModalState::Open)
            .map(|(modal, _)| *modal)
            .collect()
    }

    /// Opens the modal bound to `trigger`. Returns it, or `None` when the
    /// trigger is unbound.
    pub fn on_modal_trigger_click(&mut self, trigger: ElementRef) -> Option<ElementRef> {
        if !self.config.modals.enabled {
            return None;
        }
        let Some(modal) = self.bindings.modal_for_trigger(trigger) else {
            trace!(trigger = trigger.0, "click on unbound modal trigger");
            return None;
        };
        self.open_modal(modal);
        Some(modal)
    }

    /// Close-control click. Returns `true` when the modal was open.
    pub fn on_modal_close_click(&mut self, modal: ElementRef) -> bool {
        self.close_modal(modal)
    }

    /// Click anywhere inside a modal; only a click on the backdrop itself closes it.
    pub fn on_modal_click(&mut self, modal: ElementRef, target: ElementRef) -> bool {
        if target != modal {
            return false;
        }
        self.close_modal(modal)
    }

    /// Key press on the document. Returns the number of modals closed.
    pub fn on_key_down(&mut self, key: &str) -> usize {
        if !self.config.modals.escape_closes || key != ESCAPE_KEY {
            return 0;
        }
        let open = self.open_modals();
        open.into_iter()
            .filter(|modal| self.close_modal(*modal))
            .count()
    }

    /// Marks `modal` open. Returns `false` when it is unbound or already open.
    pub fn open_modal(&mut self, modal: ElementRef) -> bool {
        let Some(state) = self.modal_states.get_mut(&modal) else {
            return false;
        };
        if *state == ModalState::Open {
            return false;
        }
        *state = ModalState::Open;
        self.dom.add_class(modal, &self.config.modals.open_class);
        self.engage_scroll_lock();
        debug!(modal = modal.0, "modal opened");
        self.emit_plugin_event(InteractionEvent::ModalOpened { modal });
        true
    }

    /// Marks `modal` closed. Returns `false` when it is unbound or already closed.
    pub fn close_modal(&mut self, modal: ElementRef) -> bool {
        let Some(state) = self.modal_states.get_mut(&modal) else {
            return false;
        };
        if *state == ModalState::Closed {
            return false;
        }
        *state = ModalState::Closed;
        self.dom.remove_class(modal, &self.config.modals.open_class);
        if self.open_modal_count() == 0 {
            self.release_scroll_lock();
        }
        debug!(modal = modal.0, "modal closed");
        self.emit_plugin_event(InteractionEvent::ModalClosed { modal });
        true
    }

    pub(super) fn open_modal_count(&self) -> usize {
        self.modal_states
            .values()
            .filter(|state| **state == ModalState::Open)
            .count()
    }

    fn engage_scroll_lock(&mut self) {
        if !self.config.modals.lock_scroll || self.saved_overflow.is_some() {
            return;
        }
        let Some(body) = self.dom.body() else {
            return;
        };
        self.saved_overflow = Some(self.dom.style(body, "overflow").unwrap_or_default());
        self.dom.set_style(body, "overflow", "hidden");
    }

    fn release_scroll_lock(&mut self) {
        let Some(previous) = self.saved_overflow.take() else {
            return;
        };
        if let Some(body) = self.dom.body() {
            self.dom.set_style(body, "overflow", &previous);
        }
    }
}
