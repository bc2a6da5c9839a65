use indexmap::IndexMap;
use tracing::{debug, info};

use crate::core::{CounterTarget, CounterTween, ElementRef};
use crate::dom::Dom;
use crate::error::LandingResult;
use crate::extensions::InteractionPlugin;
use crate::interaction::{
    ControlVisibility, CounterPhase, ModalState, NavbarElevation, PanelState, RevealState,
};

use super::bindings::AuthorPanelBinding;
use super::config_validation::validate_config;
use super::scheduler::TimerQueue;
use super::{PageBindings, PageControllerConfig};

#[derive(Debug, Clone, Copy)]
pub(super) struct PanelRuntime {
    pub(super) binding: AuthorPanelBinding,
    pub(super) state: PanelState,
    /// Bumped on every toggle so stale fade steps can be discarded.
    pub(super) generation: u64,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct ScrollTopRuntime {
    pub(super) button: ElementRef,
    pub(super) visibility: ControlVisibility,
    pub(super) hovered: bool,
}

#[derive(Debug, Clone)]
pub(super) struct CounterRuntime {
    pub(super) target: CounterTarget,
    pub(super) tween: CounterTween,
    pub(super) phase: CounterPhase,
}

/// Landing-page interaction controller.
///
/// Constructed once per page load. Owns the injected `Dom`, the resolved
/// bindings and the transient per-feature UI state. Hosts forward DOM events
/// to the `on_*` handlers and call [`PageController::tick`] from a timer or
/// animation-frame loop while [`PageController::has_pending_work`] is true.
pub struct PageController<D: Dom> {
    pub(super) dom: D,
    pub(super) config: PageControllerConfig,
    pub(super) bindings: PageBindings,
    pub(super) panel: Option<PanelRuntime>,
    pub(super) reveals: IndexMap<ElementRef, RevealState>,
    pub(super) navbar_elevation: Option<NavbarElevation>,
    pub(super) scroll_top: Option<ScrollTopRuntime>,
    pub(super) counters: IndexMap<ElementRef, CounterRuntime>,
    pub(super) modal_states: IndexMap<ElementRef, ModalState>,
    /// Body `overflow` value captured when the scroll lock engaged.
    pub(super) saved_overflow: Option<String>,
    pub(super) timers: TimerQueue,
    pub(super) plugins: Vec<Box<dyn InteractionPlugin>>,
}

impl<D: Dom> PageController<D> {
    /// Validates `config`, resolves bindings against `dom` and applies initial state.
    pub fn new(dom: D, config: PageControllerConfig) -> LandingResult<Self> {
        validate_config(&config)?;
        let bindings = PageBindings::resolve(&dom, &config)?;

        let mut controller = Self {
            dom,
            config,
            bindings,
            panel: None,
            reveals: IndexMap::new(),
            navbar_elevation: None,
            scroll_top: None,
            counters: IndexMap::new(),
            modal_states: IndexMap::new(),
            saved_overflow: None,
            timers: TimerQueue::default(),
            plugins: Vec::new(),
        };

        controller.init_author_panel();
        controller.init_reveal()?;
        controller.init_scroll_top()?;
        controller.init_counters();
        controller.init_modals();
        controller.on_scroll();

        info!(
            anchors = controller.bindings.anchors.len(),
            counters = controller.counters.len(),
            videos = controller.bindings.videos.len(),
            modals = controller.bindings.modals.len(),
            "landing page controller initialized"
        );
        Ok(controller)
    }

    #[must_use]
    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Mutable access for hosts that simulate or forward page changes.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    #[must_use]
    pub fn into_dom(self) -> D {
        self.dom
    }

    #[must_use]
    pub fn config(&self) -> &PageControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn bindings(&self) -> &PageBindings {
        &self.bindings
    }

    /// Runs due deferred transitions and advances running counters to `Dom::now_ms`.
    pub fn tick(&mut self) {
        let now_ms = self.dom.now_ms();
        let due = self.timers.drain_due(now_ms);
        if !due.is_empty() {
            debug!(count = due.len(), now_ms, "running deferred transitions");
        }
        for action in due {
            self.run_deferred(action);
        }
        self.advance_counters(now_ms);
    }

    /// `true` while timers are queued or a counter is still animating.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        !self.timers.is_empty()
            || self
                .counters
                .values()
                .any(|counter| matches!(counter.phase, CounterPhase::Running { .. }))
    }

    /// Earliest deadline of a queued deferred transition.
    #[must_use]
    pub fn next_timer_deadline_ms(&self) -> Option<f64> {
        self.timers.next_due_ms()
    }

    #[must_use]
    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }
}
