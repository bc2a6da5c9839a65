use serde::{Deserialize, Serialize};

use crate::error::LandingResult;
use crate::interaction::PanelState;

use super::config_validation::validate_config;
use super::{
    AuthorPanelBehavior, BindingPolicy, CounterBehavior, CounterSuffix, CounterTiming,
    ModalBehavior, NavbarBehavior, PanelTransition, RevealBehavior, ScrollTopBehavior,
    SmoothScrollBehavior, VideoBehavior,
};

/// Public controller bootstrap configuration.
///
/// Every divergence between page variants (initial panel state, counter
/// stepping, Escape handling, keyframe injection) is a field here. The type is
/// serializable so hosts can ship it next to the page markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PageControllerConfig {
    pub binding_policy: BindingPolicy,
    pub smooth_scroll: SmoothScrollBehavior,
    pub author_panel: AuthorPanelBehavior,
    pub reveal: RevealBehavior,
    pub navbar: NavbarBehavior,
    pub scroll_top: ScrollTopBehavior,
    pub counters: CounterBehavior,
    pub videos: VideoBehavior,
    pub modals: ModalBehavior,
}

impl PageControllerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON config. Missing sections fall back to defaults.
    pub fn from_json_str(input: &str) -> LandingResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        validate_config(&config)?;
        Ok(config)
    }

    pub fn to_json_string_pretty(&self) -> LandingResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> LandingResult<()> {
        validate_config(self)
    }

    #[must_use]
    pub fn with_binding_policy(mut self, policy: BindingPolicy) -> Self {
        self.binding_policy = policy;
        self
    }

    #[must_use]
    pub fn with_smooth_scroll(mut self, behavior: SmoothScrollBehavior) -> Self {
        self.smooth_scroll = behavior;
        self
    }

    #[must_use]
    pub fn with_author_panel(mut self, behavior: AuthorPanelBehavior) -> Self {
        self.author_panel = behavior;
        self
    }

    /// Sets the state the author panel starts in.
    #[must_use]
    pub fn with_author_panel_initial_state(mut self, state: PanelState) -> Self {
        self.author_panel.initial_state = state;
        self
    }

    #[must_use]
    pub fn with_author_panel_transition(mut self, transition: PanelTransition) -> Self {
        self.author_panel.transition = transition;
        self
    }

    #[must_use]
    pub fn with_reveal(mut self, behavior: RevealBehavior) -> Self {
        self.reveal = behavior;
        self
    }

    /// Enables one-time injection of the reveal keyframes style block.
    #[must_use]
    pub fn with_injected_keyframes(mut self, inject: bool) -> Self {
        self.reveal.inject_keyframes = inject;
        self
    }

    #[must_use]
    pub fn with_navbar(mut self, behavior: NavbarBehavior) -> Self {
        self.navbar = behavior;
        self
    }

    #[must_use]
    pub fn with_scroll_top(mut self, behavior: ScrollTopBehavior) -> Self {
        self.scroll_top = behavior;
        self
    }

    #[must_use]
    pub fn with_counters(mut self, behavior: CounterBehavior) -> Self {
        self.counters = behavior;
        self
    }

    #[must_use]
    pub fn with_counter_timing(mut self, timing: CounterTiming) -> Self {
        self.counters.timing = timing;
        self
    }

    #[must_use]
    pub fn with_counter_suffix(mut self, suffix: CounterSuffix) -> Self {
        self.counters.suffix = suffix;
        self
    }

    #[must_use]
    pub fn with_videos(mut self, behavior: VideoBehavior) -> Self {
        self.videos = behavior;
        self
    }

    #[must_use]
    pub fn with_modals(mut self, behavior: ModalBehavior) -> Self {
        self.modals = behavior;
        self
    }

    /// Enables Escape-key dismissal of all open modals.
    #[must_use]
    pub fn with_modal_escape(mut self, enabled: bool) -> Self {
        self.modals.escape_closes = enabled;
        self
    }

    #[must_use]
    pub fn with_modal_scroll_lock(mut self, enabled: bool) -> Self {
        self.modals.lock_scroll = enabled;
        self
    }
}
