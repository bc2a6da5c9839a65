use serde::{Deserialize, Serialize};

use crate::core::{IntersectionOptions, ScrollBehavior, ScrollBlock};
use crate::interaction::{ControlVisibility, NavbarElevation, PanelState};

/// How construction reacts to bindings that resolve to no element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BindingPolicy {
    /// Disable the affected feature and keep going.
    #[default]
    Lenient,
    /// Fail construction with `LandingError::MissingBinding`.
    Strict,
}

/// In-page anchor interception.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollBehavior {
    pub enabled: bool,
    pub anchor_selector: String,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl Default for SmoothScrollBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            anchor_selector: "a[href^=\"#\"]".to_owned(),
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }
    }
}

/// Visual sequence used when the author panel changes state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PanelTransition {
    /// Animate `max-height` between `0px` and the content's scroll height.
    MaxHeight,
    /// Toggle `display` and `opacity` in two steps separated by `delay_ms`.
    Fade { delay_ms: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorPanelBehavior {
    pub enabled: bool,
    pub toggle_selector: String,
    pub content_selector: String,
    pub initial_state: PanelState,
    /// Class carried by the toggle while the panel is expanded.
    pub open_class: String,
    pub transition: PanelTransition,
}

impl Default for AuthorPanelBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            toggle_selector: "#authorToggle".to_owned(),
            content_selector: "#authorContent".to_owned(),
            initial_state: PanelState::Expanded,
            open_class: "open".to_owned(),
            transition: PanelTransition::MaxHeight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RevealEffect {
    /// Sets the inline `animation` and forces `opacity: 1`.
    InlineAnimation { animation: String },
    AddClass { class: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealBehavior {
    pub enabled: bool,
    pub selector: String,
    pub options: IntersectionOptions,
    pub effect: RevealEffect,
    /// Injects the `fadeInUp` keyframes once at startup.
    pub inject_keyframes: bool,
}

impl Default for RevealBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: ".animate-on-scroll".to_owned(),
            options: IntersectionOptions::new(0.1, "0px 0px -80px 0px"),
            effect: RevealEffect::InlineAnimation {
                animation: "fadeInUp 0.6s ease forwards".to_owned(),
            },
            inject_keyframes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarBehavior {
    pub enabled: bool,
    pub selector: String,
    /// Offsets strictly above this value elevate the navbar.
    pub threshold_px: f64,
    pub resting_shadow: String,
    pub elevated_shadow: String,
}

impl Default for NavbarBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: ".navbar".to_owned(),
            threshold_px: 50.0,
            resting_shadow: "0 2px 8px rgba(0, 80, 168, 0.12)".to_owned(),
            elevated_shadow: "0 4px 12px rgba(0, 80, 168, 0.18)".to_owned(),
        }
    }
}

impl NavbarBehavior {
    #[must_use]
    pub fn elevation_for(&self, scroll_y: f64) -> NavbarElevation {
        if scroll_y > self.threshold_px {
            NavbarElevation::Elevated
        } else {
            NavbarElevation::Resting
        }
    }

    #[must_use]
    pub fn shadow_for(&self, elevation: NavbarElevation) -> &str {
        match elevation {
            NavbarElevation::Resting => &self.resting_shadow,
            NavbarElevation::Elevated => &self.elevated_shadow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollTopBehavior {
    pub enabled: bool,
    pub element_id: String,
    pub label: String,
    /// Offsets strictly above this value show the control.
    pub threshold_px: f64,
    pub visible_display: String,
    pub behavior: ScrollBehavior,
    pub rest_background: String,
    pub hover_background: String,
    pub rest_transform: String,
    pub hover_transform: String,
}

impl Default for ScrollTopBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            element_id: "scrollToTop".to_owned(),
            label: "↑".to_owned(),
            threshold_px: 300.0,
            visible_display: "flex".to_owned(),
            behavior: ScrollBehavior::Smooth,
            rest_background: "#0050a8".to_owned(),
            hover_background: "#00356f".to_owned(),
            rest_transform: "scale(1)".to_owned(),
            hover_transform: "scale(1.1)".to_owned(),
        }
    }
}

impl ScrollTopBehavior {
    #[must_use]
    pub fn visibility_for(&self, scroll_y: f64) -> ControlVisibility {
        if scroll_y > self.threshold_px {
            ControlVisibility::Visible
        } else {
            ControlVisibility::Hidden
        }
    }
}

/// Where a counter reads its numeric target from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterTargetSource {
    /// Attribute value; a missing attribute counts as `"0"`.
    Attribute { name: String },
    /// Initial text content.
    Text,
    /// Attribute when present, otherwise initial text content.
    AttributeOrText { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterTiming {
    /// `steps` increments of `target / steps`, one every `tick_ms`.
    Stepped { tick_ms: f64, steps: u32 },
    /// Frame-driven interpolation over `duration_ms`.
    Eased { duration_ms: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CounterSuffix {
    /// Appends `text` to every frame, including the final one.
    Fixed { text: String },
    /// Keeps the element's own unit suffix while running. The final frame
    /// restores the original text when the target was read from it, and
    /// writes `target + suffix` otherwise.
    PreserveOriginal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterBehavior {
    pub enabled: bool,
    pub selector: String,
    pub target_source: CounterTargetSource,
    pub timing: CounterTiming,
    pub suffix: CounterSuffix,
    pub options: IntersectionOptions,
}

impl Default for CounterBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            selector: ".stat-number".to_owned(),
            target_source: CounterTargetSource::Attribute {
                name: "data-target".to_owned(),
            },
            timing: CounterTiming::Stepped {
                tick_ms: 30.0,
                steps: 40,
            },
            suffix: CounterSuffix::Fixed {
                text: "+".to_owned(),
            },
            options: IntersectionOptions::new(0.5, "0px"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoBehavior {
    pub enabled: bool,
    pub video_selector: String,
    pub control_selector: String,
    /// Control attribute holding the id of the controlled video.
    pub video_attribute: String,
    pub control_hidden_opacity: String,
    pub control_shown_opacity: String,
}

impl Default for VideoBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            video_selector: ".video-element".to_owned(),
            control_selector: ".play-button-overlay".to_owned(),
            video_attribute: "data-video".to_owned(),
            control_hidden_opacity: "0".to_owned(),
            control_shown_opacity: "0.9".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalBehavior {
    pub enabled: bool,
    pub trigger_selector: String,
    pub modal_selector: String,
    pub close_selector: String,
    /// Trigger attribute holding the id of the bound modal.
    pub trigger_attribute: String,
    pub open_class: String,
    /// Escape closes every open modal.
    pub escape_closes: bool,
    /// Locks body scrolling while any modal is open.
    pub lock_scroll: bool,
}

impl Default for ModalBehavior {
    fn default() -> Self {
        Self {
            enabled: true,
            trigger_selector: ".clickable-item".to_owned(),
            modal_selector: ".modal".to_owned(),
            close_selector: ".modal-close".to_owned(),
            trigger_attribute: "data-modal".to_owned(),
            open_class: "open".to_owned(),
            escape_closes: false,
            lock_scroll: false,
        }
    }
}
