//! Tagged per-feature UI states.
//!
//! Every visual toggle the controller performs is driven by one of these
//! enums, so transitions can be asserted without a rendering environment.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PanelState {
    Collapsed,
    #[default]
    Expanded,
}

impl PanelState {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Collapsed => Self::Expanded,
            Self::Expanded => Self::Collapsed,
        }
    }

    #[must_use]
    pub fn is_expanded(self) -> bool {
        self == Self::Expanded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Paused,
    Playing,
}

impl PlaybackState {
    #[must_use]
    pub fn from_paused(paused: bool) -> Self {
        if paused { Self::Paused } else { Self::Playing }
    }
}

/// One-way reveal progression of an animatable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RevealState {
    #[default]
    Unrevealed,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NavbarElevation {
    #[default]
    Resting,
    Elevated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlVisibility {
    #[default]
    Hidden,
    Visible,
}

/// Lifecycle of one counter element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CounterPhase {
    /// Waiting for the first viewport intersection.
    Idle,
    /// Animating since `started_at_ms`.
    Running { started_at_ms: f64 },
    /// Exact target written; no further mutation.
    Finished,
}

impl CounterPhase {
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Finished)
    }
}
