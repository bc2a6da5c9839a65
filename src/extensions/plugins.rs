use serde::{Deserialize, Serialize};

use crate::core::ElementRef;
use crate::interaction::{ControlVisibility, NavbarElevation, PanelState};

/// Read-only controller summary passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub panel_state: Option<PanelState>,
    pub navbar_elevation: Option<NavbarElevation>,
    pub scroll_top_visibility: Option<ControlVisibility>,
    pub revealed_count: usize,
    pub running_counters: usize,
    pub playing_video: Option<ElementRef>,
    pub open_modals: usize,
    pub now_ms: f64,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InteractionEvent {
    AnchorScrolled { target: ElementRef },
    PanelToggled { state: PanelState },
    ElementRevealed { element: ElementRef },
    NavbarElevationChanged { elevation: NavbarElevation },
    ScrollTopVisibilityChanged { visibility: ControlVisibility },
    ScrolledToTop,
    CounterStarted { element: ElementRef, target: i64 },
    CounterFinished { element: ElementRef, target: i64 },
    VideoStarted { video: ElementRef },
    VideoStopped { video: ElementRef },
    ModalOpened { modal: ElementRef },
    ModalClosed { modal: ElementRef },
}

/// Observer hook for analytics or debugging overlays.
///
/// Plugins see events and a context snapshot; they cannot reach the `Dom`.
pub trait InteractionPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: InteractionEvent, context: PluginContext);
}
