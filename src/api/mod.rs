mod author_panel_controller;
mod behavior;
mod bindings;
mod config_validation;
mod controller;
mod controller_config;
mod counter_controller;
mod modal_controller;
mod navbar_controller;
mod plugin_dispatch;
mod plugin_registry;
mod reveal_controller;
mod scheduler;
mod scroll_top_controller;
mod smooth_scroll_controller;
mod snapshot;
mod video_controller;

pub use behavior::{
    AuthorPanelBehavior, BindingPolicy, CounterBehavior, CounterSuffix, CounterTargetSource,
    CounterTiming, ModalBehavior, NavbarBehavior, PanelTransition, RevealBehavior, RevealEffect,
    ScrollTopBehavior, SmoothScrollBehavior, VideoBehavior,
};
pub use bindings::{AuthorPanelBinding, ModalBinding, PageBindings, VideoBinding};
pub use controller::PageController;
pub use controller_config::PageControllerConfig;
pub use reveal_controller::FADE_IN_UP_KEYFRAMES;
pub use snapshot::{
    CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1, ControllerSnapshot, ControllerSnapshotJsonContractV1,
    CounterSnapshot, ModalSnapshot,
};
