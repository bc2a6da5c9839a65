//! landing-rs: interaction controller for a static marketing landing page.
//!
//! The crate keeps page behavior (smooth anchors, reveal-on-scroll, counters,
//! exclusive video playback, modals) behind a small `Dom` trait so it can be
//! driven headlessly in tests and by `web-sys` in the browser.

pub mod api;
pub mod core;
pub mod dom;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

#[cfg(feature = "web-adapter")]
pub mod platform_web;

pub use api::{PageController, PageControllerConfig};
pub use error::{LandingError, LandingResult};
