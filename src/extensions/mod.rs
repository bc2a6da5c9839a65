//! Extension points that observe the controller without touching the page.

pub mod plugins;

pub use plugins::{InteractionEvent, InteractionPlugin, PluginContext};
