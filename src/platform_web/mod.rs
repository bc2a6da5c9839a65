//! Browser adapter: a `web-sys` backed [`Dom`](crate::dom::Dom) plus the
//! listener wiring that drives a [`PageController`](crate::api::PageController)
//! from real page events.

mod mount;
mod web_dom;

pub use mount::{MountedPage, mount_page};
pub use web_dom::WebDom;
