use crate::dom::Dom;
use crate::extensions::InteractionEvent;
use crate::interaction::NavbarElevation;

use super::PageController;

impl<D: Dom> PageController<D> {
    /// Window scroll handler: re-derives navbar elevation and scroll-to-top
    /// visibility from the current `Dom::scroll_y`.
    pub fn on_scroll(&mut self) {
        let scroll_y = self.dom.scroll_y();
        self.apply_navbar_elevation(scroll_y);
        self.apply_scroll_top_visibility(scroll_y);
    }

    #[must_use]
    pub fn navbar_elevation(&self) -> Option<NavbarElevation> {
        self.navbar_elevation
    }

    fn apply_navbar_elevation(&mut self, scroll_y: f64) {
        if !self.config.navbar.enabled {
            return;
        }
        let Some(navbar) = self.bindings.navbar else {
            return;
        };

        let elevation = self.config.navbar.elevation_for(scroll_y);
        let shadow = self.config.navbar.shadow_for(elevation);
        self.dom.set_style(navbar, "box-shadow", shadow);

        let previous = self.navbar_elevation.replace(elevation);
        if previous.is_some_and(|previous| previous != elevation) {
            self.emit_plugin_event(InteractionEvent::NavbarElevationChanged { elevation });
        }
    }
}
