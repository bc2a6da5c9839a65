use tracing::trace;

use crate::core::{ElementRef, EventDisposition};
use crate::dom::Dom;
use crate::extensions::InteractionEvent;

use super::PageController;

impl<D: Dom> PageController<D> {
    /// Handles activation of an in-page anchor.
    ///
    /// Returns `PreventDefault` only when the anchor's fragment resolves to an
    /// element and a smooth scroll was requested. Empty hrefs, a bare `#` and
    /// unknown fragments fall through to the browser's default navigation.
    pub fn on_anchor_click(&mut self, anchor: ElementRef) -> EventDisposition {
        if !self.config.smooth_scroll.enabled {
            return EventDisposition::Default;
        }
        let Some(href) = self.dom.attribute(anchor, "href") else {
            return EventDisposition::Default;
        };
        let Some(target) = self.resolve_fragment(&href) else {
            trace!(href, "anchor target not found; keeping default navigation");
            return EventDisposition::Default;
        };

        let behavior = self.config.smooth_scroll.behavior;
        let block = self.config.smooth_scroll.block;
        self.dom.scroll_into_view(target, behavior, block);
        self.emit_plugin_event(InteractionEvent::AnchorScrolled { target });
        EventDisposition::PreventDefault
    }

    /// Resolves `#fragment` to the element with that id. Anything else
    /// resolves to `None`.
    ///
    /// The fragment is matched as a raw id, so ids outside the selector
    /// grammar (non-ASCII, leading digits) still resolve.
    #[must_use]
    pub fn resolve_fragment(&self, href: &str) -> Option<ElementRef> {
        let fragment = href.trim().strip_prefix('#')?;
        if fragment.is_empty() {
            return None;
        }
        self.dom.element_by_id(fragment)
    }
}
