use tracing::debug;

use crate::core::ElementRef;
use crate::dom::Dom;
use crate::error::{LandingError, LandingResult};
use crate::extensions::InteractionEvent;
use crate::interaction::ControlVisibility;

use super::controller::ScrollTopRuntime;
use super::{BindingPolicy, PageController};

impl<D: Dom> PageController<D> {
    /// Creates (or adopts) the scroll-to-top control and appends it to the body.
    pub(super) fn init_scroll_top(&mut self) -> LandingResult<()> {
        let behavior = &self.config.scroll_top;
        if !behavior.enabled {
            return Ok(());
        }

        let button = match self.dom.element_by_id(&behavior.element_id) {
            Some(existing) => existing,
            None => {
                let Some(body) = self.dom.body() else {
                    if self.config.binding_policy == BindingPolicy::Strict {
                        return Err(LandingError::MissingBinding(
                            "scroll-to-top: document has no body".to_owned(),
                        ));
                    }
                    debug!("document has no body; scroll-to-top disabled");
                    return Ok(());
                };
                let button = self.dom.create_element("button")?;
                self.dom.set_attribute(button, "id", &behavior.element_id);
                self.dom.set_text_content(button, &behavior.label);
                self.dom.append_child(body, button)?;
                button
            }
        };

        self.dom.set_style(button, "display", "none");
        self.scroll_top = Some(ScrollTopRuntime {
            button,
            visibility: ControlVisibility::Hidden,
            hovered: false,
        });
        Ok(())
    }

    #[must_use]
    pub fn scroll_top_button(&self) -> Option<ElementRef> {
        self.scroll_top.map(|runtime| runtime.button)
    }

    #[must_use]
    pub fn scroll_top_visibility(&self) -> Option<ControlVisibility> {
        self.scroll_top.map(|runtime| runtime.visibility)
    }

    /// Scrolls the window back to the top.
    pub fn on_scroll_top_click(&mut self) {
        if self.scroll_top.is_none() {
            return;
        }
        self.dom.scroll_to_top(self.config.scroll_top.behavior);
        self.emit_plugin_event(InteractionEvent::ScrolledToTop);
    }

    /// Applies the cosmetic hover styles (`mouseenter` / `mouseleave`).
    pub fn on_scroll_top_hover(&mut self, hovered: bool) {
        let Some(runtime) = self.scroll_top.as_mut() else {
            return;
        };
        runtime.hovered = hovered;
        let button = runtime.button;
        let behavior = &self.config.scroll_top;
        let (background, transform) = if hovered {
            (&behavior.hover_background, &behavior.hover_transform)
        } else {
            (&behavior.rest_background, &behavior.rest_transform)
        };
        self.dom.set_style(button, "background-color", background);
        self.dom.set_style(button, "transform", transform);
    }

    pub(super) fn apply_scroll_top_visibility(&mut self, scroll_y: f64) {
        let Some(runtime) = self.scroll_top.as_mut() else {
            return;
        };
        let visibility = self.config.scroll_top.visibility_for(scroll_y);
        let display = match visibility {
            ControlVisibility::Visible => self.config.scroll_top.visible_display.as_str(),
            ControlVisibility::Hidden => "none",
        };
        self.dom.set_style(runtime.button, "display", display);

        let changed = runtime.visibility != visibility;
        runtime.visibility = visibility;
        if changed {
            self.emit_plugin_event(InteractionEvent::ScrollTopVisibilityChanged { visibility });
        }
    }
}
