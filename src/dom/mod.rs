mod memory_dom;

pub use memory_dom::{ElementSpec, MemoryDom, ScrollRequest};

use crate::core::{
    ElementRef, IntersectionOptions, ObserverKind, ScrollBehavior, ScrollBlock, Selector,
};
use crate::error::LandingResult;

/// Contract implemented by any document backend.
///
/// The controller only talks to the page through this trait, so transition
/// logic runs unchanged against `MemoryDom` in tests and against the browser
/// document in `platform_web`.
pub trait Dom {
    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<ElementRef>;

    fn query_first(&self, selector: &Selector) -> Option<ElementRef> {
        self.query_all(selector).into_iter().next()
    }

    /// First descendant of `root` matching `selector`.
    fn query_within(&self, root: ElementRef, selector: &Selector) -> Option<ElementRef>;

    fn element_by_id(&self, id: &str) -> Option<ElementRef>;

    fn body(&self) -> Option<ElementRef>;

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String>;

    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str);

    fn element_id(&self, element: ElementRef) -> Option<String> {
        self.attribute(element, "id")
    }

    fn text_content(&self, element: ElementRef) -> String;

    fn set_text_content(&mut self, element: ElementRef, text: &str);

    /// Inline style property value, if set.
    fn style(&self, element: ElementRef, property: &str) -> Option<String>;

    /// An empty `value` clears the property.
    fn set_style(&mut self, element: ElementRef, property: &str, value: &str);

    fn has_class(&self, element: ElementRef, class: &str) -> bool;

    fn add_class(&mut self, element: ElementRef, class: &str);

    fn remove_class(&mut self, element: ElementRef, class: &str);

    /// Full content height in CSS pixels, used for max-height reveals.
    fn scroll_height(&self, element: ElementRef) -> f64;

    /// Creates a detached element.
    fn create_element(&mut self, tag: &str) -> LandingResult<ElementRef>;

    fn append_child(&mut self, parent: ElementRef, child: ElementRef) -> LandingResult<()>;

    /// Appends a `<style>` block with `css` to the document head.
    fn inject_style_block(&mut self, css: &str) -> LandingResult<()>;

    /// Current vertical scroll offset of the window in CSS pixels.
    fn scroll_y(&self) -> f64;

    fn scroll_into_view(&mut self, element: ElementRef, behavior: ScrollBehavior, block: ScrollBlock);

    fn scroll_to_top(&mut self, behavior: ScrollBehavior);

    fn play_media(&mut self, element: ElementRef) -> LandingResult<()>;

    fn pause_media(&mut self, element: ElementRef);

    fn is_media_paused(&self, element: ElementRef) -> bool;

    fn observe(&mut self, kind: ObserverKind, element: ElementRef, options: &IntersectionOptions);

    fn unobserve(&mut self, kind: ObserverKind, element: ElementRef);

    /// Monotonic clock in milliseconds.
    fn now_ms(&self) -> f64;
}
