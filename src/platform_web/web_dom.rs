use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use js_sys::{Array, Function};
use tracing::{debug, warn};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlMediaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, ScrollIntoViewOptions,
    ScrollLogicalPosition, ScrollToOptions, Window,
};

use crate::core::{
    ElementRef, IntersectionEntry, IntersectionOptions, ObserverKind, ScrollBehavior, ScrollBlock,
    Selector,
};
use crate::dom::Dom;
use crate::error::{LandingError, LandingResult};

/// Attribute stamped on interned elements; holds the registry index.
const REF_ATTRIBUTE: &str = "data-landing-ref";

/// `Dom` backed by the live browser document.
///
/// Elements are interned on first sight; an `ElementRef` is the index of the
/// element in the registry and stays valid for the lifetime of the page.
pub struct WebDom {
    window: Window,
    document: Document,
    elements: RefCell<Vec<Element>>,
    /// Set once a stamp fails; lookups then also scan the registry.
    unstamped: Cell<bool>,
    observer_callbacks: HashMap<ObserverKind, Function>,
    observers: HashMap<ObserverKind, IntersectionObserver>,
    on_play_rejected: Closure<dyn FnMut(JsValue)>,
}

impl WebDom {
    /// Wraps the current window's document. `observer_callbacks` receive the
    /// raw entry arrays of the per-kind intersection observers.
    pub fn from_window(observer_callbacks: HashMap<ObserverKind, Function>) -> LandingResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| LandingError::Dom("no global window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| LandingError::Dom("window has no document".to_owned()))?;
        let on_play_rejected = Closure::wrap(Box::new(|err: JsValue| {
            warn!(error = ?err, "media play() promise rejected");
        }) as Box<dyn FnMut(JsValue)>);

        Ok(Self {
            window,
            document,
            elements: RefCell::new(Vec::new()),
            unstamped: Cell::new(false),
            observer_callbacks,
            observers: HashMap::new(),
            on_play_rejected,
        })
    }

    #[must_use]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the handle for `element`, registering it when unseen.
    ///
    /// Lookups go through the stamped index attribute. A stamp copied by
    /// `cloneNode` fails the identity check and the clone gets its own entry.
    pub fn intern(&self, element: &Element) -> ElementRef {
        let mut elements = self.elements.borrow_mut();
        let stamped = element
            .get_attribute(REF_ATTRIBUTE)
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|&index| {
                elements
                    .get(index)
                    .is_some_and(|known| known.is_same_node(Some(element)))
            });
        if let Some(index) = stamped {
            return ElementRef(index as u32);
        }
        if self.unstamped.get() {
            if let Some(index) = elements
                .iter()
                .position(|known| known.is_same_node(Some(element)))
            {
                return ElementRef(index as u32);
            }
        }
        let index = elements.len();
        if let Err(err) = element.set_attribute(REF_ATTRIBUTE, &index.to_string()) {
            debug!(error = ?err, "could not stamp element reference");
            self.unstamped.set(true);
        }
        elements.push(element.clone());
        ElementRef(index as u32)
    }

    #[must_use]
    pub fn element(&self, element: ElementRef) -> Option<Element> {
        self.elements.borrow().get(element.index()).cloned()
    }

    /// Converts a raw observer callback payload into typed entries.
    #[must_use]
    pub fn intersection_entries(&self, entries: &Array) -> Vec<IntersectionEntry> {
        entries
            .iter()
            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
            .map(|entry| IntersectionEntry {
                target: self.intern(&entry.target()),
                is_intersecting: entry.is_intersecting(),
            })
            .collect()
    }

    fn html_element(&self, element: ElementRef) -> Option<HtmlElement> {
        self.element(element)?.dyn_into::<HtmlElement>().ok()
    }

    fn media_element(&self, element: ElementRef) -> Option<HtmlMediaElement> {
        self.element(element)?.dyn_into::<HtmlMediaElement>().ok()
    }

    fn observer_for(
        &mut self,
        kind: ObserverKind,
        options: &IntersectionOptions,
    ) -> Option<&IntersectionObserver> {
        if !self.observers.contains_key(&kind) {
            let Some(callback) = self.observer_callbacks.get(&kind) else {
                debug!(?kind, "no observer callback registered");
                return None;
            };
            let init = IntersectionObserverInit::new();
            init.set_threshold(&JsValue::from_f64(options.threshold));
            init.set_root_margin(&options.root_margin);
            match IntersectionObserver::new_with_options(callback, &init) {
                Ok(observer) => {
                    self.observers.insert(kind, observer);
                }
                Err(err) => {
                    warn!(?kind, error = ?err, "failed to create intersection observer");
                    return None;
                }
            }
        }
        self.observers.get(&kind)
    }
}

fn js_error(context: &str, err: &JsValue) -> LandingError {
    LandingError::Dom(format!("{context}: {err:?}"))
}

fn web_scroll_behavior(behavior: ScrollBehavior) -> web_sys::ScrollBehavior {
    match behavior {
        ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
        ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
    }
}

fn web_scroll_block(block: ScrollBlock) -> ScrollLogicalPosition {
    match block {
        ScrollBlock::Start => ScrollLogicalPosition::Start,
        ScrollBlock::Center => ScrollLogicalPosition::Center,
        ScrollBlock::End => ScrollLogicalPosition::End,
        ScrollBlock::Nearest => ScrollLogicalPosition::Nearest,
    }
}

impl Dom for WebDom {
    fn query_all(&self, selector: &Selector) -> Vec<ElementRef> {
        let css = selector.to_string();
        let Ok(list) = self.document.query_selector_all(&css) else {
            warn!(selector = %css, "query_selector_all rejected selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(&element))
            .collect()
    }

    fn query_within(&self, root: ElementRef, selector: &Selector) -> Option<ElementRef> {
        let root = self.element(root)?;
        let found = root.query_selector(&selector.to_string()).ok()??;
        Some(self.intern(&found))
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.intern(&element))
    }

    fn body(&self) -> Option<ElementRef> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(&body))
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) {
        let Some(node) = self.element(element) else {
            return;
        };
        if let Err(err) = node.set_attribute(name, value) {
            warn!(attribute = name, error = ?err, "set_attribute failed");
        }
    }

    fn text_content(&self, element: ElementRef) -> String {
        self.element(element)
            .and_then(|node| node.text_content())
            .unwrap_or_default()
    }

    fn set_text_content(&mut self, element: ElementRef, text: &str) {
        if let Some(node) = self.element(element) {
            node.set_text_content(Some(text));
        }
    }

    fn style(&self, element: ElementRef, property: &str) -> Option<String> {
        let value = self
            .html_element(element)?
            .style()
            .get_property_value(property)
            .ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&mut self, element: ElementRef, property: &str, value: &str) {
        let Some(node) = self.html_element(element) else {
            return;
        };
        let style = node.style();
        let result = if value.is_empty() {
            style.remove_property(property).map(|_| ())
        } else {
            style.set_property(property, value)
        };
        if let Err(err) = result {
            warn!(property, error = ?err, "style update failed");
        }
    }

    fn has_class(&self, element: ElementRef, class: &str) -> bool {
        self.element(element)
            .is_some_and(|node| node.class_list().contains(class))
    }

    fn add_class(&mut self, element: ElementRef, class: &str) {
        if let Some(node) = self.element(element) {
            if let Err(err) = node.class_list().add_1(class) {
                warn!(class, error = ?err, "classList.add failed");
            }
        }
    }

    fn remove_class(&mut self, element: ElementRef, class: &str) {
        if let Some(node) = self.element(element) {
            if let Err(err) = node.class_list().remove_1(class) {
                warn!(class, error = ?err, "classList.remove failed");
            }
        }
    }

    fn scroll_height(&self, element: ElementRef) -> f64 {
        self.element(element)
            .map_or(0.0, |node| f64::from(node.scroll_height()))
    }

    fn create_element(&mut self, tag: &str) -> LandingResult<ElementRef> {
        let element = self
            .document
            .create_element(tag)
            .map_err(|err| js_error("createElement", &err))?;
        Ok(self.intern(&element))
    }

    fn append_child(&mut self, parent: ElementRef, child: ElementRef) -> LandingResult<()> {
        let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) else {
            return Err(LandingError::Dom("appendChild on unknown element".to_owned()));
        };
        parent
            .append_child(&child)
            .map(|_| ())
            .map_err(|err| js_error("appendChild", &err))
    }

    fn inject_style_block(&mut self, css: &str) -> LandingResult<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| LandingError::Dom("document has no head".to_owned()))?;
        let style = self
            .document
            .create_element("style")
            .map_err(|err| js_error("createElement(style)", &err))?;
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map(|_| ())
            .map_err(|err| js_error("appendChild(style)", &err))
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_into_view(&mut self, element: ElementRef, behavior: ScrollBehavior, block: ScrollBlock) {
        let Some(node) = self.element(element) else {
            return;
        };
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(web_scroll_behavior(behavior));
        options.set_block(web_scroll_block(block));
        node.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(web_scroll_behavior(behavior));
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn play_media(&mut self, element: ElementRef) -> LandingResult<()> {
        let media = self
            .media_element(element)
            .ok_or_else(|| LandingError::Playback("element is not a media element".to_owned()))?;
        let promise = media
            .play()
            .map_err(|err| LandingError::Playback(format!("{err:?}")))?;
        // Autoplay policies reject asynchronously; the element simply stays paused.
        let _ = promise.catch(&self.on_play_rejected);
        Ok(())
    }

    fn pause_media(&mut self, element: ElementRef) {
        if let Some(media) = self.media_element(element) {
            if let Err(err) = media.pause() {
                warn!(error = ?err, "media pause failed");
            }
        }
    }

    fn is_media_paused(&self, element: ElementRef) -> bool {
        self.media_element(element).is_none_or(|media| media.paused())
    }

    fn observe(&mut self, kind: ObserverKind, element: ElementRef, options: &IntersectionOptions) {
        let Some(node) = self.element(element) else {
            return;
        };
        if let Some(observer) = self.observer_for(kind, options) {
            observer.observe(&node);
        }
    }

    fn unobserve(&mut self, kind: ObserverKind, element: ElementRef) {
        let (Some(node), Some(observer)) = (self.element(element), self.observers.get(&kind))
        else {
            return;
        };
        observer.unobserve(&node);
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map_or_else(js_sys::Date::now, |performance| performance.now())
    }
}

impl Drop for WebDom {
    fn drop(&mut self) {
        for observer in self.observers.values() {
            observer.disconnect();
        }
    }
}
