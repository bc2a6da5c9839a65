use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::core::{
    ElementRef, IntersectionOptions, ObserverKind, ScrollBehavior, ScrollBlock, Selector,
};
use crate::dom::Dom;
use crate::error::{LandingError, LandingResult};

/// Scroll command recorded by `MemoryDom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollRequest {
    IntoView {
        element: ElementRef,
        behavior: ScrollBehavior,
        block: ScrollBlock,
    },
    ToTop {
        behavior: ScrollBehavior,
    },
}

/// Declarative element description used to build `MemoryDom` trees.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    text: String,
    scroll_height: f64,
    media: bool,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            media: matches!(tag, "video" | "audio"),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_owned());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_owned());
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_owned();
        self
    }

    #[must_use]
    pub fn scroll_height(mut self, height: f64) -> Self {
        self.scroll_height = height;
        self
    }
}

#[derive(Debug, Clone)]
struct MemoryNode {
    tag: String,
    parent: Option<ElementRef>,
    children: Vec<ElementRef>,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    styles: IndexMap<String, String>,
    text: String,
    text_writes: usize,
    scroll_height: f64,
    media: Option<MediaState>,
}

#[derive(Debug, Clone, Default)]
struct MediaState {
    paused: bool,
    play_calls: usize,
    fail_next_play: Option<String>,
}

/// In-memory document used by tests and headless hosts.
///
/// It implements the full `Dom` contract over an element arena and records
/// every scroll, observation and style-block request so callers can assert on
/// the effects of controller transitions without a browser.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<MemoryNode>,
    body: ElementRef,
    style_blocks: Vec<String>,
    scroll_requests: Vec<ScrollRequest>,
    observed: IndexMap<ObserverKind, IndexMap<ElementRef, IntersectionOptions>>,
    scroll_y: f64,
    clock_ms: f64,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let body = MemoryNode {
            tag: "body".to_owned(),
            parent: None,
            children: Vec::new(),
            attributes: IndexMap::new(),
            classes: IndexSet::new(),
            styles: IndexMap::new(),
            text: String::new(),
            text_writes: 0,
            scroll_height: 0.0,
            media: None,
        };
        Self {
            nodes: vec![body],
            body: ElementRef(0),
            style_blocks: Vec::new(),
            scroll_requests: Vec::new(),
            observed: IndexMap::new(),
            scroll_y: 0.0,
            clock_ms: 0.0,
        }
    }

    #[must_use]
    pub fn root(&self) -> ElementRef {
        self.body
    }

    /// Creates an element from `spec` and appends it to `parent`.
    pub fn append(&mut self, parent: ElementRef, spec: ElementSpec) -> ElementRef {
        let element = self.alloc(spec);
        self.link(parent, element);
        element
    }

    pub fn set_scroll_y(&mut self, offset: f64) {
        self.scroll_y = offset;
    }

    pub fn advance_clock(&mut self, delta_ms: f64) {
        self.clock_ms += delta_ms.max(0.0);
    }

    pub fn set_scroll_height(&mut self, element: ElementRef, height: f64) {
        if let Some(node) = self.node_mut(element) {
            node.scroll_height = height;
        }
    }

    /// Makes the next `play_media` call on `element` fail with `message`.
    pub fn fail_next_play(&mut self, element: ElementRef, message: &str) {
        if let Some(media) = self.node_mut(element).and_then(|node| node.media.as_mut()) {
            media.fail_next_play = Some(message.to_owned());
        }
    }

    #[must_use]
    pub fn play_calls(&self, element: ElementRef) -> usize {
        self.node(element)
            .and_then(|node| node.media.as_ref())
            .map_or(0, |media| media.play_calls)
    }

    /// Number of `set_text_content` calls received by `element`.
    #[must_use]
    pub fn text_writes(&self, element: ElementRef) -> usize {
        self.node(element).map_or(0, |node| node.text_writes)
    }

    #[must_use]
    pub fn style_blocks(&self) -> &[String] {
        &self.style_blocks
    }

    #[must_use]
    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.scroll_requests
    }

    #[must_use]
    pub fn is_observed(&self, kind: ObserverKind, element: ElementRef) -> bool {
        self.observed
            .get(&kind)
            .is_some_and(|targets| targets.contains_key(&element))
    }

    #[must_use]
    pub fn observed_count(&self, kind: ObserverKind) -> usize {
        self.observed.get(&kind).map_or(0, IndexMap::len)
    }

    #[must_use]
    pub fn observer_options(&self, kind: ObserverKind, element: ElementRef) -> Option<&IntersectionOptions> {
        self.observed.get(&kind)?.get(&element)
    }

    #[must_use]
    pub fn parent(&self, element: ElementRef) -> Option<ElementRef> {
        self.node(element)?.parent
    }

    #[must_use]
    pub fn tag(&self, element: ElementRef) -> Option<&str> {
        self.node(element).map(|node| node.tag.as_str())
    }

    fn alloc(&mut self, spec: ElementSpec) -> ElementRef {
        let element = ElementRef(self.nodes.len() as u32);
        self.nodes.push(MemoryNode {
            tag: spec.tag,
            parent: None,
            children: Vec::new(),
            attributes: spec.attributes,
            classes: spec.classes,
            styles: IndexMap::new(),
            text: spec.text,
            text_writes: 0,
            scroll_height: spec.scroll_height,
            media: spec.media.then(|| MediaState {
                paused: true,
                ..MediaState::default()
            }),
        });
        element
    }

    fn link(&mut self, parent: ElementRef, child: ElementRef) {
        if let Some(previous) = self.node(child).and_then(|node| node.parent) {
            if let Some(node) = self.node_mut(previous) {
                node.children.retain(|existing| *existing != child);
            }
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn node(&self, element: ElementRef) -> Option<&MemoryNode> {
        self.nodes.get(element.index())
    }

    fn node_mut(&mut self, element: ElementRef) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(element.index())
    }

    fn matches(&self, element: ElementRef, selector: &Selector) -> bool {
        let Some(node) = self.node(element) else {
            return false;
        };
        selector.matches(
            &node.tag,
            node.attributes.get("id").map(String::as_str),
            |class| node.classes.contains(class),
            |name| attribute_value(node, name),
        )
    }

    /// Depth-first descendants of `root`, excluding `root`, in document order.
    fn descendants(&self, root: ElementRef) -> Vec<ElementRef> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementRef> = self
            .node(root)
            .map(|node| node.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(element) = stack.pop() {
            out.push(element);
            if let Some(node) = self.node(element) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn is_inclusive_ancestor(&self, ancestor: ElementRef, element: ElementRef) -> bool {
        let mut cursor = Some(element);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.node(current).and_then(|node| node.parent);
        }
        false
    }
}

fn attribute_value<'a>(node: &'a MemoryNode, name: &str) -> Option<&'a str> {
    if name == "class" {
        return None;
    }
    node.attributes.get(name).map(String::as_str)
}

impl Dom for MemoryDom {
    fn query_all(&self, selector: &Selector) -> Vec<ElementRef> {
        let mut candidates = vec![self.body];
        candidates.extend(self.descendants(self.body));
        candidates
            .into_iter()
            .filter(|element| self.matches(*element, selector))
            .collect()
    }

    fn query_within(&self, root: ElementRef, selector: &Selector) -> Option<ElementRef> {
        self.descendants(root)
            .into_iter()
            .find(|element| self.matches(*element, selector))
    }

    fn element_by_id(&self, id: &str) -> Option<ElementRef> {
        let mut candidates = vec![self.body];
        candidates.extend(self.descendants(self.body));
        candidates.into_iter().find(|element| {
            self.node(*element)
                .and_then(|node| node.attributes.get("id"))
                .is_some_and(|value| value == id)
        })
    }

    fn body(&self) -> Option<ElementRef> {
        Some(self.body)
    }

    fn attribute(&self, element: ElementRef, name: &str) -> Option<String> {
        let node = self.node(element)?;
        if name == "class" {
            if node.classes.is_empty() {
                return None;
            }
            let joined: Vec<&str> = node.classes.iter().map(String::as_str).collect();
            return Some(joined.join(" "));
        }
        node.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: ElementRef, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            if name == "class" {
                node.classes = value.split_whitespace().map(str::to_owned).collect();
            } else {
                node.attributes
                    .insert(name.to_ascii_lowercase(), value.to_owned());
            }
        }
    }

    fn text_content(&self, element: ElementRef) -> String {
        self.node(element)
            .map(|node| node.text.clone())
            .unwrap_or_default()
    }

    fn set_text_content(&mut self, element: ElementRef, text: &str) {
        if let Some(node) = self.node_mut(element) {
            node.text = text.to_owned();
            node.text_writes += 1;
        }
    }

    fn style(&self, element: ElementRef, property: &str) -> Option<String> {
        self.node(element)?.styles.get(property).cloned()
    }

    fn set_style(&mut self, element: ElementRef, property: &str, value: &str) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        if value.is_empty() {
            node.styles.shift_remove(property);
        } else {
            node.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn has_class(&self, element: ElementRef, class: &str) -> bool {
        self.node(element)
            .is_some_and(|node| node.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementRef, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.insert(class.to_owned());
        }
    }

    fn remove_class(&mut self, element: ElementRef, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.shift_remove(class);
        }
    }

    fn scroll_height(&self, element: ElementRef) -> f64 {
        self.node(element).map_or(0.0, |node| node.scroll_height)
    }

    fn create_element(&mut self, tag: &str) -> LandingResult<ElementRef> {
        if tag.is_empty() || !tag.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'-') {
            return Err(LandingError::Dom(format!("invalid tag name `{tag}`")));
        }
        Ok(self.alloc(ElementSpec::new(tag)))
    }

    fn append_child(&mut self, parent: ElementRef, child: ElementRef) -> LandingResult<()> {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return Err(LandingError::Dom("unknown element handle".to_owned()));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(LandingError::Dom(
                "cannot append an element into its own subtree".to_owned(),
            ));
        }
        self.link(parent, child);
        Ok(())
    }

    fn inject_style_block(&mut self, css: &str) -> LandingResult<()> {
        self.style_blocks.push(css.to_owned());
        Ok(())
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_into_view(&mut self, element: ElementRef, behavior: ScrollBehavior, block: ScrollBlock) {
        self.scroll_requests.push(ScrollRequest::IntoView {
            element,
            behavior,
            block,
        });
    }

    fn scroll_to_top(&mut self, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest::ToTop { behavior });
        self.scroll_y = 0.0;
    }

    fn play_media(&mut self, element: ElementRef) -> LandingResult<()> {
        let Some(media) = self.node_mut(element).and_then(|node| node.media.as_mut()) else {
            return Err(LandingError::Playback(format!(
                "element {} is not a media element",
                element.0
            )));
        };
        media.play_calls += 1;
        if let Some(message) = media.fail_next_play.take() {
            return Err(LandingError::Playback(message));
        }
        media.paused = false;
        trace!(element = element.0, "memory media playing");
        Ok(())
    }

    fn pause_media(&mut self, element: ElementRef) {
        if let Some(media) = self.node_mut(element).and_then(|node| node.media.as_mut()) {
            media.paused = true;
        }
    }

    fn is_media_paused(&self, element: ElementRef) -> bool {
        self.node(element)
            .and_then(|node| node.media.as_ref())
            .is_none_or(|media| media.paused)
    }

    fn observe(&mut self, kind: ObserverKind, element: ElementRef, options: &IntersectionOptions) {
        self.observed
            .entry(kind)
            .or_default()
            .insert(element, options.clone());
    }

    fn unobserve(&mut self, kind: ObserverKind, element: ElementRef) {
        if let Some(targets) = self.observed.get_mut(&kind) {
            targets.shift_remove(&element);
        }
    }

    fn now_ms(&self) -> f64 {
        self.clock_ms
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementSpec, MemoryDom};
    use crate::core::Selector;
    use crate::dom::Dom;

    #[test]
    fn query_all_returns_document_order() {
        let mut dom = MemoryDom::new();
        let root = dom.root();
        let section = dom.append(root, ElementSpec::new("section").class("stats"));
        let first = dom.append(section, ElementSpec::new("span").class("stat-number"));
        let second = dom.append(root, ElementSpec::new("span").class("stat-number"));

        let selector = Selector::parse(".stat-number").expect("valid selector");
        assert_eq!(dom.query_all(&selector), vec![first, second]);
        assert_eq!(dom.query_within(section, &selector), Some(first));
    }

    #[test]
    fn append_child_rejects_cycles() {
        let mut dom = MemoryDom::new();
        let root = dom.root();
        let outer = dom.append(root, ElementSpec::new("div"));
        let inner = dom.append(outer, ElementSpec::new("div"));
        assert!(dom.append_child(inner, outer).is_err());
    }

    #[test]
    fn class_attribute_reflects_class_set() {
        let mut dom = MemoryDom::new();
        let root = dom.root();
        let element = dom.append(root, ElementSpec::new("div").class("modal").class("open"));
        assert_eq!(dom.attribute(element, "class").as_deref(), Some("modal open"));
        dom.remove_class(element, "open");
        assert!(!dom.has_class(element, "open"));
    }

    #[test]
    fn media_elements_start_paused_and_can_fail_playback() {
        let mut dom = MemoryDom::new();
        let root = dom.root();
        let video = dom.append(root, ElementSpec::new("video").id("intro"));
        assert!(dom.is_media_paused(video));

        dom.fail_next_play(video, "autoplay blocked");
        assert!(dom.play_media(video).is_err());
        assert!(dom.is_media_paused(video));

        dom.play_media(video).expect("second play succeeds");
        assert!(!dom.is_media_paused(video));
        assert_eq!(dom.play_calls(video), 2);
    }
}
