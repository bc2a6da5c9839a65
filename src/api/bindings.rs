use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ElementRef, Selector};
use crate::dom::Dom;
use crate::error::{LandingError, LandingResult};

use super::{BindingPolicy, PageControllerConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorPanelBinding {
    pub toggle: ElementRef,
    pub content: ElementRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoBinding {
    pub video: ElementRef,
    pub id: Option<String>,
    /// Play/pause overlay bound to this video, if any.
    pub control: Option<ElementRef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalBinding {
    pub modal: ElementRef,
    pub close: Option<ElementRef>,
}

/// Page regions resolved once at startup.
///
/// Handlers only ever touch elements listed here, which keeps every feature on
/// its own disjoint subtree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBindings {
    pub anchors: Vec<ElementRef>,
    pub author_panel: Option<AuthorPanelBinding>,
    pub reveal_targets: Vec<ElementRef>,
    pub navbar: Option<ElementRef>,
    pub counters: Vec<ElementRef>,
    pub videos: Vec<VideoBinding>,
    /// Control element -> controlled video.
    pub video_controls: IndexMap<ElementRef, ElementRef>,
    pub modals: Vec<ModalBinding>,
    /// Trigger element -> bound modal.
    pub modal_triggers: IndexMap<ElementRef, ElementRef>,
}

impl PageBindings {
    /// Parses every enabled selector and resolves it against `dom`.
    pub fn resolve<D: Dom>(dom: &D, config: &PageControllerConfig) -> LandingResult<Self> {
        let policy = config.binding_policy;
        let mut bindings = Self::default();

        if config.smooth_scroll.enabled {
            let selector = Selector::parse(&config.smooth_scroll.anchor_selector)?;
            bindings.anchors = dom.query_all(&selector);
        }

        let panel = &config.author_panel;
        if panel.enabled {
            let toggle = dom.query_first(&Selector::parse(&panel.toggle_selector)?);
            let content = dom.query_first(&Selector::parse(&panel.content_selector)?);
            match (toggle, content) {
                (Some(toggle), Some(content)) => {
                    bindings.author_panel = Some(AuthorPanelBinding { toggle, content });
                }
                (toggle, _) => {
                    let missing = if toggle.is_none() {
                        &panel.toggle_selector
                    } else {
                        &panel.content_selector
                    };
                    report_missing(policy, "author panel", missing)?;
                }
            }
        }

        if config.reveal.enabled {
            bindings.reveal_targets = dom.query_all(&Selector::parse(&config.reveal.selector)?);
        }

        if config.navbar.enabled {
            bindings.navbar = dom.query_first(&Selector::parse(&config.navbar.selector)?);
            if bindings.navbar.is_none() {
                report_missing(policy, "navbar", &config.navbar.selector)?;
            }
        }

        if config.counters.enabled {
            bindings.counters = dom.query_all(&Selector::parse(&config.counters.selector)?);
        }

        if config.videos.enabled {
            bindings.resolve_videos(dom, config)?;
        }

        if config.modals.enabled {
            bindings.resolve_modals(dom, config)?;
        }

        debug!(
            anchors = bindings.anchors.len(),
            author_panel = bindings.author_panel.is_some(),
            reveal_targets = bindings.reveal_targets.len(),
            navbar = bindings.navbar.is_some(),
            counters = bindings.counters.len(),
            videos = bindings.videos.len(),
            modals = bindings.modals.len(),
            "page bindings resolved"
        );
        Ok(bindings)
    }

    fn resolve_videos<D: Dom>(
        &mut self,
        dom: &D,
        config: &PageControllerConfig,
    ) -> LandingResult<()> {
        let behavior = &config.videos;
        let control_selector = Selector::parse(&behavior.control_selector)?;
        let mut managed = dom.query_all(&Selector::parse(&behavior.video_selector)?);

        for control in dom.query_all(&control_selector) {
            let Some(video_id) = dom.attribute(control, &behavior.video_attribute) else {
                continue;
            };
            let Some(video) = dom.element_by_id(&video_id) else {
                debug!(video_id, "play control references a missing video");
                continue;
            };
            self.video_controls.insert(control, video);
            // Controlled videos join the exclusivity set even without the marker class.
            if !managed.contains(&video) {
                managed.push(video);
            }
        }

        self.videos = managed
            .into_iter()
            .map(|video| {
                let id = dom.element_id(video);
                let control = id.as_deref().and_then(|id| {
                    dom.query_first(
                        &control_selector.with_attribute_equals(&behavior.video_attribute, id),
                    )
                });
                VideoBinding { video, id, control }
            })
            .collect();
        Ok(())
    }

    fn resolve_modals<D: Dom>(
        &mut self,
        dom: &D,
        config: &PageControllerConfig,
    ) -> LandingResult<()> {
        let behavior = &config.modals;
        let close_selector = Selector::parse(&behavior.close_selector)?;

        self.modals = dom
            .query_all(&Selector::parse(&behavior.modal_selector)?)
            .into_iter()
            .map(|modal| ModalBinding {
                modal,
                close: dom.query_within(modal, &close_selector),
            })
            .collect();

        for trigger in dom.query_all(&Selector::parse(&behavior.trigger_selector)?) {
            let Some(modal_id) = dom.attribute(trigger, &behavior.trigger_attribute) else {
                continue;
            };
            match dom.element_by_id(&modal_id) {
                Some(modal) => {
                    if !self.modals.iter().any(|binding| binding.modal == modal) {
                        self.modals.push(ModalBinding {
                            modal,
                            close: dom.query_within(modal, &close_selector),
                        });
                    }
                    self.modal_triggers.insert(trigger, modal);
                }
                None => debug!(modal_id, "modal trigger references a missing modal"),
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn video_for_control(&self, control: ElementRef) -> Option<ElementRef> {
        self.video_controls.get(&control).copied()
    }

    #[must_use]
    pub fn video_binding(&self, video: ElementRef) -> Option<&VideoBinding> {
        self.videos.iter().find(|binding| binding.video == video)
    }

    #[must_use]
    pub fn modal_for_trigger(&self, trigger: ElementRef) -> Option<ElementRef> {
        self.modal_triggers.get(&trigger).copied()
    }

    #[must_use]
    pub fn modal_binding(&self, modal: ElementRef) -> Option<&ModalBinding> {
        self.modals.iter().find(|binding| binding.modal == modal)
    }
}

fn report_missing(policy: BindingPolicy, feature: &str, selector: &str) -> LandingResult<()> {
    match policy {
        BindingPolicy::Strict => Err(LandingError::MissingBinding(format!(
            "{feature}: no element matches `{selector}`"
        ))),
        BindingPolicy::Lenient => {
            debug!(feature, selector, "binding missing; feature disabled");
            Ok(())
        }
    }
}
