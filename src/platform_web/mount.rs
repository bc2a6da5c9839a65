use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Function};
use tracing::{info, trace, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::api::{PageController, PageControllerConfig};
use crate::core::{ElementRef, ObserverKind};
use crate::error::{LandingError, LandingResult};

use super::WebDom;

const TICK_INTERVAL_MS: i32 = 16;

type SharedController = Rc<RefCell<Option<PageController<WebDom>>>>;

struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// A controller wired to the live page.
///
/// Dropping it removes every listener, stops the tick interval and
/// disconnects the intersection observers.
pub struct MountedPage {
    controller: SharedController,
    listeners: Vec<EventListener>,
    _observer_callbacks: Vec<Closure<dyn FnMut(Array)>>,
    _tick_callback: Closure<dyn FnMut()>,
    tick_interval_id: i32,
}

impl MountedPage {
    /// Runs `f` against the mounted controller, if it is not already borrowed.
    pub fn with_controller<T>(
        &self,
        f: impl FnOnce(&mut PageController<WebDom>) -> T,
    ) -> Option<T> {
        with_controller(&self.controller, f)
    }
}

impl Drop for MountedPage {
    fn drop(&mut self) {
        for listener in &self.listeners {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
        if let Some(window) = web_sys::window() {
            window.clear_interval_with_handle(self.tick_interval_id);
        }
        self.controller.borrow_mut().take();
    }
}

fn with_controller<T>(
    shared: &SharedController,
    f: impl FnOnce(&mut PageController<WebDom>) -> T,
) -> Option<T> {
    let Ok(mut slot) = shared.try_borrow_mut() else {
        trace!("controller busy; dropping re-entrant event");
        return None;
    };
    slot.as_mut().map(f)
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> LandingResult<EventListener> {
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
        .map_err(|err| LandingError::Dom(format!("addEventListener({event}): {err:?}")))?;
    Ok(EventListener {
        target: target.clone(),
        event,
        callback,
    })
}

/// Builds a [`PageController`] over the current document and attaches every
/// listener the enabled features need.
pub fn mount_page(config: PageControllerConfig) -> LandingResult<MountedPage> {
    let shared: SharedController = Rc::new(RefCell::new(None));

    let mut observer_callbacks = Vec::new();
    let mut observer_functions = HashMap::new();
    for kind in [ObserverKind::Reveal, ObserverKind::Counter] {
        let controller = shared.clone();
        let callback = Closure::wrap(Box::new(move |entries: Array| {
            with_controller(&controller, |controller| {
                let entries = controller.dom().intersection_entries(&entries);
                controller.on_intersection(kind, &entries);
            });
        }) as Box<dyn FnMut(Array)>);
        let function: Function = callback.as_ref().unchecked_ref::<Function>().clone();
        observer_functions.insert(kind, function);
        observer_callbacks.push(callback);
    }

    let dom = WebDom::from_window(observer_functions)?;
    let window = dom.window().clone();
    let document = dom.document().clone();
    let controller = PageController::new(dom, config)?;
    let wiring = Wiring::collect(&controller);
    *shared.borrow_mut() = Some(controller);

    let mut listeners = Vec::new();
    listeners.extend(wiring.attach(&shared)?);

    let window_target: &EventTarget = window.as_ref();
    listeners.push(listen(window_target, "scroll", {
        let controller = shared.clone();
        move |_| {
            with_controller(&controller, PageController::on_scroll);
        }
    })?);
    listeners.push(listen(document.as_ref(), "keydown", {
        let controller = shared.clone();
        move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            with_controller(&controller, |controller| controller.on_key_down(&key));
        }
    })?);

    let tick_callback = {
        let controller = shared.clone();
        Closure::wrap(Box::new(move || {
            with_controller(&controller, |controller| {
                if controller.has_pending_work() {
                    controller.tick();
                }
            });
        }) as Box<dyn FnMut()>)
    };
    let tick_interval_id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick_callback.as_ref().unchecked_ref(),
            TICK_INTERVAL_MS,
        )
        .map_err(|err| LandingError::Dom(format!("setInterval: {err:?}")))?;

    info!(listeners = listeners.len(), "landing page mounted");
    Ok(MountedPage {
        controller: shared,
        listeners,
        _observer_callbacks: observer_callbacks,
        _tick_callback: tick_callback,
        tick_interval_id,
    })
}

/// Element handles resolved by the controller, paired with their DOM nodes.
struct Wiring {
    anchors: Vec<(ElementRef, Element)>,
    author_toggle: Option<Element>,
    scroll_top: Option<Element>,
    video_controls: Vec<(ElementRef, Element)>,
    videos: Vec<(ElementRef, Element)>,
    modal_triggers: Vec<(ElementRef, Element)>,
    modal_closes: Vec<(ElementRef, Element)>,
    modals: Vec<(ElementRef, Element)>,
}

impl Wiring {
    fn collect(controller: &PageController<WebDom>) -> Self {
        let dom = controller.dom();
        let bindings = controller.bindings();
        let pair = |element: ElementRef| dom.element(element).map(|node| (element, node));

        Self {
            anchors: bindings.anchors.iter().filter_map(|&a| pair(a)).collect(),
            author_toggle: bindings
                .author_panel
                .and_then(|panel| dom.element(panel.toggle)),
            scroll_top: controller
                .scroll_top_button()
                .and_then(|button| dom.element(button)),
            video_controls: bindings
                .video_controls
                .keys()
                .filter_map(|&control| pair(control))
                .collect(),
            videos: bindings
                .videos
                .iter()
                .filter_map(|binding| pair(binding.video))
                .collect(),
            modal_triggers: bindings
                .modal_triggers
                .keys()
                .filter_map(|&trigger| pair(trigger))
                .collect(),
            modal_closes: bindings
                .modals
                .iter()
                .filter_map(|binding| {
                    let close = dom.element(binding.close?)?;
                    Some((binding.modal, close))
                })
                .collect(),
            modals: bindings
                .modals
                .iter()
                .filter_map(|binding| pair(binding.modal))
                .collect(),
        }
    }

    fn attach(self, shared: &SharedController) -> LandingResult<Vec<EventListener>> {
        let mut listeners = Vec::new();

        for (anchor, node) in self.anchors {
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "click", move |event| {
                let disposition =
                    with_controller(&controller, |controller| controller.on_anchor_click(anchor));
                if disposition.is_some_and(|d| d.prevents_default()) {
                    event.prevent_default();
                }
            })?);
        }

        if let Some(toggle) = self.author_toggle {
            let controller = shared.clone();
            listeners.push(listen(toggle.as_ref(), "click", move |_| {
                with_controller(&controller, PageController::on_author_toggle_click);
            })?);
        }

        if let Some(button) = self.scroll_top {
            let controller = shared.clone();
            listeners.push(listen(button.as_ref(), "click", move |_| {
                with_controller(&controller, PageController::on_scroll_top_click);
            })?);
            for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
                let controller = shared.clone();
                listeners.push(listen(button.as_ref(), event, move |_| {
                    with_controller(&controller, |controller| {
                        controller.on_scroll_top_hover(hovered);
                    });
                })?);
            }
        }

        for (control, node) in self.video_controls {
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "click", move |_| {
                with_controller(&controller, |controller| {
                    controller.on_video_control_click(control)
                });
            })?);
        }

        for (video, node) in self.videos {
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "ended", move |_| {
                with_controller(&controller, |controller| controller.on_video_ended(video));
            })?);
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "pause", move |_| {
                with_controller(&controller, |controller| controller.on_video_paused(video));
            })?);
        }

        for (trigger, node) in self.modal_triggers {
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "click", move |_| {
                with_controller(&controller, |controller| {
                    controller.on_modal_trigger_click(trigger)
                });
            })?);
        }

        for (modal, node) in self.modal_closes {
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "click", move |_| {
                with_controller(&controller, |controller| controller.on_modal_close_click(modal));
            })?);
        }

        for (modal, node) in self.modals {
            let controller = shared.clone();
            listeners.push(listen(node.as_ref(), "click", move |event| {
                let Some(target) = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                else {
                    return;
                };
                with_controller(&controller, |controller| {
                    let target = controller.dom().intern(&target);
                    controller.on_modal_click(modal, target)
                });
            })?);
        }

        if listeners.is_empty() {
            warn!("no interactive elements bound on this page");
        }
        Ok(listeners)
    }
}
