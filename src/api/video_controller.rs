use tracing::{debug, warn};

use crate::core::ElementRef;
use crate::dom::Dom;
use crate::extensions::InteractionEvent;
use crate::interaction::PlaybackState;

use super::PageController;

impl<D: Dom> PageController<D> {
    /// Handles a play/pause overlay click.
    ///
    /// Starting a video pauses every other managed video first, so at most one
    /// managed video is ever playing. Returns the resulting state of the
    /// controlled video, or `None` when the control is not bound.
    pub fn on_video_control_click(&mut self, control: ElementRef) -> Option<PlaybackState> {
        if !self.config.videos.enabled {
            return None;
        }
        let video = self.bindings.video_for_control(control)?;

        if !self.dom.is_media_paused(video) {
            self.dom.pause_media(video);
            self.show_video_control(control);
            self.emit_plugin_event(InteractionEvent::VideoStopped { video });
            return Some(PlaybackState::Paused);
        }

        let others: Vec<(ElementRef, Option<ElementRef>)> = self
            .bindings
            .videos
            .iter()
            .filter(|binding| binding.video != video)
            .map(|binding| (binding.video, binding.control))
            .collect();
        for (other, other_control) in others {
            let was_playing = !self.dom.is_media_paused(other);
            self.dom.pause_media(other);
            if let Some(other_control) = other_control {
                self.show_video_control(other_control);
            }
            if was_playing {
                debug!(video = other.0, "paused to keep playback exclusive");
                self.emit_plugin_event(InteractionEvent::VideoStopped { video: other });
            }
        }

        match self.dom.play_media(video) {
            Ok(()) => {
                let hidden = self.config.videos.control_hidden_opacity.clone();
                self.dom.set_style(control, "opacity", &hidden);
                self.emit_plugin_event(InteractionEvent::VideoStarted { video });
                Some(PlaybackState::Playing)
            }
            Err(err) => {
                warn!(video = video.0, error = %err, "video playback was rejected");
                self.show_video_control(control);
                Some(PlaybackState::Paused)
            }
        }
    }

    /// Natural end of stream: restore the play affordance.
    pub fn on_video_ended(&mut self, video: ElementRef) {
        if self.restore_control_for(video) {
            self.emit_plugin_event(InteractionEvent::VideoStopped { video });
        }
    }

    /// Media `pause` event, including pauses not initiated by the controller.
    pub fn on_video_paused(&mut self, video: ElementRef) {
        self.restore_control_for(video);
    }

    #[must_use]
    pub fn playback_state(&self, video: ElementRef) -> Option<PlaybackState> {
        self.bindings
            .video_binding(video)
            .map(|_| PlaybackState::from_paused(self.dom.is_media_paused(video)))
    }

    /// Managed videos currently playing, in binding order.
    #[must_use]
    pub fn playing_videos(&self) -> Vec<ElementRef> {
        self.bindings
            .videos
            .iter()
            .map(|binding| binding.video)
            .filter(|video| !self.dom.is_media_paused(*video))
            .collect()
    }

    fn restore_control_for(&mut self, video: ElementRef) -> bool {
        if !self.config.videos.enabled {
            return false;
        }
        let Some(binding) = self.bindings.video_binding(video) else {
            return false;
        };
        if let Some(control) = binding.control {
            self.show_video_control(control);
        }
        true
    }

    fn show_video_control(&mut self, control: ElementRef) {
        let shown = &self.config.videos.control_shown_opacity;
        self.dom.set_style(control, "opacity", shown);
    }
}
