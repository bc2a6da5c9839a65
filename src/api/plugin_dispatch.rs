use crate::dom::Dom;
use crate::extensions::{InteractionEvent, PluginContext};
use crate::interaction::CounterPhase;

use super::PageController;

impl<D: Dom> PageController<D> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            panel_state: self.author_panel_state(),
            navbar_elevation: self.navbar_elevation,
            scroll_top_visibility: self.scroll_top_visibility(),
            revealed_count: self.revealed_count(),
            running_counters: self
                .counters
                .values()
                .filter(|counter| matches!(counter.phase, CounterPhase::Running { .. }))
                .count(),
            playing_video: self.playing_videos().first().copied(),
            open_modals: self.open_modal_count(),
            now_ms: self.dom.now_ms(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: InteractionEvent) {
        if self.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.plugins {
            plugin.on_event(event, context);
        }
    }
}
