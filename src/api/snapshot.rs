use serde::{Deserialize, Serialize};

use crate::core::ElementRef;
use crate::dom::Dom;
use crate::error::{LandingError, LandingResult};
use crate::interaction::{
    ControlVisibility, CounterPhase, ModalState, NavbarElevation, PanelState,
};

use super::PageController;

pub const CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub element: ElementRef,
    pub target: i64,
    pub phase: CounterPhase,
    /// Text currently displayed by the counter element.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalSnapshot {
    pub modal: ElementRef,
    pub state: ModalState,
}

/// Deterministic view of every feature's UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshot {
    pub panel: Option<PanelState>,
    pub navbar: Option<NavbarElevation>,
    pub scroll_top: Option<ControlVisibility>,
    pub revealed_count: usize,
    pub reveal_targets: usize,
    pub counters: Vec<CounterSnapshot>,
    pub playing_videos: Vec<ElementRef>,
    pub modals: Vec<ModalSnapshot>,
    pub pending_timers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ControllerSnapshot,
}

impl ControllerSnapshot {
    #[must_use]
    pub fn open_modals(&self) -> usize {
        self.modals
            .iter()
            .filter(|modal| modal.state == ModalState::Open)
            .count()
    }

    pub fn to_json_contract_v1_pretty(&self) -> LandingResult<String> {
        let payload = ControllerSnapshotJsonContractV1 {
            schema_version: CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            LandingError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> LandingResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ControllerSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ControllerSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                LandingError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(LandingError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<D: Dom> PageController<D> {
    /// Builds a deterministic snapshot useful for regression tests.
    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            panel: self.author_panel_state(),
            navbar: self.navbar_elevation,
            scroll_top: self.scroll_top_visibility(),
            revealed_count: self.revealed_count(),
            reveal_targets: self.reveals.len(),
            counters: self
                .counters
                .iter()
                .map(|(&element, counter)| CounterSnapshot {
                    element,
                    target: counter.target.value,
                    phase: counter.phase,
                    text: self.dom.text_content(element),
                })
                .collect(),
            playing_videos: self.playing_videos(),
            modals: self
                .modal_states
                .iter()
                .map(|(&modal, &state)| ModalSnapshot { modal, state })
                .collect(),
            pending_timers: self.timers.len(),
        }
    }

    /// Serializes snapshot as pretty JSON for fixture-based regression checks.
    pub fn snapshot_json_pretty(&self) -> LandingResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|e| LandingError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> LandingResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1, ControllerSnapshot};

    fn empty_snapshot() -> ControllerSnapshot {
        ControllerSnapshot {
            panel: None,
            navbar: None,
            scroll_top: None,
            revealed_count: 0,
            reveal_targets: 0,
            counters: Vec::new(),
            playing_videos: Vec::new(),
            modals: Vec::new(),
            pending_timers: 0,
        }
    }

    #[test]
    fn contract_payload_carries_schema_version() {
        let json = empty_snapshot()
            .to_json_contract_v1_pretty()
            .expect("serialize contract");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(
            value["schema_version"].as_u64(),
            Some(u64::from(CONTROLLER_SNAPSHOT_JSON_SCHEMA_V1))
        );
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let json = empty_snapshot()
            .to_json_contract_v1_pretty()
            .expect("serialize contract")
            .replace("\"schema_version\": 1", "\"schema_version\": 7");
        let err = ControllerSnapshot::from_json_compat_str(&json).expect_err("must reject");
        assert!(err.to_string().contains("unsupported snapshot schema version"));
    }
}
