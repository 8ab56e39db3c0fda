//! Persisted Colony State
//!
//! The explicit snapshot of everything that survives between ticks. The tick
//! takes one by value and returns the next one; nothing is kept anywhere else.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::components::AgentMemory;

/// Last observed controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerState {
    pub level: u8,
}

/// Process-wide persisted record plus every agent's memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColonyState {
    /// Per-agent memory keyed by agent name
    #[serde(default)]
    pub agents: BTreeMap<String, AgentMemory>,
    /// Controller level snapshot used to detect upgrades
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller_state: Option<ControllerState>,
    /// Operator override that pauses Builder refuelling
    #[serde(default)]
    pub pause_construction: bool,
}

impl ColonyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self, agent: &str) -> Option<&AgentMemory> {
        self.agents.get(agent)
    }

    /// Memory record for an agent, created empty if absent
    pub fn memory_mut(&mut self, agent: &str) -> &mut AgentMemory {
        self.agents.entry(agent.to_string()).or_default()
    }

    /// Replace an agent's memory wholesale (used on creation)
    pub fn set_memory(&mut self, agent: impl Into<String>, memory: AgentMemory) {
        self.agents.insert(agent.into(), memory);
    }

    pub fn controller_level(&self) -> Option<u8> {
        self.controller_state.map(|s| s.level)
    }

    /// Parse a state snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        serde_json::from_str(json).map_err(StateError::Json)
    }

    pub fn to_json(&self) -> Result<String, StateError> {
        serde_json::to_string_pretty(self).map_err(StateError::Json)
    }

    /// Load a snapshot from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StateError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Load a snapshot, starting fresh if the file does not exist yet
    pub fn load_or_new(path: impl AsRef<Path>) -> Result<Self, StateError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the snapshot to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StateError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

/// Errors reading or writing the persisted state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("state JSON error: {0}")]
    Json(#[source] serde_json::Error),
}
