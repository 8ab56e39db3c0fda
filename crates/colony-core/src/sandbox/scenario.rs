//! Scenario Layout
//!
//! The initial contents of the sandbox room, read from the `[scenario]`
//! section of the configuration file.

use serde::{Deserialize, Serialize};

use crate::components::{BodyPart, Position};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnSetup {
    pub name: String,
    pub pos: Position,
    #[serde(default = "default_spawn_energy")]
    pub energy: u32,
    #[serde(default = "default_spawn_energy")]
    pub energy_capacity: u32,
}

fn default_spawn_energy() -> u32 {
    300
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerSetup {
    pub id: String,
    pub pos: Position,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub progress: u32,
}

fn default_level() -> u8 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSetup {
    pub id: String,
    pub pos: Position,
    #[serde(default = "default_source_capacity")]
    pub energy_capacity: u32,
}

fn default_source_capacity() -> u32 {
    3000
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSetup {
    pub name: String,
    pub pos: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSetup {
    pub id: String,
    pub pos: Position,
    #[serde(default)]
    pub progress: u32,
    pub progress_total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PileSetup {
    pub pos: Position,
    pub amount: u32,
}

/// An agent present from the start
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSetup {
    pub name: String,
    pub body: Vec<BodyPart>,
    pub pos: Position,
    #[serde(default)]
    pub energy: u32,
    #[serde(default = "default_lifetime")]
    pub ticks_to_live: u32,
    #[serde(default)]
    pub spawning_for: u32,
}

fn default_lifetime() -> u32 {
    super::rules::AGENT_LIFETIME
}

impl AgentSetup {
    pub fn new(name: impl Into<String>, body: Vec<BodyPart>, pos: Position) -> Self {
        Self {
            name: name.into(),
            body,
            pos,
            energy: 0,
            ticks_to_live: default_lifetime(),
            spawning_for: 0,
        }
    }

    pub fn carrying(mut self, energy: u32) -> Self {
        self.energy = energy;
        self
    }

    pub fn ticks_to_live(mut self, ticks: u32) -> Self {
        self.ticks_to_live = ticks;
        self
    }

    pub fn spawning_for(mut self, ticks: u32) -> Self {
        self.spawning_for = ticks;
        self
    }
}

/// Room contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub start_tick: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn: Option<SpawnSetup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerSetup>,
    pub sources: Vec<SourceSetup>,
    pub flags: Vec<FlagSetup>,
    pub sites: Vec<SiteSetup>,
    pub piles: Vec<PileSetup>,
    pub agents: Vec<AgentSetup>,
}

impl ScenarioConfig {
    /// A room with nothing in it
    pub fn empty() -> Self {
        Self {
            start_tick: 0,
            spawn: None,
            controller: None,
            sources: Vec::new(),
            flags: Vec::new(),
            sites: Vec::new(),
            piles: Vec::new(),
            agents: Vec::new(),
        }
    }

    pub fn with_spawn(mut self, name: impl Into<String>, pos: Position, energy: u32) -> Self {
        self.spawn = Some(SpawnSetup {
            name: name.into(),
            pos,
            energy,
            energy_capacity: energy.max(default_spawn_energy()),
        });
        self
    }

    pub fn with_controller(mut self, id: impl Into<String>, pos: Position, level: u8) -> Self {
        self.controller = Some(ControllerSetup {
            id: id.into(),
            pos,
            level,
            progress: 0,
        });
        self
    }

    pub fn with_source(mut self, id: impl Into<String>, pos: Position) -> Self {
        self.sources.push(SourceSetup {
            id: id.into(),
            pos,
            energy_capacity: default_source_capacity(),
        });
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>, pos: Position) -> Self {
        self.flags.push(FlagSetup { name: name.into(), pos });
        self
    }

    pub fn with_site(mut self, id: impl Into<String>, pos: Position, progress: u32, total: u32) -> Self {
        self.sites.push(SiteSetup {
            id: id.into(),
            pos,
            progress,
            progress_total: total,
        });
        self
    }

    pub fn with_pile(mut self, pos: Position, amount: u32) -> Self {
        self.piles.push(PileSetup { pos, amount });
        self
    }

    pub fn with_agent(mut self, agent: AgentSetup) -> Self {
        self.agents.push(agent);
        self
    }
}

impl Default for ScenarioConfig {
    /// The single-room layout the default roster is written for
    fn default() -> Self {
        Self::empty()
            .with_spawn("HQ", Position::new(25, 25), 300)
            .with_controller("ctrl", Position::new(40, 10), 1)
            .with_source("src-a", Position::new(10, 10))
            .with_source("src-b", Position::new(12, 40))
            .with_flag("mulePickup1", Position::new(11, 11))
            .with_flag("mulePickup2", Position::new(12, 39))
            .with_flag("muleDrop", Position::new(36, 14))
            .with_flag("builderRefuel", Position::new(22, 25))
            .with_site("site-ext-1", Position::new(27, 22), 0, 3000)
            .with_site("site-road-1", Position::new(20, 30), 0, 300)
    }
}
