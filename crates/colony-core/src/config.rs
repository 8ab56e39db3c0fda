//! Configuration System
//!
//! Loads the roster, engine tuning, supervisor rules and the sandbox scenario
//! from `colony.toml`. Every section has defaults, so partial files work.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::components::{memory_keys, BodyPart, Role, WorkerSpec};
use crate::sandbox::ScenarioConfig;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "colony.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub supervisor: SupervisorConfig,
    /// Desired workers, in scheduling order
    #[serde(default = "default_roster")]
    pub roster: Vec<WorkerSpec>,
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

/// How one pile is chosen among several candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PileSelection {
    /// Uniform pick from a seeded generator
    #[default]
    Random,
    /// First pile in scan order
    First,
    /// Pile holding the most energy
    Largest,
}

/// What to do when a persisted binding no longer resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StaleBindingPolicy {
    /// Clear the binding so it is re-acquired
    #[default]
    SelfHeal,
    /// Keep the binding and only report it
    Retain,
}

/// Engine tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the pile-selection generator
    pub seed: u64,
    /// Default number of ticks for a sandbox run
    pub ticks: u64,
    pub pile_selection: PileSelection,
    pub stale_binding: StaleBindingPolicy,
    /// Radius of pile scans around pickup points and flags
    pub search_radius: u32,
    /// Lifespan at or below which an agent is reported as near expiry
    pub near_expiry_ticks: u32,
    /// Lifespan at or below which an agent is reported as critical
    pub critical_ticks: u32,
    /// Flag Builders refuel at
    pub refuel_flag: String,
    /// Flag Priests collect energy at
    pub priest_flag: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 1500,
            pile_selection: PileSelection::Random,
            stale_binding: StaleBindingPolicy::SelfHeal,
            search_radius: 1,
            near_expiry_ticks: 10,
            critical_ticks: 2,
            refuel_flag: "builderRefuel".to_string(),
            priest_flag: "muleDrop".to_string(),
        }
    }
}

/// Role reassignment applied before dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    pub enabled: bool,
    /// Agents subject to reassignment
    pub agents: Vec<String>,
    /// Role while the home spawn still needs energy
    pub default_role: Role,
    /// Role while the home spawn is full
    pub surplus_role: Role,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            agents: vec!["Harvester1".to_string(), "Harvester2".to_string()],
            default_role: Role::Harvester,
            surplus_role: Role::Priest,
        }
    }
}

/// The roster used when the configuration does not supply one
pub fn default_roster() -> Vec<WorkerSpec> {
    use BodyPart::*;
    use memory_keys::*;

    let miner_body = vec![Work, Work, Move, Move];
    let mule_body = vec![Carry, Carry, Carry, Carry, Move, Move];

    vec![
        WorkerSpec::new("Harvester1", Role::Harvester, vec![Carry, Carry, Work, Move, Move])
            .keep_spawning(false),
        WorkerSpec::new("Miner1", Role::Miner, miner_body.clone()).with_memory(SOURCE_ID, "src-a"),
        WorkerSpec::new("Miner2", Role::Miner, miner_body).with_memory(SOURCE_ID, "src-b"),
        WorkerSpec::new("Mule1", Role::Mule, mule_body.clone())
            .with_memory(PICKUP_ID, "flag-mulePickup1")
            .with_memory(DROP_ID, "spawn-HQ"),
        WorkerSpec::new("Mule2", Role::Mule, mule_body.clone())
            .with_memory(PICKUP_ID, "flag-mulePickup2")
            .with_memory(DROP_ID, "flag-muleDrop"),
        WorkerSpec::new("Mule3", Role::Mule, mule_body)
            .with_memory(PICKUP_ID, "flag-mulePickup1")
            .with_memory(DROP_ID, "flag-builderRefuel"),
        WorkerSpec::new("Builder1", Role::Builder, vec![Work, Carry, Carry, Carry, Move]),
        WorkerSpec::new("Priest1", Role::Priest, vec![Carry, Carry, Work, Move, Move]),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            supervisor: SupervisorConfig::default(),
            roster: default_roster(),
            scenario: ScenarioConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the configuration as a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Roster names must be present and unique: they key agents and memory
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for spec in &self.roster {
            if spec.name.trim().is_empty() {
                return Err(ConfigError::InvalidRoster("roster entry with a blank name".into()));
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(ConfigError::InvalidRoster(format!(
                    "duplicate roster name '{}'",
                    spec.name
                )));
            }
        }
        if self.engine.critical_ticks > self.engine.near_expiry_ticks {
            return Err(ConfigError::InvalidEngine(
                "critical_ticks must not exceed near_expiry_ticks".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[source] toml::ser::Error),
    #[error("invalid roster: {0}")]
    InvalidRoster(String),
    #[error("invalid engine settings: {0}")]
    InvalidEngine(String),
}
