//! Roster Components
//!
//! The operator's declarative table of desired workers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::agent::Role;

/// Energy a single CARRY part can hold
pub const CARRY_CAPACITY: u32 = 50;

/// Upper bound on body size accepted by the spawn
pub const MAX_BODY_PARTS: usize = 50;

/// A body part; the ordered list of parts is an agent's body composition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyPart {
    Move,
    Work,
    Carry,
    Attack,
    RangedAttack,
    Heal,
    Tough,
}

impl BodyPart {
    /// Spawn energy cost of the part
    pub fn cost(&self) -> u32 {
        match self {
            BodyPart::Move => 50,
            BodyPart::Work => 100,
            BodyPart::Carry => 50,
            BodyPart::Attack => 80,
            BodyPart::RangedAttack => 150,
            BodyPart::Heal => 200,
            BodyPart::Tough => 10,
        }
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BodyPart::Move => "MOVE",
            BodyPart::Work => "WORK",
            BodyPart::Carry => "CARRY",
            BodyPart::Attack => "ATTACK",
            BodyPart::RangedAttack => "RANGED_ATTACK",
            BodyPart::Heal => "HEAL",
            BodyPart::Tough => "TOUGH",
        };
        f.write_str(label)
    }
}

/// Total spawn cost of a body
pub fn body_cost(body: &[BodyPart]) -> u32 {
    body.iter().map(BodyPart::cost).sum()
}

/// Number of parts of one kind
pub fn count_parts(body: &[BodyPart], part: BodyPart) -> u32 {
    body.iter().filter(|p| **p == part).count() as u32
}

/// Energy the body can carry
pub fn carry_capacity(body: &[BodyPart]) -> u32 {
    count_parts(body, BodyPart::Carry) * CARRY_CAPACITY
}

/// One desired worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSpec {
    /// Agent name; the key that ties a roster entry to a live agent
    pub name: String,
    pub role: Role,
    pub body: Vec<BodyPart>,
    /// Respawn the agent whenever it is missing
    #[serde(default, alias = "keepSpawning")]
    pub keep_spawning: bool,
    /// Extra memory written at creation, after the role
    #[serde(default)]
    pub memory: BTreeMap<String, String>,
}

impl WorkerSpec {
    pub fn new(name: impl Into<String>, role: Role, body: Vec<BodyPart>) -> Self {
        Self {
            name: name.into(),
            role,
            body,
            keep_spawning: true,
            memory: BTreeMap::new(),
        }
    }

    pub fn with_memory(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.memory.insert(key.into(), value.into());
        self
    }

    pub fn keep_spawning(mut self, keep: bool) -> Self {
        self.keep_spawning = keep;
        self
    }

    pub fn cost(&self) -> u32 {
        body_cost(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BodyPart::*;

    #[test]
    fn test_body_cost() {
        assert_eq!(body_cost(&[Work, Work, Move, Move]), 300);
        assert_eq!(body_cost(&[Carry, Carry, Carry, Carry, Move, Move]), 300);
        assert_eq!(body_cost(&[]), 0);
        assert_eq!(body_cost(&[Tough, Heal, RangedAttack, Attack]), 440);
    }

    #[test]
    fn test_carry_capacity() {
        assert_eq!(carry_capacity(&[Work, Carry, Carry, Carry, Move]), 150);
        assert_eq!(carry_capacity(&[Work, Work, Move, Move]), 0);
    }

    #[test]
    fn test_body_part_serialization() {
        assert_eq!(serde_json::to_string(&RangedAttack).unwrap(), r#""RANGED_ATTACK""#);
        assert_eq!(serde_json::from_str::<BodyPart>(r#""WORK""#).unwrap(), Work);
    }

    #[test]
    fn test_worker_spec_from_toml_accepts_camel_case_flag() {
        let spec: WorkerSpec = toml::from_str(
            r#"
            name = "Miner1"
            role = "Miner"
            body = ["WORK", "WORK", "MOVE", "MOVE"]
            keepSpawning = true
            memory = { sourceID = "src-a" }
            "#,
        )
        .unwrap();
        assert!(spec.keep_spawning);
        assert_eq!(spec.memory.get("sourceID").map(String::as_str), Some("src-a"));
        assert_eq!(spec.cost(), 300);
    }

    #[test]
    fn test_keep_spawning_defaults_to_false() {
        let spec: WorkerSpec =
            toml::from_str("name = \"Builder1\"\nrole = \"Builder\"\nbody = [\"WORK\"]\n").unwrap();
        assert!(!spec.keep_spawning);
        assert!(spec.memory.is_empty());
    }
}
