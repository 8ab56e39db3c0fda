//! Agent Components
//!
//! Roles, the persisted per-agent memory record, and the live view of an
//! agent that the world facade hands to the engine each tick.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::world::{ObjectId, Position};

/// Memory keys shared with the world's own memory format
pub mod memory_keys {
    pub const ROLE: &str = "role";
    /// Bound extraction node (Miner)
    pub const SOURCE_ID: &str = "sourceID";
    /// Bound pickup point (Mule)
    pub const PICKUP_ID: &str = "pickupID";
    /// Bound drop-off point (Mule)
    pub const DROP_ID: &str = "dropID";
    /// Bound construction site (Builder)
    pub const WORKSITE_ID: &str = "worksiteID";
    /// Refuel station in use (Builder)
    pub const REFUELSITE_ID: &str = "refuelsiteID";
}

use memory_keys::*;

/// The closed set of worker roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    /// Single-stage gatherer: extracts and carries energy home itself
    Harvester,
    /// Extracts from one bound source and lets the energy fall to the ground
    Miner,
    /// Hauls ground energy from a pickup point to a drop-off point
    Mule,
    /// Works on the nearest construction site
    Builder,
    /// Upgrades the controller
    Priest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Harvester => "Harvester",
            Role::Miner => "Miner",
            Role::Mule => "Mule",
            Role::Builder => "Builder",
            Role::Priest => "Priest",
        }
    }

    pub fn all() -> &'static [Role] {
        &[Role::Harvester, Role::Miner, Role::Mule, Role::Builder, Role::Priest]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role tag is not one of the known roles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role tag '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// What the persisted role tag of an agent resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleTag {
    Known(Role),
    /// A tag written by something other than this engine
    Unrecognized(String),
    Missing,
}

/// Persisted key/value record for one agent; the only per-agent state
/// carried between ticks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentMemory(BTreeMap<String, String>);

impl AgentMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memory for a freshly created agent: the role first, then the seed,
    /// so seed keys overwrite the role on conflict
    pub fn seeded(role: Role, seed: &BTreeMap<String, String>) -> Self {
        let mut memory = Self::new();
        memory.set(ROLE, role.as_str());
        for (key, value) in seed {
            memory.set(key.clone(), value.clone());
        }
        memory
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn role_tag(&self) -> RoleTag {
        match self.get(ROLE) {
            None => RoleTag::Missing,
            Some(tag) => match tag.parse::<Role>() {
                Ok(role) => RoleTag::Known(role),
                Err(UnknownRole(tag)) => RoleTag::Unrecognized(tag),
            },
        }
    }

    pub fn set_role(&mut self, role: Role) {
        self.set(ROLE, role.as_str());
    }

    fn id(&self, key: &str) -> Option<ObjectId> {
        self.get(key).filter(|v| !v.is_empty()).map(ObjectId::from)
    }

    pub fn source_id(&self) -> Option<ObjectId> {
        self.id(SOURCE_ID)
    }

    pub fn set_source_id(&mut self, id: &ObjectId) {
        self.set(SOURCE_ID, id.as_str());
    }

    pub fn clear_source_id(&mut self) {
        self.delete(SOURCE_ID);
    }

    pub fn pickup_id(&self) -> Option<ObjectId> {
        self.id(PICKUP_ID)
    }

    pub fn drop_id(&self) -> Option<ObjectId> {
        self.id(DROP_ID)
    }

    pub fn worksite_id(&self) -> Option<ObjectId> {
        self.id(WORKSITE_ID)
    }

    pub fn set_worksite_id(&mut self, id: &ObjectId) {
        self.set(WORKSITE_ID, id.as_str());
    }

    pub fn refuelsite_id(&self) -> Option<ObjectId> {
        self.id(REFUELSITE_ID)
    }

    pub fn set_refuelsite_id(&mut self, id: &ObjectId) {
        self.set(REFUELSITE_ID, id.as_str());
    }

    /// Drop the worksite binding together with its refuel companion
    pub fn clear_worksite(&mut self) {
        self.delete(WORKSITE_ID);
        self.delete(REFUELSITE_ID);
    }
}

/// A live agent as observed this tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentView {
    pub name: String,
    pub pos: Position,
    pub energy: u32,
    pub energy_capacity: u32,
    /// None while the agent is still being created
    pub ticks_to_live: Option<u32>,
    pub spawning: bool,
}

impl AgentView {
    /// Load is gated on capacity, so an agent that cannot carry is always "full"
    pub fn is_full(&self) -> bool {
        self.energy >= self.energy_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.energy == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Miner".parse::<Role>(), Ok(Role::Miner));
        assert_eq!("Priest".parse::<Role>(), Ok(Role::Priest));
        assert_eq!("miner".parse::<Role>(), Err(UnknownRole("miner".into())));
    }

    #[test]
    fn test_seeded_memory_applies_seed_after_role() {
        let mut seed = BTreeMap::new();
        seed.insert(SOURCE_ID.to_string(), "src-a".to_string());
        let memory = AgentMemory::seeded(Role::Miner, &seed);
        assert_eq!(memory.get(ROLE), Some("Miner"));
        assert_eq!(memory.source_id(), Some(ObjectId::from("src-a")));

        let mut overriding = BTreeMap::new();
        overriding.insert(ROLE.to_string(), "Mule".to_string());
        let memory = AgentMemory::seeded(Role::Miner, &overriding);
        assert_eq!(memory.role_tag(), RoleTag::Known(Role::Mule));
    }

    #[test]
    fn test_role_tag_variants() {
        let mut memory = AgentMemory::new();
        assert_eq!(memory.role_tag(), RoleTag::Missing);
        memory.set(ROLE, "Janitor");
        assert_eq!(memory.role_tag(), RoleTag::Unrecognized("Janitor".into()));
        memory.set_role(Role::Builder);
        assert_eq!(memory.role_tag(), RoleTag::Known(Role::Builder));
    }

    #[test]
    fn test_empty_binding_reads_as_unbound() {
        let mut memory = AgentMemory::new();
        memory.set(SOURCE_ID, "");
        assert_eq!(memory.source_id(), None);
    }

    #[test]
    fn test_clear_worksite_drops_refuel_binding() {
        let mut memory = AgentMemory::new();
        memory.set_worksite_id(&"site-1".into());
        memory.set_refuelsite_id(&"flag-builderRefuel".into());
        memory.clear_worksite();
        assert!(!memory.contains(WORKSITE_ID));
        assert!(!memory.contains(REFUELSITE_ID));
    }

    #[test]
    fn test_memory_serializes_as_plain_map() {
        let memory = AgentMemory::seeded(Role::Builder, &BTreeMap::new());
        let json = serde_json::to_string(&memory).unwrap();
        assert_eq!(json, r#"{"role":"Builder"}"#);
    }

    #[test]
    fn test_agent_without_carry_is_full() {
        let agent = AgentView {
            name: "Miner1".into(),
            pos: Position::new(0, 0),
            energy: 0,
            energy_capacity: 0,
            ticks_to_live: Some(1400),
            spawning: false,
        };
        assert!(agent.is_full());
        assert!(agent.is_empty());
    }
}
