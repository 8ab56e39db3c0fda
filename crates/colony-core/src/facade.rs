//! World Facade
//!
//! The narrow interface through which the engine observes and acts on the
//! simulation. Queries take `&self`; commands take `&mut self` and are
//! resolved by the world, not by the engine.

use serde::{Deserialize, Serialize};

use crate::components::{
    AgentMemory, AgentView, Area, BodyPart, ConstructionSite, Controller, EnergyPile, Flag,
    ObjectId, Position, Source, Spawn, WorldObject,
};

/// Outcome of an agent creation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnOutcome {
    Success,
    /// A creation is already in progress at the spawning facility
    Busy,
    InsufficientEnergy,
    InvalidComposition,
}

/// Why the world refused a command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("agent '{0}' does not exist")]
    NoSuchAgent(String),
    #[error("target {0} does not exist")]
    InvalidTarget(ObjectId),
    #[error("target is out of range")]
    NotInRange,
    #[error("agent lacks the body parts for this action")]
    NoBodyPart,
    #[error("not enough energy")]
    NotEnoughEnergy,
    #[error("target is full")]
    Full,
    #[error("agent is still spawning")]
    Spawning,
}

pub type CommandResult = Result<(), CommandError>;

/// Everything the engine needs from the simulated world
pub trait ColonyWorld {
    // --- queries ---

    /// Current game time
    fn game_time(&self) -> u64;

    /// The home spawn; also the colony's storage
    fn home_spawn(&self) -> Option<Spawn>;

    /// The home room controller
    fn controller(&self) -> Option<Controller>;

    /// All live agents, including those still spawning
    fn agents(&self) -> Vec<AgentView>;

    /// Nearest source with energy left to `from`
    fn nearest_active_source(&self, from: Position) -> Option<Source>;

    /// Nearest construction site to `from`
    fn nearest_construction_site(&self, from: Position) -> Option<ConstructionSite>;

    /// Resolve an identifier to the object it names
    fn resolve(&self, id: &ObjectId) -> Option<WorldObject>;

    /// Look up an operator flag by name
    fn flag(&self, name: &str) -> Option<Flag>;

    /// Ground energy piles inside an area
    fn energy_in_area(&self, area: Area) -> Vec<EnergyPile>;

    // --- commands ---

    /// Move one step toward a position
    fn move_toward(&mut self, agent: &str, target: Position) -> CommandResult;

    /// Extract energy from a source
    fn harvest(&mut self, agent: &str, source: &ObjectId) -> CommandResult;

    /// Transfer energy to a storage structure; `None` transfers everything
    fn transfer_energy(&mut self, agent: &str, target: &ObjectId, amount: Option<u32>)
        -> CommandResult;

    /// Put carried energy into a construction site
    fn build(&mut self, agent: &str, site: &ObjectId) -> CommandResult;

    /// Pick up the ground pile lying at `at`
    fn pickup(&mut self, agent: &str, at: Position) -> CommandResult;

    /// Drop the whole load on the agent's tile
    fn drop_energy(&mut self, agent: &str) -> CommandResult;

    /// Put carried energy into the controller
    fn upgrade_controller(&mut self, agent: &str, controller: &ObjectId) -> CommandResult;

    /// Remove a construction site from the world
    fn remove_construction_site(&mut self, site: &ObjectId) -> CommandResult;

    /// Ask the home spawn to create an agent
    fn request_agent_creation(
        &mut self,
        body: &[BodyPart],
        name: &str,
        memory: &AgentMemory,
    ) -> SpawnOutcome;
}

/// Ranges within which work commands take effect
pub mod ranges {
    /// Build and upgrade work reach three tiles
    pub const WORK_RANGE: u32 = 3;
}
