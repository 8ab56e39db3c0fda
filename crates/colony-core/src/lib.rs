//! Colony Decision Engine Library
//!
//! Public API for the per-tick colony engine and its sandbox world.

pub mod components;
pub mod config;
pub mod events;
pub mod facade;
pub mod sandbox;
pub mod state;
pub mod systems;
pub mod tick;

pub use components::*;

pub use config::{Config, ConfigError, EngineConfig, PileSelection, StaleBindingPolicy, SupervisorConfig};
pub use events::EventLogger;
pub use facade::{ColonyWorld, CommandError, CommandResult, SpawnOutcome};
pub use sandbox::{Sandbox, ScenarioConfig};
pub use state::{ColonyState, ControllerState, StateError};
pub use tick::{ColonyEngine, TickOutcome};
