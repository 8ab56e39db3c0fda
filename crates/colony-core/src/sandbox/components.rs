//! Sandbox Components
//!
//! ECS storage for the objects of the sandbox room.

use bevy_ecs::prelude::*;

use crate::components::{BodyPart, ObjectId, Position};

/// Identifier of an addressable object
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Tag(pub ObjectId);

/// Tile an object occupies
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located(pub Position);

#[derive(Component, Debug, Clone)]
pub struct EnergySource {
    pub energy: u32,
    pub capacity: u32,
    pub ticks_to_regeneration: u32,
}

#[derive(Component, Debug, Clone)]
pub struct Site {
    pub progress: u32,
    pub total: u32,
}

#[derive(Component, Debug, Clone)]
pub struct SpawnFacility {
    pub name: String,
    pub energy: u32,
    pub capacity: u32,
    pub hits: u32,
    pub hits_max: u32,
    /// Ticks until the facility can create again
    pub busy_for: u32,
}

#[derive(Component, Debug, Clone)]
pub struct ControllerCore {
    pub level: u8,
    pub progress: u32,
    pub progress_total: u32,
}

#[derive(Component, Debug, Clone)]
pub struct FlagMarker {
    pub name: String,
}

/// Energy lying on the ground
#[derive(Component, Debug, Clone, Copy)]
pub struct Pile {
    pub amount: u32,
}

/// A live agent
#[derive(Component, Debug, Clone)]
pub struct Creep {
    pub name: String,
    pub body: Vec<BodyPart>,
    pub energy: u32,
    pub ticks_to_live: u32,
    /// Ticks left until the agent leaves the spawn
    pub spawning_for: u32,
    /// Game time of the last completed move
    pub last_moved: Option<u64>,
}

impl Creep {
    pub fn capacity(&self) -> u32 {
        crate::components::carry_capacity(&self.body)
    }

    pub fn free_capacity(&self) -> u32 {
        self.capacity().saturating_sub(self.energy)
    }

    pub fn parts(&self, part: BodyPart) -> u32 {
        crate::components::count_parts(&self.body, part)
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning_for > 0
    }
}

/// Game time
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Clock {
    pub time: u64,
}
