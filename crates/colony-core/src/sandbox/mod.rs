//! Sandbox World
//!
//! A single-room reference world implementing the facade on top of a
//! `bevy_ecs` world. The engine ticks against it, then `advance` runs the
//! world rules and moves the clock forward.

mod colony_world;
pub mod components;
pub mod journal;
pub mod rules;
pub mod scenario;

use bevy_ecs::prelude::*;
use std::collections::HashMap;

use crate::components::{AgentView, ObjectId, Position, Spawn, WorldObject};
use crate::facade::CommandError;
use crate::state::ColonyState;
use crate::tick::{ColonyEngine, TickOutcome};

use components::{
    Clock, ControllerCore, Creep, EnergySource, FlagMarker, Located, Pile, Site, SpawnFacility,
    Tag,
};
pub use journal::{Command, JournalEntry};
pub use scenario::{AgentSetup, ScenarioConfig, SiteSetup};

/// Identifier of the flag with the given name
pub fn flag_id(name: &str) -> ObjectId {
    ObjectId::new(format!("flag-{}", name))
}

/// Identifier of the spawn with the given name
pub fn spawn_id(name: &str) -> ObjectId {
    ObjectId::new(format!("spawn-{}", name))
}

pub struct Sandbox {
    world: World,
    schedule: Schedule,
    objects: HashMap<ObjectId, Entity>,
    creeps: HashMap<String, Entity>,
    home: Option<Entity>,
    journal: Vec<JournalEntry>,
}

impl Sandbox {
    /// Build the room described by `scenario`
    pub fn new(scenario: &ScenarioConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(Clock {
            time: scenario.start_tick,
        });

        let mut sandbox = Self {
            world,
            schedule: rules::build_schedule(),
            objects: HashMap::new(),
            creeps: HashMap::new(),
            home: None,
            journal: Vec::new(),
        };

        if let Some(spawn) = &scenario.spawn {
            let entity = sandbox.add_object(
                spawn_id(&spawn.name),
                spawn.pos,
                SpawnFacility {
                    name: spawn.name.clone(),
                    energy: spawn.energy,
                    capacity: spawn.energy_capacity,
                    hits: 5000,
                    hits_max: 5000,
                    busy_for: 0,
                },
            );
            sandbox.home = Some(entity);
        }
        if let Some(c) = &scenario.controller {
            sandbox.add_object(
                ObjectId::new(c.id.clone()),
                c.pos,
                ControllerCore {
                    level: c.level,
                    progress: c.progress,
                    progress_total: rules::level_progress_total(c.level),
                },
            );
        }
        for source in &scenario.sources {
            sandbox.add_object(
                ObjectId::new(source.id.clone()),
                source.pos,
                EnergySource {
                    energy: source.energy_capacity,
                    capacity: source.energy_capacity,
                    ticks_to_regeneration: rules::SOURCE_REGEN_TICKS,
                },
            );
        }
        for flag in &scenario.flags {
            sandbox.add_object(
                flag_id(&flag.name),
                flag.pos,
                FlagMarker {
                    name: flag.name.clone(),
                },
            );
        }
        for site in &scenario.sites {
            sandbox.add_site(site.clone());
        }
        for pile in &scenario.piles {
            sandbox.add_pile(pile.pos, pile.amount);
        }
        for agent in &scenario.agents {
            sandbox.add_agent(agent.clone());
        }

        tracing::debug!(
            objects = sandbox.objects.len(),
            agents = sandbox.creeps.len(),
            "sandbox room ready"
        );
        sandbox
    }

    fn add_object(&mut self, id: ObjectId, pos: Position, bundle: impl Bundle) -> Entity {
        let entity = self.world.spawn((Tag(id.clone()), Located(pos), bundle)).id();
        self.objects.insert(id, entity);
        entity
    }

    pub fn add_site(&mut self, site: SiteSetup) {
        self.add_object(
            ObjectId::new(site.id),
            site.pos,
            Site {
                progress: site.progress,
                total: site.progress_total,
            },
        );
    }

    pub fn add_agent(&mut self, agent: AgentSetup) {
        let entity = self
            .world
            .spawn((
                Located(agent.pos),
                Creep {
                    name: agent.name.clone(),
                    body: agent.body,
                    energy: agent.energy,
                    ticks_to_live: agent.ticks_to_live,
                    spawning_for: agent.spawning_for,
                    last_moved: None,
                },
            ))
            .id();
        self.creeps.insert(agent.name, entity);
    }

    /// Put energy on the ground, merging with any pile already there
    pub fn add_pile(&mut self, pos: Position, amount: u32) {
        if amount == 0 {
            return;
        }
        match self.pile_entity(pos) {
            Some(entity) => {
                if let Some(mut pile) = self.world.get_mut::<Pile>(entity) {
                    pile.amount += amount;
                }
            }
            None => {
                self.world.spawn((Located(pos), Pile { amount }));
            }
        }
    }

    fn pile_entity(&self, pos: Position) -> Option<Entity> {
        self.world
            .iter_entities()
            .find(|e| e.contains::<Pile>() && e.get::<Located>().is_some_and(|l| l.0 == pos))
            .map(|e| e.id())
    }

    /// Energy lying on one tile
    pub fn pile_at(&self, pos: Position) -> u32 {
        self.pile_entity(pos)
            .and_then(|e| self.world.get::<Pile>(e))
            .map_or(0, |p| p.amount)
    }

    pub fn now(&self) -> u64 {
        self.world.resource::<Clock>().time
    }

    /// Run the world rules for the tick just played and advance the clock
    pub fn advance(&mut self) {
        self.schedule.run(&mut self.world);
        let world = &self.world;
        self.objects.retain(|_, e| world.get_entity(*e).is_some());
        self.creeps.retain(|_, e| world.get_entity(*e).is_some());
    }

    /// One engine tick followed by the world rules
    pub fn step(&mut self, engine: &mut ColonyEngine, state: ColonyState) -> TickOutcome {
        let outcome = engine.tick(self, state);
        self.advance();
        outcome
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<JournalEntry> {
        std::mem::take(&mut self.journal)
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Live view of one agent
    pub fn agent(&self, name: &str) -> Option<AgentView> {
        self.creeps.get(name).and_then(|e| self.agent_view(*e))
    }

    pub fn home(&self) -> Option<Spawn> {
        self.home.and_then(|e| self.spawn_view(e))
    }

    pub fn set_spawn_energy(&mut self, energy: u32) {
        if let Some(mut spawn) = self.home.and_then(|e| self.world.get_mut::<SpawnFacility>(e)) {
            spawn.energy = energy;
        }
    }

    pub fn set_controller_level(&mut self, level: u8) {
        let mut cores = self.world.query::<&mut ControllerCore>();
        for mut core in cores.iter_mut(&mut self.world) {
            core.level = level;
            core.progress = 0;
            core.progress_total = rules::level_progress_total(level);
        }
    }

    pub fn set_site_progress(&mut self, id: &ObjectId, progress: u32) -> bool {
        let Some(entity) = self.objects.get(id).copied() else {
            return false;
        };
        match self.world.get_mut::<Site>(entity) {
            Some(mut site) => {
                site.progress = progress;
                true
            }
            None => false,
        }
    }

    /// Take an object out of the room
    pub fn remove_object(&mut self, id: &ObjectId) -> bool {
        match self.objects.remove(id) {
            Some(entity) => self.world.despawn(entity),
            None => false,
        }
    }

    fn record(&mut self, command: Command, result: Result<(), CommandError>) -> Result<(), CommandError> {
        self.journal.push(JournalEntry {
            tick: self.now(),
            command,
            result: result.clone(),
        });
        result
    }

    fn agent_view(&self, entity: Entity) -> Option<AgentView> {
        let creep = self.world.get::<Creep>(entity)?;
        let pos = self.world.get::<Located>(entity)?.0;
        let spawning = creep.is_spawning();
        Some(AgentView {
            name: creep.name.clone(),
            pos,
            energy: creep.energy,
            energy_capacity: creep.capacity(),
            ticks_to_live: (!spawning).then_some(creep.ticks_to_live),
            spawning,
        })
    }

    fn spawn_view(&self, entity: Entity) -> Option<Spawn> {
        let spawn = self.world.get::<SpawnFacility>(entity)?;
        Some(Spawn {
            id: self.world.get::<Tag>(entity)?.0.clone(),
            name: spawn.name.clone(),
            pos: self.world.get::<Located>(entity)?.0,
            energy: spawn.energy,
            energy_capacity: spawn.capacity,
            hits: spawn.hits,
            hits_max: spawn.hits_max,
        })
    }

    fn object_view(&self, entity: Entity) -> Option<WorldObject> {
        let e = self.world.get_entity(entity)?;
        let id = e.get::<Tag>()?.0.clone();
        let pos = e.get::<Located>()?.0;

        if let Some(source) = e.get::<EnergySource>() {
            return Some(WorldObject::Source(crate::components::Source {
                id,
                pos,
                energy: source.energy,
                energy_capacity: source.capacity,
            }));
        }
        if let Some(site) = e.get::<Site>() {
            return Some(WorldObject::ConstructionSite(crate::components::ConstructionSite {
                id,
                pos,
                progress: site.progress,
                progress_total: site.total,
            }));
        }
        if e.contains::<SpawnFacility>() {
            return self.spawn_view(entity).map(WorldObject::Spawn);
        }
        if let Some(core) = e.get::<ControllerCore>() {
            return Some(WorldObject::Controller(crate::components::Controller {
                id,
                pos,
                level: core.level,
                progress: core.progress,
                progress_total: core.progress_total,
            }));
        }
        if let Some(flag) = e.get::<FlagMarker>() {
            return Some(WorldObject::Flag(crate::components::Flag {
                id,
                name: flag.name.clone(),
                pos,
            }));
        }
        None
    }

    /// The live, non-spawning agent behind a command
    fn active_creep(&self, agent: &str) -> Result<(Entity, Creep, Position), CommandError> {
        let entity = self
            .creeps
            .get(agent)
            .copied()
            .ok_or_else(|| CommandError::NoSuchAgent(agent.to_string()))?;
        let creep = self
            .world
            .get::<Creep>(entity)
            .cloned()
            .ok_or_else(|| CommandError::NoSuchAgent(agent.to_string()))?;
        if creep.is_spawning() {
            return Err(CommandError::Spawning);
        }
        let pos = self
            .world
            .get::<Located>(entity)
            .map(|l| l.0)
            .ok_or_else(|| CommandError::NoSuchAgent(agent.to_string()))?;
        Ok((entity, creep, pos))
    }

    fn target(&self, id: &ObjectId) -> Result<(Entity, Position), CommandError> {
        let entity = self
            .objects
            .get(id)
            .copied()
            .ok_or_else(|| CommandError::InvalidTarget(id.clone()))?;
        let pos = self
            .world
            .get::<Located>(entity)
            .map(|l| l.0)
            .ok_or_else(|| CommandError::InvalidTarget(id.clone()))?;
        Ok((entity, pos))
    }

    fn set_creep_energy(&mut self, entity: Entity, energy: u32) {
        if let Some(mut creep) = self.world.get_mut::<Creep>(entity) {
            creep.energy = energy;
        }
    }
}
