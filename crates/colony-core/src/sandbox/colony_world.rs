//! Facade implementation for the sandbox room.
//!
//! Queries sort their results so runs replay identically. Commands resolve
//! immediately against the ECS world and are journaled.

use crate::components::{
    body_cost, AgentMemory, AgentView, Area, BodyPart, ConstructionSite, Controller, EnergyPile,
    Flag, ObjectId, Position, Source, Spawn, WorldObject, MAX_BODY_PARTS,
};
use crate::facade::{ranges, ColonyWorld, CommandError, CommandResult, SpawnOutcome};

use super::components::{ControllerCore, Creep, EnergySource, Located, Pile, Site, SpawnFacility};
use super::rules::{
    level_progress_total, AGENT_LIFETIME, BUILD_PER_WORK, HARVEST_PER_WORK,
    MAX_CONTROLLER_LEVEL, SPAWN_TICKS_PER_PART, UPGRADE_PER_WORK,
};
use super::{flag_id, Command, Sandbox};

impl Sandbox {
    /// Closest matching object, ties broken by id
    fn nearest<T>(
        &self,
        from: Position,
        pick: impl Fn(WorldObject) -> Option<T>,
        locate: impl Fn(&T) -> (Position, ObjectId),
    ) -> Option<T> {
        let mut found: Vec<(u32, ObjectId, T)> = self
            .objects
            .values()
            .filter_map(|e| self.object_view(*e))
            .filter_map(pick)
            .map(|item| {
                let (pos, oid) = locate(&item);
                (from.range_to(pos), oid, item)
            })
            .collect();
        found.sort_by(|a, b| (a.0, &a.1).cmp(&(b.0, &b.1)));
        found.into_iter().next().map(|(_, _, item)| item)
    }

    fn apply_move(&mut self, agent: &str, target: Position) -> CommandResult {
        let now = self.now();
        let (entity, creep, pos) = self.active_creep(agent)?;
        if creep.parts(BodyPart::Move) == 0 {
            return Err(CommandError::NoBodyPart);
        }
        if pos.is_near_to(target) || creep.last_moved == Some(now) {
            return Ok(());
        }
        if let Some(mut located) = self.world.get_mut::<Located>(entity) {
            located.0 = pos.step_toward(target);
        }
        if let Some(mut creep) = self.world.get_mut::<Creep>(entity) {
            creep.last_moved = Some(now);
        }
        Ok(())
    }

    fn apply_harvest(&mut self, agent: &str, source_id: &ObjectId) -> CommandResult {
        let (entity, creep, pos) = self.active_creep(agent)?;
        let (source_entity, source_pos) = self.target(source_id)?;
        let available = self
            .world
            .get::<EnergySource>(source_entity)
            .map(|s| s.energy)
            .ok_or_else(|| CommandError::InvalidTarget(source_id.clone()))?;
        if !pos.is_near_to(source_pos) {
            return Err(CommandError::NotInRange);
        }
        let work = creep.parts(BodyPart::Work);
        if work == 0 {
            return Err(CommandError::NoBodyPart);
        }
        if available == 0 {
            return Err(CommandError::NotEnoughEnergy);
        }

        let amount = (work * HARVEST_PER_WORK).min(available);
        if let Some(mut source) = self.world.get_mut::<EnergySource>(source_entity) {
            source.energy -= amount;
        }
        let kept = amount.min(creep.free_capacity());
        self.set_creep_energy(entity, creep.energy + kept);
        // What the agent cannot hold lands under it
        self.add_pile(pos, amount - kept);
        Ok(())
    }

    fn apply_transfer(&mut self, agent: &str, target: &ObjectId, amount: Option<u32>) -> CommandResult {
        let (entity, creep, pos) = self.active_creep(agent)?;
        let (spawn_entity, spawn_pos) = self.target(target)?;
        let room = self
            .world
            .get::<SpawnFacility>(spawn_entity)
            .map(|s| s.capacity.saturating_sub(s.energy))
            .ok_or_else(|| CommandError::InvalidTarget(target.clone()))?;
        if !pos.is_near_to(spawn_pos) {
            return Err(CommandError::NotInRange);
        }
        if creep.energy == 0 {
            return Err(CommandError::NotEnoughEnergy);
        }
        if room == 0 {
            return Err(CommandError::Full);
        }

        let moved = amount.unwrap_or(creep.energy).min(creep.energy).min(room);
        if let Some(mut spawn) = self.world.get_mut::<SpawnFacility>(spawn_entity) {
            spawn.energy += moved;
        }
        self.set_creep_energy(entity, creep.energy - moved);
        Ok(())
    }

    fn apply_build(&mut self, agent: &str, site_id: &ObjectId) -> CommandResult {
        let (entity, creep, pos) = self.active_creep(agent)?;
        let (site_entity, site_pos) = self.target(site_id)?;
        let remaining = self
            .world
            .get::<Site>(site_entity)
            .map(|s| s.total.saturating_sub(s.progress))
            .ok_or_else(|| CommandError::InvalidTarget(site_id.clone()))?;
        if !pos.in_range_to(site_pos, ranges::WORK_RANGE) {
            return Err(CommandError::NotInRange);
        }
        let work = creep.parts(BodyPart::Work);
        if work == 0 {
            return Err(CommandError::NoBodyPart);
        }
        if creep.energy == 0 {
            return Err(CommandError::NotEnoughEnergy);
        }

        let amount = (work * BUILD_PER_WORK).min(creep.energy).min(remaining);
        if let Some(mut site) = self.world.get_mut::<Site>(site_entity) {
            site.progress += amount;
        }
        self.set_creep_energy(entity, creep.energy - amount);
        Ok(())
    }

    fn apply_pickup(&mut self, agent: &str, at: Position) -> CommandResult {
        let (entity, creep, pos) = self.active_creep(agent)?;
        if !pos.is_near_to(at) {
            return Err(CommandError::NotInRange);
        }
        let pile_entity = self
            .pile_entity(at)
            .ok_or_else(|| CommandError::InvalidTarget(ObjectId::new(format!("pile@{}", at))))?;
        let free = creep.free_capacity();
        if free == 0 {
            return Err(CommandError::Full);
        }

        let mut taken = 0;
        let mut emptied = false;
        if let Some(mut pile) = self.world.get_mut::<Pile>(pile_entity) {
            taken = free.min(pile.amount);
            pile.amount -= taken;
            emptied = pile.amount == 0;
        }
        if emptied {
            self.world.despawn(pile_entity);
        }
        self.set_creep_energy(entity, creep.energy + taken);
        Ok(())
    }

    fn apply_drop(&mut self, agent: &str) -> CommandResult {
        let (entity, creep, pos) = self.active_creep(agent)?;
        if creep.energy == 0 {
            return Err(CommandError::NotEnoughEnergy);
        }
        self.add_pile(pos, creep.energy);
        self.set_creep_energy(entity, 0);
        Ok(())
    }

    fn apply_upgrade(&mut self, agent: &str, controller_id: &ObjectId) -> CommandResult {
        let (entity, creep, pos) = self.active_creep(agent)?;
        let (core_entity, core_pos) = self.target(controller_id)?;
        if self.world.get::<ControllerCore>(core_entity).is_none() {
            return Err(CommandError::InvalidTarget(controller_id.clone()));
        }
        if !pos.in_range_to(core_pos, ranges::WORK_RANGE) {
            return Err(CommandError::NotInRange);
        }
        let work = creep.parts(BodyPart::Work);
        if work == 0 {
            return Err(CommandError::NoBodyPart);
        }
        if creep.energy == 0 {
            return Err(CommandError::NotEnoughEnergy);
        }

        let amount = (work * UPGRADE_PER_WORK).min(creep.energy);
        if let Some(mut core) = self.world.get_mut::<ControllerCore>(core_entity) {
            if core.level < MAX_CONTROLLER_LEVEL {
                core.progress += amount;
                while core.level < MAX_CONTROLLER_LEVEL && core.progress >= core.progress_total {
                    core.progress -= core.progress_total;
                    core.level += 1;
                    core.progress_total = level_progress_total(core.level);
                    tracing::info!(level = core.level, "controller reached a new level");
                }
            }
        }
        self.set_creep_energy(entity, creep.energy - amount);
        Ok(())
    }

    fn apply_creation(&mut self, body: &[BodyPart], name: &str) -> SpawnOutcome {
        if body.is_empty() || body.len() > MAX_BODY_PARTS {
            return SpawnOutcome::InvalidComposition;
        }
        let Some(home) = self.home else {
            tracing::warn!(agent = name, "no spawn to create agents at");
            return SpawnOutcome::Busy;
        };
        let Some((spawn_pos, energy, busy_for)) = self
            .world
            .get::<SpawnFacility>(home)
            .zip(self.world.get::<Located>(home))
            .map(|(s, l)| (l.0, s.energy, s.busy_for))
        else {
            return SpawnOutcome::Busy;
        };
        if busy_for > 0 || self.creeps.contains_key(name) {
            return SpawnOutcome::Busy;
        }
        let cost = body_cost(body);
        if cost > energy {
            return SpawnOutcome::InsufficientEnergy;
        }

        let spawn_time = body.len() as u32 * SPAWN_TICKS_PER_PART;
        if let Some(mut spawn) = self.world.get_mut::<SpawnFacility>(home) {
            spawn.energy -= cost;
            spawn.busy_for = spawn_time;
        }
        self.add_agent(
            super::AgentSetup::new(name, body.to_vec(), Position::new(spawn_pos.x, spawn_pos.y + 1))
                .ticks_to_live(AGENT_LIFETIME)
                .spawning_for(spawn_time),
        );
        SpawnOutcome::Success
    }
}

impl ColonyWorld for Sandbox {
    fn game_time(&self) -> u64 {
        self.now()
    }

    fn home_spawn(&self) -> Option<Spawn> {
        self.home()
    }

    fn controller(&self) -> Option<Controller> {
        let mut controllers: Vec<Controller> = self
            .objects
            .values()
            .filter_map(|e| match self.object_view(*e) {
                Some(WorldObject::Controller(c)) => Some(c),
                _ => None,
            })
            .collect();
        controllers.sort_by(|a, b| a.id.cmp(&b.id));
        controllers.into_iter().next()
    }

    fn agents(&self) -> Vec<AgentView> {
        let mut agents: Vec<AgentView> = self
            .creeps
            .values()
            .filter_map(|e| self.agent_view(*e))
            .collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));
        agents
    }

    fn nearest_active_source(&self, from: Position) -> Option<Source> {
        self.nearest(
            from,
            |obj| match obj {
                WorldObject::Source(s) if s.is_active() => Some(s),
                _ => None,
            },
            |s| (s.pos, s.id.clone()),
        )
    }

    fn nearest_construction_site(&self, from: Position) -> Option<ConstructionSite> {
        self.nearest(
            from,
            |obj| match obj {
                WorldObject::ConstructionSite(s) if !s.is_complete() => Some(s),
                _ => None,
            },
            |s| (s.pos, s.id.clone()),
        )
    }

    fn resolve(&self, id: &ObjectId) -> Option<WorldObject> {
        self.objects.get(id).and_then(|e| self.object_view(*e))
    }

    fn flag(&self, name: &str) -> Option<Flag> {
        match self.resolve(&flag_id(name)) {
            Some(WorldObject::Flag(flag)) => Some(flag),
            _ => None,
        }
    }

    fn energy_in_area(&self, area: Area) -> Vec<EnergyPile> {
        let mut piles: Vec<EnergyPile> = self
            .world
            .iter_entities()
            .filter_map(|e| {
                let pile = e.get::<Pile>()?;
                let pos = e.get::<Located>()?.0;
                area.contains(pos).then_some(EnergyPile {
                    pos,
                    amount: pile.amount,
                })
            })
            .collect();
        piles.sort_by_key(|p| (p.pos.y, p.pos.x));
        piles
    }

    fn move_toward(&mut self, agent: &str, target: Position) -> CommandResult {
        let result = self.apply_move(agent, target);
        self.record(
            Command::Move {
                agent: agent.to_string(),
                target,
            },
            result,
        )
    }

    fn harvest(&mut self, agent: &str, source: &ObjectId) -> CommandResult {
        let result = self.apply_harvest(agent, source);
        self.record(
            Command::Harvest {
                agent: agent.to_string(),
                source: source.clone(),
            },
            result,
        )
    }

    fn transfer_energy(&mut self, agent: &str, target: &ObjectId, amount: Option<u32>) -> CommandResult {
        let result = self.apply_transfer(agent, target, amount);
        self.record(
            Command::Transfer {
                agent: agent.to_string(),
                target: target.clone(),
                amount,
            },
            result,
        )
    }

    fn build(&mut self, agent: &str, site: &ObjectId) -> CommandResult {
        let result = self.apply_build(agent, site);
        self.record(
            Command::Build {
                agent: agent.to_string(),
                site: site.clone(),
            },
            result,
        )
    }

    fn pickup(&mut self, agent: &str, at: Position) -> CommandResult {
        let result = self.apply_pickup(agent, at);
        self.record(
            Command::Pickup {
                agent: agent.to_string(),
                at,
            },
            result,
        )
    }

    fn drop_energy(&mut self, agent: &str) -> CommandResult {
        let result = self.apply_drop(agent);
        self.record(
            Command::Drop {
                agent: agent.to_string(),
            },
            result,
        )
    }

    fn upgrade_controller(&mut self, agent: &str, controller: &ObjectId) -> CommandResult {
        let result = self.apply_upgrade(agent, controller);
        self.record(
            Command::Upgrade {
                agent: agent.to_string(),
                controller: controller.clone(),
            },
            result,
        )
    }

    fn remove_construction_site(&mut self, site: &ObjectId) -> CommandResult {
        let result = match self.objects.get(site).copied() {
            Some(entity) if self.world.get::<Site>(entity).is_some() => {
                self.remove_object(site);
                Ok(())
            }
            _ => Err(CommandError::InvalidTarget(site.clone())),
        };
        self.record(Command::RemoveSite { site: site.clone() }, result)
    }

    fn request_agent_creation(
        &mut self,
        body: &[BodyPart],
        name: &str,
        memory: &AgentMemory,
    ) -> SpawnOutcome {
        let outcome = self.apply_creation(body, name);
        // Failed creations are journaled too; the outcome carries the answer
        let _ = self.record(
            Command::CreateAgent {
                name: name.to_string(),
                body: body.to_vec(),
                memory: memory.clone(),
                outcome,
            },
            Ok(()),
        );
        outcome
    }
}
