//! World Rules
//!
//! Systems the sandbox runs after every engine tick: agent aging and
//! spawning, spawn and source regeneration, pile decay, and the clock.

use bevy_ecs::prelude::*;

use super::components::{Clock, Creep, EnergySource, Pile, SpawnFacility};

/// Energy extracted per WORK part per harvest
pub const HARVEST_PER_WORK: u32 = 2;
/// Build progress per WORK part per build
pub const BUILD_PER_WORK: u32 = 5;
/// Controller progress per WORK part per upgrade
pub const UPGRADE_PER_WORK: u32 = 1;
pub const SOURCE_REGEN_TICKS: u32 = 300;
/// The spawn regenerates on its own only below this level
pub const SPAWN_REGEN_CEILING: u32 = 300;
pub const SPAWN_TICKS_PER_PART: u32 = 3;
pub const AGENT_LIFETIME: u32 = 1500;
pub const MAX_CONTROLLER_LEVEL: u8 = 8;

/// Progress needed to leave each controller level
pub fn level_progress_total(level: u8) -> u32 {
    match level {
        1 => 200,
        2 => 45_000,
        3 => 135_000,
        4 => 405_000,
        5 => 1_215_000,
        6 => 3_645_000,
        7 => 10_935_000,
        _ => 0,
    }
}

/// Ground energy lost per tick
pub fn pile_decay(amount: u32) -> u32 {
    amount.div_ceil(1000)
}

/// Count down spawning agents and age the others; expired agents vanish
pub fn age_creeps(mut commands: Commands, mut creeps: Query<(Entity, &mut Creep)>) {
    for (entity, mut creep) in creeps.iter_mut() {
        if creep.spawning_for > 0 {
            creep.spawning_for -= 1;
            continue;
        }
        creep.ticks_to_live = creep.ticks_to_live.saturating_sub(1);
        if creep.ticks_to_live == 0 {
            tracing::debug!(agent = %creep.name, "agent expired");
            commands.entity(entity).despawn();
        }
    }
}

pub fn regenerate_spawns(mut spawns: Query<&mut SpawnFacility>) {
    for mut spawn in spawns.iter_mut() {
        spawn.busy_for = spawn.busy_for.saturating_sub(1);
        if spawn.energy < SPAWN_REGEN_CEILING.min(spawn.capacity) {
            spawn.energy += 1;
        }
    }
}

pub fn refill_sources(mut sources: Query<&mut EnergySource>) {
    for mut source in sources.iter_mut() {
        source.ticks_to_regeneration = source.ticks_to_regeneration.saturating_sub(1);
        if source.ticks_to_regeneration == 0 {
            source.energy = source.capacity;
            source.ticks_to_regeneration = SOURCE_REGEN_TICKS;
        }
    }
}

pub fn decay_piles(mut commands: Commands, mut piles: Query<(Entity, &mut Pile)>) {
    for (entity, mut pile) in piles.iter_mut() {
        pile.amount = pile.amount.saturating_sub(pile_decay(pile.amount));
        if pile.amount == 0 {
            commands.entity(entity).despawn();
        }
    }
}

pub fn advance_clock(mut clock: ResMut<Clock>) {
    clock.time += 1;
}

/// The rule schedule, in execution order
pub fn build_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            age_creeps,
            regenerate_spawns,
            refill_sources,
            decay_piles,
            advance_clock,
        )
            .chain(),
    );
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pile_decay_rounds_up() {
        assert_eq!(pile_decay(1), 1);
        assert_eq!(pile_decay(1000), 1);
        assert_eq!(pile_decay(1001), 2);
        assert_eq!(pile_decay(0), 0);
    }

    #[test]
    fn test_level_totals() {
        assert_eq!(level_progress_total(1), 200);
        assert_eq!(level_progress_total(MAX_CONTROLLER_LEVEL), 0);
    }

    #[test]
    fn test_rules_run_on_a_bare_world() {
        let mut world = World::new();
        world.insert_resource(Clock::default());
        let pile = world.spawn(Pile { amount: 1 }).id();
        let creep = world
            .spawn(Creep {
                name: "Miner1".into(),
                body: vec![],
                energy: 0,
                ticks_to_live: 2,
                spawning_for: 1,
                last_moved: None,
            })
            .id();

        let mut schedule = build_schedule();
        schedule.run(&mut world);

        assert_eq!(world.resource::<Clock>().time, 1);
        assert!(world.get_entity(pile).is_none());
        let c = world.get::<Creep>(creep).unwrap();
        assert_eq!(c.spawning_for, 0);
        assert_eq!(c.ticks_to_live, 2);

        schedule.run(&mut world);
        schedule.run(&mut world);
        assert!(world.get_entity(creep).is_none());
    }
}
