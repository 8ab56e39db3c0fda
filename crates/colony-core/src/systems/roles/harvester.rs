//! Harvester Routine
//!
//! Single-stage gatherer: fill up at the source nearest to the home spawn,
//! then carry the load home. Nothing is persisted; the nearest source is
//! re-evaluated every tick.

use colony_events::Activity;

use crate::components::AgentView;
use crate::facade::ColonyWorld;

use super::{issue, RoleContext};

pub fn run<W: ColonyWorld + ?Sized>(world: &mut W, agent: &AgentView, ctx: &mut RoleContext<'_>) {
    let Some(home) = ctx.home else {
        ctx.note(&agent.name, Activity::MissingHome);
        return;
    };

    if !agent.is_full() {
        let Some(source) = world.nearest_active_source(home.pos) else {
            ctx.note(&agent.name, Activity::NoActiveSource);
            return;
        };
        issue(&agent.name, "move", world.move_toward(&agent.name, source.pos));
        issue(&agent.name, "harvest", world.harvest(&agent.name, &source.id));
        ctx.note(&agent.name, Activity::Gathering);
    } else {
        issue(&agent.name, "move", world.move_toward(&agent.name, home.pos));
        issue(&agent.name, "transfer", world.transfer_energy(&agent.name, &home.id, None));
        ctx.note(&agent.name, Activity::DeliveringHome);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use colony_events::Activity;

    use super::super::testing::{run_once, state_with};
    use crate::components::{AgentMemory, BodyPart::*, Position, Role};
    use crate::config::EngineConfig;
    use crate::sandbox::{AgentSetup, Command, Sandbox, ScenarioConfig};

    fn room(energy: u32) -> Sandbox {
        Sandbox::new(
            &ScenarioConfig::empty()
                .with_spawn("HQ", Position::new(25, 25), 300)
                .with_source("src-a", Position::new(20, 20))
                .with_source("src-far", Position::new(2, 2))
                .with_agent(
                    AgentSetup::new("H1", vec![Carry, Work, Move], Position::new(21, 21))
                        .carrying(energy),
                ),
        )
    }

    fn harvester_state() -> crate::state::ColonyState {
        state_with("H1", AgentMemory::seeded(Role::Harvester, &BTreeMap::new()))
    }

    #[test]
    fn test_gathers_at_nearest_source_when_not_full() {
        let mut world = room(10);
        let mut state = harvester_state();

        let activities = run_once(&mut world, &mut state, "H1", &EngineConfig::default(), false);

        assert_eq!(activities, vec![Activity::Gathering]);
        assert!(world.journal().iter().any(|e| matches!(
            &e.command,
            Command::Harvest { source, .. } if source.as_str() == "src-a"
        )));
        assert_eq!(world.agent("H1").unwrap().energy, 12);
    }

    #[test]
    fn test_delivers_home_when_full() {
        let mut world = room(50);
        let mut state = harvester_state();

        let activities = run_once(&mut world, &mut state, "H1", &EngineConfig::default(), false);

        assert_eq!(activities, vec![Activity::DeliveringHome]);
        assert!(world.journal().iter().all(|e| !matches!(e.command, Command::Harvest { .. })));
        assert!(world
            .journal()
            .iter()
            .any(|e| matches!(e.command, Command::Transfer { .. })));
    }

    #[test]
    fn test_idles_without_home() {
        let mut world = Sandbox::new(
            &ScenarioConfig::empty()
                .with_source("src-a", Position::new(20, 20))
                .with_agent(AgentSetup::new("H1", vec![Carry, Work, Move], Position::new(21, 21))),
        );
        let mut state = harvester_state();

        let activities = run_once(&mut world, &mut state, "H1", &EngineConfig::default(), false);

        assert_eq!(activities, vec![Activity::MissingHome]);
        assert!(world.journal().is_empty());
    }
}
