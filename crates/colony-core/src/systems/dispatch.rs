//! Role Dispatch
//!
//! Runs each live agent's role routine once per tick.

use colony_events::Activity;

use crate::components::{AgentView, Role, RoleTag};
use crate::facade::ColonyWorld;
use crate::state::ColonyState;

use super::roles::{self, RoleContext};

/// Dispatch every agent in order. Agents still spawning are skipped; agents
/// without a recognised role tag stay idle.
pub fn dispatch_agents<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agents: &[AgentView],
    state: &mut ColonyState,
    ctx: &mut RoleContext<'_>,
) {
    for agent in agents {
        if agent.spawning {
            ctx.note(&agent.name, Activity::Spawning);
            continue;
        }

        let Some(memory) = state.agents.get_mut(&agent.name) else {
            ctx.note(&agent.name, Activity::Idle { role_tag: None });
            continue;
        };

        match memory.role_tag() {
            RoleTag::Known(Role::Harvester) => roles::harvester::run(world, agent, ctx),
            RoleTag::Known(Role::Miner) => roles::miner::run(world, agent, memory, ctx),
            RoleTag::Known(Role::Mule) => roles::mule::run(world, agent, memory, ctx),
            RoleTag::Known(Role::Builder) => roles::builder::run(world, agent, memory, ctx),
            RoleTag::Known(Role::Priest) => roles::priest::run(world, agent, ctx),
            RoleTag::Unrecognized(tag) => {
                tracing::debug!(agent = %agent.name, tag = %tag, "unrecognised role tag");
                ctx.note(&agent.name, Activity::Idle { role_tag: Some(tag) });
            }
            RoleTag::Missing => ctx.note(&agent.name, Activity::Idle { role_tag: None }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use colony_events::TickReport;

    use super::*;
    use crate::components::{AgentMemory, BodyPart::*, Position};
    use crate::config::EngineConfig;
    use crate::sandbox::{AgentSetup, Sandbox, ScenarioConfig};
    use crate::systems::logistics::FirstPile;

    fn run(world: &mut Sandbox, state: &mut ColonyState) -> TickReport {
        let agents = world.agents();
        let home = world.home_spawn();
        let settings = EngineConfig::default();
        let mut selector = FirstPile;
        let mut report = TickReport::new(0);
        let mut ctx = RoleContext {
            home: home.as_ref(),
            settings: &settings,
            construction_paused: false,
            selector: &mut selector,
            report: &mut report,
        };
        dispatch_agents(world, &agents, state, &mut ctx);
        report
    }

    #[test]
    fn test_idle_and_spawning_agents_issue_nothing() {
        let mut world = Sandbox::new(
            &ScenarioConfig::empty()
                .with_spawn("HQ", Position::new(25, 25), 300)
                .with_source("src-a", Position::new(10, 10))
                .with_agent(AgentSetup::new("Fresh", vec![Work, Move], Position::new(25, 26)).spawning_for(3))
                .with_agent(AgentSetup::new("Janitor1", vec![Work, Move], Position::new(5, 5)))
                .with_agent(AgentSetup::new("Stranger", vec![Work, Move], Position::new(6, 6))),
        );
        let mut state = ColonyState::new();
        state.set_memory("Fresh", AgentMemory::seeded(Role::Miner, &BTreeMap::new()));
        let mut janitor = AgentMemory::new();
        janitor.set("role", "Janitor");
        state.set_memory("Janitor1", janitor);

        let report = run(&mut world, &mut state);

        assert_eq!(report.activities_for("Fresh"), vec![&Activity::Spawning]);
        assert_eq!(
            report.activities_for("Janitor1"),
            vec![&Activity::Idle { role_tag: Some("Janitor".into()) }]
        );
        assert_eq!(report.activities_for("Stranger"), vec![&Activity::Idle { role_tag: None }]);
        assert!(world.journal().is_empty());
        // Spawning agents keep their seeded memory untouched
        assert_eq!(state.memory("Fresh").unwrap().source_id(), None);
        assert!(state.memory("Stranger").is_none());
    }

    #[test]
    fn test_each_agent_runs_once_in_name_order() {
        let mut world = Sandbox::new(
            &ScenarioConfig::empty()
                .with_spawn("HQ", Position::new(25, 25), 300)
                .with_source("src-a", Position::new(20, 20))
                .with_agent(AgentSetup::new("B", vec![Carry, Work, Move], Position::new(21, 21)))
                .with_agent(AgentSetup::new("A", vec![Carry, Work, Move], Position::new(19, 19))),
        );
        let mut state = ColonyState::new();
        for name in ["A", "B"] {
            state.set_memory(name, AgentMemory::seeded(Role::Harvester, &BTreeMap::new()));
        }

        let report = run(&mut world, &mut state);

        let subjects: Vec<_> = report.lines.iter().map(|l| l.subject.as_str()).collect();
        assert_eq!(subjects, vec!["A", "B"]);
    }
}
