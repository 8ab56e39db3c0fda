//! Supervisor Override
//!
//! Optional role reassignment run before dispatch: the named agents turn to
//! the surplus role while the home spawn is full and return to their default
//! role as soon as it needs energy again.

use colony_events::{Activity, Section, TickReport};

use crate::components::{AgentView, RoleTag, Spawn};
use crate::config::SupervisorConfig;
use crate::state::ColonyState;

use super::record;

/// Whether the home spawn has no room for more energy
pub fn surplus_energy(home: Option<&Spawn>) -> bool {
    home.is_some_and(Spawn::is_full)
}

/// Rewrite the role tag of every supervised live agent whose role does not
/// match the current energy situation. Returns the number of agents changed.
pub fn apply_reassignments(
    home: Option<&Spawn>,
    agents: &[AgentView],
    config: &SupervisorConfig,
    state: &mut ColonyState,
    report: &mut TickReport,
) -> usize {
    if !config.enabled || home.is_none() {
        return 0;
    }

    let target = if surplus_energy(home) {
        config.surplus_role
    } else {
        config.default_role
    };

    let mut changed = 0;
    for agent in agents.iter().filter(|a| config.agents.contains(&a.name)) {
        let memory = state.memory_mut(&agent.name);
        let from = match memory.role_tag() {
            RoleTag::Known(role) if role == target => continue,
            RoleTag::Known(role) => Some(role.to_string()),
            RoleTag::Unrecognized(tag) => Some(tag),
            RoleTag::Missing => None,
        };
        memory.set_role(target);
        changed += 1;
        record(
            report,
            Section::Supervisor,
            &agent.name,
            Activity::Reassigned { from, to: target.to_string() },
        );
    }
    changed
}
