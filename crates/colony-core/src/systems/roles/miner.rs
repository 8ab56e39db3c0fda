//! Miner Routine
//!
//! Binds to the source nearest the home spawn once, then walks to it and
//! extracts forever. A Miner extracts regardless of its own load; what it
//! cannot hold falls to the ground for the Mules.

use colony_events::Activity;

use crate::components::{AgentMemory, AgentView};
use crate::config::StaleBindingPolicy;
use crate::facade::ColonyWorld;

use super::{issue, RoleContext};

pub fn run<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &mut AgentMemory,
    ctx: &mut RoleContext<'_>,
) {
    let Some(source_id) = memory.source_id() else {
        // Unbound: claim a source, act from next tick on
        let Some(home) = ctx.home else {
            ctx.note(&agent.name, Activity::MissingHome);
            return;
        };
        match world.nearest_active_source(home.pos) {
            Some(source) => {
                memory.set_source_id(&source.id);
                ctx.note(&agent.name, Activity::BoundToSource { source_id: source.id.0 });
            }
            None => ctx.note(&agent.name, Activity::NoActiveSource),
        }
        return;
    };

    let source = world.resolve(&source_id).and_then(|obj| obj.as_source().cloned());
    let Some(source) = source else {
        let cleared = ctx.settings.stale_binding == StaleBindingPolicy::SelfHeal;
        if cleared {
            memory.clear_source_id();
        }
        tracing::warn!(agent = %agent.name, source = %source_id, cleared, "miner bound to a missing source");
        ctx.note(
            &agent.name,
            Activity::CorruptedSourceBinding { source_id: source_id.0, cleared },
        );
        return;
    };

    if agent.pos.is_near_to(source.pos) {
        issue(&agent.name, "harvest", world.harvest(&agent.name, &source.id));
        ctx.note(&agent.name, Activity::Mining);
    } else {
        issue(&agent.name, "move", world.move_toward(&agent.name, source.pos));
        ctx.note(&agent.name, Activity::HeadingToSource);
    }
}
