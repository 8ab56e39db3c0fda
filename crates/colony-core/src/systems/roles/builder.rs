//! Builder Routine
//!
//! Keeps a persisted worksite binding, validates it every tick and spends
//! its load on build progress. Refuels from ground energy around the refuel
//! flag unless construction is paused.

use colony_events::Activity;

use crate::components::{AgentMemory, AgentView, ConstructionSite, ObjectId};
use crate::config::StaleBindingPolicy;
use crate::facade::ColonyWorld;
use crate::systems::logistics::energy_piles_near;

use super::{issue, RoleContext};

pub fn run<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &mut AgentMemory,
    ctx: &mut RoleContext<'_>,
) {
    let Some(site) = worksite(world, agent, memory, ctx) else {
        return;
    };

    if !agent.is_empty() {
        issue(&agent.name, "move", world.move_toward(&agent.name, site.pos));
        issue(&agent.name, "build", world.build(&agent.name, &site.id));
        ctx.note(&agent.name, Activity::Building { site_id: site.id.0 });
        return;
    }

    if ctx.construction_paused {
        ctx.note(&agent.name, Activity::ConstructionPaused);
        return;
    }

    refuel(world, agent, memory, ctx);
}

/// Validate the bound site, re-acquiring the nearest one when the binding
/// is gone. `None` ends the routine for this tick.
fn worksite<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &mut AgentMemory,
    ctx: &mut RoleContext<'_>,
) -> Option<ConstructionSite> {
    if let Some(site_id) = memory.worksite_id() {
        match world.resolve(&site_id) {
            Some(obj) => match obj.as_construction_site() {
                Some(site) if !site.is_complete() => return Some(site.clone()),
                Some(site) => {
                    memory.clear_worksite();
                    issue(
                        &agent.name,
                        "remove_site",
                        world.remove_construction_site(&site.id),
                    );
                    ctx.note(&agent.name, Activity::WorksiteFinished { site_id: site_id.0 });
                }
                None => {
                    if !clear_stale(agent, memory, &site_id, ctx) {
                        return None;
                    }
                }
            },
            None => {
                if !clear_stale(agent, memory, &site_id, ctx) {
                    return None;
                }
            }
        }
    }

    match world.nearest_construction_site(agent.pos) {
        Some(site) => {
            memory.set_worksite_id(&site.id);
            Some(site)
        }
        None => {
            ctx.note(&agent.name, Activity::AwaitingInstructions);
            None
        }
    }
}

/// Returns whether the binding was cleared and a new site may be searched
fn clear_stale(
    agent: &AgentView,
    memory: &mut AgentMemory,
    site_id: &ObjectId,
    ctx: &mut RoleContext<'_>,
) -> bool {
    let cleared = ctx.settings.stale_binding == StaleBindingPolicy::SelfHeal;
    if cleared {
        memory.clear_worksite();
    }
    tracing::warn!(agent = %agent.name, site = %site_id, cleared, "builder bound to a missing site");
    ctx.note(
        &agent.name,
        Activity::StaleWorksite { site_id: site_id.0.clone(), cleared },
    );
    cleared
}

fn refuel<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &mut AgentMemory,
    ctx: &mut RoleContext<'_>,
) {
    let flag_name = ctx.settings.refuel_flag.clone();
    let Some(flag) = world.flag(&flag_name) else {
        ctx.note(&agent.name, Activity::MissingFlag { flag: flag_name });
        return;
    };
    memory.set_refuelsite_id(&flag.id);

    let piles = energy_piles_near(world, flag.pos, ctx.settings.search_radius);
    let Some(pile) = ctx.selector.choose(&piles) else {
        ctx.note(&agent.name, Activity::NoFuelAtStation);
        return;
    };

    if agent.pos.is_near_to(pile.pos) {
        issue(&agent.name, "pickup", world.pickup(&agent.name, pile.pos));
        ctx.note(&agent.name, Activity::Refueling);
    } else {
        issue(&agent.name, "move", world.move_toward(&agent.name, pile.pos));
        ctx.note(&agent.name, Activity::HeadingToRefuel);
    }
}
