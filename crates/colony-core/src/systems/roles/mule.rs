//! Mule Routine
//!
//! Two-phase hauler gated on load: below capacity it collects ground energy
//! around its pickup point, at capacity it delivers to its drop-off point.
//! Both bindings come from the creation seed and never change.

use colony_events::Activity;

use crate::components::{AgentMemory, AgentView};
use crate::facade::ColonyWorld;
use crate::systems::logistics::energy_piles_near;

use super::{issue, RoleContext};

pub fn run<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &AgentMemory,
    ctx: &mut RoleContext<'_>,
) {
    if agent.is_full() {
        deliver(world, agent, memory, ctx);
    } else {
        collect(world, agent, memory, ctx);
    }
}

fn collect<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &AgentMemory,
    ctx: &mut RoleContext<'_>,
) {
    let Some(pickup) = memory.pickup_id().and_then(|id| world.resolve(&id)) else {
        ctx.note(&agent.name, Activity::ForgotPickup);
        return;
    };

    if !agent.pos.is_near_to(pickup.pos()) {
        issue(&agent.name, "move", world.move_toward(&agent.name, pickup.pos()));
        ctx.note(&agent.name, Activity::HeadingToPickup);
        return;
    }

    let piles = energy_piles_near(world, pickup.pos(), ctx.settings.search_radius);
    let Some(pile) = ctx.selector.choose(&piles) else {
        ctx.note(&agent.name, Activity::WaitingForEnergy);
        return;
    };

    // Corner piles of the scan can be two tiles away
    if agent.pos.is_near_to(pile.pos) {
        issue(&agent.name, "pickup", world.pickup(&agent.name, pile.pos));
    } else {
        issue(&agent.name, "move", world.move_toward(&agent.name, pile.pos));
    }
    ctx.note(&agent.name, Activity::PickingUpEnergy);
}

fn deliver<W: ColonyWorld + ?Sized>(
    world: &mut W,
    agent: &AgentView,
    memory: &AgentMemory,
    ctx: &mut RoleContext<'_>,
) {
    let Some(drop_off) = memory.drop_id().and_then(|id| world.resolve(&id)) else {
        ctx.note(&agent.name, Activity::ForgotDropOff);
        return;
    };

    if !agent.pos.is_near_to(drop_off.pos()) {
        issue(&agent.name, "move", world.move_toward(&agent.name, drop_off.pos()));
        ctx.note(&agent.name, Activity::HeadingToDropOff);
        return;
    }

    if drop_off.is_storage() {
        issue(
            &agent.name,
            "transfer",
            world.transfer_energy(&agent.name, drop_off.id(), None),
        );
        ctx.note(&agent.name, Activity::TransferringToStorage);
    } else {
        issue(&agent.name, "drop", world.drop_energy(&agent.name));
        ctx.note(&agent.name, Activity::DroppingLoad);
    }
}
