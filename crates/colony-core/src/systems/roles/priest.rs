//! Priest Routine
//!
//! Feeds the controller. An empty Priest scavenges ground energy around the
//! drop flag; a loaded one walks to the controller and upgrades it.

use colony_events::Activity;

use crate::components::AgentView;
use crate::facade::ColonyWorld;
use crate::systems::logistics::energy_piles_near;

use super::{issue, RoleContext};

pub fn run<W: ColonyWorld + ?Sized>(world: &mut W, agent: &AgentView, ctx: &mut RoleContext<'_>) {
    let Some(controller) = world.controller() else {
        ctx.note(&agent.name, Activity::NoControllerToWorship);
        return;
    };

    let flag_name = ctx.settings.priest_flag.clone();
    let flag = world.flag(&flag_name);
    let piles = match &flag {
        Some(f) => energy_piles_near(&*world, f.pos, ctx.settings.search_radius),
        None => Vec::new(),
    };
    let pile = ctx.selector.choose(&piles);

    if agent.is_empty() {
        match (pile, flag) {
            (Some(pile), _) => {
                if agent.pos.is_near_to(pile.pos) {
                    issue(&agent.name, "pickup", world.pickup(&agent.name, pile.pos));
                    ctx.note(&agent.name, Activity::CollectingForController);
                } else {
                    issue(&agent.name, "move", world.move_toward(&agent.name, pile.pos));
                    ctx.note(&agent.name, Activity::SearchingForEnergy);
                }
            }
            (None, Some(flag)) => {
                issue(&agent.name, "move", world.move_toward(&agent.name, flag.pos));
                ctx.note(&agent.name, Activity::NoDroppedEnergy);
            }
            (None, None) => ctx.note(&agent.name, Activity::MissingFlag { flag: flag_name }),
        }
        return;
    }

    if agent.pos.is_near_to(controller.pos) {
        issue(
            &agent.name,
            "upgrade",
            world.upgrade_controller(&agent.name, &controller.id),
        );
        ctx.note(&agent.name, Activity::Praying);
    } else {
        issue(&agent.name, "move", world.move_toward(&agent.name, controller.pos));
        ctx.note(&agent.name, Activity::HeadingToController);
    }
}
