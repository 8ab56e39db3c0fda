//! Engine Tick
//!
//! One invocation of the decision engine: a function of the world and the
//! persisted state that issues world commands and returns the next state
//! together with the tick's report.

use colony_events::{Activity, Section, TickReport};

use crate::components::WorkerSpec;
use crate::config::{Config, EngineConfig, SupervisorConfig};
use crate::facade::ColonyWorld;
use crate::state::ColonyState;
use crate::systems::{
    apply_reassignments, dispatch_agents, reconcile_roster, record, report_status,
    watch_controller_level, CreationRequest, PileSelector, RoleContext,
};

/// Everything a tick hands back
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub state: ColonyState,
    pub report: TickReport,
    /// Whether a creation failed for lack of energy this tick
    pub shortage: bool,
    pub creation_requests: Vec<CreationRequest>,
}

/// The decision engine with its session configuration
pub struct ColonyEngine {
    settings: EngineConfig,
    supervisor: SupervisorConfig,
    roster: Vec<WorkerSpec>,
    selector: Box<dyn PileSelector>,
}

impl ColonyEngine {
    /// Build an engine using the configured pile-selection policy
    pub fn new(config: &Config) -> Self {
        let selector = config.engine.pile_selection.selector(config.engine.seed);
        Self {
            settings: config.engine.clone(),
            supervisor: config.supervisor.clone(),
            roster: config.roster.clone(),
            selector,
        }
    }

    /// Replace the pile-selection policy
    pub fn with_selector(mut self, selector: Box<dyn PileSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn roster(&self) -> &[WorkerSpec] {
        &self.roster
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Run one tick against `world`, consuming the previous state
    pub fn tick<W: ColonyWorld + ?Sized>(&mut self, world: &mut W, mut state: ColonyState) -> TickOutcome {
        let mut report = TickReport::new(world.game_time());

        let home = world.home_spawn();
        let controller = world.controller();
        report_status(home.as_ref(), controller.as_ref(), &mut report);
        watch_controller_level(controller.as_ref(), &mut state, &mut report);

        let agents = world.agents();
        let roster = reconcile_roster(world, &self.roster, &agents, &self.settings, &mut report);
        for request in roster.accepted() {
            state.set_memory(request.name.clone(), request.memory.clone());
        }

        apply_reassignments(home.as_ref(), &agents, &self.supervisor, &mut state, &mut report);

        let construction_paused = roster.shortage || state.pause_construction;
        if construction_paused {
            tracing::debug!(
                shortage = roster.shortage,
                override_set = state.pause_construction,
                "construction paused this tick"
            );
        }

        {
            let mut ctx = RoleContext {
                home: home.as_ref(),
                settings: &self.settings,
                construction_paused,
                selector: self.selector.as_mut(),
                report: &mut report,
            };
            dispatch_agents(world, &agents, &mut state, &mut ctx);
        }

        record(&mut report, Section::Summary, "colony", Activity::EndOfTick);

        TickOutcome {
            state,
            report,
            shortage: roster.shortage,
            creation_requests: roster.requests,
        }
    }
}
