//! Role Routines
//!
//! One small state machine per role. Each routine runs once per live agent
//! per tick, reads and writes only that agent's memory, issues commands to
//! the world and records what it decided.

pub mod builder;
pub mod harvester;
pub mod miner;
pub mod mule;
pub mod priest;

use colony_events::{Activity, Section, TickReport};

use crate::components::Spawn;
use crate::config::EngineConfig;
use crate::facade::CommandResult;
use crate::systems::logistics::PileSelector;
use crate::systems::record;

/// Per-tick context shared by all routines
pub struct RoleContext<'a> {
    pub home: Option<&'a Spawn>,
    pub settings: &'a EngineConfig,
    /// Builders do not refuel while set
    pub construction_paused: bool,
    pub selector: &'a mut dyn PileSelector,
    pub report: &'a mut TickReport,
}

impl RoleContext<'_> {
    /// Record a work decision for an agent
    pub fn note(&mut self, agent: &str, activity: Activity) {
        record(self.report, Section::Work, agent, activity);
    }
}

/// Commands are fire-and-forget; a rejection only shows up in debug logs
pub(crate) fn issue(agent: &str, command: &str, result: CommandResult) {
    if let Err(e) = result {
        tracing::debug!(agent, command, "command rejected: {}", e);
    }
}
