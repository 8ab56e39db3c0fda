//! Engine Systems
//!
//! The per-tick steps of the decision engine: status and controller watch,
//! roster reconciliation, supervisor overrides, and role dispatch.

pub mod controller;
pub mod dispatch;
pub mod logistics;
pub mod roles;
pub mod roster;
pub mod supervisor;

use colony_events::{Activity, Section, TickReport};

pub use controller::{report_status, watch_controller_level};
pub use dispatch::dispatch_agents;
pub use logistics::{energy_piles_near, FirstPile, LargestPile, PileSelector, RandomPile};
pub use roles::RoleContext;
pub use roster::{reconcile_roster, CreationRequest, Liveness, RosterOutcome};
pub use supervisor::{apply_reassignments, surplus_energy};

/// Append a report line and mirror it to the log
pub(crate) fn record(report: &mut TickReport, section: Section, subject: &str, activity: Activity) {
    tracing::info!(tick = report.tick, section = %section, agent = subject, "{}", activity);
    report.push(section, subject, activity);
}
