//! Roster Scheduler
//!
//! Reconciles the desired roster against the living agents: reports the
//! liveness of every present entry and asks the home spawn to create the
//! missing ones. A creation failing for lack of stored energy raises the
//! tick's shortage flag.

use colony_events::{Activity, Section, TickReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::components::{AgentMemory, AgentView, BodyPart, WorkerSpec};
use crate::config::EngineConfig;
use crate::facade::{ColonyWorld, SpawnOutcome};

use super::record;

/// Remaining-lifespan classification of a live agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    Healthy,
    NearExpiry(u32),
    Critical(u32),
}

impl Liveness {
    /// Critical is checked before near-expiry so the tighter bound wins
    pub fn classify(ticks_to_live: Option<u32>, settings: &EngineConfig) -> Self {
        match ticks_to_live {
            Some(ttl) if ttl <= settings.critical_ticks => Liveness::Critical(ttl),
            Some(ttl) if ttl <= settings.near_expiry_ticks => Liveness::NearExpiry(ttl),
            _ => Liveness::Healthy,
        }
    }

    fn activity(self) -> Activity {
        match self {
            Liveness::Healthy => Activity::AliveAndKicking,
            Liveness::NearExpiry(ticks_to_live) => Activity::NearExpiry { ticks_to_live },
            Liveness::Critical(ticks_to_live) => Activity::Critical { ticks_to_live },
        }
    }
}

/// A creation request issued this tick and how the spawn answered it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationRequest {
    pub name: String,
    pub body: Vec<BodyPart>,
    pub memory: AgentMemory,
    pub outcome: SpawnOutcome,
}

/// What the scheduler produced this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterOutcome {
    /// Set when a creation failed for lack of stored energy
    pub shortage: bool,
    pub requests: Vec<CreationRequest>,
}

impl RosterOutcome {
    /// Requests the spawn accepted
    pub fn accepted(&self) -> impl Iterator<Item = &CreationRequest> {
        self.requests
            .iter()
            .filter(|r| r.outcome == SpawnOutcome::Success)
    }
}

/// Run one reconciliation pass over the roster.
///
/// At most one request is issued per entry; nothing is retried within the
/// tick since an absent agent is simply absent again next tick.
pub fn reconcile_roster<W: ColonyWorld + ?Sized>(
    world: &mut W,
    roster: &[WorkerSpec],
    agents: &[AgentView],
    settings: &EngineConfig,
    report: &mut TickReport,
) -> RosterOutcome {
    let live: BTreeMap<&str, &AgentView> = agents.iter().map(|a| (a.name.as_str(), a)).collect();
    let mut outcome = RosterOutcome::default();

    for spec in roster {
        if let Some(agent) = live.get(spec.name.as_str()) {
            let activity = if agent.spawning {
                Activity::Spawning
            } else {
                Liveness::classify(agent.ticks_to_live, settings).activity()
            };
            record(report, Section::LifeCheck, &spec.name, activity);
            continue;
        }

        if !spec.keep_spawning {
            record(report, Section::LifeCheck, &spec.name, Activity::NotRespawning);
            continue;
        }

        let memory = AgentMemory::seeded(spec.role, &spec.memory);
        let result = world.request_agent_creation(&spec.body, &spec.name, &memory);
        let activity = match result {
            SpawnOutcome::Success => Activity::Resurrecting,
            SpawnOutcome::Busy => Activity::SpawnBusy,
            SpawnOutcome::InsufficientEnergy => {
                outcome.shortage = true;
                Activity::SpawnLacksEnergy
            }
            SpawnOutcome::InvalidComposition => {
                tracing::error!(
                    agent = %spec.name,
                    parts = spec.body.len(),
                    "roster entry has an invalid body composition"
                );
                Activity::InvalidBody
            }
        };
        record(report, Section::LifeCheck, &spec.name, activity);

        outcome.requests.push(CreationRequest {
            name: spec.name.clone(),
            body: spec.body.clone(),
            memory,
            outcome: result,
        });
    }

    outcome
}
