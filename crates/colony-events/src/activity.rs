//! Activity Types
//!
//! Everything the engine can decide about an agent, the spawn or the
//! controller during one tick. Each variant renders to one human-readable
//! report phrase.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single decision or observation recorded in the tick report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "activity", rename_all = "snake_case")]
pub enum Activity {
    // Colony status
    SpawnStatus {
        hits: u32,
        hits_max: u32,
        energy: u32,
        energy_capacity: u32,
    },
    ControllerStatus {
        level: u8,
        progress: u32,
        progress_total: u32,
    },
    NoHomeSpawn,
    NoControllerVisible,

    // Life check
    AliveAndKicking,
    NearExpiry { ticks_to_live: u32 },
    Critical { ticks_to_live: u32 },
    NotRespawning,
    Resurrecting,
    SpawnBusy,
    SpawnLacksEnergy,
    InvalidBody,

    // Supervisor overrides
    Reassigned { from: Option<String>, to: String },

    // Shared work outcomes
    Spawning,
    Idle { role_tag: Option<String> },
    MissingHome,
    MissingFlag { flag: String },

    // Harvester
    Gathering,
    DeliveringHome,
    NoActiveSource,

    // Miner
    BoundToSource { source_id: String },
    HeadingToSource,
    Mining,
    CorruptedSourceBinding { source_id: String, cleared: bool },

    // Mule
    HeadingToPickup,
    PickingUpEnergy,
    WaitingForEnergy,
    ForgotPickup,
    HeadingToDropOff,
    TransferringToStorage,
    DroppingLoad,
    ForgotDropOff,

    // Builder
    WorksiteFinished { site_id: String },
    StaleWorksite { site_id: String, cleared: bool },
    Building { site_id: String },
    ConstructionPaused,
    Refueling,
    HeadingToRefuel,
    NoFuelAtStation,
    AwaitingInstructions,

    // Priest
    Praying,
    HeadingToController,
    CollectingForController,
    SearchingForEnergy,
    NoDroppedEnergy,
    NoControllerToWorship,

    // Closing line
    EndOfTick,
}

impl Activity {
    /// Returns true if this activity indicates the agent did nothing useful
    pub fn is_idle(&self) -> bool {
        matches!(
            self,
            Activity::Idle { .. }
                | Activity::MissingHome
                | Activity::MissingFlag { .. }
                | Activity::NoActiveSource
                | Activity::CorruptedSourceBinding { .. }
                | Activity::WaitingForEnergy
                | Activity::ForgotPickup
                | Activity::ForgotDropOff
                | Activity::ConstructionPaused
                | Activity::NoFuelAtStation
                | Activity::AwaitingInstructions
                | Activity::NoControllerToWorship
        )
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::SpawnStatus { hits, hits_max, energy, energy_capacity } => write!(
                f,
                "health {}/{}, energy {}/{}",
                hits, hits_max, energy, energy_capacity
            ),
            Activity::ControllerStatus { level, progress, progress_total } => {
                write!(f, "level {}, progress {}/{}", level, progress, progress_total)
            }
            Activity::NoHomeSpawn => write!(f, "is nowhere to be found"),
            Activity::NoControllerVisible => write!(f, "is not visible"),
            Activity::AliveAndKicking => write!(f, "is alive and kicking"),
            Activity::NearExpiry { ticks_to_live } => {
                write!(f, "will die soon ({} ticks left)", ticks_to_live)
            }
            Activity::Critical { ticks_to_live } => {
                write!(f, "is about to expire ({} ticks left)", ticks_to_live)
            }
            Activity::NotRespawning => write!(f, "is dead and will not be respawned"),
            Activity::Resurrecting => write!(f, "is being resurrected"),
            Activity::SpawnBusy => write!(f, "cannot be created: the spawn is busy"),
            Activity::SpawnLacksEnergy => {
                write!(f, "cannot be created: the spawn does not have enough energy")
            }
            Activity::InvalidBody => {
                write!(f, "cannot be created: the spawn rejected its body composition")
            }
            Activity::Reassigned { from, to } => match from {
                Some(from) => write!(f, "was reassigned from {} to {}", from, to),
                None => write!(f, "was assigned the {} role", to),
            },
            Activity::Spawning => write!(f, "is spawning"),
            Activity::Idle { role_tag } => match role_tag {
                Some(tag) => write!(f, "has an unknown role '{}' and stays idle", tag),
                None => write!(f, "has no role and stays idle"),
            },
            Activity::MissingHome => write!(f, "has no home spawn to work for"),
            Activity::MissingFlag { flag } => write!(f, "cannot find the {} flag", flag),
            Activity::Gathering => write!(f, "is gathering energy"),
            Activity::DeliveringHome => write!(f, "is bringing energy home"),
            Activity::NoActiveSource => write!(f, "cannot find an active source"),
            Activity::BoundToSource { source_id } => {
                write!(f, "claimed the nearest source {}", source_id)
            }
            Activity::HeadingToSource => write!(f, "is heading to its source"),
            Activity::Mining => write!(f, "is happily mining away"),
            Activity::CorruptedSourceBinding { source_id, cleared } => {
                write!(f, "remembers source {} which no longer exists", source_id)?;
                if *cleared {
                    write!(f, " and forgot it")?;
                }
                Ok(())
            }
            Activity::HeadingToPickup => write!(f, "is heading over to the pickup point"),
            Activity::PickingUpEnergy => write!(f, "is picking up some energy"),
            Activity::WaitingForEnergy => write!(f, "is waiting for energy to show up"),
            Activity::ForgotPickup => write!(f, "can't remember where to pick up energy"),
            Activity::HeadingToDropOff => write!(f, "is plodding over to the drop off point"),
            Activity::TransferringToStorage => write!(f, "is transferring energy to storage"),
            Activity::DroppingLoad => write!(f, "is dropping its energy load"),
            Activity::ForgotDropOff => write!(f, "can't remember where to drop off energy"),
            Activity::WorksiteFinished { site_id } => {
                write!(f, "finished construction site {}", site_id)
            }
            Activity::StaleWorksite { site_id, cleared } => {
                write!(f, "remembers construction site {} which no longer exists", site_id)?;
                if *cleared {
                    write!(f, " and forgot it")?;
                }
                Ok(())
            }
            Activity::Building { site_id } => write!(f, "is building at site {}", site_id),
            Activity::ConstructionPaused => write!(f, "has paused construction temporarily"),
            Activity::Refueling => write!(f, "is refueling"),
            Activity::HeadingToRefuel => write!(f, "is heading over to refuel"),
            Activity::NoFuelAtStation => write!(f, "can't find any fuel at the refuel station"),
            Activity::AwaitingInstructions => write!(f, "is awaiting further instructions"),
            Activity::Praying => write!(f, "is upgrading the controller"),
            Activity::HeadingToController => write!(f, "is heading towards the controller"),
            Activity::CollectingForController => {
                write!(f, "is collecting energy for the controller")
            }
            Activity::SearchingForEnergy => {
                write!(f, "is fetching dropped energy for the controller")
            }
            Activity::NoDroppedEnergy => write!(f, "couldn't find dropped energy"),
            Activity::NoControllerToWorship => write!(f, "couldn't find a controller to upgrade"),
            Activity::EndOfTick => write!(f, "end of tick"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_serialization_is_tagged() {
        let json = serde_json::to_string(&Activity::Building { site_id: "site-1".into() }).unwrap();
        assert_eq!(json, r#"{"activity":"building","site_id":"site-1"}"#);

        let json = serde_json::to_string(&Activity::Mining).unwrap();
        assert_eq!(json, r#"{"activity":"mining"}"#);
    }

    #[test]
    fn test_activity_deserialization() {
        let parsed: Activity =
            serde_json::from_str(r#"{"activity":"near_expiry","ticks_to_live":7}"#).unwrap();
        assert_eq!(parsed, Activity::NearExpiry { ticks_to_live: 7 });
    }

    #[test]
    fn test_no_dropped_energy_phrase() {
        assert_eq!(Activity::NoDroppedEnergy.to_string(), "couldn't find dropped energy");
    }

    #[test]
    fn test_corrupted_binding_phrase_mentions_clearing() {
        let kept = Activity::CorruptedSourceBinding { source_id: "a".into(), cleared: false };
        let healed = Activity::CorruptedSourceBinding { source_id: "a".into(), cleared: true };
        assert!(!kept.to_string().contains("forgot"));
        assert!(healed.to_string().ends_with("and forgot it"));
    }

    #[test]
    fn test_idle_classification() {
        assert!(Activity::ConstructionPaused.is_idle());
        assert!(Activity::Idle { role_tag: None }.is_idle());
        assert!(!Activity::Mining.is_idle());
        assert!(!Activity::Praying.is_idle());
    }
}
