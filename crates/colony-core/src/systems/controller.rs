//! Controller Watch
//!
//! Colony status lines and detection of controller level increases against
//! the persisted snapshot.

use colony_events::{Activity, Notification, Section, TickReport};

use crate::components::{Controller, Spawn};
use crate::state::{ColonyState, ControllerState};

use super::record;

/// Report the home spawn's and the controller's current figures
pub fn report_status(home: Option<&Spawn>, controller: Option<&Controller>, report: &mut TickReport) {
    match home {
        Some(spawn) => record(
            report,
            Section::Status,
            &spawn.name,
            Activity::SpawnStatus {
                hits: spawn.hits,
                hits_max: spawn.hits_max,
                energy: spawn.energy,
                energy_capacity: spawn.energy_capacity,
            },
        ),
        None => record(report, Section::Status, "colony", Activity::NoHomeSpawn),
    }

    match controller {
        Some(c) => record(
            report,
            Section::Status,
            "controller",
            Activity::ControllerStatus {
                level: c.level,
                progress: c.progress,
                progress_total: c.progress_total,
            },
        ),
        None => record(report, Section::Status, "controller", Activity::NoControllerVisible),
    }
}

/// Compare the controller level with the persisted snapshot.
///
/// Emits one notification on an increase. A missing snapshot is seeded
/// silently; any other level simply replaces the snapshot. Without a visible
/// controller the snapshot is left alone.
pub fn watch_controller_level(
    controller: Option<&Controller>,
    state: &mut ColonyState,
    report: &mut TickReport,
) -> Option<Notification> {
    let level = controller?.level;

    let notification = match state.controller_level() {
        Some(previous) if level > previous => {
            let n = Notification::controller_upgraded(report.tick, level);
            tracing::warn!(tick = report.tick, previous, level, "{}", n.message);
            report.notify(n.clone());
            Some(n)
        }
        Some(previous) => {
            if level < previous {
                tracing::debug!(previous, level, "controller level dropped");
            }
            None
        }
        None => {
            tracing::debug!(level, "seeding controller snapshot");
            None
        }
    };

    state.controller_state = Some(ControllerState { level });
    notification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{ObjectId, Position};

    fn controller(level: u8) -> Controller {
        Controller {
            id: ObjectId::new("ctrl"),
            pos: Position::new(40, 10),
            level,
            progress: 0,
            progress_total: 200,
        }
    }

    fn state_at(level: u8) -> ColonyState {
        let mut state = ColonyState::new();
        state.controller_state = Some(ControllerState { level });
        state
    }

    #[test]
    fn test_first_observation_seeds_silently() {
        let mut state = ColonyState::new();
        let mut report = TickReport::new(1);

        let note = watch_controller_level(Some(&controller(2)), &mut state, &mut report);

        assert!(note.is_none());
        assert!(report.notifications.is_empty());
        assert_eq!(state.controller_level(), Some(2));
    }

    #[test]
    fn test_level_increase_notifies_once() {
        let mut state = state_at(3);
        let ctrl = controller(4);

        let mut report = TickReport::new(10);
        let note = watch_controller_level(Some(&ctrl), &mut state, &mut report);
        assert_eq!(note.map(|n| n.message), Some("Controller was upgraded to level 4!".to_string()));
        assert_eq!(report.notifications.len(), 1);
        assert_eq!(state.controller_level(), Some(4));

        let mut next = TickReport::new(11);
        assert!(watch_controller_level(Some(&ctrl), &mut state, &mut next).is_none());
        assert!(next.notifications.is_empty());
    }

    #[test]
    fn test_downgrade_overwrites_snapshot() {
        let mut state = state_at(5);
        let mut report = TickReport::new(1);

        assert!(watch_controller_level(Some(&controller(3)), &mut state, &mut report).is_none());
        assert_eq!(state.controller_level(), Some(3));

        // Climbing back up counts as an upgrade again
        let note = watch_controller_level(Some(&controller(4)), &mut state, &mut report);
        assert!(note.is_some());
    }

    #[test]
    fn test_missing_controller_keeps_snapshot() {
        let mut state = state_at(3);
        let mut report = TickReport::new(1);

        assert!(watch_controller_level(None, &mut state, &mut report).is_none());
        assert_eq!(state.controller_level(), Some(3));
    }

    #[test]
    fn test_status_lines() {
        let mut report = TickReport::new(1);
        report_status(None, Some(&controller(2)), &mut report);

        let status: Vec<_> = report.section(Section::Status).collect();
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].activity, Activity::NoHomeSpawn);
        assert_eq!(
            status[1].activity,
            Activity::ControllerStatus { level: 2, progress: 0, progress_total: 200 }
        );
    }
}
