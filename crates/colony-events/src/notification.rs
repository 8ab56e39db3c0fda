//! Notifications
//!
//! Messages the engine hands to the outside world (e.g. an e-mail digest).

use serde::{Deserialize, Serialize};

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    ControllerUpgraded { level: u8 },
}

/// An outbound notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub tick: u64,
    #[serde(flatten)]
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    /// Notification sent when the controller reaches a new level
    pub fn controller_upgraded(tick: u64, level: u8) -> Self {
        Self {
            tick,
            kind: NotificationKind::ControllerUpgraded { level },
            message: format!("Controller was upgraded to level {}!", level),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_controller_upgraded_message() {
        let note = Notification::controller_upgraded(1200, 4);
        assert_eq!(note.message, "Controller was upgraded to level 4!");
        assert_eq!(note.kind, NotificationKind::ControllerUpgraded { level: 4 });
    }

    #[test]
    fn test_notification_serialization() {
        let note = Notification::controller_upgraded(7, 2);
        let value: serde_json::Value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["kind"], "controller_upgraded");
        assert_eq!(value["level"], 2);
        assert_eq!(value["tick"], 7);
    }
}
