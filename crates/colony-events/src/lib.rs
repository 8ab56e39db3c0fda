//! Shared report and notification types for the colony engine.
//!
//! This crate contains pure data structures with no engine logic.
//! Every report line and notification the engine produces is one of these.

pub mod activity;
pub mod notification;
pub mod report;

pub use activity::Activity;
pub use notification::{Notification, NotificationKind};
pub use report::{ReportLine, Section, TickReport};
