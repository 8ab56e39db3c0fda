//! Tick Report
//!
//! The observational, one-line-per-decision report produced every tick.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::activity::Activity;
use crate::notification::Notification;

/// Report sections, in the order they are produced within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Status,
    LifeCheck,
    Supervisor,
    Work,
    Summary,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Section::Status => "status",
            Section::LifeCheck => "life_check",
            Section::Supervisor => "supervisor",
            Section::Work => "work",
            Section::Summary => "summary",
        };
        f.write_str(label)
    }
}

/// One report line: who it is about and what was decided
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub section: Section,
    /// Agent name, or "spawn"/"controller"/"colony" for non-agent lines
    pub subject: String,
    #[serde(flatten)]
    pub activity: Activity,
}

impl ReportLine {
    pub fn new(section: Section, subject: impl Into<String>, activity: Activity) -> Self {
        Self {
            section,
            subject: subject.into(),
            activity,
        }
    }
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.section, self.subject, self.activity)
    }
}

/// Everything observable that one tick produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub lines: Vec<ReportLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Notification>,
}

impl TickReport {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    /// Append a line to the report
    pub fn push(&mut self, section: Section, subject: impl Into<String>, activity: Activity) {
        self.lines.push(ReportLine::new(section, subject, activity));
    }

    /// Record an outbound notification
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Activities recorded for a subject, in report order
    pub fn activities_for(&self, subject: &str) -> Vec<&Activity> {
        self.lines
            .iter()
            .filter(|line| line.subject == subject)
            .map(|line| &line.activity)
            .collect()
    }

    /// Lines belonging to a section, in report order
    pub fn section(&self, section: Section) -> impl Iterator<Item = &ReportLine> {
        self.lines.iter().filter(move |line| line.section == section)
    }

    /// Work lines where the agent did nothing useful this tick
    pub fn idle_count(&self) -> usize {
        self.section(Section::Work)
            .filter(|line| line.activity.is_idle())
            .count()
    }

    /// Serializes the report to a single JSON line.
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes a report from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> TickReport {
        let mut report = TickReport::new(42);
        report.push(Section::LifeCheck, "Miner1", Activity::AliveAndKicking);
        report.push(Section::Work, "Miner1", Activity::Mining);
        report.push(Section::Work, "Mule1", Activity::WaitingForEnergy);
        report.notify(Notification::controller_upgraded(42, 3));
        report
    }

    #[test]
    fn test_report_line_display() {
        let line = ReportLine::new(Section::Work, "Miner1", Activity::Mining);
        assert_eq!(line.to_string(), "[work] Miner1 is happily mining away");
    }

    #[test]
    fn test_activities_for_subject() {
        let report = sample_report();
        assert_eq!(
            report.activities_for("Miner1"),
            vec![&Activity::AliveAndKicking, &Activity::Mining]
        );
        assert!(report.activities_for("Nobody").is_empty());
    }

    #[test]
    fn test_section_filter() {
        let report = sample_report();
        assert_eq!(report.section(Section::Work).count(), 2);
        assert_eq!(report.section(Section::Status).count(), 0);
    }

    #[test]
    fn test_idle_count_covers_work_only() {
        let mut report = sample_report();
        assert_eq!(report.idle_count(), 1);

        report.push(Section::LifeCheck, "Builder1", Activity::NotRespawning);
        report.push(Section::Work, "Builder1", Activity::ConstructionPaused);
        assert_eq!(report.idle_count(), 2);
    }

    #[test]
    fn test_jsonl_line_is_single_line() {
        let report = sample_report();
        let line = report.to_jsonl().unwrap();
        assert!(!line.contains('\n'));

        let parsed = TickReport::from_jsonl(&line).unwrap();
        assert_eq!(parsed.tick, 42);
        assert_eq!(parsed.lines[1].activity, Activity::Mining);
        assert_eq!(parsed.notifications.len(), 1);
    }

    #[test]
    fn test_flattened_line_shape() {
        let line = ReportLine::new(Section::Work, "Priest1", Activity::NoDroppedEnergy);
        let value: serde_json::Value = serde_json::to_value(&line).unwrap();
        assert_eq!(value["section"], "work");
        assert_eq!(value["subject"], "Priest1");
        assert_eq!(value["activity"], "no_dropped_energy");
    }
}
