//! Event Logger
//!
//! Append-only JSONL log of tick reports, one report per line.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use colony_events::TickReport;

/// Writes tick reports to a JSONL file
pub struct EventLogger {
    writer: Option<BufWriter<File>>,
    event_count: u64,
    line_count: u64,
}

impl EventLogger {
    /// Create a new event logger writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            event_count: 0,
            line_count: 0,
        })
    }

    /// Create a logger that discards reports (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            event_count: 0,
            line_count: 0,
        }
    }

    /// Number of reports logged so far
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Number of report lines across all logged reports
    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Log one tick's report
    pub fn log(&mut self, report: &TickReport) -> std::io::Result<()> {
        self.event_count += 1;
        self.line_count += report.lines.len() as u64;
        if let Some(ref mut writer) = self.writer {
            let json = report.to_jsonl()?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLogger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("failed to flush event logger: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colony_events::{Activity, Notification, Section};
    use std::io::BufRead;

    fn sample(tick: u64) -> TickReport {
        let mut report = TickReport::new(tick);
        report.push(Section::LifeCheck, "Miner1", Activity::AliveAndKicking);
        report.push(Section::Work, "Miner1", Activity::Mining);
        report
    }

    #[test]
    fn test_report_logging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");

        let mut logger = EventLogger::new(&path).unwrap();
        logger.log(&sample(1)).unwrap();
        let mut upgraded = sample(2);
        upgraded.notify(Notification::controller_upgraded(2, 3));
        logger.log(&upgraded).unwrap();
        logger.flush().unwrap();

        let file = File::open(&path).unwrap();
        let lines: Vec<String> = std::io::BufReader::new(file)
            .lines()
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        let parsed = TickReport::from_jsonl(&lines[1]).unwrap();
        assert_eq!(parsed, upgraded);
        assert_eq!(logger.line_count(), 4);
    }

    #[test]
    fn test_drop_flushes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports.jsonl");

        {
            let mut logger = EventLogger::new(&path).unwrap();
            logger.log(&sample(7)).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("\"tick\":7"));
    }

    #[test]
    fn test_null_logger() {
        let mut logger = EventLogger::null();
        logger.log(&sample(1)).unwrap();
        assert_eq!(logger.event_count(), 1);
    }
}
