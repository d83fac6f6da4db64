use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Stderr logger that also remembers the most recent entries
#[derive(Clone)]
pub struct CliLogger {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    max_entries: usize,
    level: LevelFilter,
}

impl CliLogger {
    pub fn new(max_entries: usize, level: LevelFilter) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_entries))),
            max_entries,
            level,
        }
    }

    /// Level for a `-v` count: warnings by default, then info, debug, trace
    pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Install a clone as the global logger; this handle keeps reading the
    /// same entries
    pub fn init(&self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(self.level);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<LogEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().cloned().collect()
    }

    pub fn latest_message(&self) -> Option<String> {
        self.lock().back().map(|entry| entry.message.clone())
    }
}

impl log::Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: format!("{}", record.args()),
        };

        let _ = writeln!(
            std::io::stderr().lock(),
            "{} {:<5} {}: {}",
            entry.timestamp.format("%H:%M:%S%.3f"),
            entry.level,
            entry.target,
            entry.message
        );

        let mut entries = self.lock();
        entries.push_back(entry);
        // Keep only the most recent entries
        while entries.len() > self.max_entries {
            entries.pop_front();
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    fn record(logger: &CliLogger, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("flipbook")
                .args(format_args!("{}", message))
                .build(),
        );
    }

    #[test]
    fn keeps_only_recent_entries() {
        let logger = CliLogger::new(2, LevelFilter::Info);
        record(&logger, Level::Info, "first");
        record(&logger, Level::Info, "second");
        record(&logger, Level::Warn, "third");

        let messages: Vec<_> = logger.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["second", "third"]);
        assert_eq!(logger.latest_message().as_deref(), Some("third"));
    }

    #[test]
    fn filters_below_level() {
        let logger = CliLogger::new(10, LevelFilter::Warn);
        record(&logger, Level::Debug, "hidden");
        assert!(logger.entries().is_empty());
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(CliLogger::level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(CliLogger::level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(CliLogger::level_for_verbosity(9), LevelFilter::Trace);
    }
}
