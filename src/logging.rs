//! Logger facade: fans each message out to a set of named destinations.
//!
//! A `Logger` is an explicit context object. Components that report
//! diagnostics hold an `Arc<Logger>` instead of reaching for a global
//! registry. Every destination is a plain `log::Log`, so any logger from
//! the `log` ecosystem can be plugged in.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::error::{Result, WlbbError};

/// Name of the destination registered by [`Logger::new`].
pub const SYSTEM_LOGGER: &str = "system";

const TARGET: &str = "wlbb";

/// Destination forwarding to the process-wide `log` logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLogger;

impl Log for SystemLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level() && log::logger().enabled(metadata)
    }

    fn log(&self, record: &Record) {
        log::logger().log(record);
    }

    fn flush(&self) {
        log::logger().flush();
    }
}

/// Destination keeping every record in memory.
#[derive(Debug)]
pub struct MemoryLogger {
    level: LevelFilter,
    records: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    /// Create a memory destination accepting records up to `level`.
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the captured records.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Captured messages at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new(LevelFilter::Trace)
    }
}

impl Log for MemoryLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.records
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

/// An interface between a WLBB component and multiple loggers.
pub struct Logger {
    destinations: RwLock<BTreeMap<String, Arc<dyn Log>>>,
}

impl Logger {
    /// Create a logger with the `system` destination registered.
    pub fn new() -> Self {
        let logger = Self::empty();
        logger.add_logger(SYSTEM_LOGGER, Arc::new(SystemLogger));
        logger
    }

    /// Create a logger without any destination.
    pub fn empty() -> Self {
        Self {
            destinations: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register a destination, replacing any destination with the same name.
    pub fn add_logger(&self, name: impl Into<String>, destination: Arc<dyn Log>) {
        self.destinations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), destination);
    }

    /// Get a specific destination.
    pub fn get_logger(&self, name: &str) -> Result<Arc<dyn Log>> {
        self.destinations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
            .ok_or_else(|| WlbbError::UnknownLogger(name.to_string()))
    }

    /// Names of all registered destinations.
    pub fn logger_names(&self) -> Vec<String> {
        self.destinations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Log `msg` at `level` on every destination accepting it.
    pub fn log(&self, level: Level, msg: impl fmt::Display) {
        let destinations = self.destinations.read().unwrap_or_else(PoisonError::into_inner);
        let metadata = Metadata::builder().level(level).target(TARGET).build();

        for destination in destinations.values() {
            if destination.enabled(&metadata) {
                destination.log(
                    &Record::builder()
                        .metadata(metadata.clone())
                        .args(format_args!("{}", msg))
                        .module_path_static(Some(module_path!()))
                        .build(),
                );
            }
        }
    }

    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Level::Info, msg);
    }

    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Level::Error, msg);
    }

    /// `log` has no level above error.
    pub fn critical(&self, msg: impl fmt::Display) {
        self.log(Level::Error, msg);
    }

    /// Flush every destination. Call before the process exits.
    pub fn flush(&self) {
        for destination in self.destinations.read().unwrap_or_else(PoisonError::into_inner).values() {
            destination.flush();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("destinations", &self.logger_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_system() {
        let logger = Logger::new();
        assert_eq!(logger.logger_names(), vec![SYSTEM_LOGGER.to_string()]);
        assert!(logger.get_logger(SYSTEM_LOGGER).is_ok());
    }

    #[test]
    fn test_unknown_logger() {
        let logger = Logger::new();
        let Err(err) = logger.get_logger("missing") else {
            panic!("expected an unknown logger error");
        };
        assert!(matches!(err, WlbbError::UnknownLogger(name) if name == "missing"));
    }

    #[test]
    fn test_fan_out() {
        let logger = Logger::empty();
        let first = Arc::new(MemoryLogger::default());
        let second = Arc::new(MemoryLogger::default());
        logger.add_logger("first", first.clone());
        logger.add_logger("second", second.clone());

        logger.warn("disk almost full");
        logger.info(format_args!("{} devices", 3));

        for dest in [&first, &second] {
            assert_eq!(
                dest.records(),
                vec![
                    (Level::Warn, "disk almost full".to_string()),
                    (Level::Info, "3 devices".to_string()),
                ]
            );
        }
    }

    #[test]
    fn test_destination_level_filter() {
        let logger = Logger::empty();
        let dest = Arc::new(MemoryLogger::new(LevelFilter::Warn));
        logger.add_logger("warnings", dest.clone());

        logger.debug("noise");
        logger.error("boom");
        logger.critical("down");

        assert_eq!(
            dest.records(),
            vec![(Level::Error, "boom".to_string()), (Level::Error, "down".to_string())]
        );
    }

    #[test]
    fn test_add_logger_replaces() {
        let logger = Logger::empty();
        let old = Arc::new(MemoryLogger::default());
        let new = Arc::new(MemoryLogger::default());
        logger.add_logger("mem", old.clone());
        logger.add_logger("mem", new.clone());

        logger.info("hello");

        assert!(old.records().is_empty());
        assert_eq!(new.messages(Level::Info), vec!["hello".to_string()]);
        assert_eq!(logger.logger_names().len(), 1);
    }
}
