//! `log` backend that writes through the host's `rn_log` import.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::raw;

/// Formats each record as `LEVEL target: message` and hands it to the host.
pub struct HostLogger;

static LOGGER: HostLogger = HostLogger;

/// Install [`HostLogger`] as the global logger.
///
/// Fails if a logger is already installed. The max level is applied either way.
pub fn init_logger(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_max_level(level);
    log::set_logger(&LOGGER)
}

impl HostLogger {
    fn format(record: &Record) -> String {
        format!("{} {}: {}", record.level(), record.target(), record.args())
    }
}

impl Log for HostLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format(record);
        unsafe {
            raw::rn_log(line.as_ptr(), line.len());
        }
    }

    fn flush(&self) {}
}
