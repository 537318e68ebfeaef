//! Code implementing the logging solution for `mcompass-tools`.
//!
//! Messages go to stderr so that generated tables and flags on stdout can be
//! piped into the build.

use std::io::Write;

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER: StderrLogger = StderrLogger;

/// Installs the logger, showing messages up to `level`.
pub fn init(level: LevelFilter) {
    // Only fails if a logger is installed already, which is fine.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let prefix = match record.level() {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO ",
            Level::Warn => "WARN ",
            Level::Error => "ERROR",
        };
        // Ignore any logging errors because there is no method to report or deal with them.
        let _ = writeln!(std::io::stderr().lock(), "{prefix}: {}", record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
