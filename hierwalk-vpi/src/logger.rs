// Copyright 2023-2024 The Regents of the University of California
// Copyright 2024-2025 Cornell University
// released under BSD 3-Clause License
// author: Kevin Laeufer <laeufer@cornell.edu>
//
// Routes `log` records to the simulator console.

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable that selects the log level, e.g., `HIERWALK_LOG=debug`.
pub const LOG_ENV: &str = "HIERWALK_LOG";

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

struct VpiLogger;

static LOGGER: VpiLogger = VpiLogger;

impl Log for VpiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            crate::host::print(&format!(
                "[{} {}] {}\n",
                record.level(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

/// Installs the console logger. Only the first call in a process has an effect.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level_from_env());
    }
}

fn level_from_env() -> LevelFilter {
    std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_LEVEL)
}
