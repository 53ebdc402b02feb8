use std::{
    io::Write as _,
    sync::{OnceLock, PoisonError, RwLock},
};

use crossterm::style::{Color, Stylize as _};
use log::{LevelFilter, Log, Metadata, Record};

static LOGGER: OnceLock<AppLogger> = OnceLock::new();

pub fn get_logger() -> &'static AppLogger {
    // default configuration
    LOGGER.get_or_init(|| AppLogger::new(LevelFilter::Warn))
}

/// Installs the logger, later calls only change its level.
pub fn init(level: LevelFilter) {
    let logger = get_logger();
    if log::set_logger(logger).is_ok() {
        log::set_max_level(LevelFilter::Trace);
    }
    logger.set_min_level(level);
}

/// `-q` wins over any number of `-v`.
pub fn level_from_verbosity(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }

    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Writes records to stderr as `LEVEL source -> message`.
pub struct AppLogger {
    min_level: RwLock<LevelFilter>,
}

impl AppLogger {
    fn new(min_level: LevelFilter) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> LevelFilter {
        *self.min_level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_min_level(&self, level: LevelFilter) {
        *self.min_level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    fn format(record: &Record) -> String {
        let color = match record.level() {
            log::Level::Error => Color::Red,
            log::Level::Warn => Color::Yellow,
            log::Level::Info => Color::White,
            log::Level::Debug => Color::Blue,
            log::Level::Trace => Color::Grey,
        };

        format!(
            "{} {} -> {}",
            format!("{:<5}", record.level()).with(color),
            record.module_path().unwrap_or("unknown").dim(),
            record.args()
        )
    }
}

impl Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // nowhere left to report a failing stderr
            let _ = writeln!(std::io::stderr().lock(), "{}", Self::format(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_from_verbosity(0, false), LevelFilter::Warn);
        assert_eq!(level_from_verbosity(1, false), LevelFilter::Info);
        assert_eq!(level_from_verbosity(2, false), LevelFilter::Debug);
        assert_eq!(level_from_verbosity(9, false), LevelFilter::Trace);
        assert_eq!(level_from_verbosity(3, true), LevelFilter::Error);
    }

    #[test]
    fn respects_min_level() {
        let logger = AppLogger::new(LevelFilter::Info);
        let meta = |level| Metadata::builder().level(level).build();
        assert!(logger.enabled(&meta(Level::Warn)));
        assert!(logger.enabled(&meta(Level::Info)));
        assert!(!logger.enabled(&meta(Level::Debug)));

        logger.set_min_level(LevelFilter::Off);
        assert!(!logger.enabled(&meta(Level::Error)));
    }

    #[test]
    fn message_layout() {
        let line = AppLogger::format(
            &Record::builder()
                .args(format_args!("hello"))
                .level(Level::Info)
                .module_path(Some("dfmaze::algorithms"))
                .build(),
        );
        assert!(line.contains("dfmaze::algorithms"));
        assert!(line.ends_with("-> hello"));
    }
}
