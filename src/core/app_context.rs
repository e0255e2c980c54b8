use crate::app_config::ApplicationConfig;
use crate::common::logging_setup::{self, Logger, LoggingContext};
use crate::common::timestamp_utils::{parse_utc_offset, SystemClock};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use log::debug;
use std::time::Instant;

/// Process-level state built once at startup and passed to components.
pub struct AppContext {
    config: ApplicationConfig,
    clock: SystemClock,
    logging: LoggingContext,
}

impl AppContext {
    /// Capture the clock offset and install logging.
    pub fn initialize(config: &ApplicationConfig, force_debug: bool) -> Result<Self> {
        let start_time = Instant::now();
        let logging = logging_setup::initialize_logging(config, force_debug);
        let clock = Self::clock_from_config(config)?;
        let context = Self::from_parts(config.clone(), clock, logging);
        debug!("🚀 {} context initialized (UTC offset {}) in {:?}", context.logging.base_name(), clock.offset(), start_time.elapsed());
        Ok(context)
    }

    /// Build a context without touching the global log backend.
    pub fn from_parts(config: ApplicationConfig, clock: SystemClock, logging: LoggingContext) -> Self {
        AppContext { config, clock, logging }
    }

    pub fn clock_from_config(config: &ApplicationConfig) -> Result<SystemClock> {
        match config.utc_offset.as_deref() {
            Some(raw) => {
                let offset = parse_utc_offset(raw)
                    .with_context(|| format!("Invalid utc_offset '{}'", raw))?;
                debug!("Using configured UTC offset {}", offset);
                Ok(SystemClock::with_offset(offset))
            }
            None => Ok(SystemClock::capture()),
        }
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    pub fn clock(&self) -> &SystemClock {
        &self.clock
    }

    pub fn logging(&self) -> &LoggingContext {
        &self.logging
    }

    pub fn logger(&self, name: &str) -> Logger {
        self.logging.get_logger(name)
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.clock.now()
    }

    pub fn shutdown(self) {
        debug!("🏁 Flushing log output for '{}'", self.logging.base_name());
        self.logging.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn configured_offset_wins_over_host_clock() {
        let config = ApplicationConfig {
            utc_offset: Some("-03:30".to_string()),
            ..ApplicationConfig::default()
        };
        let clock = AppContext::clock_from_config(&config).unwrap();
        assert_eq!(clock.offset(), FixedOffset::west_opt(3 * 3600 + 1800).unwrap());
    }

    #[test]
    fn invalid_offset_is_an_error() {
        let config = ApplicationConfig {
            utc_offset: Some("later".to_string()),
            ..ApplicationConfig::default()
        };
        assert!(AppContext::clock_from_config(&config).is_err());
    }

    #[test]
    fn context_hands_out_shared_loggers_and_pinned_time() {
        let offset = FixedOffset::east_opt(5 * 3600).unwrap();
        let ctx = AppContext::from_parts(
            ApplicationConfig::default(),
            SystemClock::with_offset(offset),
            LoggingContext::new("ole", LevelFilter::Info),
        );
        assert!(ctx.logger("sub").same_sink(&ctx.logging().get_logger("sub")));
        assert_eq!(ctx.logger("sub").name(), "ole.sub");
        assert_eq!(*ctx.now().offset(), offset);
        ctx.shutdown();
    }
}
