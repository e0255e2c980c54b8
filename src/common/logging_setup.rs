use crate::app_config::{ApplicationConfig, LogTarget};
use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

pub const BASE_LOGGER_NAME: &str = "ole";

// Unknown names fall back to info.
pub fn parse_level_filter(level_str: &str) -> LevelFilter {
    match level_str.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        s => {
            log::warn!("Unrecognized log level '{}', defaulting to info.", s);
            LevelFilter::Info
        }
    }
}

struct LoggerNode {
    name: String,
    parent: Option<Logger>,
    level: RwLock<Option<LevelFilter>>,
}

/// Handle to a named sink. Clones and repeated lookups share one level.
#[derive(Clone)]
pub struct Logger {
    node: Arc<LoggerNode>,
}

impl Logger {
    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn own_level(&self) -> Option<LevelFilter> {
        *self.node.level.read().unwrap_or_else(|e| e.into_inner())
    }

    // Own level, else the nearest ancestor's.
    pub fn level(&self) -> LevelFilter {
        let mut current = Some(self);
        while let Some(logger) = current {
            if let Some(level) = logger.own_level() {
                return level;
            }
            current = logger.node.parent.as_ref();
        }
        LevelFilter::Info
    }

    pub fn set_level(&self, level: LevelFilter) {
        *self.node.level.write().unwrap_or_else(|e| e.into_inner()) = Some(level);
    }

    // The base logger always keeps a level.
    pub fn clear_level(&self) {
        if self.node.parent.is_some() {
            *self.node.level.write().unwrap_or_else(|e| e.into_inner()) = None;
        }
    }

    pub fn parent(&self) -> Option<&Logger> {
        self.node.parent.as_ref()
    }

    pub fn same_sink(&self, other: &Logger) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level()
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: self.name(), level, "{}", args);
        }
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args)
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args)
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args)
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args)
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args)
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .finish()
    }
}

// Clones share the same registry.
#[derive(Clone)]
pub struct LoggingContext {
    base: Logger,
    registry: Arc<Mutex<HashMap<String, Logger>>>,
}

impl LoggingContext {
    pub fn new(base_name: &str, level: LevelFilter) -> Self {
        let base = Logger {
            node: Arc::new(LoggerNode {
                name: base_name.to_string(),
                parent: None,
                level: RwLock::new(Some(level)),
            }),
        };
        let mut registry = HashMap::new();
        registry.insert(base_name.to_string(), base.clone());
        LoggingContext {
            base,
            registry: Arc::new(Mutex::new(registry)),
        }
    }

    pub fn base_name(&self) -> &str {
        self.base.name()
    }

    pub fn base_logger(&self) -> &Logger {
        &self.base
    }

    // "" is the base logger; dotted sub-names create the intermediate loggers too.
    pub fn get_logger(&self, name: &str) -> Logger {
        if name.is_empty() {
            return self.base.clone();
        }
        let full_name = format!("{}.{}", self.base_name(), name);
        let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        Self::lookup_or_create(&mut registry, self.base_name(), &full_name)
    }

    fn lookup_or_create(registry: &mut HashMap<String, Logger>, base_name: &str, full_name: &str) -> Logger {
        if let Some(existing) = registry.get(full_name) {
            return existing.clone();
        }
        let parent = match full_name.rsplit_once('.') {
            Some((parent_name, _)) if parent_name.len() >= base_name.len() => {
                Self::lookup_or_create(registry, base_name, parent_name)
            }
            _ => registry[base_name].clone(),
        };
        let logger = Logger {
            node: Arc::new(LoggerNode {
                name: full_name.to_string(),
                parent: Some(parent),
                level: RwLock::new(None),
            }),
        };
        registry.insert(full_name.to_string(), logger.clone());
        logger
    }

    pub fn logger_names(&self) -> Vec<String> {
        let registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = registry.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn flush(&self) {
        log::logger().flush();
    }
}

pub fn base_level(settings: &ApplicationConfig, force_debug: bool) -> LevelFilter {
    if force_debug {
        LevelFilter::Debug
    } else {
        settings
            .log_level
            .as_deref()
            .map(parse_level_filter)
            .unwrap_or(LevelFilter::Info)
    }
}

// Most verbose level any configured logger asks for. env_logger matches module
// filters by prefix, so this also bounds the crate's own `ole::*` records.
pub fn backend_level(settings: &ApplicationConfig, base: LevelFilter) -> LevelFilter {
    settings
        .logger_levels
        .values()
        .map(|level| parse_level_filter(level))
        .fold(base, Ord::max)
}

/// Install the env_logger backend and build the logging context from settings.
///
/// A backend that is already installed is reported and left in place.
pub fn initialize_logging(settings: &ApplicationConfig, force_debug: bool) -> LoggingContext {
    let level = base_level(settings, force_debug);

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .filter_module(&settings.base_logger_name, backend_level(settings, level))
        .target(match settings.log_target {
            LogTarget::Stdout => Target::Stdout,
            LogTarget::Stderr => Target::Stderr,
        })
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    builder.try_init().unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}. Logging might not work as expected.", e);
    });

    let context = LoggingContext::new(&settings.base_logger_name, level);
    for (child, child_level) in &settings.logger_levels {
        context.get_logger(child).set_level(parse_level_filter(child_level));
    }
    log::debug!("Logging initialized for '{}' at level {}", settings.base_logger_name, level);
    context
}
