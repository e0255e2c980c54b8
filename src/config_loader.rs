use crate::app_config::ApplicationConfig;
use crate::common::timestamp_utils::parse_utc_offset;
use anyhow::{bail, Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::time::Instant;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MasterConfig {
    #[serde(rename = "application", default)]
    pub app_settings: ApplicationConfig,
}

pub fn load_config(path: &str) -> Result<MasterConfig> {
    debug!("📄 Attempting to load config from: {}", path);
    let start_time = Instant::now();

    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file '{}'. 📖", path))?;
    debug!("Read config file in {:?}", start_time.elapsed());

    let config = parse_config(&config_str)
        .with_context(|| format!("Invalid configuration in '{}'", path))?;

    debug!("✅ Successfully loaded and validated configuration from '{}' in {:?}", path, start_time.elapsed());
    Ok(config)
}

pub fn parse_config(config_str: &str) -> Result<MasterConfig> {
    let config: MasterConfig = if config_str.trim().is_empty() {
        MasterConfig::default()
    } else {
        serde_yaml::from_str(config_str).context("Failed to parse YAML configuration. 💔")?
    };
    validate_master_config(&config).context("Master configuration validation failed 👎")?;
    Ok(config)
}

const KNOWN_LEVELS: [&str; 7] = ["off", "error", "warn", "warning", "info", "debug", "trace"];

fn validate_level(level: &str, owner: &str) -> Result<()> {
    if !KNOWN_LEVELS.contains(&level.trim().to_lowercase().as_str()) {
        bail!("❌ Unknown log level '{}' for {}.", level, owner);
    }
    Ok(())
}

fn validate_master_config(config: &MasterConfig) -> Result<()> {
    debug!("🕵️ Validating master configuration...");
    let settings = &config.app_settings;

    let base = settings.base_logger_name.as_str();
    if base.is_empty() {
        bail!("❌ base_logger_name cannot be empty.");
    }
    if base.contains('.') || base.chars().any(char::is_whitespace) {
        bail!("❌ base_logger_name '{}' must not contain dots or whitespace.", base);
    }

    if let Some(level) = &settings.log_level {
        validate_level(level, "the base logger")?;
    }
    for (child, level) in &settings.logger_levels {
        if child.is_empty() {
            bail!("❌ logger_levels contains an empty logger name.");
        }
        validate_level(level, &format!("logger '{}'", child))?;
    }

    if settings.timestamp_format.is_empty() {
        bail!("❌ timestamp_format cannot be empty.");
    }
    if settings.filename_timestamp_format.is_empty() {
        bail!("❌ filename_timestamp_format cannot be empty.");
    }

    if let Some(offset) = &settings.utc_offset {
        if parse_utc_offset(offset).is_none() {
            bail!("❌ Invalid utc_offset '{}', expected e.g. '+02:00'.", offset);
        }
    }
    debug!("👍 Master configuration validated.");
    Ok(())
}
