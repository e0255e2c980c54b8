use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub base_logger_name: String,
    pub log_level: Option<String>, // CLI --debug takes precedence
    pub log_target: LogTarget,
    pub timestamp_format: String, // strftime format string
    pub filename_timestamp_format: String,
    pub utc_offset: Option<String>, // e.g. "+02:00"; None samples the host clock
    pub logger_levels: BTreeMap<String, String>, // child name -> level
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            base_logger_name: "ole".to_string(),
            log_level: Some("info".to_string()),
            log_target: LogTarget::Stdout,
            timestamp_format: "%Y-%m-%dT%H:%M:%S%.6f%:z".to_string(),
            filename_timestamp_format: "%Y%m%d_%H%M%S".to_string(),
            utc_offset: None,
            logger_levels: BTreeMap::new(),
        }
    }
}
