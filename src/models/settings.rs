use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::plan::{DEFAULT_DAYS_AHEAD, DEFAULT_TIMES_OF_DAY};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub version: String,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub planner: PlannerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: "1.0.0".to_string(),
            storage: StorageSettings::default(),
            planner: PlannerSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    pub database_file: String,
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            database_file: "friendfinder.db".to_string(),
            wal_mode: true,
        }
    }
}

fn default_wal_mode() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    pub days_ahead: u32,
    pub times_of_day: Vec<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            days_ahead: DEFAULT_DAYS_AHEAD,
            times_of_day: DEFAULT_TIMES_OF_DAY.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl PlannerSettings {
    pub fn parsed_times(&self) -> Result<Vec<NaiveTime>, chrono::ParseError> {
        self.times_of_day
            .iter()
            .map(|t| NaiveTime::parse_from_str(t.trim(), "%H:%M"))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
