use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::models::Settings;

const ENV_DATA_DIR: &str = "FRIENDFINDER_DATA_DIR";
const ENV_LOG_LEVEL: &str = "FRIENDFINDER_LOG";
const ENV_DAYS_AHEAD: &str = "FRIENDFINDER_DAYS_AHEAD";

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `FRIENDFINDER_DATA_DIR`, else the platform data directory.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = env_value(ENV_DATA_DIR) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().context("no platform data directory available")?;
    Ok(base.join("friendfinder"))
}

pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config").join("settings.json")
}

/// Reads `<data_dir>/config/settings.json` if present, applies environment
/// overrides and validates the result.
pub fn load_settings(data_dir: &Path) -> Result<Settings> {
    let path = settings_path(data_dir);
    let mut settings = if path.exists() {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str::<Settings>(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?
    } else {
        Settings::default()
    };

    apply_env_defaults(&mut settings)?;
    validate_settings(&settings)?;
    Ok(settings)
}

pub fn save_settings(data_dir: &Path, settings: &Settings) -> Result<()> {
    let path = settings_path(data_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(&path, content)?;
    Ok(())
}

pub fn apply_env_defaults(settings: &mut Settings) -> Result<()> {
    if let Some(level) = env_value(ENV_LOG_LEVEL) {
        settings.logging.level = level;
    }
    if let Some(days) = env_value(ENV_DAYS_AHEAD) {
        settings.planner.days_ahead = days
            .parse()
            .with_context(|| format!("{} must be a positive integer, got `{}`", ENV_DAYS_AHEAD, days))?;
    }
    Ok(())
}

pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.planner.days_ahead == 0 {
        bail!("planner.days_ahead must be at least 1");
    }
    if settings.planner.times_of_day.is_empty() {
        bail!("planner.times_of_day must not be empty");
    }
    let times = settings
        .planner
        .parsed_times()
        .context("planner.times_of_day entries must be HH:MM")?;
    let mut seen = HashSet::new();
    for time in &times {
        if !seen.insert(*time) {
            bail!("planner.times_of_day contains {} twice", time.format("%H:%M"));
        }
    }
    if settings.storage.database_file.trim().is_empty() {
        bail!("storage.database_file must not be empty");
    }
    Ok(())
}
