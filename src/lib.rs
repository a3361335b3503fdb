//! Local-first data layer for the friend finder client.
//!
//! Four stores each own one persisted key: theme preference, user profile,
//! the demo conversation and confirmed activity plans. The presentation layer
//! builds one [`AppState`] and talks to it through [`commands`].

pub mod commands;
pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use anyhow::{Context, Result};
use std::path::Path;

use database::{SqliteStore, Storage};
use models::{LoggingSettings, Settings};
use services::{ConversationStore, PlanStore, PreferenceStore, ProfileStore, ThemeContext};

pub use error::{CommandError, ConfirmPlanError, PersistenceError, SaveProfileError, ValidationError};

pub struct AppState {
    pub settings: Settings,
    pub theme: ThemeContext,
    pub profile: ProfileStore,
    pub conversation: ConversationStore,
    pub planner: PlanStore,
}

impl AppState {
    /// Resolves the data directory from the environment and opens it.
    pub async fn open_default() -> Result<Self> {
        utils::config::load_dotenv();
        let data_dir = utils::config::data_dir()?;
        Self::open(&data_dir).await
    }

    pub async fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("failed to create {}", data_dir.display()))?;

        let settings = utils::config::load_settings(data_dir)?;
        let db_path = data_dir.join(&settings.storage.database_file);
        let store = SqliteStore::open(&db_path, &settings.storage)?;

        Self::with_storage(Storage::new(store), settings).await
    }

    /// Builds every store over an already-opened medium.
    pub async fn with_storage(storage: Storage, settings: Settings) -> Result<Self> {
        utils::config::validate_settings(&settings)?;
        let times = settings.planner.parsed_times()?;

        let theme = ThemeContext::load(PreferenceStore::new(storage.clone())).await;
        let profile = ProfileStore::new(storage.clone());
        let conversation = ConversationStore::new(storage.clone());
        let planner = PlanStore::new(storage, settings.planner.days_ahead, times);

        Ok(Self {
            settings,
            theme,
            profile,
            conversation,
            planner,
        })
    }

    pub async fn in_memory() -> Result<Self> {
        Self::with_storage(Storage::in_memory(), Settings::default()).await
    }
}

/// `RUST_LOG` wins over the configured level. Safe to call more than once.
pub fn init_logging(settings: &LoggingSettings) {
    let mut builder = env_logger::Builder::new();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !filters.trim().is_empty() => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder.parse_filters(&settings.level);
        }
    }
    let _ = builder.try_init();
}
