use tokio::sync::Mutex;

use crate::database::{keys, Storage};
use crate::models::{ThemeMode, ThemeTokens, DARK_TOKENS, LIGHT_TOKENS};

/// Owns the `app_theme` key.
pub struct PreferenceStore {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl PreferenceStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Anything other than the stored literal "dark" (including a failed read) is light.
    pub async fn load(&self) -> ThemeMode {
        match self.storage.get(keys::THEME).await {
            Ok(raw) => ThemeMode::from_stored(raw.as_deref()),
            Err(e) => {
                log::warn!("Theme load failed, using light: {}", e);
                ThemeMode::Light
            }
        }
    }

    /// Flips the mode and persists it. A failed write is logged; the flip still happens.
    pub async fn toggle(&self, current: ThemeMode) -> ThemeMode {
        let next = current.flipped();
        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.storage.set(keys::THEME, next.as_str()).await {
            log::warn!("Failed to persist theme `{}`: {}", next.as_str(), e);
        }
        next
    }
}

pub fn resolve(mode: ThemeMode) -> ThemeTokens {
    match mode {
        ThemeMode::Light => LIGHT_TOKENS,
        ThemeMode::Dark => DARK_TOKENS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::FailingStore;

    #[tokio::test]
    async fn defaults_to_light_when_nothing_stored() {
        let store = PreferenceStore::new(Storage::in_memory());
        assert_eq!(store.load().await, ThemeMode::Light);
    }

    #[tokio::test]
    async fn only_the_exact_dark_literal_selects_dark() {
        let storage = Storage::in_memory();
        let store = PreferenceStore::new(storage.clone());

        for raw in ["Dark", "dark ", "true", "", "{\"mode\":\"dark\"}"] {
            storage.set(keys::THEME, raw).await.unwrap();
            assert_eq!(store.load().await, ThemeMode::Light, "raw value {:?}", raw);
        }

        storage.set(keys::THEME, "dark").await.unwrap();
        assert_eq!(store.load().await, ThemeMode::Dark);
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let storage = Storage::in_memory();
        let store = PreferenceStore::new(storage.clone());

        assert_eq!(store.toggle(ThemeMode::Light).await, ThemeMode::Dark);
        assert_eq!(storage.get(keys::THEME).await.unwrap().as_deref(), Some("dark"));
        assert_eq!(store.load().await, ThemeMode::Dark);

        assert_eq!(store.toggle(ThemeMode::Dark).await, ThemeMode::Light);
        assert_eq!(storage.get(keys::THEME).await.unwrap().as_deref(), Some("light"));
    }

    #[tokio::test]
    async fn toggle_survives_a_failing_medium() {
        let store = PreferenceStore::new(Storage::new(FailingStore));
        assert_eq!(store.toggle(ThemeMode::Light).await, ThemeMode::Dark);
        assert_eq!(store.load().await, ThemeMode::Light);
    }

    #[test]
    fn resolve_maps_each_mode_to_its_fixed_tokens() {
        assert_eq!(resolve(ThemeMode::Light), LIGHT_TOKENS);
        assert_eq!(resolve(ThemeMode::Dark), DARK_TOKENS);
        assert_ne!(resolve(ThemeMode::Light), resolve(ThemeMode::Dark));
        assert_eq!(resolve(ThemeMode::Dark).accent, "#e19d41");
    }
}
