use tokio::sync::{watch, Mutex};

use super::preference::{resolve, PreferenceStore};
use crate::models::{ThemeMode, ThemeTokens};

/// Injectable theme state for the presentation layer. The preference store is
/// the source of truth; screens subscribe to re-render on change.
pub struct ThemeContext {
    store: PreferenceStore,
    sender: watch::Sender<ThemeMode>,
    toggle_lock: Mutex<()>,
}

impl ThemeContext {
    pub async fn load(store: PreferenceStore) -> Self {
        let mode = store.load().await;
        log::debug!("Theme loaded: {}", mode.as_str());
        let (sender, _) = watch::channel(mode);
        Self {
            store,
            sender,
            toggle_lock: Mutex::new(()),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.sender.borrow()
    }

    pub fn tokens(&self) -> ThemeTokens {
        resolve(self.mode())
    }

    pub fn is_dark(&self) -> bool {
        self.mode().is_dark()
    }

    pub async fn toggle(&self) -> ThemeMode {
        let _guard = self.toggle_lock.lock().await;
        let next = self.store.toggle(self.mode()).await;
        self.sender.send_replace(next);
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeMode> {
        self.sender.subscribe()
    }
}
