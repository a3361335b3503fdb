use serde::Serialize;

use crate::models::{ThemeMode, ThemeTokens};
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeView {
    pub mode: ThemeMode,
    pub is_dark: bool,
    pub tokens: ThemeTokens,
}

impl ThemeView {
    fn current(state: &AppState) -> Self {
        Self {
            mode: state.theme.mode(),
            is_dark: state.theme.is_dark(),
            tokens: state.theme.tokens(),
        }
    }
}

pub fn get_theme(state: &AppState) -> ThemeView {
    ThemeView::current(state)
}

pub async fn toggle_theme(state: &AppState) -> ThemeView {
    state.theme.toggle().await;
    ThemeView::current(state)
}
