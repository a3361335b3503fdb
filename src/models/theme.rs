use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Only the exact literal "dark" selects the dark theme.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeTokens {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
}

pub const LIGHT_TOKENS: ThemeTokens = ThemeTokens {
    background: "#ffffff",
    surface: "#f2f3f5",
    text: "#0b1b2b",
    muted: "#6b7280",
    accent: "#2563eb",
};

pub const DARK_TOKENS: ThemeTokens = ThemeTokens {
    background: "#071028",
    surface: "#0f1724",
    text: "#e6eef8",
    muted: "#9aa6b2",
    accent: "#e19d41",
};
