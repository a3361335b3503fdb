use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const INTEREST_CATALOG: [&str; 19] = [
    "Musik",
    "Film",
    "Sport",
    "Rejser",
    "Mad",
    "Spil",
    "Kunst",
    "Fotografi",
    "Litteratur",
    "Teknologi",
    "Fitness",
    "Dans",
    "Yoga",
    "Strikning",
    "Havearbejde",
    "Sprog",
    "Frivilligt arbejde",
    "Camping",
    "Klatring",
];

pub const GENDER_OPTIONS: [&str; 3] = ["Mand", "Kvinde", "Andet"];

pub fn is_known_interest(interest: &str) -> bool {
    INTEREST_CATALOG.contains(&interest)
}

/// Stored as its display string; anything outside the fixed options is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
    Custom(String),
}

impl Gender {
    pub fn label(&self) -> &str {
        match self {
            Gender::Male => "Mand",
            Gender::Female => "Kvinde",
            Gender::Other => "Andet",
            Gender::Custom(value) => value,
        }
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Mand" => Gender::Male,
            "Kvinde" => Gender::Female,
            "Andet" => Gender::Other,
            _ => Gender::Custom(value),
        }
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub birthdate: Option<NaiveDate>,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
}

/// Unvalidated form state. Becomes a `Profile` only through the profile store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub name: String,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub interests: Vec<String>,
    pub image_uri: Option<String>,
}

impl ProfileDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn set_birthdate(&mut self, date: NaiveDate) {
        self.birthdate = Some(date.format("%Y-%m-%d").to_string());
    }

    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests.iter().any(|i| i == interest)
    }

    /// Adds the interest if absent, removes it if present. Returns whether it is
    /// selected afterwards. Interests outside the catalog are ignored.
    pub fn toggle_interest(&mut self, interest: &str) -> bool {
        if !is_known_interest(interest) {
            return false;
        }
        if self.has_interest(interest) {
            self.interests.retain(|i| i != interest);
            false
        } else {
            self.interests.push(interest.to_string());
            true
        }
    }
}

impl From<&Profile> for ProfileDraft {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            birthdate: profile
                .birthdate
                .map(|d| d.format("%Y-%m-%d").to_string()),
            gender: profile.gender.as_ref().map(|g| g.label().to_string()),
            interests: profile.interests.clone(),
            image_uri: profile.image_uri.clone(),
        }
    }
}
