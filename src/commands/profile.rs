use serde::Serialize;

use crate::error::CommandError;
use crate::models::{Profile, ProfileDraft, GENDER_OPTIONS, INTEREST_CATALOG};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct ProfileOptions {
    pub interests: Vec<&'static str>,
    pub genders: Vec<&'static str>,
}

pub fn get_profile_options() -> ProfileOptions {
    ProfileOptions {
        interests: INTEREST_CATALOG.to_vec(),
        genders: GENDER_OPTIONS.to_vec(),
    }
}

pub async fn get_profile(state: &AppState) -> Option<Profile> {
    state.profile.load().await
}

/// Form state for the setup screen: the stored profile if any, else blank.
pub async fn get_profile_draft(state: &AppState) -> ProfileDraft {
    state
        .profile
        .load()
        .await
        .map(|p| ProfileDraft::from(&p))
        .unwrap_or_default()
}

pub async fn save_profile(state: &AppState, draft: &ProfileDraft) -> Result<Profile, CommandError> {
    state
        .profile
        .validate_and_save(draft)
        .await
        .map_err(CommandError::from)
}

pub async fn delete_profile(state: &AppState) -> Result<(), CommandError> {
    state.profile.remove().await.map_err(CommandError::from)
}
