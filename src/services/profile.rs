use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use tokio::sync::Mutex;

use crate::database::{keys, Storage};
use crate::error::{PersistenceError, SaveProfileError, ValidationError};
use crate::models::{Gender, Profile, ProfileDraft};

pub const MAX_AGE: i32 = 120;

const MS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

fn has_date_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Strict `YYYY-MM-DD` that names a real calendar day.
pub fn parse_birthdate(raw: &str) -> Option<NaiveDate> {
    if !has_date_shape(raw) {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Whole years since local midnight of `birthdate`, using 365.25-day years.
/// Leap-year exactness is deliberately ignored, so the result can be off by
/// one right around a birthday. Future dates give a negative age.
pub fn compute_age(birthdate: &str) -> Option<i32> {
    compute_age_at(birthdate, Utc::now())
}

pub fn compute_age_at(birthdate: &str, now: DateTime<Utc>) -> Option<i32> {
    let date = parse_birthdate(birthdate)?;
    let midnight = date.and_time(NaiveTime::MIN);
    let born = Local
        .from_local_datetime(&midnight)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));

    let elapsed_ms = (now - born).num_milliseconds() as f64;
    Some((elapsed_ms / MS_PER_YEAR).floor() as i32)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Pure validation and normalization of form state into a storable profile.
pub fn normalize(draft: &ProfileDraft, now: DateTime<Utc>) -> Result<Profile, ValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let (birthdate, age) = match non_blank(draft.birthdate.as_deref()) {
        None => (None, None),
        Some(raw) => {
            let age = compute_age_at(raw, now)
                .filter(|age| (0..=MAX_AGE).contains(age))
                .ok_or(ValidationError::InvalidBirthdate)?;
            (parse_birthdate(raw), Some(age as u32))
        }
    };

    let mut interests: Vec<String> = Vec::with_capacity(draft.interests.len());
    for interest in &draft.interests {
        if !interests.contains(interest) {
            interests.push(interest.clone());
        }
    }

    Ok(Profile {
        name: name.to_string(),
        birthdate,
        age,
        gender: non_blank(draft.gender.as_deref()).map(|g| Gender::from(g.to_string())),
        interests,
        image_uri: non_blank(draft.image_uri.as_deref()).map(str::to_string),
    })
}

/// Owns the `user_profile` key.
pub struct ProfileStore {
    storage: Storage,
    write_lock: Mutex<()>,
}

impl ProfileStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// `None` when nothing is stored or the stored record is malformed.
    pub async fn load(&self) -> Option<Profile> {
        self.storage.load_json(keys::PROFILE).await
    }

    /// Validates, normalizes and overwrites the stored profile. Write failures
    /// are returned, not swallowed.
    pub async fn validate_and_save(&self, draft: &ProfileDraft) -> Result<Profile, SaveProfileError> {
        let profile = normalize(draft, Utc::now())?;

        let _guard = self.write_lock.lock().await;
        self.storage.write_json(keys::PROFILE, &profile).await?;
        log::info!("Saved profile for {}", profile.name);

        Ok(profile)
    }

    pub async fn remove(&self) -> Result<(), PersistenceError> {
        let _guard = self.write_lock.lock().await;
        self.storage.remove(keys::PROFILE).await?;
        log::info!("Removed stored profile");
        Ok(())
    }
}
