use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

pub const ACTIVITY_CATALOG: [&str; 5] = ["Kaffe", "Biograftur", "Middag", "Gåtur", "Brætspil"];

pub const DEFAULT_DAYS_AHEAD: u32 = 5;

pub const DEFAULT_TIMES_OF_DAY: [&str; 3] = ["18:00", "19:00", "20:00"];

pub fn is_known_activity(activity: &str) -> bool {
    ACTIVITY_CATALOG.contains(&activity)
}

/// A schedulable (day, time-of-day) candidate. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    /// `{day_offset}-{HH:MM}`
    pub id: String,
    pub day_offset: u32,
    pub time_of_day: NaiveTime,
    pub time: DateTime<Utc>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPlan {
    pub id: String,
    pub activity: String,
    pub time: DateTime<Utc>,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

/// Which activity and slot are currently highlighted in the planner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSelection {
    pub activity: Option<String>,
    pub slot_id: Option<String>,
}

impl PlanSelection {
    pub fn select_activity(&mut self, activity: impl Into<String>) {
        self.activity = Some(activity.into());
    }

    pub fn select_slot(&mut self, slot_id: impl Into<String>) {
        self.slot_id = Some(slot_id.into());
    }

    pub fn is_complete(&self) -> bool {
        self.activity.is_some() && self.slot_id.is_some()
    }

    pub fn clear(&mut self) {
        self.activity = None;
        self.slot_id = None;
    }
}
