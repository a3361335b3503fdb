use chrono::{Datelike, DateTime, Days, Local, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Utc};
use std::fmt::Display;
use tokio::sync::Mutex;

use crate::database::{keys, Storage};
use crate::error::{ConfirmPlanError, ValidationError};
use crate::models::{is_known_activity, ActivityPlan, Slot};
use crate::utils::time_id;

const WEEKDAYS_DA: [&str; 7] = ["søn.", "man.", "tirs.", "ons.", "tors.", "fre.", "lør."];
const MONTHS_DA: [&str; 12] = [
    "jan.", "feb.", "mar.", "apr.", "maj", "jun.", "jul.", "aug.", "sep.", "okt.", "nov.", "dec.",
];

/// Short Danish date as the device renders it, e.g. `lør. 17. okt.`.
fn short_date_da<D: Datelike>(date: &D) -> String {
    format!(
        "{} {}. {}",
        WEEKDAYS_DA[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        MONTHS_DA[date.month0() as usize]
    )
}

/// Candidate slots starting today in the local time zone.
pub fn candidate_slots(days_ahead: u32, times_of_day: &[NaiveTime]) -> Vec<Slot> {
    candidate_slots_at(&Local::now(), days_ahead, times_of_day)
}

/// One slot per (day offset, time of day), day-major then time-minor.
pub fn candidate_slots_at<Tz>(now: &DateTime<Tz>, days_ahead: u32, times_of_day: &[NaiveTime]) -> Vec<Slot>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let today = now.date_naive();
    let tz = now.timezone();
    let mut slots = Vec::with_capacity(days_ahead as usize * times_of_day.len());

    for offset in 0..days_ahead {
        let Some(day) = today.checked_add_days(Days::new(offset as u64)) else {
            break;
        };
        for time_of_day in times_of_day {
            let local = resolve_local(&tz, day.and_time(*time_of_day));
            let clock = time_of_day.format("%H:%M").to_string();
            let day_label = match offset {
                0 => "I dag".to_string(),
                1 => "I morgen".to_string(),
                _ => short_date_da(&day),
            };
            slots.push(Slot {
                id: format!("{}-{}", offset, clock),
                day_offset: offset,
                time_of_day: *time_of_day,
                time: local.with_timezone(&Utc),
                label: format!("{} {}", day_label, clock),
            });
        }
    }

    slots
}

// A wall-clock time skipped by a DST jump resolves to the first valid instant after it.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return dt;
    }
    tz.from_local_datetime(&(naive + TimeDelta::hours(1)))
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Owns the `activity_plans` key and the slots currently on offer.
pub struct PlanStore {
    storage: Storage,
    days_ahead: u32,
    times_of_day: Vec<NaiveTime>,
    slots: Mutex<Vec<Slot>>,
    write_lock: Mutex<()>,
}

impl PlanStore {
    pub fn new(storage: Storage, days_ahead: u32, times_of_day: Vec<NaiveTime>) -> Self {
        let slots = candidate_slots(days_ahead, &times_of_day);
        Self {
            storage,
            days_ahead,
            times_of_day,
            slots: Mutex::new(slots),
            write_lock: Mutex::new(()),
        }
    }

    /// Regenerates the offered slots from the current clock.
    pub async fn refresh_slots(&self) -> Vec<Slot> {
        let fresh = candidate_slots(self.days_ahead, &self.times_of_day);
        *self.slots.lock().await = fresh.clone();
        fresh
    }

    pub async fn slots(&self) -> Vec<Slot> {
        self.slots.lock().await.clone()
    }

    /// Missing or malformed content is an empty list.
    pub async fn load(&self) -> Vec<ActivityPlan> {
        self.storage
            .load_json(keys::ACTIVITY_PLANS)
            .await
            .unwrap_or_default()
    }

    /// Both selections are required, the activity must be in the catalog and the
    /// slot must be one currently on offer. Read and write failures are returned.
    pub async fn confirm(
        &self,
        activity: Option<&str>,
        slot_id: Option<&str>,
    ) -> Result<ActivityPlan, ConfirmPlanError> {
        let activity = activity
            .map(str::trim)
            .filter(|a| is_known_activity(a))
            .ok_or(ValidationError::MissingSelection)?;
        let slot_id = slot_id.ok_or(ValidationError::MissingSelection)?;
        let slot = self
            .slots
            .lock()
            .await
            .iter()
            .find(|s| s.id == slot_id)
            .cloned()
            .ok_or(ValidationError::MissingSelection)?;

        let _guard = self.write_lock.lock().await;
        // A list that cannot be read is never overwritten.
        let mut plans: Vec<ActivityPlan> = self
            .storage
            .read_json(keys::ACTIVITY_PLANS)
            .await?
            .unwrap_or_default();

        let now = Utc::now();
        let plan = ActivityPlan {
            id: time_id(now),
            activity: activity.to_string(),
            time: slot.time,
            label: slot.label,
            created_at: now,
        };
        plans.push(plan.clone());
        self.storage.write_json(keys::ACTIVITY_PLANS, &plans).await?;
        log::info!("Confirmed plan {} at {}", plan.activity, plan.label);

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PersistenceError;
    use crate::models::{DEFAULT_DAYS_AHEAD, DEFAULT_TIMES_OF_DAY};
    use crate::services::test_support::{FailingStore, FlakyReadStore};
    use chrono::{FixedOffset, Timelike};
    use std::collections::HashSet;

    fn default_times() -> Vec<NaiveTime> {
        DEFAULT_TIMES_OF_DAY
            .iter()
            .map(|t| NaiveTime::parse_from_str(t, "%H:%M").unwrap())
            .collect()
    }

    fn store() -> PlanStore {
        PlanStore::new(Storage::in_memory(), DEFAULT_DAYS_AHEAD, default_times())
    }

    #[test]
    fn fifteen_unique_slots_in_day_then_time_order() {
        let slots = candidate_slots(5, &default_times());
        assert_eq!(slots.len(), 15);

        let ids: HashSet<_> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), 15);

        for pair in slots.windows(2) {
            let a = (pair[0].day_offset, pair[0].time_of_day);
            let b = (pair[1].day_offset, pair[1].time_of_day);
            assert!(a < b, "{:?} should precede {:?}", a, b);
        }
        assert_eq!(slots[0].id, "0-18:00");
        assert_eq!(slots[14].id, "4-20:00");
    }

    #[test]
    fn labels_spell_out_today_and_tomorrow() {
        let now = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 15, 9, 30, 0)
            .unwrap();
        let slots = candidate_slots_at(&now, 3, &default_times());

        assert_eq!(slots[0].label, "I dag 18:00");
        assert_eq!(slots[4].label, "I morgen 19:00");
        assert_eq!(slots[8].label, "lør. 17. okt. 20:00");
    }

    #[test]
    fn short_dates_use_danish_abbreviations() {
        let tue = chrono::NaiveDate::from_ymd_opt(2026, 5, 19).unwrap();
        assert_eq!(short_date_da(&tue), "tirs. 19. maj");
        let sun = chrono::NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(short_date_da(&sun), "søn. 4. jan.");
    }

    #[test]
    fn slot_instants_follow_the_local_clock() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();
        let slots = candidate_slots_at(&now, 2, &default_times());

        // 18:00 at UTC+2 is 16:00 UTC.
        assert_eq!(slots[0].time.hour(), 16);
        assert_eq!(slots[3].time - slots[0].time, TimeDelta::days(1));
    }

    #[test]
    fn custom_grid_dimensions() {
        let times = vec![NaiveTime::from_hms_opt(12, 0, 0).unwrap()];
        assert_eq!(candidate_slots(7, &times).len(), 7);
        assert!(candidate_slots(0, &times).is_empty());
    }

    #[tokio::test]
    async fn confirm_uses_the_selected_slot() {
        let store = store();
        let slot = store
            .slots()
            .await
            .into_iter()
            .find(|s| s.id == "0-18:00")
            .unwrap();

        let plan = store.confirm(Some("Kaffe"), Some("0-18:00")).await.unwrap();
        assert_eq!(plan.activity, "Kaffe");
        assert_eq!(plan.label, slot.label);
        assert_eq!(plan.time, slot.time);
        assert_eq!(store.load().await, vec![plan]);
    }

    #[tokio::test]
    async fn confirm_requires_both_selections() {
        let store = store();
        for (activity, slot) in [
            (None, Some("0-18:00")),
            (Some("Kaffe"), None),
            (Some("Kaffe"), Some("unknown-id")),
            (Some("  "), Some("0-18:00")),
            (Some("Bowling"), Some("0-18:00")),
        ] {
            let err = store.confirm(activity, slot).await.unwrap_err();
            assert!(
                matches!(err, ConfirmPlanError::Validation(ValidationError::MissingSelection)),
                "{:?} / {:?}",
                activity,
                slot
            );
        }
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn plans_accumulate_in_confirmation_order() {
        let store = store();
        store.confirm(Some("Kaffe"), Some("0-18:00")).await.unwrap();
        store.confirm(Some("Middag"), Some("2-20:00")).await.unwrap();

        let activities: Vec<_> = store.load().await.into_iter().map(|p| p.activity).collect();
        assert_eq!(activities, vec!["Kaffe", "Middag"]);
    }

    #[tokio::test]
    async fn malformed_plans_are_treated_as_empty() {
        let storage = Storage::in_memory();
        storage.set(keys::ACTIVITY_PLANS, "not json").await.unwrap();
        let store = PlanStore::new(storage, DEFAULT_DAYS_AHEAD, default_times());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_surfaced() {
        let store = PlanStore::new(Storage::new(FailingStore), DEFAULT_DAYS_AHEAD, default_times());
        let err = store.confirm(Some("Kaffe"), Some("0-18:00")).await.unwrap_err();
        assert!(matches!(err, ConfirmPlanError::Persistence(_)));
    }

    #[tokio::test]
    async fn unreadable_plans_are_left_untouched() {
        let backend = FlakyReadStore::default();
        let store = PlanStore::new(Storage::new(backend.clone()), DEFAULT_DAYS_AHEAD, default_times());
        store.confirm(Some("Kaffe"), Some("0-18:00")).await.unwrap();
        store.confirm(Some("Middag"), Some("1-19:00")).await.unwrap();

        backend.fail_next_read();
        let err = store.confirm(Some("Gåtur"), Some("2-20:00")).await.unwrap_err();
        assert!(matches!(err, ConfirmPlanError::Persistence(PersistenceError::Read { .. })));

        let activities: Vec<_> = store.load().await.into_iter().map(|p| p.activity).collect();
        assert_eq!(activities, vec!["Kaffe", "Middag"]);
    }

    #[tokio::test]
    async fn malformed_plans_block_confirm() {
        let storage = Storage::in_memory();
        storage.set(keys::ACTIVITY_PLANS, "[{\"broken\":").await.unwrap();
        let store = PlanStore::new(storage.clone(), DEFAULT_DAYS_AHEAD, default_times());

        let err = store.confirm(Some("Kaffe"), Some("0-18:00")).await.unwrap_err();
        assert!(matches!(err, ConfirmPlanError::Persistence(PersistenceError::Deserialize { .. })));
        assert_eq!(
            storage.get(keys::ACTIVITY_PLANS).await.unwrap().as_deref(),
            Some("[{\"broken\":")
        );
    }
}
