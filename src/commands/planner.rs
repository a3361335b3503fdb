use serde::Serialize;

use crate::error::CommandError;
use crate::models::{ActivityPlan, PlanSelection, Slot, ACTIVITY_CATALOG};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct PlannerView {
    pub activities: Vec<&'static str>,
    pub slots: Vec<Slot>,
    pub plans: Vec<ActivityPlan>,
}

/// Called on mount; regenerates the slot grid from the current day.
pub async fn get_planner(state: &AppState) -> PlannerView {
    PlannerView {
        activities: ACTIVITY_CATALOG.to_vec(),
        slots: state.planner.refresh_slots().await,
        plans: state.planner.load().await,
    }
}

/// Clears the selection only when the plan was stored.
pub async fn confirm_plan(
    state: &AppState,
    selection: &mut PlanSelection,
) -> Result<ActivityPlan, CommandError> {
    let plan = state
        .planner
        .confirm(selection.activity.as_deref(), selection.slot_id.as_deref())
        .await?;
    selection.clear();
    Ok(plan)
}
