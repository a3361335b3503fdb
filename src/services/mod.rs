pub mod conversation;
pub mod planner;
pub mod preference;
pub mod profile;
pub mod theme;

pub use conversation::ConversationStore;
pub use planner::{candidate_slots, candidate_slots_at, PlanStore};
pub use preference::{resolve, PreferenceStore};
pub use profile::{compute_age, ProfileStore};
pub use theme::ThemeContext;
