use crate::models::{sample_suggestions, FriendSuggestion};

pub fn get_friend_suggestions() -> Vec<FriendSuggestion> {
    sample_suggestions()
}
