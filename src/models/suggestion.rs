use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendSuggestion {
    pub id: String,
    pub name: String,
    /// Number of shared friends.
    pub mutual: u32,
}

/// Static sample list; there is no matching algorithm behind it.
pub fn sample_suggestions() -> Vec<FriendSuggestion> {
    vec![
        FriendSuggestion {
            id: "1".to_string(),
            name: "Mia".to_string(),
            mutual: 3,
        },
        FriendSuggestion {
            id: "2".to_string(),
            name: "Jonas".to_string(),
            mutual: 2,
        },
    ]
}
