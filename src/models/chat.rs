use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Activities offered from the chat composer.
pub const PROPOSAL_ACTIVITIES: [&str; 3] = ["Kaffe", "Biograftur", "Middag"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Message,
    Proposal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub from_me: bool,
    pub text: String,
    pub time: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn is_proposal(&self) -> bool {
        self.kind == MessageKind::Proposal
    }
}

/// The other side of the demo conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPartner {
    pub id: String,
    pub name: String,
    pub age: u32,
}

pub fn demo_partner() -> ChatPartner {
    ChatPartner {
        id: "u1".to_string(),
        name: "Mia".to_string(),
        age: 24,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_messages_written_by_the_mobile_client() {
        let raw = r#"[{"id":"1718000000000","fromMe":true,"text":"Kaffe","time":"2024-06-10T06:13:20.000Z","type":"proposal"}]"#;
        let messages: Vec<ChatMessage> = serde_json::from_str(raw).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].is_proposal());
        assert!(messages[0].from_me);
        assert_eq!(messages[0].time.timestamp_millis(), 1_718_000_000_000);
    }
}
