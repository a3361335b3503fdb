use serde::Serialize;

use crate::models::{demo_partner, ChatMessage, ChatPartner, PROPOSAL_ACTIVITIES};
use crate::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
    pub partner: ChatPartner,
    pub messages: Vec<ChatMessage>,
    pub proposal_activities: Vec<&'static str>,
}

pub async fn get_chat(state: &AppState) -> ChatView {
    ChatView {
        partner: demo_partner(),
        messages: state.conversation.load().await,
        proposal_activities: PROPOSAL_ACTIVITIES.to_vec(),
    }
}

/// `None` when the text was blank and nothing was sent.
pub async fn send_chat_message(state: &AppState, text: &str) -> Option<ChatMessage> {
    state.conversation.append_message(text).await
}

pub async fn propose_activity(state: &AppState, activity: &str) -> Option<ChatMessage> {
    state.conversation.append_proposal(activity).await
}
