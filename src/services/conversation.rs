use chrono::Utc;
use tokio::sync::Mutex;

use crate::database::{keys, Storage};
use crate::models::{ChatMessage, MessageKind};
use crate::utils::time_id;

/// Owns the `chat_demo_messages` key. Keeps the conversation in memory and
/// rewrites the whole list after every append.
pub struct ConversationStore {
    storage: Storage,
    messages: Mutex<Option<Vec<ChatMessage>>>,
}

impl ConversationStore {
    pub fn new(storage: Storage) -> Self {
        Self {
            storage,
            messages: Mutex::new(None),
        }
    }

    /// Re-reads the persisted list. Missing or malformed content is an empty conversation.
    pub async fn load(&self) -> Vec<ChatMessage> {
        let mut cache = self.messages.lock().await;
        let loaded: Vec<ChatMessage> = self
            .storage
            .load_json(keys::CHAT_MESSAGES)
            .await
            .unwrap_or_default();
        *cache = Some(loaded.clone());
        loaded
    }

    /// Returns `None` and changes nothing when `text` is blank.
    pub async fn append_message(&self, text: &str) -> Option<ChatMessage> {
        self.append(text, MessageKind::Message).await
    }

    /// The activity name comes from the caller's catalog and is not checked here.
    pub async fn append_proposal(&self, activity: &str) -> Option<ChatMessage> {
        self.append(activity, MessageKind::Proposal).await
    }

    async fn append(&self, text: &str, kind: MessageKind) -> Option<ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let mut cache = self.messages.lock().await;
        if cache.is_none() {
            let loaded: Vec<ChatMessage> = self
                .storage
                .load_json(keys::CHAT_MESSAGES)
                .await
                .unwrap_or_default();
            *cache = Some(loaded);
        }
        let messages = cache.get_or_insert_with(Vec::new);

        let now = Utc::now();
        let message = ChatMessage {
            id: time_id(now),
            from_me: true,
            text: text.to_string(),
            time: now,
            kind,
        };
        messages.push(message.clone());

        if let Err(e) = self
            .storage
            .write_json(keys::CHAT_MESSAGES, messages.as_slice())
            .await
        {
            log::warn!("Failed to persist chat ({} messages kept in memory): {}", messages.len(), e);
        }

        Some(message)
    }

    /// Current in-memory conversation, reading it once if nothing is cached yet.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        let cached = self.messages.lock().await.clone();
        match cached {
            Some(messages) => messages,
            None => self.load().await,
        }
    }
}
