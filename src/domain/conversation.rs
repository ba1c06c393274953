// src/domain/conversation.rs

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    Buyer,
    Seller,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Buyer => "buyer",
            Sender::Seller => "seller",
        }
    }
}

/// One chat message. A transcript is an ordered `Vec<Message>`,
/// append-only; the engine only ever reads a snapshot of it.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// A negotiation thread for one listing. Lives only in session memory;
/// deletion is whole-conversation, individual messages are never removed.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub id: String,
    pub listing_id: String,
    pub messages: Vec<Message>,
    pub last_message_at: DateTime<Utc>,
}
