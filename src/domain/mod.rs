pub mod conversation;
pub mod listing;
pub mod prefs;

pub use conversation::{Conversation, Message, Sender};
pub use listing::{Condition, Listing, Quality};
pub use prefs::{Constraints, DealStyle, UserPrefs};
