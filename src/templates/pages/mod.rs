pub mod chat;
pub mod messages;
pub mod prefs;
pub mod swipe;
pub mod watchlist;

pub use chat::chat_page;
pub use messages::messages_page;
pub use prefs::prefs_page;
pub use swipe::swipe_page;
pub use watchlist::watchlist_page;
