// src/state.rs
//
// Session state for the whole app: the loaded catalog, the swipe cursor,
// preferences, the watchlist, and every open conversation. In-memory only;
// gone when the process exits. The engine never sees this type — it gets
// read-only snapshots and hands back values to append.

use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::domain::{Constraints, Conversation, Listing, Message, Sender, UserPrefs};
use crate::engine::coach::BuyerHelperResponse;
use crate::engine::orchestrator;
use crate::engine::picker::ReplyPicker;
use crate::errors::ServerError;

pub struct AppState {
    pub listings: Vec<Listing>,
    pub cursor: usize,
    pub prefs: UserPrefs,
    pub constraints: Constraints,
    pub watchlist: Vec<String>,
    pub conversations: Vec<Conversation>,
    next_id: u64,
}

impl AppState {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            cursor: 0,
            prefs: UserPrefs::default(),
            constraints: Constraints::default(),
            watchlist: Vec::new(),
            conversations: Vec::new(),
            next_id: 0,
        }
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    pub fn listing(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// The listing currently under the swipe cursor, or None once the
    /// deck is exhausted.
    pub fn current_listing(&self) -> Option<&Listing> {
        self.listings.get(self.cursor)
    }

    pub fn advance_cursor(&mut self) {
        if self.cursor < self.listings.len() {
            self.cursor += 1;
        }
    }

    pub fn restart_deck(&mut self) {
        self.cursor = 0;
    }

    pub fn add_to_watchlist(&mut self, listing_id: &str) {
        if self.listing(listing_id).is_some()
            && !self.watchlist.iter().any(|id| id == listing_id)
        {
            self.watchlist.push(listing_id.to_string());
        }
    }

    pub fn remove_from_watchlist(&mut self, listing_id: &str) {
        self.watchlist.retain(|id| id != listing_id);
    }

    pub fn watchlisted(&self) -> Vec<&Listing> {
        self.watchlist
            .iter()
            .filter_map(|id| self.listing(id))
            .collect()
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == id)
    }

    pub fn conversation_for_listing(&self, listing_id: &str) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|c| c.listing_id == listing_id)
    }

    /// Opens (or resumes) the conversation for a listing. A new thread
    /// starts with the canned buyer opener and the seller's simulated
    /// reply to it, so the chat never renders empty.
    pub fn start_conversation(
        &mut self,
        listing_id: &str,
        picker: &dyn ReplyPicker,
    ) -> Result<String, ServerError> {
        if let Some(existing) = self.conversation_for_listing(listing_id) {
            return Ok(existing.id.clone());
        }

        let listing = self
            .listing(listing_id)
            .ok_or(ServerError::NotFound)?
            .clone();

        let conversation_id = self.fresh_id("conv");
        let opener = Message {
            id: self.fresh_id("msg"),
            sender: Sender::Buyer,
            text: format!(
                "Hi, I saw your listing for the {}. Is it still available?",
                listing.title
            ),
            timestamp: Utc::now(),
        };

        let transcript = vec![opener.clone()];
        let turn = orchestrator::run_turn(&listing, &transcript, self.fresh_id("msg"), picker);

        let now = Utc::now();
        self.conversations.push(Conversation {
            id: conversation_id.clone(),
            listing_id: listing_id.to_string(),
            messages: vec![opener, turn.seller_message],
            last_message_at: now,
        });

        Ok(conversation_id)
    }

    /// Appends the buyer's message and the seller's simulated reply, and
    /// hands back the coaching computed for the updated thread. The engine
    /// runs on a snapshot; only this method mutates the thread.
    pub fn send_buyer_message(
        &mut self,
        conversation_id: &str,
        text: &str,
        picker: &dyn ReplyPicker,
    ) -> Result<BuyerHelperResponse, ServerError> {
        let listing_id = self
            .conversation(conversation_id)
            .ok_or(ServerError::NotFound)?
            .listing_id
            .clone();
        let listing = self
            .listing(&listing_id)
            .ok_or(ServerError::NotFound)?
            .clone();

        let buyer_message = Message {
            id: self.fresh_id("msg"),
            sender: Sender::Buyer,
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        let seller_id = self.fresh_id("msg");

        let conversation = self
            .conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
            .ok_or(ServerError::NotFound)?;

        conversation.messages.push(buyer_message);
        let turn = orchestrator::run_turn(&listing, &conversation.messages, seller_id, picker);
        conversation.messages.push(turn.seller_message);
        conversation.last_message_at = Utc::now();

        Ok(turn.coaching)
    }

    pub fn delete_conversation(&mut self, conversation_id: &str) {
        self.conversations.retain(|c| c.id != conversation_id);
    }
}

/// Cheap-to-clone handle shared across server worker threads. All access
/// goes through the closure so lock handling stays in one place.
#[derive(Clone)]
pub struct Store {
    inner: Arc<Mutex<AppState>>,
}

impl Store {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(AppState::new(listings))),
        }
    }

    pub fn with_state<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut AppState) -> Result<T, ServerError>,
    {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| ServerError::StateError("state mutex poisoned".into()))?;
        f(&mut state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::demo_listings;
    use crate::engine::FirstPicker;

    #[test]
    fn watchlist_ignores_duplicates_and_unknown_ids() {
        let mut state = AppState::new(demo_listings());
        state.add_to_watchlist("demo-1");
        state.add_to_watchlist("demo-1");
        state.add_to_watchlist("no-such-listing");
        assert_eq!(state.watchlist, vec!["demo-1".to_string()]);
    }

    #[test]
    fn starting_a_conversation_twice_resumes_the_first() {
        let mut state = AppState::new(demo_listings());
        let first = state.start_conversation("demo-1", &FirstPicker).unwrap();
        let second = state.start_conversation("demo-1", &FirstPicker).unwrap();
        assert_eq!(first, second);
        assert_eq!(state.conversations.len(), 1);
    }

    #[test]
    fn new_conversations_open_with_buyer_and_seller_messages() {
        let mut state = AppState::new(demo_listings());
        let id = state.start_conversation("demo-1", &FirstPicker).unwrap();
        let conversation = state.conversation(&id).unwrap();

        assert_eq!(conversation.messages.len(), 2);
        assert_eq!(conversation.messages[0].sender, Sender::Buyer);
        assert!(conversation.messages[0].text.contains("still available"));
        assert_eq!(conversation.messages[1].sender, Sender::Seller);
        // The opener asks about availability; the reply quotes the asking price.
        assert!(conversation.messages[1].text.contains("$320"));
    }

    #[test]
    fn sending_a_message_appends_both_sides() {
        let mut state = AppState::new(demo_listings());
        let id = state.start_conversation("demo-1", &FirstPicker).unwrap();
        state
            .send_buyer_message(&id, "Would you take $300?", &FirstPicker)
            .unwrap();

        let conversation = state.conversation(&id).unwrap();
        assert_eq!(conversation.messages.len(), 4);
        assert_eq!(conversation.messages[2].text, "Would you take $300?");
        assert_eq!(conversation.messages[3].sender, Sender::Seller);
    }

    #[test]
    fn message_ids_are_unique_across_a_session() {
        let mut state = AppState::new(demo_listings());
        let id = state.start_conversation("demo-1", &FirstPicker).unwrap();
        state
            .send_buyer_message(&id, "hello", &FirstPicker)
            .unwrap();

        let mut ids: Vec<String> = state
            .conversation(&id)
            .unwrap()
            .messages
            .iter()
            .map(|m| m.id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn deck_cursor_stops_at_the_end_and_can_restart() {
        let mut state = AppState::new(demo_listings());
        let total = state.listings.len();
        for _ in 0..total + 3 {
            state.advance_cursor();
        }
        assert!(state.current_listing().is_none());

        state.restart_deck();
        assert!(state.current_listing().is_some());
    }
}
