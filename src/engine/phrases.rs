// src/engine/phrases.rs
//
// Trigger-phrase tables for the negotiation classifier and the draft coach.
// The phase of a conversation is inferred by substring matching on the
// lowercased message text; these tables are the whole oracle, so tests can
// enumerate exact triggers. Matching is intentionally naive (no stemming,
// no word boundaries).

/// Seller confirmations that close the deal.
pub const DEAL_CONFIRMATIONS: &[&str] = &["deal", "works for me", "you got it"];

/// Negotiation phrasing that marks an embedded dollar figure as a counter-offer.
pub const COUNTER_OFFER_PHRASES: &[&str] = &["how about", "could you do", "meet me at"];

/// Seller language for a take-it-or-leave-it price.
pub const FIRM_PRICE_PHRASES: &[&str] = &[
    "my best price is",
    "lowest is",
    "can't go lower",
    "price is firm",
    "firm on",
];

/// Seller language rejecting the buyer's latest offer.
pub const REJECTION_PHRASES: &[&str] = &["low for me", "can't accept that", "can't go that low"];

/// Buyer questions about the item's state.
pub const CONDITION_QUESTION_WORDS: &[&str] = &["condition", "scratches", "issues"];

/// Buyer availability check.
pub const AVAILABILITY_WORD: &str = "available";

// Draft-coach goal keywords.
pub const NEGOTIATION_WORDS: &[&str] = &["negotiate", "offer", "price"];
pub const DETAIL_WORDS: &[&str] = &["condition", "defect", "rust", "working"];
pub const MEETUP_WORDS: &[&str] = &["pickup", "meet", "time", "where"];

pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}
