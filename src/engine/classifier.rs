// src/engine/classifier.rs

use crate::domain::{Message, Sender};
use crate::engine::{phrases, price};

/// The conversation's current negotiation state, derived fresh from the
/// transcript every turn. Never persisted or incrementally updated, which
/// is what makes classification deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NegotiationPhase {
    Opening,
    SellerCountered { counter_price: i64 },
    SellerFirm { firm_price: f64 },
    SellerRejected,
    Stalled,
    Accepted,
}

/// Classification result plus the numeric anchors downstream generators need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiationRead {
    pub phase: NegotiationPhase,
    /// Latest seller figure, or the asking price if the seller never stated one.
    pub last_seller_price: f64,
    pub last_buyer_offer: Option<i64>,
}

/// Priority ladder over the most recent seller message:
/// accepted > stalled > firm > countered > rejected-once > opening.
/// First matching predicate wins.
pub fn classify(transcript: &[Message], asking_price: f64) -> NegotiationRead {
    let buyer_offers = price::extract_offers(transcript, Sender::Buyer);
    let last_seller_price = price::last_seller_price(transcript, asking_price);

    let last_seller_text = transcript
        .iter()
        .rev()
        .find(|m| m.sender == Sender::Seller)
        .map(|m| m.text.to_lowercase())
        .unwrap_or_default();

    let accepted = phrases::contains_any(&last_seller_text, phrases::DEAL_CONFIRMATIONS);

    // A dollar figure alone is not a counter; it needs negotiation phrasing.
    let counter_price = price::first_dollar_amount(&last_seller_text).filter(|_| {
        phrases::contains_any(&last_seller_text, phrases::COUNTER_OFFER_PHRASES)
    });

    let firm = phrases::contains_any(&last_seller_text, phrases::FIRM_PRICE_PHRASES);
    let rejected = phrases::contains_any(&last_seller_text, phrases::REJECTION_PHRASES)
        && counter_price.is_none();
    let stalled = buyer_offers.len() >= 2 && rejected;

    let phase = if accepted {
        NegotiationPhase::Accepted
    } else if stalled {
        NegotiationPhase::Stalled
    } else if firm {
        let firm_price = price::first_integer(&last_seller_text)
            .map(|v| v as f64)
            .unwrap_or(last_seller_price);
        NegotiationPhase::SellerFirm { firm_price }
    } else if let Some(counter_price) = counter_price {
        NegotiationPhase::SellerCountered { counter_price }
    } else if rejected && !buyer_offers.is_empty() {
        NegotiationPhase::SellerRejected
    } else {
        NegotiationPhase::Opening
    };

    NegotiationRead {
        phase,
        last_seller_price,
        last_buyer_offer: buyer_offers.last().copied(),
    }
}
