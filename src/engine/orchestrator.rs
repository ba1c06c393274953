// src/engine/orchestrator.rs
//
// Sequences one engine turn: parse offers out of the transcript, classify,
// generate the seller reply, then coach the buyer against the transcript
// as it will look once the reply lands. The engine never touches the
// stored conversation; the caller appends what comes back.

use chrono::Utc;

use crate::domain::{Listing, Message, Sender};
use crate::engine::coach::{self, BuyerHelperResponse};
use crate::engine::picker::ReplyPicker;
use crate::engine::seller;

#[derive(Debug, Clone)]
pub struct Turn {
    pub seller_message: Message,
    pub coaching: BuyerHelperResponse,
}

/// The transcript passed in must already end with the buyer's newest
/// message. `message_id` is assigned by the session layer so the engine
/// stays stateless.
pub fn run_turn(
    listing: &Listing,
    transcript: &[Message],
    message_id: String,
    picker: &dyn ReplyPicker,
) -> Turn {
    let reply = seller::generate_reply(listing, transcript, picker);
    let seller_message = Message {
        id: message_id,
        sender: Sender::Seller,
        text: reply,
        timestamp: Utc::now(),
    };

    let mut with_reply = transcript.to_vec();
    with_reply.push(seller_message.clone());
    let coaching = coach::suggest(listing, &with_reply);

    Turn {
        seller_message,
        coaching,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::classifier::{classify, NegotiationPhase};
    use crate::engine::testutil::{listing, msg};
    use crate::engine::FirstPicker;

    #[test]
    fn a_meeting_offer_closes_the_loop_end_to_end() {
        let item = listing(120.0);
        let transcript = vec![msg(Sender::Buyer, "I'll pay $120 for it")];

        let turn = run_turn(&item, &transcript, "msg-2".to_string(), &FirstPicker);

        let mut full = transcript.clone();
        full.push(turn.seller_message.clone());
        let read = classify(&full, item.asking_price);
        assert_eq!(read.phase, NegotiationPhase::Accepted);
        assert_eq!(turn.coaching.target_price, 120.0);
        assert!(turn.coaching.deal_advice.contains("deal"));
    }

    #[test]
    fn the_input_transcript_is_left_untouched() {
        let item = listing(120.0);
        let transcript = vec![msg(Sender::Buyer, "Is it still available?")];
        let before: Vec<String> = transcript.iter().map(|m| m.text.clone()).collect();

        let _ = run_turn(&item, &transcript, "msg-2".to_string(), &FirstPicker);

        let after: Vec<String> = transcript.iter().map(|m| m.text.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn coaching_reflects_the_sellers_fresh_reply() {
        let item = listing(120.0);
        // Buyer lowballs hard; seller will reject; coaching should then
        // recommend a conservative re-offer off the unchanged anchor.
        let transcript = vec![msg(Sender::Buyer, "Would you take $50?")];

        let turn = run_turn(&item, &transcript, "msg-2".to_string(), &FirstPicker);

        assert!(turn.seller_message.text.contains("too low for me"));
        // round(120 * 0.95 / 5) * 5 = 115
        assert_eq!(turn.coaching.target_price, 115.0);
    }
}
