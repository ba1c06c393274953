// src/engine/seller.rs
//
// Simulated seller side of the negotiation. Branches are evaluated in
// order; the first match wins. All price maths run against the seller's
// current anchor (their latest stated figure, else the asking price), so
// a counter-offer moves the goalposts for every later turn.

use crate::domain::{Listing, Message, Sender};
use crate::engine::classifier;
use crate::engine::picker::{pick_unused, ReplyPicker};
use crate::engine::{phrases, price};

/// Lower band edge: offers under 70% of the anchor get a flat rejection.
const REJECT_BELOW: f64 = 0.7;
/// Upper band edge: offers at 95%+ of the anchor get a push-for-full-price.
const CLOSE_ENOUGH: f64 = 0.95;

pub fn generate_reply(
    listing: &Listing,
    transcript: &[Message],
    picker: &dyn ReplyPicker,
) -> String {
    let last_buyer_text = transcript
        .iter()
        .rev()
        .find(|m| m.sender == Sender::Buyer)
        .map(|m| m.text.to_lowercase())
        .unwrap_or_default();

    let sent: Vec<String> = transcript
        .iter()
        .filter(|m| m.sender == Sender::Seller)
        .map(|m| m.text.clone())
        .collect();

    let read = classifier::classify(transcript, listing.asking_price);
    let last_buyer_offer = read.last_buyer_offer;
    let anchor = read.last_seller_price;
    let asking = listing.asking_price;

    let reply = |options: Vec<String>| pick_unused(picker, options, &sent);

    // 1) Buyer met or beat the current anchor: accept and arrange the meetup.
    if let Some(offer) = last_buyer_offer {
        if offer as f64 >= anchor {
            return reply(vec![
                format!("Perfect, {offer} works for me. Let's meet at the mall entrance around 6 PM. Here's my number (555-123-4567) to coordinate."),
                format!("You got it. ${offer} is a deal. We can meet at the Starbucks on Oak Street. Let me know what time is good for you."),
                "Deal! Let's arrange a meetup. I'm free this afternoon. The public library downtown is a good spot.".to_string(),
                format!("Awesome, it's a deal at ${offer}. Can you meet at the Target parking lot today? You can text me at (555) 123-4567 when you're on your way."),
            ]);
        }
    }

    // 2) Opening availability check, before any real back-and-forth.
    if last_buyer_text.contains(phrases::AVAILABILITY_WORD) && transcript.len() <= 2 {
        return reply(vec![
            format!("Yep, still available! Asking ${asking}, but open to reasonable offers."),
            format!("Hi there! Yes, it's still available. My price is ${asking}."),
            format!("It is! Happy to answer any questions. Asking ${asking}."),
        ]);
    }

    // 3) Negotiate against the anchor.
    if let Some(offer) = last_buyer_offer {
        let offer_f = offer as f64;

        if offer_f < anchor * REJECT_BELOW {
            return reply(vec![
                format!("Sorry, that's a bit too low for me, especially since I'm already at ${anchor}."),
                "I appreciate the offer, but I can't go that low.".to_string(),
                format!("Unfortunately, that's too far from what I'm looking for. My price is ${anchor}."),
            ]);
        }

        if offer_f < anchor * CLOSE_ENOUGH {
            let counter = price::round_to_nearest_5((offer_f * 1.08).max(anchor * 0.92));
            // The blend can land on or above the anchor; never counter upward.
            if counter >= anchor {
                return reply(vec![
                    format!("I'm firm at ${anchor}. That's my best price."),
                    format!("Sorry, can't go any lower than ${anchor} for now."),
                ]);
            }
            return reply(vec![
                format!("Thanks for the offer, but that's a little low. Could you meet me at ${counter}?"),
                format!("We're getting closer! How about we settle at ${counter}?"),
                format!("I can't do ${offer}, but I could do ${counter} for a quick pickup."),
            ]);
        }

        if offer_f >= anchor * CLOSE_ENOUGH && offer_f < anchor {
            return reply(vec![
                format!("We are so close. My absolute lowest is ${anchor}. Can you make that work?"),
                format!("I appreciate that. If you can do ${anchor}, it's all yours."),
                format!("I was really hoping for ${anchor}. Let's stick with that and we have a deal."),
            ]);
        }
    }

    // 4) Condition questions.
    if phrases::contains_any(&last_buyer_text, phrases::CONDITION_QUESTION_WORDS) {
        let notes_or_default = |fallback: &str| {
            listing
                .notes_from_seller
                .clone()
                .unwrap_or_else(|| fallback.to_string())
        };
        return reply(vec![
            format!(
                "It's in '{}' condition, as mentioned in the listing. {}",
                listing.condition,
                notes_or_default("No major issues to report from my end.")
            ),
            format!("Good question. It's in great shape. {}", listing.description),
            format!(
                "It's held up really well. {}",
                notes_or_default("I haven't noticed any major problems myself.")
            ),
        ]);
    }

    // 5) Nothing matched: stay open.
    reply(vec![
        "I'm open to reasonable offers.".to_string(),
        "Let me know if you have a price in mind!".to_string(),
        "What were you thinking for price?".to_string(),
        format!("My asking price is ${asking}, let me know what you think."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testutil::{listing, msg};
    use crate::engine::FirstPicker;

    fn reply_for(texts: &[(&str, Sender)], asking: f64) -> String {
        let transcript: Vec<Message> =
            texts.iter().map(|(t, s)| msg(*s, t)).collect();
        generate_reply(&listing(asking), &transcript, &FirstPicker)
    }

    #[test]
    fn availability_question_quotes_the_asking_price() {
        let text = reply_for(
            &[("Hi, I saw your listing. Is it still available?", Sender::Buyer)],
            120.0,
        );
        assert!(text.contains("$120"), "got: {text}");
        assert!(text.contains("still available"));
    }

    #[test]
    fn lowball_offer_is_rejected_without_a_new_number() {
        // $80 < 70% of $120 ($84)
        let text = reply_for(&[("Would you take $80?", Sender::Buyer)], 120.0);
        assert!(text.contains("too low for me"), "got: {text}");
        assert!(!text.contains("$80"));
    }

    #[test]
    fn midband_offer_gets_the_blended_counter() {
        // counter = round(max(95*1.08, 120*0.92)/5)*5 = round(110.4/5)*5 = 110
        let text = reply_for(&[("I can do $95", Sender::Buyer)], 120.0);
        assert!(text.contains("$110"), "got: {text}");
    }

    #[test]
    fn near_anchor_offer_gets_the_push_for_full_price() {
        // $115 is in [114, 120)
        let text = reply_for(&[("How about $115?", Sender::Buyer)], 120.0);
        assert!(text.contains("$120"), "got: {text}");
        assert!(text.contains("so close"));
    }

    #[test]
    fn offer_at_the_anchor_is_accepted() {
        let text = reply_for(&[("I'll pay $120", Sender::Buyer)], 120.0);
        assert!(text.contains("works for me"), "got: {text}");
    }

    #[test]
    fn counter_never_reaches_the_anchor() {
        // Sweep the whole negotiable band; any computed counter must stay
        // below the anchor or collapse into the firm branch.
        let anchor = 120.0;
        for offer in 84..114 {
            let counter =
                price::round_to_nearest_5(((offer as f64) * 1.08).max(anchor * 0.92));
            let text = reply_for(&[(format!("${offer}").as_str(), Sender::Buyer)], anchor);
            if counter >= anchor {
                assert!(text.contains("firm") || text.contains("can't go any lower"));
            } else {
                assert!(counter < anchor);
                assert!(text.contains(&format!("${counter}")), "offer {offer}: {text}");
            }
        }
    }

    #[test]
    fn negotiation_follows_the_sellers_moving_anchor() {
        // After the seller counters at $110, a $110 buyer offer closes.
        let text = reply_for(
            &[
                ("Would you take $95?", Sender::Buyer),
                (
                    "Thanks for the offer, but that's a little low. Could you meet me at $110?",
                    Sender::Seller,
                ),
                ("Okay, $110 it is", Sender::Buyer),
            ],
            120.0,
        );
        assert!(text.contains("works for me"), "got: {text}");
    }

    #[test]
    fn condition_question_uses_the_listing_details() {
        let mut item = listing(120.0);
        item.notes_from_seller = Some("Small scuff on the frame.".to_string());
        let transcript = vec![msg(Sender::Buyer, "Any scratches or issues?")];
        let text = generate_reply(&item, &transcript, &FirstPicker);
        assert!(text.contains("'Used - Good' condition"), "got: {text}");
        assert!(text.contains("Small scuff on the frame."));
    }

    #[test]
    fn repeated_branch_prefers_an_unused_variant() {
        let first = reply_for(&[("hello?", Sender::Buyer)], 120.0);
        let transcript = vec![
            msg(Sender::Buyer, "hello?"),
            msg(Sender::Seller, &first),
            msg(Sender::Buyer, "still there?"),
        ];
        let second = generate_reply(&listing(120.0), &transcript, &FirstPicker);
        assert_ne!(first, second);
    }

    #[test]
    fn fallback_reply_for_smalltalk() {
        let text = reply_for(&[("nice weather today", Sender::Buyer)], 120.0);
        assert_eq!(text, "I'm open to reasonable offers.");
    }
}
