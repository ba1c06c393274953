// src/engine/coach.rs
//
// Buyer-side coaching: suggested replies, a recommended target price, and
// one-line deal advice, keyed off the classifier's phase. Target prices
// always land on a multiple of 5.

use crate::domain::{Listing, Message};
use crate::engine::classifier::{classify, NegotiationPhase};
use crate::engine::price::round_to_nearest_5;

#[derive(Debug, Clone)]
pub struct BuyerHelperResponse {
    /// At most four suggested buyer messages.
    pub suggested_messages: Vec<String>,
    pub target_price: f64,
    pub deal_advice: String,
}

pub fn suggest(listing: &Listing, transcript: &[Message]) -> BuyerHelperResponse {
    let read = classify(transcript, listing.asking_price);
    let anchor = read.last_seller_price;

    match read.phase {
        NegotiationPhase::Accepted => BuyerHelperResponse {
            suggested_messages: vec![
                "Great! That time works for me.".to_string(),
                "Perfect, see you there!".to_string(),
                "Sounds good, I'll text you when I'm on my way.".to_string(),
                "Excellent! Looking forward to it.".to_string(),
            ],
            target_price: anchor,
            deal_advice: "You've got a deal! Now's the time to confirm the meetup details. \
                          Always choose a safe, public location."
                .to_string(),
        },

        NegotiationPhase::Stalled => {
            let target = round_to_nearest_5(anchor * 0.98);
            BuyerHelperResponse {
                suggested_messages: vec![
                    format!("I understand. My best and final offer is ${target}."),
                    "Okay, thanks for considering. I think I'll have to pass for now."
                        .to_string(),
                    "What is the absolute lowest you would take today?".to_string(),
                ],
                target_price: target,
                deal_advice: "The negotiation has stalled. The seller rejected your last \
                              offers. You could try one final offer close to their last \
                              price, or it might be time to walk away."
                    .to_string(),
            }
        }

        NegotiationPhase::SellerFirm { firm_price } => BuyerHelperResponse {
            suggested_messages: vec![
                format!("Okay, I can do ${firm_price}. Let's arrange pickup."),
                "I understand. That's a bit more than I was hoping to spend. I'll have to \
                 think about it."
                    .to_string(),
                "Thanks for letting me know. I'll pass for now, but good luck with the sale!"
                    .to_string(),
            ],
            target_price: firm_price,
            deal_advice: format!(
                "The seller is holding firm at ${firm_price}. This is likely their final \
                 offer. You can accept, or politely walk away if it's too high for you."
            ),
        },

        NegotiationPhase::SellerCountered { counter_price } => {
            let target = round_to_nearest_5(counter_price as f64 * 0.97);
            BuyerHelperResponse {
                suggested_messages: vec![
                    format!(
                        "Thanks for being flexible. Would you take ${target} if I can pick \
                         it up today?"
                    ),
                    format!("How about we meet in the middle at ${target}?"),
                    format!("I can do that. Is ${counter_price} your final price?"),
                    format!("Okay, let's do ${counter_price}. When are you free to meet?"),
                ],
                target_price: target,
                deal_advice: format!(
                    "The seller countered with ${counter_price}. This is a great sign! \
                     They're willing to negotiate. Try offering a bit lower to seal the deal."
                ),
            }
        }

        NegotiationPhase::SellerRejected => {
            let target = round_to_nearest_5(anchor * 0.95);
            BuyerHelperResponse {
                suggested_messages: vec![
                    format!("My apologies if that was too low. Would you consider ${target}?"),
                    "I understand. What's the lowest you'd be willing to go?".to_string(),
                    "No problem. Is the price negotiable at all?".to_string(),
                    "Okay, what price would you be happy with?".to_string(),
                ],
                target_price: target,
                deal_advice: format!(
                    "Your last offer was rejected. Try a more conservative bid around \
                     ${target} to show you're a serious buyer, or ask what they'd be \
                     comfortable with."
                ),
            }
        }

        NegotiationPhase::Opening => {
            let target = round_to_nearest_5(listing.asking_price * 0.88);
            BuyerHelperResponse {
                suggested_messages: vec![
                    format!("Would you take ${target} cash?"),
                    "What's the condition like in person? Any scratches I should know about?"
                        .to_string(),
                    "I'm very interested. Is the price flexible?".to_string(),
                    format!("Could you do ${target}? I can pick it up this afternoon."),
                ],
                target_price: target,
                deal_advice: format!(
                    "Start the negotiation. An opening offer around ${target} is reasonable \
                     for an item in '{}' condition and often gets the conversation started.",
                    listing.condition
                ),
            }
        }
    }
}
