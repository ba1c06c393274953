// src/engine/draft.rs
//
// Message-coach mode: drafts a buyer message in three tones for whatever
// the conversation currently needs (opening, haggling, detail questions,
// meetup logistics), with a deal-style-driven discount curve for the
// suggested counter-offer.

use crate::domain::{DealStyle, Listing, Message, Quality, Sender, UserPrefs};
use crate::engine::{phrases, price};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageGoal {
    StartConversation,
    NegotiatePrice,
    ClarifyDetails,
    ScheduleMeetup,
}

impl MessageGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageGoal::StartConversation => "start_conversation",
            MessageGoal::NegotiatePrice => "negotiate_price",
            MessageGoal::ClarifyDetails => "clarify_details",
            MessageGoal::ScheduleMeetup => "schedule_meetup",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DraftMessages {
    pub polite: String,
    pub balanced: String,
    pub direct: String,
}

#[derive(Debug, Clone)]
pub struct CounterOffer {
    pub suggested_price: String,
    pub rationale: String,
}

#[derive(Debug, Clone)]
pub struct DraftCoach {
    pub goal: MessageGoal,
    pub draft_messages: DraftMessages,
    pub counter_offer: Option<CounterOffer>,
    pub tactics_safety_tips: Vec<String>,
    pub next_best_action: String,
    pub risks: Vec<String>,
    pub notes: Vec<String>,
}

/// Fraction knocked off the asking price, by quality bucket and deal style.
fn discount(quality: Quality, style: DealStyle) -> f64 {
    match quality {
        Quality::LikeNew => match style {
            DealStyle::Aggressive => 0.10,
            DealStyle::Balanced => 0.07,
            DealStyle::Polite => 0.05,
        },
        Quality::Good | Quality::Used => match style {
            DealStyle::Aggressive => 0.20,
            DealStyle::Balanced => 0.15,
            DealStyle::Polite => 0.10,
        },
        Quality::Poor => match style {
            DealStyle::Aggressive => 0.30,
            DealStyle::Balanced => 0.25,
            DealStyle::Polite => 0.20,
        },
    }
}

fn derive_goal(transcript: &[Message]) -> MessageGoal {
    let buyer: Vec<String> = transcript
        .iter()
        .filter(|m| m.sender == Sender::Buyer)
        .map(|m| m.text.to_lowercase())
        .collect();
    let seller: Vec<String> = transcript
        .iter()
        .filter(|m| m.sender == Sender::Seller)
        .map(|m| m.text.to_lowercase())
        .collect();

    let seller_spoke_last = transcript
        .last()
        .map(|m| m.sender == Sender::Seller)
        .unwrap_or(false);
    let asked_availability = buyer
        .iter()
        .any(|m| m.contains(phrases::AVAILABILITY_WORD));

    if transcript.is_empty() || (seller_spoke_last && !asked_availability) {
        MessageGoal::StartConversation
    } else if buyer
        .iter()
        .any(|m| phrases::contains_any(m, phrases::NEGOTIATION_WORDS))
        || seller.iter().any(|m| m.contains("offer"))
    {
        MessageGoal::NegotiatePrice
    } else if buyer
        .iter()
        .any(|m| phrases::contains_any(m, phrases::DETAIL_WORDS))
    {
        MessageGoal::ClarifyDetails
    } else if buyer
        .iter()
        .any(|m| phrases::contains_any(m, phrases::MEETUP_WORDS))
    {
        MessageGoal::ScheduleMeetup
    } else {
        MessageGoal::StartConversation
    }
}

pub fn draft(listing: &Listing, prefs: &UserPrefs, transcript: &[Message]) -> DraftCoach {
    let goal = derive_goal(transcript);
    let title = &listing.title;
    let mut risks = Vec::new();
    let notes = Vec::new();
    let mut tips = Vec::new();

    let mut out = match goal {
        MessageGoal::StartConversation => {
            tips.push("Offer quick pickup to sweeten the deal.".to_string());
            if listing.description.is_empty() {
                risks.push("Lacking detailed item description.".to_string());
            }
            DraftCoach {
                goal,
                draft_messages: DraftMessages {
                    polite: format!(
                        "Hello, is this {title} still available? I can pick up at your convenience."
                    ),
                    balanced: format!("Hi, is this {title} still available? I'm flexible for pickup."),
                    direct: "Available? Flexible pickup.".to_string(),
                },
                counter_offer: None,
                tactics_safety_tips: tips,
                next_best_action: "Send a message to confirm availability.".to_string(),
                risks,
                notes,
            }
        }

        MessageGoal::NegotiatePrice => {
            tips.push("Mention quick payment for a better price.".to_string());
            tips.push("Always confirm the final agreed price in writing.".to_string());

            match price::parse_price(&listing.price) {
                Some(original) => {
                    let style = prefs.deal_style.unwrap_or(DealStyle::Balanced);
                    let pct = discount(listing.quality, style);
                    let suggested = original.value * (1.0 - pct);
                    let suggested_price =
                        format!("{}{}", original.currency, suggested.round());
                    let counter = CounterOffer {
                        rationale: format!(
                            "Suggesting {}% below asking based on item quality and your deal style.",
                            (pct * 100.0).round()
                        ),
                        suggested_price: suggested_price.clone(),
                    };
                    DraftCoach {
                        goal,
                        draft_messages: DraftMessages {
                            polite: format!(
                                "Would you consider {suggested_price} for the {title}? I can arrange a quick pickup."
                            ),
                            balanced: format!(
                                "I'm interested in the {title}. My offer is {suggested_price} for a fast deal."
                            ),
                            direct: format!("Offer {suggested_price}. Can pick up today."),
                        },
                        counter_offer: Some(counter),
                        tactics_safety_tips: tips,
                        next_best_action: "Send a counter-offer or ask about price flexibility."
                            .to_string(),
                        risks,
                        notes,
                    }
                }
                None => {
                    risks.push("Could not determine original price for counter-offer.".to_string());
                    DraftCoach {
                        goal,
                        draft_messages: DraftMessages {
                            polite: format!(
                                "I'm very interested in the {title}. Is there any flexibility on the price?"
                            ),
                            balanced: format!("What's the lowest you'd go for the {title}?"),
                            direct: format!("Best price for {title}?"),
                        },
                        counter_offer: None,
                        tactics_safety_tips: tips,
                        next_best_action: "Send a counter-offer or ask about price flexibility."
                            .to_string(),
                        risks,
                        notes,
                    }
                }
            }
        }

        MessageGoal::ClarifyDetails => {
            tips.push("Ensure all questions are answered before proceeding.".to_string());
            if listing.description.is_empty() {
                risks.push("Lacking detailed item description.".to_string());
            }
            DraftCoach {
                goal,
                draft_messages: DraftMessages {
                    polite: "Could you please provide more details about the item's condition? \
                             For example, about [specific aspect]?"
                        .to_string(),
                    balanced: "Can you clarify the condition, especially regarding [specific aspect]?"
                        .to_string(),
                    direct: "More condition details? Specifically [specific aspect]?".to_string(),
                },
                counter_offer: None,
                tactics_safety_tips: tips,
                next_best_action: "Ask specific questions about the item condition.".to_string(),
                risks,
                notes,
            }
        }

        MessageGoal::ScheduleMeetup => {
            tips.push("Meet in a well-lit, public place.".to_string());
            tips.push(
                "Share your meetup location and time with a friend or family member.".to_string(),
            );
            DraftCoach {
                goal,
                draft_messages: DraftMessages {
                    polite: "Great! Would picking up between 10 AM-12 PM tomorrow or 4 PM-6 PM on \
                             Thursday work for you? I'm available near a public place like the \
                             City Park."
                        .to_string(),
                    balanced: "Let's meet tomorrow between 10 AM-12 PM or Thursday 4 PM-6 PM. \
                               Perhaps at the City Park?"
                        .to_string(),
                    direct: "Pickup times: Tomorrow 10-12 PM or Thursday 4-6 PM. Meet at City Park."
                        .to_string(),
                },
                counter_offer: None,
                tactics_safety_tips: tips,
                next_best_action: "Propose concrete time windows and a safe public location."
                    .to_string(),
                risks,
                notes,
            }
        }
    };

    out.tactics_safety_tips.truncate(3);
    out
}
