// src/engine/swipe.rs
//
// The swipe filter: a pure accept/reject decision over one listing and the
// session's preferences. Reject rules run in a fixed order and the first
// hit supplies the reason; risk notes are collected regardless of the
// decision.

use crate::domain::{Constraints, Listing, Quality, UserPrefs};
use crate::engine::price::{format_price_for_display, parse_price};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Extra listing fields worth surfacing once a listing is accepted.
pub const EXTRA_FIELDS: &[&str] = &["description", "seller_name", "posted_at"];

#[derive(Debug, Clone)]
pub struct SwipeReport {
    pub decision: Decision,
    pub reason: String,
    pub quick_facts: Vec<String>,
    pub risks: Vec<String>,
    pub notes: Vec<String>,
    pub extra_fields: &'static [&'static str],
    /// At most three, only on accept.
    pub follow_up_questions: Vec<String>,
}

pub fn evaluate(listing: &Listing, prefs: &UserPrefs, constraints: &Constraints) -> SwipeReport {
    let mut decision = Decision::Accept;
    let mut reason = "Item fits preferences.".to_string();
    let mut notes = Vec::new();

    let listing_price = parse_price(&listing.price);
    if listing_price.is_none() {
        notes.push("Could not parse listing price.".to_string());
    }

    // Reject rules, first match wins. An unparseable price skips the price
    // rule rather than rejecting.
    if let (Some(max), Some(price)) = (prefs.max_price, listing_price.as_ref()) {
        if price.value > max {
            decision = Decision::Reject;
            reason = format!(
                "Exceeds maximum price preference of {}.",
                format_price_for_display(price.currency, max)
            );
        }
    }
    if decision == Decision::Accept {
        if let Some(min_quality) = prefs.min_quality {
            if listing.quality < min_quality {
                decision = Decision::Reject;
                reason = format!("Below minimum quality preference of {min_quality}.");
            }
        }
    }
    if decision == Decision::Accept && !prefs.preferred_locations.is_empty() {
        let in_area = prefs
            .preferred_locations
            .iter()
            .any(|loc| listing.location.contains(loc.as_str()));
        if !in_area {
            decision = Decision::Reject;
            reason = "Location outside preferred areas.".to_string();
        }
    }
    if decision == Decision::Accept && constraints.must_have_images && listing.image_url.is_none() {
        decision = Decision::Reject;
        reason = "Missing required image.".to_string();
    }

    let quick_facts = vec![
        format!("Title: {}", listing.title),
        format!("Price: {}", listing.price),
        format!("Location: {}", listing.location),
        format!("Quality: {}", listing.quality),
        format!("Posted: {}", listing.posted_at.format("%-m/%-d/%Y")),
    ];

    let mut risks = Vec::new();
    if listing.description.is_empty() {
        risks.push("Missing detailed description.".to_string());
    }
    if listing.image_url.is_none() {
        risks.push("No image available.".to_string());
    }

    let mut follow_up_questions = Vec::new();
    if decision == Decision::Accept {
        follow_up_questions.push("Is the price negotiable?".to_string());
        if matches!(listing.quality, Quality::Used | Quality::Poor) {
            follow_up_questions
                .push("What are the specific conditions or any defects?".to_string());
        } else {
            follow_up_questions.push("When is a good time for pickup?".to_string());
        }
        follow_up_questions.push("What accessories are included?".to_string());
        follow_up_questions.truncate(3);
    }

    SwipeReport {
        decision,
        reason,
        quick_facts,
        risks,
        notes,
        extra_fields: EXTRA_FIELDS,
        follow_up_questions,
    }
}
