// src/engine/price.rs

use crate::domain::{Message, Sender};

/// A price pulled out of a display string like "$120" or "£49.99".
/// Derived on demand, never stored back onto the listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedPrice {
    pub currency: char,
    pub value: f64,
}

/// Parses a whole-string price: one currency symbol from {$, €, £} followed
/// by digits and an optional 2-decimal fraction. Anything else is `None`,
/// and callers must treat `None` as "unparseable", not as zero.
pub fn parse_price(text: &str) -> Option<ParsedPrice> {
    let mut chars = text.chars();
    let currency = chars.next()?;
    if !matches!(currency, '$' | '€' | '£') {
        return None;
    }

    let number = chars.as_str();
    let (int_part, frac_part) = match number.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (number, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    let value = number.parse().ok()?;
    Some(ParsedPrice { currency, value })
}

/// First `$<digits>` embedded anywhere in the text, truncated to whole
/// dollars ("$95.50" reads as 95). `None` when no dollar figure appears.
pub fn first_dollar_amount(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b != b'$' {
            continue;
        }
        let start = i + 1;
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > start {
            return text[start..end].parse().ok();
        }
    }
    None
}

/// First bare run of digits in the text ("happy at 110 today" reads as 110).
/// Used for firm-price extraction where sellers drop the dollar sign.
pub fn first_integer(text: &str) -> Option<i64> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(|b| b.is_ascii_digit())?;
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    text[start..end].parse().ok()
}

/// The offer ladder: every dollar amount `sender` has stated, one per
/// message (first figure wins), in transcript order. Messages with no
/// figure are skipped, not represented as gaps.
pub fn extract_offers(transcript: &[Message], sender: Sender) -> Vec<i64> {
    transcript
        .iter()
        .filter(|m| m.sender == sender)
        .filter_map(|m| first_dollar_amount(&m.text))
        .collect()
}

/// The seller's current anchor: their latest stated figure, or the asking
/// price if they have never stated one.
pub fn last_seller_price(transcript: &[Message], asking_price: f64) -> f64 {
    extract_offers(transcript, Sender::Seller)
        .last()
        .map(|&v| v as f64)
        .unwrap_or(asking_price)
}

/// Rounds to the nearest multiple of 5, half away from zero. All suggested
/// target prices go through this so the numbers read "clean".
pub fn round_to_nearest_5(value: f64) -> f64 {
    (value / 5.0).round() * 5.0
}

/// "$150" for whole dollars, "$99.99" when cents are present.
pub fn format_price_for_display(currency: char, value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{currency}{value:.0}")
    } else {
        format!("{currency}{value:.2}")
    }
}
