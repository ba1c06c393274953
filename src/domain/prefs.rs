// src/domain/prefs.rs

use crate::domain::listing::Quality;

/// How aggressively the draft coach discounts when proposing a counter-offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealStyle {
    Polite,
    Balanced,
    Aggressive,
}

impl DealStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DealStyle::Polite => "polite",
            DealStyle::Balanced => "balanced",
            DealStyle::Aggressive => "aggressive",
        }
    }

    pub fn from_label(label: &str) -> Option<DealStyle> {
        match label.trim() {
            "polite" => Some(DealStyle::Polite),
            "balanced" => Some(DealStyle::Balanced),
            "aggressive" => Some(DealStyle::Aggressive),
            _ => None,
        }
    }
}

/// Per-session buyer preferences. All optional; empty prefs accept everything.
#[derive(Debug, Clone, Default)]
pub struct UserPrefs {
    pub max_price: Option<f64>,
    pub min_quality: Option<Quality>,
    pub preferred_locations: Vec<String>,
    pub deal_style: Option<DealStyle>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Constraints {
    pub must_have_images: bool,
}
