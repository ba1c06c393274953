// src/domain/listing.rs

use chrono::{DateTime, Utc};
use std::fmt;

/// Seller-declared condition, as it appears on the listing itself.
/// The display strings match the snapshot column values exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    BrandNew,
    LikeNew,
    UsedGood,
    UsedFair,
    NeedsRepair,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::BrandNew => "Brand New",
            Condition::LikeNew => "Like New",
            Condition::UsedGood => "Used - Good",
            Condition::UsedFair => "Used - Fair",
            Condition::NeedsRepair => "Needs Repair",
        }
    }

    pub fn from_label(label: &str) -> Option<Condition> {
        match label.trim() {
            "Brand New" => Some(Condition::BrandNew),
            "Like New" => Some(Condition::LikeNew),
            "Used - Good" => Some(Condition::UsedGood),
            "Used - Fair" => Some(Condition::UsedFair),
            "Needs Repair" => Some(Condition::NeedsRepair),
            _ => None,
        }
    }

    /// Quality bucket used by the swipe filter's ordinal comparison.
    /// The snapshot format only carries condition, so quality is derived.
    pub fn quality(&self) -> Quality {
        match self {
            Condition::BrandNew | Condition::LikeNew => Quality::LikeNew,
            Condition::UsedGood => Quality::Good,
            Condition::UsedFair => Quality::Used,
            Condition::NeedsRepair => Quality::Poor,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal quality scale: poor < used < good < like new.
/// Ordering comes from declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quality {
    Poor,
    Used,
    Good,
    LikeNew,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Poor => "poor",
            Quality::Used => "used",
            Quality::Good => "good",
            Quality::LikeNew => "like new",
        }
    }

    pub fn from_label(label: &str) -> Option<Quality> {
        match label.trim() {
            "poor" => Some(Quality::Poor),
            "used" => Some(Quality::Used),
            "good" => Some(Quality::Good),
            "like new" | "like_new" => Some(Quality::LikeNew),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A marketplace listing, immutable once loaded from a snapshot.
///
/// `asking_price` is the canonical numeric anchor for negotiation;
/// `price` is the display string as scraped (currency symbol included).
/// The two are not cross-validated at load time.
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub condition: Condition,
    pub quality: Quality,
    pub asking_price: f64,
    pub price: String,
    pub location: String,
    pub image_url: Option<String>,
    pub listing_url: Option<String>,
    pub seller_name: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub notes_from_seller: Option<String>,
}
