// src/catalog/csv.rs
//
// Listing snapshots arrive as flat CSV files written by the external
// scraper: id,title,price,description,image_url,listing_url,condition.
// Fields may be double-quoted to protect embedded commas. Rows that are
// short or otherwise unusable are skipped, not fatal.

use chrono::Utc;
use std::fs;
use std::io;
use std::path::Path;

use crate::domain::{Condition, Listing};

/// Splits one CSV line, honoring double quotes around fields. Quote
/// characters themselves are dropped; each field is trimmed.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Digits-and-dot reading of a display price ("$1,200.50" -> 1200.50).
/// Unparseable prices become 0.0; the engine treats that as "no anchor".
fn numeric_price(display: &str) -> f64 {
    let digits: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(0.0)
}

fn opt(field: &str) -> Option<String> {
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Parses a whole snapshot. The first line is a header and is skipped;
/// rows with fewer than 7 fields are dropped.
pub fn parse_listings_csv(text: &str) -> Vec<Listing> {
    let mut listings = Vec::new();

    for line in text.trim().lines().skip(1) {
        let fields = split_csv_line(line);
        if fields.len() < 7 {
            continue;
        }

        let condition =
            Condition::from_label(&fields[6]).unwrap_or(Condition::UsedGood);
        let price = fields[2].clone();

        listings.push(Listing {
            id: fields[0].clone(),
            title: fields[1].clone(),
            asking_price: numeric_price(&price),
            price,
            description: fields[3].clone(),
            image_url: opt(&fields[4]),
            listing_url: opt(&fields[5]),
            condition,
            quality: condition.quality(),
            // The snapshot format doesn't carry these; fill the same
            // defaults the scraper's consumers expect.
            location: "Downtown, Cityville".to_string(),
            seller_name: Some("Seller".to_string()),
            posted_at: Utc::now(),
            notes_from_seller: None,
        });
    }

    listings
}

pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Vec<Listing>, io::Error> {
    let text = fs::read_to_string(path)?;
    Ok(parse_listings_csv(&text))
}

/// Built-in fallback set for when no snapshot file is around, so the app
/// still has something to browse.
pub fn demo_listings() -> Vec<Listing> {
    let rows = [
        (
            "demo-1",
            "Trek FX 2 hybrid bike",
            "$320",
            "Commuter bike, serviced this spring. New brake pads.",
            Condition::UsedGood,
            Some("Small scuff on the top tube."),
        ),
        (
            "demo-2",
            "IKEA Karlby desk top, walnut",
            "$60",
            "180cm desk top, light wear on one corner.",
            Condition::UsedFair,
            None,
        ),
        (
            "demo-3",
            "Nintendo Switch OLED",
            "$250",
            "Barely used, comes with box and two games.",
            Condition::LikeNew,
            Some("Screen protector on since day one."),
        ),
        (
            "demo-4",
            "Dyson V8 vacuum",
            "$180",
            "",
            Condition::NeedsRepair,
            Some("Battery holds about 10 minutes of charge."),
        ),
    ];

    rows.iter()
        .map(|(id, title, price, description, condition, notes)| Listing {
            id: (*id).to_string(),
            title: (*title).to_string(),
            asking_price: numeric_price(price),
            price: (*price).to_string(),
            description: (*description).to_string(),
            condition: *condition,
            quality: condition.quality(),
            location: "Downtown, Cityville".to_string(),
            image_url: None,
            listing_url: None,
            seller_name: Some("Seller".to_string()),
            posted_at: Utc::now(),
            notes_from_seller: notes.map(str::to_string),
        })
        .collect()
}
