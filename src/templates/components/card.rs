use maud::{html, Markup};

use crate::domain::Listing;

/// The listing card shared by the swipe deck and the watchlist grid.
pub fn listing_card(listing: &Listing) -> Markup {
    html! {
        div class="card listing-card" {
            @if let Some(url) = &listing.image_url {
                img src=(url) alt=(listing.title);
            } @else {
                div class="no-image" { "No image" }
            }
            div class="card-body" {
                h2 { (listing.title) }
                p class="price" { (listing.price) }
                p class="meta" { (listing.location) " · " (listing.condition) }
                @if !listing.description.is_empty() {
                    p { (listing.description) }
                }
                @if let Some(url) = &listing.listing_url {
                    p { a href=(url) { "Original listing" } }
                }
            }
        }
    }
}
