use maud::{html, Markup};

use crate::domain::Listing;
use crate::templates::components::listing_card;
use crate::templates::layouts::app::{app_layout, Tab};

pub fn watchlist_page(listings: &[&Listing]) -> Markup {
    app_layout(
        "Watchlist",
        Tab::Watchlist,
        listings.len(),
        html! {
            main class="container" {
                h1 { "Watchlist" }

                @if listings.is_empty() {
                    section class="card" {
                        p { "Nothing saved yet. Swipe right on a listing to keep it here." }
                        a href="/" { "Browse listings" }
                    }
                } @else {
                    div class="grid" {
                        @for listing in listings {
                            div class="watch-item" {
                                (listing_card(listing))
                                div class="watch-actions" {
                                    a class="button" href=(format!("/chat?listing={}", listing.id)) {
                                        "Message seller"
                                    }
                                    form action="/watchlist/remove" method="post" {
                                        input type="hidden" name="listing" value=(listing.id);
                                        button type="submit" { "Remove" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
