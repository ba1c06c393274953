use maud::{html, Markup};

use crate::domain::Listing;
use crate::engine::{Decision, SwipeReport};
use crate::templates::components::listing_card;
use crate::templates::layouts::app::{app_layout, Tab};

pub struct SwipePageVm<'a> {
    pub listing: Option<&'a Listing>,
    pub report: Option<SwipeReport>,
    /// 1-based position in the deck, and the deck size.
    pub position: usize,
    pub total: usize,
    pub watch_count: usize,
}

pub fn swipe_page(vm: &SwipePageVm) -> Markup {
    app_layout(
        "Browse",
        Tab::Browse,
        vm.watch_count,
        html! {
            main class="container" {
                @match (vm.listing, vm.report.as_ref()) {
                    (Some(listing), Some(report)) => {
                        p class="deck-position" { "Listing " (vm.position) " of " (vm.total) }

                        (listing_card(listing))

                        (evaluation_card(report))

                        div class="swipe-controls" {
                            form action="/swipe" method="post" {
                                input type="hidden" name="listing" value=(listing.id);
                                input type="hidden" name="action" value="left";
                                button type="submit" class="swipe-left" { "✕ Pass" }
                            }
                            form action="/swipe" method="post" {
                                input type="hidden" name="listing" value=(listing.id);
                                input type="hidden" name="action" value="right";
                                button type="submit" class="swipe-right" { "♥ Save" }
                            }
                            a class="button" href=(format!("/chat?listing={}", listing.id)) {
                                "Message seller"
                            }
                        }
                    },
                    _ => {
                        section class="card" {
                            h2 { "No more listings" }
                            p { "You've seen everything in this snapshot." }
                            form action="/swipe" method="post" {
                                input type="hidden" name="action" value="restart";
                                button type="submit" { "Start over" }
                            }
                        }
                    },
                }
            }
        },
    )
}

fn evaluation_card(report: &SwipeReport) -> Markup {
    html! {
        section class="card evaluation" {
            h3 {
                @match report.decision {
                    Decision::Accept => span class="badge accept" { "Fits your preferences" },
                    Decision::Reject => span class="badge reject" { "Doesn't fit" },
                }
            }
            p { (report.reason) }

            h4 { "Quick facts" }
            ul {
                @for fact in &report.quick_facts {
                    li { (fact) }
                }
            }

            @if !report.risks.is_empty() {
                h4 { "Risks" }
                ul class="risks" {
                    @for risk in &report.risks {
                        li { (risk) }
                    }
                }
            }

            @if !report.notes.is_empty() {
                ul class="notes" {
                    @for note in &report.notes {
                        li { (note) }
                    }
                }
            }

            @if !report.follow_up_questions.is_empty() {
                h4 { "Worth asking" }
                ul {
                    @for q in &report.follow_up_questions {
                        li { (q) }
                    }
                }
                p class="meta" { "After saving, review: " (report.extra_fields.join(", ")) }
            }
        }
    }
}
