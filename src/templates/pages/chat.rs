use maud::{html, Markup};

use crate::domain::{Conversation, Listing};
use crate::engine::coach::BuyerHelperResponse;
use crate::engine::draft::DraftCoach;
use crate::templates::layouts::app::{app_layout, Tab};

pub struct ChatPageVm<'a> {
    pub listing: &'a Listing,
    pub conversation: &'a Conversation,
    pub coaching: BuyerHelperResponse,
    pub draft: DraftCoach,
    /// (conversation id, listing title) for the thread switcher.
    pub threads: Vec<(String, String)>,
    pub watch_count: usize,
}

pub fn chat_page(vm: &ChatPageVm) -> Markup {
    app_layout(
        "Messages",
        Tab::Messages,
        vm.watch_count,
        html! {
            main class="container chat" {
                aside class="threads" {
                    h4 { "Conversations" }
                    ul {
                        @for (id, title) in &vm.threads {
                            li {
                                @if *id == vm.conversation.id {
                                    strong { (title) }
                                } @else {
                                    a href=(format!("/chat?conversation={id}")) { (title) }
                                }
                            }
                        }
                    }
                }

                section class="thread" {
                    header class="thread-header" {
                        h2 { (vm.listing.title) }
                        span class="price" { (vm.listing.price) }
                        @if let Some(name) = &vm.listing.seller_name {
                            span class="meta" { "Seller: " (name) }
                        }
                        a href=(format!("/api/estimate?listing={}", vm.listing.id)) {
                            "Fair price check"
                        }
                        form action="/chat/delete" method="post" {
                            input type="hidden" name="conversation" value=(vm.conversation.id);
                            button type="submit" class="danger" { "Delete conversation" }
                        }
                    }

                    div class="bubbles" {
                        @for message in &vm.conversation.messages {
                            div id=(message.id) class=(format!("bubble {}", message.sender.as_str())) {
                                p { (message.text) }
                                span class="stamp" { (message.timestamp.format("%-I:%M %p")) }
                            }
                        }
                    }

                    (coaching_card(&vm.conversation.id, &vm.coaching))
                    (draft_card(&vm.draft))

                    form action="/chat/send" method="post" class="composer" {
                        input type="hidden" name="conversation" value=(vm.conversation.id);
                        input type="text" name="text" placeholder="Write a message…" required;
                        button type="submit" { "Send" }
                    }
                }
            }
        },
    )
}

fn coaching_card(conversation_id: &str, coaching: &BuyerHelperResponse) -> Markup {
    html! {
        section class="card coaching" {
            h4 { "Negotiation coach" }
            p class="target" { "Target price: $" (coaching.target_price) }
            p { (coaching.deal_advice) }
            div class="suggestions" {
                @for suggestion in &coaching.suggested_messages {
                    form action="/chat/send" method="post" {
                        input type="hidden" name="conversation" value=(conversation_id);
                        input type="hidden" name="text" value=(suggestion);
                        button type="submit" class="suggestion" { (suggestion) }
                    }
                }
            }
        }
    }
}

fn draft_card(draft: &DraftCoach) -> Markup {
    html! {
        section class="card draft-coach" {
            h4 { "Message coach" }
            p class="meta" { "Goal: " (draft.goal.as_str()) }

            @if let Some(counter) = &draft.counter_offer {
                p { "Suggested counter-offer: " strong { (counter.suggested_price) } }
                p class="meta" { (counter.rationale) }
            }

            dl {
                dt { "Polite" }
                dd { (draft.draft_messages.polite) }
                dt { "Balanced" }
                dd { (draft.draft_messages.balanced) }
                dt { "Direct" }
                dd { (draft.draft_messages.direct) }
            }

            @if !draft.tactics_safety_tips.is_empty() {
                h5 { "Tips" }
                ul {
                    @for tip in &draft.tactics_safety_tips {
                        li { (tip) }
                    }
                }
            }

            p class="meta" { "Next: " (draft.next_best_action) }

            @if !draft.risks.is_empty() {
                ul class="risks" {
                    @for risk in &draft.risks {
                        li { (risk) }
                    }
                }
            }

            @if !draft.notes.is_empty() {
                ul class="notes" {
                    @for note in &draft.notes {
                        li { (note) }
                    }
                }
            }
        }
    }
}
