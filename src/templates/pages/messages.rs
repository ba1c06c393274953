use maud::{html, Markup};

use crate::templates::layouts::app::{app_layout, Tab};

/// (conversation id, listing title, last message preview)
pub fn messages_page(threads: &[(String, String, String)], watch_count: usize) -> Markup {
    app_layout(
        "Messages",
        Tab::Messages,
        watch_count,
        html! {
            main class="container" {
                h1 { "Messages" }

                @if threads.is_empty() {
                    section class="card" {
                        p { "No conversations yet. Message a seller from a listing to start one." }
                        a href="/" { "Browse listings" }
                    }
                } @else {
                    ul class="thread-list" {
                        @for (id, title, preview) in threads {
                            li {
                                a href=(format!("/chat?conversation={id}")) {
                                    strong { (title) }
                                    span class="preview" { (preview) }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
