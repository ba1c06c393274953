use maud::{html, Markup, DOCTYPE};

/// Which nav entry is highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Browse,
    Watchlist,
    Messages,
    Prefs,
}

pub fn app_layout(title: &str, active: Tab, watch_count: usize, content: Markup) -> Markup {
    let nav_item = |tab: Tab, href: &str, label: &str| {
        html! {
            li {
                a href=(href) class=(if tab == active { "active" } else { "" }) { (label) }
            }
        }
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Buynder" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="topbar" {
                    h3 { "Buynder." }
                    nav {
                        ul {
                            (nav_item(Tab::Browse, "/", "Browse"))
                            (nav_item(Tab::Watchlist, "/watchlist", "Watchlist"))
                            (nav_item(Tab::Messages, "/messages", "Messages"))
                            (nav_item(Tab::Prefs, "/prefs", "Preferences"))
                        }
                    }
                    span class="watch-count" {
                        "♥ " (watch_count)
                    }
                }
                (content)
            }
        }
    }
}
