use maud::{html, Markup};

use crate::domain::{Constraints, DealStyle, Quality, UserPrefs};
use crate::templates::layouts::app::{app_layout, Tab};

const QUALITY_CHOICES: &[Quality] = &[Quality::Poor, Quality::Used, Quality::Good, Quality::LikeNew];
const STYLE_CHOICES: &[DealStyle] = &[DealStyle::Polite, DealStyle::Balanced, DealStyle::Aggressive];

pub fn prefs_page(
    prefs: &UserPrefs,
    constraints: &Constraints,
    watch_count: usize,
    saved: bool,
) -> Markup {
    app_layout(
        "Preferences",
        Tab::Prefs,
        watch_count,
        html! {
            main class="container" {
                h1 { "Preferences" }

                @if saved {
                    p class="flash" { "Preferences saved." }
                }

                form action="/prefs" method="post" class="card prefs-form" {
                    label for="max_price" { "Maximum price ($)" }
                    input type="number" step="0.01" min="0" name="max_price" id="max_price"
                        value=[prefs.max_price.map(|v| v.to_string())];

                    label for="min_quality" { "Minimum quality" }
                    select name="min_quality" id="min_quality" {
                        option value="" selected[prefs.min_quality.is_none()] { "Any" }
                        @for quality in QUALITY_CHOICES {
                            option value=(quality)
                                selected[prefs.min_quality == Some(*quality)] { (quality) }
                        }
                    }

                    label for="locations" { "Preferred locations (comma separated)" }
                    input type="text" name="locations" id="locations"
                        value=(prefs.preferred_locations.join(", "));

                    label for="deal_style" { "Deal style" }
                    select name="deal_style" id="deal_style" {
                        option value="" selected[prefs.deal_style.is_none()] { "Default (balanced)" }
                        @for style in STYLE_CHOICES {
                            option value=(style.as_str())
                                selected[prefs.deal_style == Some(*style)] { (style.as_str()) }
                        }
                    }

                    label class="checkbox" {
                        input type="checkbox" name="must_have_images" value="on"
                            checked[constraints.must_have_images];
                        " Only show listings with photos"
                    }

                    button type="submit" { "Save" }
                }
            }
        },
    )
}
