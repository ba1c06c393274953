// src/engine/picker.rs

use rand::Rng;

/// Strategy for choosing among phrasing variants. Injectable so tests can
/// pin the output; the variant choice carries no negotiation meaning.
pub trait ReplyPicker {
    /// `options` is never empty.
    fn pick(&self, options: &[String]) -> String;
}

pub struct RandomPicker;

impl ReplyPicker for RandomPicker {
    fn pick(&self, options: &[String]) -> String {
        let idx = rand::thread_rng().gen_range(0..options.len());
        options[idx].clone()
    }
}

/// Always the first variant. Used by tests for exact assertions.
pub struct FirstPicker;

impl ReplyPicker for FirstPicker {
    fn pick(&self, options: &[String]) -> String {
        options[0].clone()
    }
}

/// Prefers a variant the seller has not already sent in this conversation,
/// so one chat never repeats itself word-for-word. Falls back to the full
/// variant list once everything has been used.
pub fn pick_unused(
    picker: &dyn ReplyPicker,
    options: Vec<String>,
    already_sent: &[String],
) -> String {
    let fresh: Vec<String> = options
        .iter()
        .filter(|o| !already_sent.contains(o))
        .cloned()
        .collect();

    if fresh.is_empty() {
        picker.pick(&options)
    } else {
        picker.pick(&fresh)
    }
}
