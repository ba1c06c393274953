// The negotiation/browsing rule engine. Everything in here is a pure
// function of its inputs (plus an injectable phrasing picker); nothing
// mutates a transcript or holds state between calls.

pub mod classifier;
pub mod coach;
pub mod draft;
pub mod orchestrator;
pub mod phrases;
pub mod picker;
pub mod price;
pub mod seller;
pub mod swipe;

pub use classifier::{classify, NegotiationPhase, NegotiationRead};
pub use coach::BuyerHelperResponse;
pub use picker::{FirstPicker, RandomPicker, ReplyPicker};
pub use price::ParsedPrice;
pub use swipe::{Decision, SwipeReport};
