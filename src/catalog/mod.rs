pub mod csv;

pub use csv::{demo_listings, load_snapshot, parse_listings_csv};
