use crate::catalog::demo_listings;
use crate::state::Store;
use astra::Response;
use std::io::Read;

/// Fresh in-memory store seeded with the demo catalog.
pub fn init_test_store() -> Store {
    Store::new(demo_listings())
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}
