use astra::Server;
use std::net::SocketAddr;

use crate::router::handle;
use crate::state::Store;

mod catalog;
mod domain;
mod engine;
mod errors;
mod estimator;
mod responses;
mod router;
mod state;
mod templates;

#[cfg(test)]
mod tests;

const DEFAULT_SNAPSHOT: &str = "data/listings.csv";

fn main() {
    // 1️⃣ Load the listing snapshot (path overridable as the first arg)
    let snapshot_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SNAPSHOT.to_string());

    let listings = match catalog::load_snapshot(&snapshot_path) {
        Ok(listings) if !listings.is_empty() => {
            println!("✅ Loaded {} listings from {snapshot_path}", listings.len());
            listings
        }
        Ok(_) => {
            eprintln!("⚠️ {snapshot_path} had no usable rows, using demo listings");
            catalog::demo_listings()
        }
        Err(e) => {
            eprintln!("⚠️ Couldn't read {snapshot_path} ({e}), using demo listings");
            catalog::demo_listings()
        }
    };

    // 2️⃣ Session state shared across worker threads
    let store = Store::new(listings);

    // 3️⃣ Start the server
    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &store) {
        Ok(resp) => resp,
        Err(err) => responses::error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
