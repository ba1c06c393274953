use crate::router::handle;
use crate::tests::utils::{body_string, init_test_store};
use astra::Body;
use http::{Method, Request};

fn swipe_right(store: &crate::state::Store, listing_id: &str) {
    let form = format!("action=right&listing={listing_id}");
    let req = Request::builder()
        .method(Method::POST)
        .uri("/swipe")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.into_bytes()))
        .unwrap();
    handle(req, store).unwrap();
}

#[test]
fn swiping_right_saves_the_listing() {
    let store = init_test_store();
    swipe_right(&store, "demo-1");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/watchlist")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("Trek FX 2 hybrid bike"));
    assert!(body.contains("Message seller"));
}

#[test]
fn saving_twice_keeps_one_entry() {
    let store = init_test_store();
    swipe_right(&store, "demo-1");

    // Restart the deck and save the same listing again.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/swipe")
        .body(Body::from("action=restart".as_bytes().to_vec()))
        .unwrap();
    handle(req, &store).unwrap();
    swipe_right(&store, "demo-1");

    let req = Request::builder()
        .method(Method::GET)
        .uri("/watchlist")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert_eq!(body.matches("Trek FX 2 hybrid bike").count(), 1);
}

#[test]
fn removing_a_listing_empties_the_watchlist() {
    let store = init_test_store();
    swipe_right(&store, "demo-2");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/watchlist/remove")
        .body(Body::from("listing=demo-2".as_bytes().to_vec()))
        .unwrap();
    let resp = handle(req, &store).unwrap();
    assert_eq!(resp.status(), 303);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/watchlist")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("Nothing saved yet"));
}
