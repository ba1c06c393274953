use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, init_test_store};
use astra::Body;
use http::{Method, Request};

#[test]
fn browse_page_shows_the_first_listing_with_its_evaluation() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &store).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Buynder"));
    assert!(body.contains("Trek FX 2 hybrid bike"));
    assert!(body.contains("Listing 1 of 4"));
    // Empty prefs accept everything.
    assert!(body.contains("Fits your preferences"));
    assert!(body.contains("Is the price negotiable?"));
}

#[test]
fn swiping_left_advances_the_deck() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/swipe")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("action=left&listing=demo-1".as_bytes().to_vec()))
        .unwrap();

    let resp = handle(req, &store).expect("Failed to handle request");
    assert_eq!(resp.status(), 303);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("Listing 2 of 4"));
    assert!(body.contains("IKEA Karlby desk top"));
}

#[test]
fn exhausting_the_deck_offers_a_restart() {
    let store = init_test_store();

    for _ in 0..4 {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/swipe")
            .body(Body::from("action=left".as_bytes().to_vec()))
            .unwrap();
        handle(req, &store).unwrap();
    }

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("No more listings"));

    let req = Request::builder()
        .method(Method::POST)
        .uri("/swipe")
        .body(Body::from("action=restart".as_bytes().to_vec()))
        .unwrap();
    handle(req, &store).unwrap();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("Listing 1 of 4"));
}

#[test]
fn preferences_change_the_evaluation() {
    let store = init_test_store();

    // Cap the price below the first listing's $320.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/prefs")
        .body(Body::from(
            "max_price=100&min_quality=&locations=&deal_style=".as_bytes().to_vec(),
        ))
        .unwrap();
    let resp = handle(req, &store).unwrap();
    assert_eq!(resp.status(), 303);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("Doesn&#39;t fit") || body.contains("Doesn't fit"));
    assert!(body.contains("Exceeds maximum price preference of $100."));
}

#[test]
fn unknown_routes_return_not_found() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/no-such-page")
        .body(Body::empty())
        .unwrap();

    match handle(req, &store) {
        Err(ServerError::NotFound) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn stylesheet_is_served_inline() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/static/main.css")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &store).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(resp).contains(".topbar"));
}
