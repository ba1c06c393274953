use crate::router::handle;
use crate::tests::utils::{body_string, init_test_store};
use astra::Body;
use http::{Method, Request};

#[test]
fn opening_a_chat_seeds_buyer_and_seller_messages() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/chat?listing=demo-1")
        .body(Body::empty())
        .unwrap();

    let resp = handle(req, &store).expect("Failed to handle request");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    // The canned opener asks about availability...
    assert!(body.contains("Is it still available?"));
    // ...and every availability reply variant quotes the asking price.
    assert!(body.contains("$320"));
    assert!(body.contains("Negotiation coach"));
    assert!(body.contains("Message coach"));
}

#[test]
fn revisiting_a_listing_resumes_the_same_thread() {
    let store = init_test_store();

    for _ in 0..2 {
        let req = Request::builder()
            .method(Method::GET)
            .uri("/chat?listing=demo-1")
            .body(Body::empty())
            .unwrap();
        handle(req, &store).unwrap();
    }

    let req = Request::builder()
        .method(Method::GET)
        .uri("/messages")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert_eq!(body.matches("conv-").count(), 1, "one thread expected: {body}");
}

#[test]
fn sending_an_offer_gets_a_seller_reply_in_band() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/chat?listing=demo-1")
        .body(Body::empty())
        .unwrap();
    handle(req, &store).unwrap();

    // $250 against the $320 anchor sits in the counter band:
    // round(max(250*1.08, 320*0.92)/5)*5 = 295.
    let req = Request::builder()
        .method(Method::POST)
        .uri("/chat/send")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(
            "conversation=conv-1&text=Would+you+take+%24250%3F".as_bytes().to_vec(),
        ))
        .unwrap();
    let resp = handle(req, &store).unwrap();
    assert_eq!(resp.status(), 303);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/chat?conversation=conv-1")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("Would you take $250?"));
    assert!(body.contains("$295"), "counter missing: {body}");
}

#[test]
fn empty_messages_are_rejected() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/chat?listing=demo-1")
        .body(Body::empty())
        .unwrap();
    handle(req, &store).unwrap();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/chat/send")
        .body(Body::from("conversation=conv-1&text=++".as_bytes().to_vec()))
        .unwrap();
    assert!(handle(req, &store).is_err());
}

#[test]
fn deleting_a_conversation_clears_it_from_messages() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/chat?listing=demo-1")
        .body(Body::empty())
        .unwrap();
    handle(req, &store).unwrap();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/chat/delete")
        .body(Body::from("conversation=conv-1".as_bytes().to_vec()))
        .unwrap();
    let resp = handle(req, &store).unwrap();
    assert_eq!(resp.status(), 303);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/messages")
        .body(Body::empty())
        .unwrap();
    let body = body_string(handle(req, &store).unwrap());
    assert!(body.contains("No conversations yet"));
}
