use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, init_test_store};
use astra::Body;
use http::{Method, Request};
use serde_json::{json, Value};

fn post_create_csv(store: &crate::state::Store, payload: &Value) -> (u16, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/create-csv")
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string().into_bytes()))
        .unwrap();

    let resp = handle(req, store).expect("Failed to handle request");
    let status = resp.status().as_u16();
    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    (status, body)
}

#[test]
fn create_csv_writes_the_file_and_merges_new_listings() {
    let store = init_test_store();
    let filename = "router-test-snapshot.csv";
    let content = "id,title,price,description,image_url,listing_url,condition\n\
                   rt-9001,Uploaded lamp,$25,Warm light,,,Used - Good\n";

    let (status, body) = post_create_csv(
        &store,
        &json!({ "filename": filename, "content": content }),
    );
    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["message"],
        json!(format!("CSV file created: {filename}"))
    );

    let path = std::path::Path::new("search-results").join(filename);
    assert!(path.exists());
    std::fs::remove_file(&path).unwrap();

    // The new row joined the catalog.
    let found = store
        .with_state(|state| Ok(state.listing("rt-9001").is_some()))
        .unwrap();
    assert!(found);
}

#[test]
fn create_csv_rejects_path_traversal_names() {
    let store = init_test_store();

    for bad in ["../evil.csv", "a/b.csv", "snapshot.txt", ""] {
        let (status, body) =
            post_create_csv(&store, &json!({ "filename": bad, "content": "x" }));
        assert_eq!(status, 400, "accepted bad filename {bad:?}");
        assert_eq!(body["success"], json!(false));
    }
}

#[test]
fn create_csv_reports_malformed_payloads() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/create-csv")
        .body(Body::from("not json".as_bytes().to_vec()))
        .unwrap();

    let resp = handle(req, &store).unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(body["success"], json!(false));
}

#[test]
fn estimate_requires_a_known_listing() {
    let store = init_test_store();

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/estimate")
        .body(Body::empty())
        .unwrap();
    match handle(req, &store) {
        Err(ServerError::BadRequest(_)) => {}
        other => panic!("expected BadRequest, got {other:?}"),
    }

    let req = Request::builder()
        .method(Method::GET)
        .uri("/api/estimate?listing=no-such-id")
        .body(Body::empty())
        .unwrap();
    match handle(req, &store) {
        Err(ServerError::NotFound) => {}
        other => panic!("expected NotFound, got {other:?}"),
    }
}
