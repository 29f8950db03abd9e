//! Tests for the key-value application routes
//!
//! Each test builds a fresh store and dispatcher and drives it in-process
//! with `Dispatcher::handle`, so no server or network is involved.

use kittymux::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
use kittymux::kv::{self, Store};
use kittymux::server::encode_body;
use serde_json::json;
use std::sync::Arc;

const SEED: &str = r#"{"kitty": "cat", "gorilla": 123}"#;

fn new_router() -> (Arc<Store>, Dispatcher) {
    let store = Arc::new(Store::new());
    let dispatcher = kv::build_dispatcher(&store);
    (store, dispatcher)
}

fn send(dispatcher: &Dispatcher, method: &str, path: &str, body: Option<&str>) -> HandlerResponse {
    let mut req = HandlerRequest::new(method, path);
    if let Some(body) = body {
        req = req.with_body(body);
    }
    dispatcher.handle(req)
}

/// Body bytes exactly as the server would write them.
fn wire_body(res: HandlerResponse) -> String {
    String::from_utf8(encode_body(res.body).1).unwrap()
}

#[test]
fn test_get_all() {
    let (_store, router) = new_router();
    send(&router, "POST", "/val", Some(SEED));

    let res = send(&router, "GET", "/val", None);
    assert_eq!(res.status, 200);
    assert_eq!(wire_body(res), r#"{"gorilla":123,"kitty":"cat"}"#);
}

#[test]
fn test_get() {
    let (_store, router) = new_router();
    send(&router, "POST", "/val", Some(SEED));

    let res = send(&router, "GET", "/val/gorilla", None);
    assert_eq!(res.status, 200);
    assert_eq!(wire_body(res), r#"{"gorilla":123}"#);
}

#[test]
fn test_get_missing() {
    let (_store, router) = new_router();
    send(&router, "POST", "/val", Some(SEED));

    let res = send(&router, "GET", "/val/dog", None);
    assert_eq!(res.status, 404);
    assert_eq!(res.body, json!({ "error": "can't find key dog" }));
}

#[test]
fn test_get_decoded_key() {
    let (_store, router) = new_router();
    send(&router, "POST", "/val", Some(r#"{"big cat": "lion"}"#));

    let res = send(&router, "GET", "/val/big%20cat", None);
    assert_eq!(res.body, json!({ "big cat": "lion" }));
}

#[test]
fn test_delete() {
    let (store, router) = new_router();
    send(&router, "POST", "/val", Some(SEED));

    let res = send(&router, "DELETE", "/val/gorilla", None);
    assert_eq!(res.status, 200);
    assert_eq!(wire_body(res), r#"{"gorilla":123}"#);
    assert_eq!(store.get("gorilla"), None);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_missing() {
    let (_store, router) = new_router();
    send(&router, "POST", "/val", Some(SEED));

    let res = send(&router, "DELETE", "/val/dog", None);
    assert_eq!(res.status, 404);
}

#[test]
fn test_post() {
    let (store, router) = new_router();

    let res = send(&router, "POST", "/val", Some(SEED));
    assert_eq!(res.status, 200);
    assert_eq!(wire_body(res), r#"{"gorilla":123,"kitty":"cat"}"#);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_post_same_keys_overwrites() {
    let (store, router) = new_router();
    send(&router, "POST", "/val", Some(SEED));

    let res = send(&router, "POST", "/val", Some(r#"{"kitty": "cat", "gorilla": 321}"#));
    assert_eq!(res.status, 200);
    assert_eq!(store.get("gorilla"), Some(json!(321)));
}

#[test]
fn test_put_behaves_like_post() {
    let (store, router) = new_router();

    let res = send(&router, "PUT", "/val", Some(r#"{"kitty": "sleepy"}"#));
    assert_eq!(res.status, 200);
    assert_eq!(store.get("kitty"), Some(json!("sleepy")));
}

#[test]
fn test_post_bad_request() {
    let (store, router) = new_router();

    let res = send(&router, "POST", "/val", Some(r#"{"kitty": "cat", "gori d gga ..^"#));
    assert_eq!(res.status, 500);
    assert!(res.body["error"].is_string());
    assert!(store.is_empty());
}

#[test]
fn test_post_empty_body() {
    let (_store, router) = new_router();
    let res = send(&router, "POST", "/val", None);
    assert_eq!(res.status, 500);
}

#[test]
fn test_put_with_key_is_not_routed() {
    let (_store, router) = new_router();
    let res = send(&router, "PUT", "/val/kitty", Some(r#""cat""#));
    assert_eq!(res.status, 404);
    assert_eq!(res.body, json!({ "error": "not found" }));
}

#[test]
fn test_unknown_path_not_found() {
    let (_store, router) = new_router();
    let res = send(&router, "GET", "/kitty", None);
    assert_eq!(res.status, 404);
    assert_eq!(wire_body(res), r#"{"error":"not found"}"#);
}

#[test]
fn test_health() {
    let (_store, router) = new_router();
    let res = send(&router, "GET", "/health", None);
    assert_eq!(res, HandlerResponse::json(200, json!({ "status": "ok" })));
}

#[test]
fn test_delete_handler_on_parameterless_route() {
    let store = Arc::new(Store::new());
    store.upsert("kitty", json!("cat"));

    let mut router = Dispatcher::with_not_found(kv::not_found);
    let s = Arc::clone(&store);
    router.register("DELETE", "/val", move |req: HandlerRequest| {
        kv::delete_val(&s, &req)
    });

    let res = send(&router, "DELETE", "/val", None);
    assert_eq!(res, HandlerResponse::empty(200));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_route_table_order() {
    let (_store, router) = new_router();
    let table: Vec<String> = router
        .routes()
        .iter()
        .map(|r| format!("{} {}", r.method(), r.pattern()))
        .collect();
    assert_eq!(
        table,
        vec![
            "GET /health",
            "GET /val",
            "GET /val/:key",
            "POST /val",
            "PUT /val",
            "DELETE /val/:key",
        ]
    );
}
