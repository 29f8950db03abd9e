//! # Key-Value Application
//!
//! A small in-memory key-value service built on the dispatcher. It is what
//! the `kittymux` binary serves, and shows how handlers receive shared state
//! (the [`Store`]) by capture instead of through globals.
//!
//! | Method | Path        | Result                                        |
//! |--------|-------------|-----------------------------------------------|
//! | GET    | `/val`      | all entries                                   |
//! | GET    | `/val/:key` | one entry, or 404                             |
//! | POST   | `/val`      | upsert the entries of a JSON object body      |
//! | PUT    | `/val`      | same as POST                                  |
//! | DELETE | `/val/:key` | remove and return one entry, or 404           |
//! | GET    | `/health`   | `{"status":"ok"}`                             |
//!
//! Anything else answers `404 {"error":"not found"}`.

mod handlers;
mod store;

pub use handlers::{delete_val, get_val, health, not_found, post_val, KeyParam};
pub use store::Store;

use crate::dispatcher::{Dispatcher, HandlerRequest};
use std::sync::Arc;

/// Register the key-value routes on `dispatcher`, all sharing `store`.
pub fn register_routes(dispatcher: &mut Dispatcher, store: &Arc<Store>) {
    dispatcher.register("GET", "/health", health);

    let s = Arc::clone(store);
    dispatcher.register("GET", "/val", move |req: HandlerRequest| get_val(&s, &req));
    let s = Arc::clone(store);
    dispatcher.register("GET", "/val/:key", move |req: HandlerRequest| get_val(&s, &req));
    let s = Arc::clone(store);
    dispatcher.register("POST", "/val", move |req: HandlerRequest| post_val(&s, &req));
    let s = Arc::clone(store);
    dispatcher.register("PUT", "/val", move |req: HandlerRequest| post_val(&s, &req));
    let s = Arc::clone(store);
    dispatcher.register("DELETE", "/val/:key", move |req: HandlerRequest| {
        delete_val(&s, &req)
    });
}

/// A dispatcher serving the key-value routes with the JSON not-found fallback.
#[must_use]
pub fn build_dispatcher(store: &Arc<Store>) -> Dispatcher {
    let mut dispatcher = Dispatcher::with_not_found(not_found);
    register_routes(&mut dispatcher, store);
    dispatcher
}
