//! # Dispatcher Module
//!
//! The dispatcher resolves each incoming request to exactly one handler
//! invocation: the first registered route that fits, or the fallback.
//!
//! ## Matching
//!
//! For a request `(method, raw_path)` the dispatcher:
//!
//! 1. strips one trailing `/` from the escaped path and splits it into
//!    segments (no decoding at this stage),
//! 2. scans routes in registration order, skipping any whose method or
//!    segment count differs,
//! 3. compares literal segments byte-for-byte and binds parameter segments
//!    after percent-decoding them,
//! 4. stops at the first route whose every position passes.
//!
//! There is no specificity ranking: with `/found/:key` registered before
//! `/found/hello`, a request for `/found/hello` goes to the `:key` handler.
//!
//! ## Parameters
//!
//! Captured values travel inside the [`HandlerRequest`] handed to the
//! handler, so concurrent requests never observe each other's bindings:
//!
//! ```rust
//! use kittymux::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
//! use serde_json::json;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register("GET", "/kitty/:uid", |req: HandlerRequest| {
//!     HandlerResponse::json(200, json!({ "uid": req.var("uid"), "name": "Layla" }))
//! });
//!
//! let res = dispatcher.handle(HandlerRequest::new("GET", "/kitty/eyfgt654efg7198u"));
//! assert_eq!(res.body, json!({ "uid": "eyfgt654efg7198u", "name": "Layla" }));
//! ```
//!
//! ## Fallback
//!
//! Unmatched requests go to the handler given to
//! [`Dispatcher::with_not_found`], or to [`default_not_found`], which answers
//! `404` with [`DEFAULT_NOT_FOUND_BODY`].
//!
//! Handler panics are not caught here; that is left to the hosting server.

mod core;

pub use core::{
    default_not_found, BoxedHandler, Dispatcher, Handler, HandlerRequest, HandlerResponse,
    HeaderVec, RequestContext, RouteMatch, DEFAULT_NOT_FOUND_BODY, MAX_INLINE_HEADERS,
};
