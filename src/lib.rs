//! # kittymux
//!
//! **kittymux** is a small HTTP request router that matches paths segment by
//! segment against an ordered list of registered patterns, binding `:name`
//! segments as percent-decoded parameters. It runs on the `may` coroutine
//! runtime through `may_minihttp`.
//!
//! ## Overview
//!
//! Routes are registered once, in order, before the server starts. Each
//! request is compared against every route in registration order and the
//! first route whose method, segment count and literal segments all agree
//! handles it. There is no precedence between literal and parameter routes:
//! whichever was registered first wins. Requests that match nothing go to a
//! configurable fallback handler.
//!
//! ## Architecture
//!
//! - **[`router`]** - Pattern decomposition and the ordered route table
//! - **[`params`]** - Percent-decoding and the parameter set bound by a match
//! - **[`dispatcher`]** - Request/response types, the `Handler` trait, matching and fallback
//! - **[`server`]** - `may_minihttp` adapter: request parsing, response writing, access logs
//! - **[`kv`]** - In-memory key-value service built on the dispatcher
//! - **[`config`]** - Defaults, YAML file and `KITTY_*` environment settings
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `kittymux` command line
//!
//! ### Request Flow
//!
//! ```text
//! TCP ─▶ may_minihttp ─▶ AppService::call
//!                           │ parse_request (headers, query, body, request id)
//!                           ▼
//!                       Dispatcher::dispatch
//!                           │ clean path, split on '/'
//!                           │ scan routes in registration order
//!                           ├─ match ─▶ bind params ─▶ handler
//!                           └─ none  ─▶ not-found handler
//!                           ▼
//!                       write_handler_response ─▶ access log
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use kittymux::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register("GET", "/kitty/:name", |req: HandlerRequest| {
//!     let name = req.var("name").unwrap_or_default().to_string();
//!     HandlerResponse::text(200, format!("hello {name}"))
//! });
//!
//! let res = dispatcher.handle(HandlerRequest::new("GET", "/kitty/Layla%20Cat"));
//! assert_eq!(res.status, 200);
//! assert_eq!(res.body, "hello Layla Cat");
//!
//! let res = dispatcher.handle(HandlerRequest::new("GET", "/kitty"));
//! assert_eq!(res.status, 404);
//! ```
//!
//! ## Path Rules
//!
//! - One trailing `/` is ignored on both patterns and request paths.
//! - Request paths are split in their escaped form, so `%2F` inside a
//!   segment never creates a new segment.
//! - A parameter value that is not valid percent-encoding is bound in its raw
//!   form; see [`params::Decoded`].
//! - Literal segments compare byte-for-byte and case-sensitively.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod ids;
pub mod kv;
pub mod logging;
pub mod params;
pub mod router;
pub mod server;

pub use dispatcher::{Dispatcher, Handler, HandlerRequest, HandlerResponse};
pub use params::{Decoded, Params};
pub use router::{Route, RouteTable, Segment};
