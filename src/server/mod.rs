//! # Server Module
//!
//! Hosts a [`Dispatcher`](crate::dispatcher::Dispatcher) on the `may_minihttp`
//! coroutine HTTP server.
//!
//! ```rust,no_run
//! use kittymux::dispatcher::{Dispatcher, HandlerRequest, HandlerResponse};
//! use kittymux::server::{AppService, HttpServer};
//! use std::sync::Arc;
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register("GET", "/hello", |_req: HandlerRequest| {
//!     HandlerResponse::text(200, "hi")
//! });
//!
//! let handle = HttpServer(AppService::new(Arc::new(dispatcher)))
//!     .start("127.0.0.1:8080")
//!     .unwrap();
//! handle.join().unwrap();
//! ```

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, split_target};
pub use response::{encode_body, status_reason, write_handler_response};
pub use service::AppService;
