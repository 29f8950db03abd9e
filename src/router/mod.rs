//! # Router Module
//!
//! The router module holds the table of registered routes and the path
//! handling shared by registration and dispatch.
//!
//! ## Patterns
//!
//! A pattern is `/` followed by zero or more `/`-separated segments. A segment
//! starting with `:` is a named parameter capturing exactly one request
//! segment; every other segment is a case-sensitive literal.
//!
//! ```text
//! /val            → [Literal("val")]
//! /val/:key       → [Literal("val"), Param("key")]
//! /val/:key/:act  → [Literal("val"), Param("key"), Param("act")]
//! ```
//!
//! Patterns are cleaned before decomposition: an empty path is ignored, a
//! missing leading `/` is added and a trailing `/` is dropped, so `/hello/`
//! registers the same route as `/hello` and never matches `/hello/world`.
//!
//! ## Example
//!
//! ```rust
//! use kittymux::router::{RouteTable, Segment};
//!
//! let mut table = RouteTable::new();
//! table.register("GET", "/val/:key/", "get_val");
//!
//! let route = table.iter().next().unwrap();
//! assert_eq!(route.pattern(), "/val/:key");
//! assert_eq!(route.segments()[0], Segment::Literal("val".into()));
//! ```
//!
//! The table is append-only. Matching lives in [`crate::dispatcher`].

mod core;

pub use core::{clean_path, split_segments, Route, RouteTable, Segment, PARAM_PREFIX};
