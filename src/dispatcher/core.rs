//! Dispatcher core: request/response types, the handler seam, and the
//! first-match scan over the route table.

use crate::ids::RequestId;
use crate::params::{decode_segment, Params};
use crate::router::{clean_path, split_segments, Route, RouteTable, Segment};
use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Body written by the built-in fallback when no not-found handler is set.
pub const DEFAULT_NOT_FOUND_BODY: &str = "404.4 – No handler configured.";

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Request headers as `(lowercase name, value)` pairs.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Request-scoped state attached by the dispatcher.
///
/// Owned by exactly one [`HandlerRequest`] and dropped with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    params: Option<Params>,
}

impl RequestContext {
    /// Parameter bindings, or `None` when the dispatcher attached none.
    #[must_use]
    pub fn params(&self) -> Option<&Params> {
        self.params.as_ref()
    }
}

/// A request as seen by handlers.
#[derive(Debug, Clone)]
pub struct HandlerRequest {
    /// Correlation id for log lines.
    pub request_id: RequestId,
    /// Method, verbatim from the request line.
    pub method: String,
    /// Escaped path, without the query string.
    pub path: String,
    /// Raw query string (after `?`), if any.
    pub query: Option<String>,
    pub headers: HeaderVec,
    pub body: Vec<u8>,
    context: RequestContext,
}

impl HandlerRequest {
    /// A request with no headers, no body and an empty context.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method: method.into(),
            path: path.into(),
            query: None,
            headers: HeaderVec::new(),
            body: Vec::new(),
            context: RequestContext::default(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers
            .push((Arc::from(name.to_ascii_lowercase()), value.into()));
        self
    }

    /// Derive a request whose context carries `params`.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.context = RequestContext {
            params: Some(params),
        };
        self
    }

    /// Value of the route parameter `key`.
    ///
    /// `None` when the route captured no parameters or none named `key`.
    #[inline]
    #[must_use]
    pub fn var(&self, key: &str) -> Option<&str> {
        self.context.params.as_ref().and_then(|p| p.get(key))
    }

    /// All bindings attached to this request, if any.
    #[must_use]
    pub fn params(&self) -> Option<&Params> {
        self.context.params()
    }

    #[must_use]
    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Header by name (case-insensitive).
    #[inline]
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A handler's answer.
///
/// String bodies are sent as `text/plain`, every other JSON value as
/// `application/json`.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
}

impl HandlerResponse {
    #[must_use]
    pub fn json(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    #[must_use]
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: Value::String(body.into()),
        }
    }

    /// `{"error": message}` with the given status.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, serde_json::json!({ "error": message }))
    }

    /// Status only, empty body.
    #[must_use]
    pub fn empty(status: u16) -> Self {
        Self::text(status, String::new())
    }
}

/// Something that turns a request into a response.
///
/// Implemented for every `Fn(HandlerRequest) -> HandlerResponse` closure, so
/// state such as a store is injected by capturing it.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: HandlerRequest) -> HandlerResponse;
}

impl<F> Handler for F
where
    F: Fn(HandlerRequest) -> HandlerResponse + Send + Sync + 'static,
{
    fn call(&self, req: HandlerRequest) -> HandlerResponse {
        self(req)
    }
}

/// Shared handler reference stored in the route table.
pub type BoxedHandler = Arc<dyn Handler>;

/// Built-in fallback used when no not-found handler is configured.
#[must_use]
pub fn default_not_found(_req: HandlerRequest) -> HandlerResponse {
    HandlerResponse::text(404, DEFAULT_NOT_FOUND_BODY)
}

/// Result of matching a request against the table.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// The first route that fits the request.
    pub route: &'a Route<BoxedHandler>,
    /// Registration index of `route`.
    pub index: usize,
    /// Captured parameters; empty when the route has none.
    pub params: Params,
}

/// Resolves requests to exactly one handler invocation.
///
/// Routes are added through `&mut self` during startup; once the dispatcher
/// is shared (typically in an `Arc`) it is read-only and safe to use from any
/// number of concurrent requests.
#[derive(Clone, Default)]
pub struct Dispatcher {
    routes: RouteTable<BoxedHandler>,
    not_found: Option<BoxedHandler>,
}

impl Dispatcher {
    /// A dispatcher that answers unmatched requests with the built-in 404.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A dispatcher that answers unmatched requests with `handler`.
    #[must_use]
    pub fn with_not_found<H: Handler>(handler: H) -> Self {
        Self {
            routes: RouteTable::new(),
            not_found: Some(Arc::new(handler)),
        }
    }

    /// Register `handler` for `method` and `path`. See [`RouteTable::register`].
    pub fn register<H: Handler>(&mut self, method: &str, path: &str, handler: H) {
        self.routes.register(method, path, Arc::new(handler));
    }

    /// Register an already shared handler, e.g. one mounted on several routes.
    pub fn register_shared(&mut self, method: &str, path: &str, handler: BoxedHandler) {
        self.routes.register(method, path, handler);
    }

    #[must_use]
    pub fn routes(&self) -> &RouteTable<BoxedHandler> {
        &self.routes
    }

    /// Find the first route matching `method` and `raw_path`.
    ///
    /// `raw_path` is the escaped path as the transport exposes it; it is
    /// cleaned and split but not decoded. Only captured parameter values
    /// are decoded.
    #[must_use]
    pub fn find(&self, method: &str, raw_path: &str) -> Option<RouteMatch<'_>> {
        let request_segments: SmallVec<[&str; 8]> =
            split_segments(clean_path(raw_path)).collect();

        self.routes
            .iter()
            .enumerate()
            .find_map(|(index, route)| {
                match_route(route, method, &request_segments).map(|params| RouteMatch {
                    route,
                    index,
                    params,
                })
            })
    }

    /// Invoke the handler for `method` and `raw_path` with `req`.
    ///
    /// On a match with captured parameters the handler receives a request
    /// derived from `req` whose context carries them; otherwise it receives
    /// `req` unchanged. Without a match the fallback handler runs.
    pub fn dispatch(&self, method: &str, raw_path: &str, req: HandlerRequest) -> HandlerResponse {
        match self.find(method, raw_path) {
            Some(RouteMatch {
                route,
                index,
                params,
            }) => {
                debug!(
                    request_id = %req.request_id,
                    method = %method,
                    path = %raw_path,
                    pattern = %route.pattern(),
                    priority = index,
                    params = params.len(),
                    "Route matched"
                );
                for binding in params.fallbacks() {
                    debug!(
                        request_id = %req.request_id,
                        param = %binding.name,
                        value = %binding.value.as_str(),
                        "Path parameter kept undecoded"
                    );
                }
                let req = if params.is_empty() {
                    req
                } else {
                    req.with_params(params)
                };
                route.handler().call(req)
            }
            None => {
                debug!(
                    request_id = %req.request_id,
                    method = %method,
                    path = %raw_path,
                    "No route matched"
                );
                match &self.not_found {
                    Some(handler) => handler.call(req),
                    None => default_not_found(req),
                }
            }
        }
    }

    /// Dispatch using the method and path stored in `req`.
    pub fn handle(&self, req: HandlerRequest) -> HandlerResponse {
        let method = req.method.clone();
        let path = req.path.clone();
        self.dispatch(&method, &path, req)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("routes", &self.routes)
            .field("custom_not_found", &self.not_found.is_some())
            .finish()
    }
}

/// Match one route against the request segments.
///
/// Returns the captured bindings on success. Method and segment count must be
/// equal; literals compare byte-for-byte; parameters accept any segment.
fn match_route<H>(route: &Route<H>, method: &str, segments: &[&str]) -> Option<Params> {
    if route.method() != method || route.segments().len() != segments.len() {
        return None;
    }

    let mut params = Params::new();
    for (pattern, actual) in route.segments().iter().zip(segments) {
        match pattern {
            Segment::Literal(text) => {
                if text.as_str() != *actual {
                    return None;
                }
            }
            Segment::Param(name) => params.insert(Arc::clone(name), decode_segment(actual)),
        }
    }
    Some(params)
}
