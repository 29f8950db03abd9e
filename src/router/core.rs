//! Route table core: path cleaning, pattern decomposition and the
//! append-only list of registered routes.

use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Prefix marking a segment as a named parameter.
pub const PARAM_PREFIX: char = ':';

/// One `/`-delimited component of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment byte-for-byte.
    Literal(String),
    /// Matches any single request segment and binds it under this name.
    ///
    /// The name is an `Arc<str>` so every match can hand it to [`Params`]
    /// without copying.
    ///
    /// [`Params`]: crate::params::Params
    Param(Arc<str>),
}

impl Segment {
    fn parse(text: &str) -> Self {
        match text.strip_prefix(PARAM_PREFIX) {
            Some(name) => Segment::Param(Arc::from(name)),
            None => Segment::Literal(text.to_owned()),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, "{PARAM_PREFIX}{name}"),
        }
    }
}

/// Strip a single trailing `/` from a non-empty path.
///
/// Applied identically to registered patterns and request paths, so `/a/`
/// and `/a` are the same route and `/` becomes the empty path.
#[inline]
#[must_use]
pub fn clean_path(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Split a cleaned path into segments, dropping the first component.
///
/// For a path starting with `/` the dropped component is the empty string in
/// front of it; the empty path has no segments at all.
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    let mut parts = path.split('/');
    if path.is_empty() {
        // "".split('/') yields one empty item; consume it too.
        parts.next();
    }
    parts.next();
    parts
}

/// A registered (method, pattern, handler) triple.
#[derive(Clone)]
pub struct Route<H> {
    method: String,
    pattern: String,
    segments: Vec<Segment>,
    handler: H,
}

impl<H> Route<H> {
    /// Decompose `path` into a route. Returns `None` for an empty path.
    pub fn new(method: &str, path: &str, handler: H) -> Option<Self> {
        if path.is_empty() {
            return None;
        }

        let path = clean_path(path);
        let pattern = if path.starts_with('/') {
            path.to_owned()
        } else {
            format!("/{path}")
        };
        // The root pattern has no segments, like a cleaned request for `/`.
        let segments: Vec<Segment> = if path.is_empty() {
            Vec::new()
        } else {
            split_segments(&pattern).map(Segment::parse).collect()
        };

        Some(Self {
            method: method.to_owned(),
            pattern,
            segments,
            handler,
        })
    }

    /// HTTP method this route answers to, compared verbatim.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Cleaned pattern text, e.g. `/val/:key`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Parameter names appearing more than once, and whether an empty name
    /// (`:` alone) is present.
    fn pattern_issues(&self) -> (Vec<&str>, bool) {
        let mut seen: Vec<&str> = Vec::new();
        let mut duplicates: Vec<&str> = Vec::new();
        let mut empty_name = false;
        for segment in &self.segments {
            if let Segment::Param(name) = segment {
                let name = name.as_ref();
                empty_name |= name.is_empty();
                if seen.contains(&name) {
                    if !duplicates.contains(&name) {
                        duplicates.push(name);
                    }
                } else {
                    seen.push(name);
                }
            }
        }
        (duplicates, empty_name)
    }
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("pattern", &self.pattern)
            .field("segments", &self.segments)
            .finish_non_exhaustive()
    }
}

/// Ordered, append-only list of routes.
///
/// Registration order is match priority: the first route that fits a request
/// wins, with no specificity ranking between literal and parameter segments.
#[derive(Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route for `method` and `path`.
    ///
    /// An empty `path` is ignored. A missing leading `/` is added and a
    /// trailing `/` removed. Patterns with an empty (`:`) or repeated
    /// parameter name are accepted as-is; they are only reported in the log.
    pub fn register(&mut self, method: &str, path: &str, handler: H) {
        let Some(route) = Route::new(method, path, handler) else {
            debug!(method = %method, "Ignoring route registration with empty path");
            return;
        };

        let (duplicates, empty_name) = route.pattern_issues();
        if !duplicates.is_empty() {
            warn!(
                method = %route.method,
                pattern = %route.pattern,
                duplicates = ?duplicates,
                "Route repeats a parameter name; the right-most segment wins"
            );
        }
        if empty_name {
            warn!(
                method = %route.method,
                pattern = %route.pattern,
                "Route has a parameter with an empty name"
            );
        }

        debug!(
            method = %route.method,
            pattern = %route.pattern,
            segments = route.segments.len(),
            priority = self.routes.len(),
            "Route registered"
        );
        self.routes.push(route);
    }

    /// Routes in registration (priority) order.
    pub fn iter(&self) -> std::slice::Iter<'_, Route<H>> {
        self.routes.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a, H> IntoIterator for &'a RouteTable<H> {
    type Item = &'a Route<H>;
    type IntoIter = std::slice::Iter<'a, Route<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl<H> fmt::Debug for RouteTable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}
