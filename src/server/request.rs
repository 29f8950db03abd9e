use crate::dispatcher::{HandlerRequest, HeaderVec};
use crate::ids::{RequestId, REQUEST_ID_HEADER};
use may_minihttp::Request;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, warn};

/// Split a request target into its escaped path and optional query string.
///
/// The path is returned exactly as sent, still percent-encoded, because
/// routing compares escaped literals and only decodes captured parameters.
#[must_use]
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Convert a `may_minihttp::Request` into a [`HandlerRequest`].
///
/// Header names are lowercased. A body that cannot be read is logged and
/// treated as empty.
pub fn parse_request(req: Request) -> HandlerRequest {
    let method = req.method().to_string();
    let (path, query) = split_target(req.path());
    let path = path.to_string();
    let query = query.map(str::to_string);

    let headers: HeaderVec = req
        .headers()
        .iter()
        .map(|h| {
            (
                Arc::from(h.name.to_ascii_lowercase()),
                String::from_utf8_lossy(h.value).into_owned(),
            )
        })
        .collect();

    let request_id = RequestId::from_header_or_new(
        headers
            .iter()
            .find(|(k, _)| k.as_ref() == REQUEST_ID_HEADER)
            .map(|(_, v)| v.as_str()),
    );

    let mut body = Vec::new();
    if let Err(e) = req.body().read_to_end(&mut body) {
        warn!(request_id = %request_id, error = %e, "Failed to read request body");
        body.clear();
    }

    debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        headers_count = headers.len(),
        body_size_bytes = body.len(),
        "HTTP request parsed"
    );

    let mut parsed = HandlerRequest::new(method, path).with_body(body);
    parsed.request_id = request_id;
    parsed.query = query;
    parsed.headers = headers;
    parsed
}
