use crate::dispatcher::HandlerResponse;
use http::StatusCode;
use may_minihttp::Response;
use serde_json::Value;

/// Canonical reason phrase for `status`, or `"Unknown"` for codes outside
/// the registry.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
}

/// Content type and body bytes for a handler response body.
///
/// Strings are written verbatim as `text/plain`; any other value is
/// serialized as JSON.
#[must_use]
pub fn encode_body(body: Value) -> (&'static str, Vec<u8>) {
    match body {
        Value::String(s) => ("Content-Type: text/plain; charset=utf-8", s.into_bytes()),
        other => (
            "Content-Type: application/json",
            other.to_string().into_bytes(),
        ),
    }
}

pub fn write_handler_response(res: &mut Response, response: HandlerResponse) {
    res.status_code(usize::from(response.status), status_reason(response.status));
    let (content_type, bytes) = encode_body(response.body);
    res.header(content_type);
    res.body_vec(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(599), "Unknown");
    }

    #[test]
    fn test_string_body_is_plain_text() {
        let (content_type, bytes) = encode_body(Value::String("404.4 – No handler configured.".into()));
        assert!(content_type.contains("text/plain"));
        assert_eq!(bytes, "404.4 – No handler configured.".as_bytes());
    }

    #[test]
    fn test_object_body_is_compact_json() {
        let (content_type, bytes) = encode_body(json!({ "kitty": "cat", "gorilla": 123 }));
        assert_eq!(content_type, "Content-Type: application/json");
        assert_eq!(bytes, br#"{"gorilla":123,"kitty":"cat"}"#);
    }
}
