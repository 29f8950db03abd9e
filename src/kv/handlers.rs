use super::store::Store;
use crate::dispatcher::{HandlerRequest, HandlerResponse};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

/// The `:key` route parameter as a handler sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyParam<'a> {
    Present(&'a str),
    /// The route that reached the handler binds no `key`.
    Absent,
}

impl<'a> KeyParam<'a> {
    #[must_use]
    pub fn from_request(req: &'a HandlerRequest) -> Self {
        match req.var("key") {
            Some(key) => KeyParam::Present(key),
            None => KeyParam::Absent,
        }
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn missing_key(key: &str) -> HandlerResponse {
    HandlerResponse::error(404, &format!("can't find key {key}"))
}

/// Fallback for unmatched requests.
#[must_use]
pub fn not_found(_req: HandlerRequest) -> HandlerResponse {
    HandlerResponse::error(404, "not found")
}

#[must_use]
pub fn health(_req: HandlerRequest) -> HandlerResponse {
    HandlerResponse::json(200, json!({ "status": "ok" }))
}

/// `GET /val` lists every entry; `GET /val/:key` returns one.
#[must_use]
pub fn get_val(store: &Store, req: &HandlerRequest) -> HandlerResponse {
    match KeyParam::from_request(req) {
        KeyParam::Present(key) => match store.get(key) {
            Some(value) => HandlerResponse::json(200, single(key, value)),
            None => missing_key(key),
        },
        KeyParam::Absent => HandlerResponse::json(200, Value::Object(store.list())),
    }
}

/// `POST /val` and `PUT /val`: upsert every entry of a JSON object body and
/// echo it back.
#[must_use]
pub fn post_val(store: &Store, req: &HandlerRequest) -> HandlerResponse {
    let data: Map<String, Value> = match serde_json::from_slice(&req.body) {
        Ok(data) => data,
        Err(e) => {
            debug!(request_id = %req.request_id, error = %e, "Rejected request body");
            return HandlerResponse::error(500, &e.to_string());
        }
    };

    for (key, value) in &data {
        store.upsert(key.clone(), value.clone());
    }
    info!(
        request_id = %req.request_id,
        keys = data.len(),
        total = store.len(),
        "Values stored"
    );
    HandlerResponse::json(200, Value::Object(data))
}

/// `DELETE /val/:key`: remove one entry and return it.
#[must_use]
pub fn delete_val(store: &Store, req: &HandlerRequest) -> HandlerResponse {
    match KeyParam::from_request(req) {
        KeyParam::Present(key) => match store.delete(key) {
            Some(value) => {
                info!(request_id = %req.request_id, key = %key, "Value deleted");
                HandlerResponse::json(200, single(key, value))
            }
            None => missing_key(key),
        },
        KeyParam::Absent => {
            debug!(request_id = %req.request_id, "Delete without a key; nothing to do");
            HandlerResponse::empty(200)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{decode_segment, Params};
    use std::sync::Arc;

    fn with_key(method: &str, key: &str) -> HandlerRequest {
        let mut params = Params::new();
        params.insert(Arc::from("key"), decode_segment(key));
        HandlerRequest::new(method, format!("/val/{key}")).with_params(params)
    }

    #[test]
    fn test_key_param() {
        let req = with_key("GET", "gorilla");
        assert_eq!(KeyParam::from_request(&req), KeyParam::Present("gorilla"));
        let req = HandlerRequest::new("GET", "/val");
        assert_eq!(KeyParam::from_request(&req), KeyParam::Absent);
    }

    #[test]
    fn test_post_rejects_non_object() {
        let store = Store::new();
        let req = HandlerRequest::new("POST", "/val").with_body("[1, 2]");
        let res = post_val(&store, &req);
        assert_eq!(res.status, 500);
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_without_key_is_a_no_op() {
        let store = Store::new();
        store.upsert("kitty", json!("cat"));
        let res = delete_val(&store, &HandlerRequest::new("DELETE", "/val"));
        assert_eq!(res, HandlerResponse::empty(200));
        assert_eq!(store.len(), 1);
    }
}
