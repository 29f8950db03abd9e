use super::request::parse_request;
use super::response::write_handler_response;
use crate::dispatcher::Dispatcher;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// `may_minihttp` service that hands every request to a [`Dispatcher`].
///
/// The dispatcher is fully built before the service is created and shared
/// read-only between the server's coroutines.
#[derive(Clone)]
pub struct AppService {
    dispatcher: Arc<Dispatcher>,
}

impl AppService {
    #[must_use]
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let start = Instant::now();
        let req = parse_request(req);

        let request_id = req.request_id;
        let method = req.method.clone();
        let path = req.path.clone();
        let user_agent = req.get_header("user-agent").unwrap_or("-").to_string();

        let response = self.dispatcher.dispatch(&method, &path, req);
        let status = response.status;
        write_handler_response(res, response);

        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = status,
            latency_us = start.elapsed().as_micros() as u64,
            user_agent = %user_agent,
            "Request handled"
        );
        Ok(())
    }
}
