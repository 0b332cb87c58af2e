//! Request logging middleware

use std::time::Instant;

use axum::{
    Json,
    body::Body,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::models::ResponseEnvelope;

/// Writes the exit line when dropped, so it is logged even if the handler
/// future panics or is cancelled.
struct RequestLog {
    method: Method,
    path: String,
    started: Instant,
    status: Option<StatusCode>,
}

impl Drop for RequestLog {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        match self.status {
            Some(status) => info!(
                "<-- {} {} {} in {:?}",
                self.method,
                self.path,
                status.as_u16(),
                elapsed
            ),
            None => info!("<-- {} {} aborted after {:?}", self.method, self.path, elapsed),
        }
    }
}

/// Log method and path when a request arrives and again, with the elapsed
/// time, once it has been handled
pub async fn logging_middleware(req: Request<Body>, next: Next) -> Response {
    let mut log = RequestLog {
        method: req.method().clone(),
        path: req.uri().path().to_string(),
        started: Instant::now(),
        status: None,
    };

    info!("--> {} {}", log.method, log.path);

    let response = next.run(req).await;
    log.status = Some(response.status());

    response
}

/// Render the request timeout layer's bare 408 as a failure envelope
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    error!("Request handling timed out");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseEnvelope::<()>::failure("request timed out")),
    )
        .into_response()
}
