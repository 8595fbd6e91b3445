//! Request-scoped middleware: request-id propagation and structured request
//! logging. No API-key auth layer here — this surface has no authentication
//! requirement.

use axum::extract::Request;
use axum::response::Response;

/// Propagates (or mints) an `x-request-id` header, stashing it in request
/// extensions so `log_requests` and handlers can read it back.
pub async fn request_id(mut request: Request, next: axum::middleware::Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert("x-request-id", request_id.parse().unwrap());
    response
}

/// Logs request start/end with method, uri, status, and duration at `info`.
pub async fn log_requests(request: Request, next: axum::middleware::Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let request_id = request
        .extensions()
        .get::<String>()
        .cloned()
        .unwrap_or_default();

    tracing::info!(method = %method, uri = %uri, request_id = %request_id, "request started");

    let response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %status,
        duration_ms = %duration.as_millis(),
        request_id = %request_id,
        "request completed"
    );

    response
}
