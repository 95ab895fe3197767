//! Middleware for logging requests and responses.

use axum::{
    body::Body, extract::Request, http::header::CONTENT_TYPE, middleware::Next, response::Response,
};

/// The maximum number of body bytes logged at the `info` level. Longer bodies
/// are truncated at `info` and logged in full at `debug`.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Log the request and response bodies for each request.
///
/// Password fields in form submissions are redacted before logging.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_text = read_body_text(body).await;

    let is_form_post = parts.method == axum::http::Method::POST
        && parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    if is_form_post {
        let display_text = redact_field(&body_text, "password");
        let display_text = redact_field(&display_text, "confirm_password");
        log_body(&format!("Received request: {parts:#?}"), &display_text);
    } else {
        log_body(&format!("Received request: {parts:#?}"), &body_text);
    }

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = read_body_text(body).await;
    log_body(&format!("Sending response: {parts:#?}"), &body_text);

    Response::from_parts(parts, body_text.into())
}

async fn read_body_text(body: Body) -> String {
    let body_bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    String::from_utf8_lossy(&body_bytes).to_string()
}

fn log_body(prefix: &str, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "{prefix}\nbody: {}...",
            truncate_to_char_boundary(body, LOG_BODY_LENGTH_LIMIT)
        );
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{prefix}\nbody: {body:?}");
    }
}

/// Truncate `body` to at most `limit` bytes without splitting a multi-byte
/// character.
fn truncate_to_char_boundary(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

/// Replace the value of `field_name` in a URL-encoded form body with
/// asterisks.
fn redact_field(form_text: &str, field_name: &str) -> String {
    let field_prefix = format!("{field_name}=");

    form_text
        .split('&')
        .map(|pair| {
            if pair.starts_with(&field_prefix) {
                format!("{field_name}=********")
            } else {
                pair.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("&")
}
