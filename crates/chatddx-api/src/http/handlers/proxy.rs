//! Backend pass-through for `/admin` and `/static`.
//!
//! The backend's admin (login included) and its static files are served
//! through this client so the session cookie stays on one origin. Method,
//! path, query, body and end-to-end headers are forwarded; redirects are
//! handed back to the browser unchanged. `Host` is kept as the browser sent
//! it, since the backend builds absolute URLs and checks origins from it.

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::state::AppState;

/// Headers that are not forwarded in either direction.
const HOP_BY_HOP_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "trailers",
    "transfer-encoding",
    "upgrade",
    // Recomputed for the new hop.
    "content-length",
];

/// Check if a header should be forwarded.
fn should_forward_header(name: &str) -> bool {
    !HOP_BY_HOP_HEADERS.contains(&name.to_ascii_lowercase().as_str())
}

fn forwardable(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| should_forward_header(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// ANY /admin/*, /static/* - Forward the request to the backend.
pub async fn pass_through(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let url = state.backend.url(path);

    let body = match to_bytes(body, state.config.body_limit_bytes).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "pass-through request body rejected");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    debug!(method = %parts.method, %url, "forwarding to backend");

    let upstream = state
        .backend
        .http_client()
        .request(parts.method, url.as_str())
        .headers(forwardable(&parts.headers))
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, %url, "backend unreachable");
            return (StatusCode::BAD_GATEWAY, "Backend unavailable").into_response();
        }
    };

    let status = upstream.status();
    let headers = forwardable(upstream.headers());

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn hop_by_hop_headers_are_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert("Connection", HeaderValue::from_static("keep-alive"));
        headers.insert("host", HeaderValue::from_static("chatddx.com"));
        headers.insert("Transfer-Encoding", HeaderValue::from_static("chunked"));
        headers.insert("cookie", HeaderValue::from_static("sessionid=abc"));
        headers.append("set-cookie", HeaderValue::from_static("a=1"));
        headers.append("set-cookie", HeaderValue::from_static("b=2"));

        let forwarded = forwardable(&headers);

        assert!(forwarded.get("connection").is_none());
        assert_eq!(forwarded["host"], "chatddx.com");
        assert!(forwarded.get("transfer-encoding").is_none());
        assert_eq!(forwarded["cookie"], "sessionid=abc");
        assert_eq!(forwarded.get_all("set-cookie").iter().count(), 2);
    }
}
