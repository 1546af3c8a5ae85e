//! Response cache middleware.
//!
//! Wraps a report route so that repeated identical GET requests are served
//! from the cache for the route's TTL instead of recomputing the report.
//!
//! ```rust,ignore
//! let cache = ResponseCacheState::new(response_cache, Duration::from_secs(3600));
//! Router::new().route("/api/tests", cached(get(tests_report), Some(cache)));
//! ```
//!
//! The key is the request path plus raw query string. Hits are replayed with
//! their original status and headers plus `x-reports-cached: true`. Only 2xx
//! responses are captured; everything else passes through untouched.

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, response::Parts, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};
use ferrous_reports_application::services::ResponseCache;
use ferrous_reports_domain::{CacheKey, CachedResponse, CACHE_HIT_HEADER};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Clone)]
pub struct ResponseCacheState {
    cache: Arc<ResponseCache>,
    ttl: Duration,
    max_body_bytes: usize,
}

impl ResponseCacheState {
    pub fn new(cache: Arc<ResponseCache>, ttl: Duration) -> Self {
        Self {
            cache,
            ttl,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Responses larger than this are served but never cached.
    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }

    /// Same cache, different lifetime. Used to give each route its own TTL.
    pub fn with_ttl(&self, ttl: Duration) -> Self {
        Self {
            cache: self.cache.clone(),
            ttl,
            max_body_bytes: self.max_body_bytes,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// Wraps `route` with the response cache, or returns it unchanged when
/// caching is disabled.
pub fn cached<S>(route: MethodRouter<S>, cache: Option<ResponseCacheState>) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    match cache {
        Some(state) => route.layer(middleware::from_fn_with_state(state, cache_response)),
        None => route,
    }
}

pub async fn cache_response(
    State(state): State<ResponseCacheState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET {
        return next.run(request).await;
    }

    let key = request_cache_key(request.uri());

    if let Some(hit) = state.cache.lookup(&key).await {
        return replay(hit);
    }

    let response = next.run(request).await;

    if !response.status().is_success() {
        debug!(key = %key, status = %response.status(), "Serving uncached error response");
        return response;
    }

    if declared_length(response.headers()).is_some_and(|len| len > state.max_body_bytes) {
        debug!(key = %key, "Response body too large to cache");
        return response;
    }

    let (parts, body) = response.into_parts();
    let body = match to_bytes(body, usize::MAX).await {
        Ok(body) => body,
        Err(e) => {
            error!(key = %key, error = %e, "Failed to buffer report response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if body.len() > state.max_body_bytes {
        debug!(key = %key, size = body.len(), "Response body too large to cache");
        return Response::from_parts(parts, Body::from(body));
    }

    let mut captured = CachedResponse::new(parts.status.as_u16(), body.clone());
    capture_headers(&parts, &mut captured);
    state.cache.store(&key, &captured, state.ttl).await;

    Response::from_parts(parts, Body::from(body))
}

fn request_cache_key(uri: &Uri) -> CacheKey {
    CacheKey::from_parts(uri.path(), uri.query())
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

fn capture_headers(parts: &Parts, captured: &mut CachedResponse) {
    for (name, value) in parts.headers.iter() {
        if name.as_str() == CACHE_HIT_HEADER {
            continue;
        }
        captured.push_header(name.as_str(), value.as_bytes());
    }
}

fn replay(cached: CachedResponse) -> Response {
    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);

    let mut headers = HeaderMap::new();
    for (name, values) in &cached.headers {
        let Ok(name) = HeaderName::from_bytes(name.as_bytes()) else {
            continue;
        };
        for value in values {
            if let Ok(value) = HeaderValue::from_bytes(value) {
                headers.append(name.clone(), value);
            }
        }
    }
    headers.insert(
        HeaderName::from_static(CACHE_HIT_HEADER),
        HeaderValue::from_static("true"),
    );

    let mut response = Response::new(Body::from(cached.body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
