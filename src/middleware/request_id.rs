use axum::{
    body::Body,
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id we are willing to echo back
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id for one HTTP request, stored in the request extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Creates a new random request ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accepts a caller-supplied id if it is short, non-empty visible ASCII
    pub fn from_header(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?.trim();
        let acceptable = !value.is_empty()
            && value.len() <= MAX_REQUEST_ID_LEN
            && value.bytes().all(|b| b.is_ascii_graphic());
        acceptable.then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Propagates or generates the request id and echoes it on the response
///
/// A usable `x-request-id` from the front end is kept so its logs and ours
/// line up; anything else is replaced with a fresh UUID v4.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(RequestId::from_header)
        .unwrap_or_else(RequestId::generate);

    request.extensions_mut().insert(request_id.clone());

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(request_id.as_str()) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Span for `TraceLayer`, tagged with the request id set by the middleware above
pub fn make_span_with_request_id(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(RequestId::as_str)
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_uuids() {
        let id = RequestId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
        assert_ne!(id, RequestId::generate());
    }

    #[test]
    fn test_from_header_accepts_tokens() {
        let header = HeaderValue::from_static("quiz-submit-42");
        assert_eq!(
            RequestId::from_header(&header).map(|id| id.to_string()),
            Some("quiz-submit-42".to_string())
        );
    }

    #[test]
    fn test_from_header_rejects_unusable_values() {
        assert!(RequestId::from_header(&HeaderValue::from_static("  ")).is_none());
        assert!(RequestId::from_header(&HeaderValue::from_static("has space")).is_none());

        let long = "x".repeat(MAX_REQUEST_ID_LEN + 1);
        let header = HeaderValue::from_str(&long).unwrap();
        assert!(RequestId::from_header(&header).is_none());
    }
}
