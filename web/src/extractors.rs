//! Custom Axum extractors.
//!
//! - `CorrelationId`: the request's correlation ID, as assigned by
//!   [`correlation_id_layer`](crate::middleware::correlation_id_layer) or read
//!   from the `X-Correlation-ID` header
//!
//! # Examples
//!
//! ```ignore
//! use guiapi_web::CorrelationId;
//!
//! async fn handler(correlation_id: CorrelationId) -> String {
//!     tracing::info!(correlation_id = %correlation_id.0, "Processing request");
//!     format!("Request ID: {}", correlation_id.0)
//! }
//! ```

use crate::middleware::CORRELATION_ID_HEADER;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Uses the ID stored in request extensions by the middleware when present,
/// then the `X-Correlation-ID` header, and generates a new UUID v4 otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(id) = parts.extensions.get::<Uuid>() {
            return Ok(Self(*id));
        }

        let correlation_id = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> CorrelationId {
        let (mut parts, ()) = request.into_parts();
        CorrelationId::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_prefers_extension() {
        let assigned = Uuid::new_v4();
        let mut request = Request::builder()
            .header(CORRELATION_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .unwrap();
        request.extensions_mut().insert(assigned);

        assert_eq!(extract(request).await, CorrelationId(assigned));
    }

    #[tokio::test]
    async fn test_reads_header() {
        let sent = Uuid::new_v4();
        let request = Request::builder()
            .header(CORRELATION_ID_HEADER, sent.to_string())
            .body(())
            .unwrap();

        assert_eq!(extract(request).await, CorrelationId(sent));
    }

    #[tokio::test]
    async fn test_generates_when_missing() {
        let request = Request::builder().body(()).unwrap();
        let CorrelationId(id) = extract(request).await;
        assert_eq!(id.get_version_num(), 4);
    }
}
