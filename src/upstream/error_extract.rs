//! Mapping of failed upstream responses to [`GatewayError::Upstream`].
//!
//! The fetcher does not know the error envelope of any particular API. It
//! hands the status and raw body to an [`ErrorExtractor`], which decides the
//! status and message surfaced to callers.

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::GatewayError;

/// Strategy turning a non-2xx upstream response into a gateway error.
pub trait ErrorExtractor: Send + Sync + fmt::Debug {
    /// Builds the error for a response with `status` and raw `body`.
    fn extract(&self, status: StatusCode, body: &str) -> GatewayError;
}

/// Riot-style envelope: `{"status": {"message": "...", "status_code": 404}}`.
///
/// Bodies that do not match fall back to the HTTP status and its canonical
/// reason phrase.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiotErrorEnvelope;

#[derive(Deserialize)]
struct Envelope {
    status: EnvelopeStatus,
}

#[derive(Deserialize)]
struct EnvelopeStatus {
    message: Option<String>,
    status_code: Option<u16>,
}

impl ErrorExtractor for RiotErrorEnvelope {
    fn extract(&self, status: StatusCode, body: &str) -> GatewayError {
        let fallback = || {
            status
                .canonical_reason()
                .unwrap_or("upstream request failed")
                .to_string()
        };
        match serde_json::from_str::<Envelope>(body) {
            Ok(Envelope { status: inner }) => GatewayError::upstream(
                inner.status_code.unwrap_or(status.as_u16()),
                inner.message.unwrap_or_else(fallback),
            ),
            Err(_) => GatewayError::upstream(status.as_u16(), fallback()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_riot_envelope() {
        let body = r#"{"status":{"message":"Data not found - summoner not found","status_code":404}}"#;
        let err = RiotErrorEnvelope.extract(StatusCode::NOT_FOUND, body);
        assert_eq!(
            err,
            GatewayError::upstream(404, "Data not found - summoner not found")
        );
    }

    #[test]
    fn envelope_status_wins_over_http_status() {
        let body = r#"{"status":{"message":"Forbidden","status_code":403}}"#;
        let err = RiotErrorEnvelope.extract(StatusCode::BAD_REQUEST, body);
        assert_eq!(err, GatewayError::upstream(403, "Forbidden"));
    }

    #[test]
    fn unknown_body_falls_back_to_reason_phrase() {
        let err = RiotErrorEnvelope.extract(StatusCode::SERVICE_UNAVAILABLE, "<html>oops</html>");
        assert_eq!(err, GatewayError::upstream(503, "Service Unavailable"));
    }
}
