//! Unwrapping of the remote function's response envelope.
//!
//! The payload is an object with a `body` field. Depending on how the
//! function was written, `body` holds either the result object itself or
//! that object serialized to a JSON string. Both are accepted.

use serde_json::Value;

use crate::error::GatewayError;

pub const BODY_FIELD: &str = "body";
pub const STATUS_CODE_FIELD: &str = "statusCode";
pub const LOCATOR_FIELD: &str = "s3path";

/// Payload logged on decode failures is cut to this many bytes.
const LOGGED_PAYLOAD_LIMIT: usize = 512;

#[derive(Debug, Clone, PartialEq)]
pub enum EnvelopeBody {
    Raw(Value),
    Encoded(String),
}

impl From<Value> for EnvelopeBody {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => EnvelopeBody::Encoded(s),
            value => EnvelopeBody::Raw(value),
        }
    }
}

impl EnvelopeBody {
    pub fn resolve(self) -> Result<Value, GatewayError> {
        match self {
            EnvelopeBody::Raw(value) => Ok(value),
            EnvelopeBody::Encoded(s) => serde_json::from_str(&s).map_err(|e| {
                log::debug!("undecodable body: {}", truncate(s.as_bytes()));
                GatewayError::EnvelopeDecode(format!("body is not valid JSON: {}", e))
            }),
        }
    }
}

/// Structured result of the comparison, after unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub body: Value,
}

impl ComparisonResult {
    /// The non-empty `s3path` string, if the function produced one.
    pub fn locator(&self) -> Option<&str> {
        self.body
            .get(LOCATOR_FIELD)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

pub fn unwrap_envelope(payload: &[u8]) -> Result<ComparisonResult, GatewayError> {
    let envelope: Value = serde_json::from_slice(payload).map_err(|e| {
        log::debug!("undecodable envelope: {}", truncate(payload));
        GatewayError::EnvelopeDecode(format!("response is not valid JSON: {}", e))
    })?;

    let Value::Object(mut envelope) = envelope else {
        return Err(GatewayError::Contract(
            "remote function response is not an object".to_string(),
        ));
    };

    // Functions fronted by an HTTP-style handler report their own status
    // inside the payload.
    if let Some(status_code) = envelope.get(STATUS_CODE_FIELD).and_then(Value::as_i64) {
        if !(200..300).contains(&status_code) {
            return Err(GatewayError::RemoteInvocation(format!(
                "remote function reported status {}",
                status_code
            )));
        }
    }

    let body = envelope.remove(BODY_FIELD).ok_or_else(|| {
        GatewayError::Contract(format!(
            "remote function response has no `{}` field",
            BODY_FIELD
        ))
    })?;

    let body = EnvelopeBody::from(body).resolve()?;
    Ok(ComparisonResult { body })
}

fn truncate(payload: &[u8]) -> String {
    let end = payload.len().min(LOGGED_PAYLOAD_LIMIT);
    String::from_utf8_lossy(&payload[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encoded_body() {
        let payload = br#"{"statusCode":200, "body": "{\"s3path\":\"bucket/dir/file.html\"}"}"#;
        let result = unwrap_envelope(payload).unwrap();
        assert_eq!(result.locator(), Some("bucket/dir/file.html"));
    }

    #[test]
    fn test_raw_body() {
        let payload = br#"{"statusCode":200, "body": {"s3path":"bucket/dir/file.html"}}"#;
        let result = unwrap_envelope(payload).unwrap();
        assert_eq!(result.locator(), Some("bucket/dir/file.html"));
    }

    #[test]
    fn test_raw_and_encoded_bodies_are_equivalent() {
        let logical = json!({"s3path": "bucket/a/b.html", "items": [1, 2, 3], "note": "偏离"});
        let raw = json!({"body": logical.clone()});
        let encoded = json!({"body": logical.to_string()});

        let raw = unwrap_envelope(raw.to_string().as_bytes()).unwrap();
        let encoded = unwrap_envelope(encoded.to_string().as_bytes()).unwrap();
        assert_eq!(raw, encoded);
        assert_eq!(raw.body, logical);
    }

    #[test]
    fn test_outer_layer_not_json() {
        let err = unwrap_envelope(b"<html>gateway timeout</html>").unwrap_err();
        assert!(matches!(err, GatewayError::EnvelopeDecode(_)));
    }

    #[test]
    fn test_inner_layer_not_json() {
        let err = unwrap_envelope(br#"{"body":"not json {"}"#).unwrap_err();
        assert!(matches!(err, GatewayError::EnvelopeDecode(_)));
    }

    #[test]
    fn test_missing_body_is_contract_error() {
        let err = unwrap_envelope(br#"{"statusCode":200}"#).unwrap_err();
        assert_eq!(
            err,
            GatewayError::Contract("remote function response has no `body` field".to_string())
        );
    }

    #[test]
    fn test_non_object_envelope_is_contract_error() {
        let err = unwrap_envelope(b"[1, 2]").unwrap_err();
        assert!(matches!(err, GatewayError::Contract(_)));
    }

    #[test]
    fn test_inner_error_status() {
        let err = unwrap_envelope(br#"{"statusCode":500,"body":"{\"error\":\"boom\"}"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::RemoteInvocation("remote function reported status 500".to_string())
        );
    }

    #[test]
    fn test_locator_absent_or_empty() {
        let result = unwrap_envelope(br#"{"body":{"other":"x"}}"#).unwrap();
        assert_eq!(result.locator(), None);
        let result = unwrap_envelope(br#"{"body":{"s3path":""}}"#).unwrap();
        assert_eq!(result.locator(), None);
        let result = unwrap_envelope(br#"{"body":{"s3path":42}}"#).unwrap();
        assert_eq!(result.locator(), None);
        let result = unwrap_envelope(br#"{"body":"\"just a string\""}"#).unwrap();
        assert_eq!(result.locator(), None);
    }

    #[test]
    fn test_locator_is_not_revalidated() {
        let result = unwrap_envelope(br#"{"body":{"s3path":"no-key-segment"}}"#).unwrap();
        assert_eq!(result.locator(), Some("no-key-segment"));
    }
}
