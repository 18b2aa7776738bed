use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::domain::ProcessedEmail;

pub const PROCESS_EMAIL_PATH: &str = "process-email";

/// Every way a submission can fail after validation. Only the Display text reaches the user.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid JSON response (HTTP {status}): {source}")]
    NotJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

pub fn endpoint_url(base: &Url) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PROCESS_EMAIL_PATH)
}

/// Decodes a `/process-email` body. A truthy `error` wins over everything else,
/// matching how the collaborator reports failures with a 200 or an error status alike.
pub fn decode_body(status: u16, body: &[u8]) -> Result<ProcessedEmail, ProcessError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|source| ProcessError::NotJson { status, source })?;

    if let Some(message) = value.get("error").and_then(error_text) {
        return Err(ProcessError::Rejected(message));
    }

    let processed: ProcessedEmail =
        serde_json::from_value(value).map_err(|err| ProcessError::Malformed(err.to_string()))?;

    let confidence = processed.classification.confidence;
    if !confidence.is_finite() || !(0.0..=1.0).contains(&confidence) {
        return Err(ProcessError::Malformed(format!(
            "confidence {confidence} is outside [0, 1]"
        )));
    }
    Ok(processed)
}

fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: &str = r#"{"classification":{"main_category":"billing","confidence":0.87,"is_confident":true,"summary":"Customer requests refund"},"response":{"suggested":"We will process your refund."}}"#;

    #[test]
    fn decodes_success_shape() {
        let processed = decode_body(200, SUCCESS.as_bytes()).unwrap();
        assert_eq!(processed.classification.main_category, "billing");
        assert!(processed.classification.is_confident);
        assert_eq!(processed.response.suggested, "We will process your refund.");
    }

    #[test]
    fn error_field_becomes_rejection() {
        let err = decode_body(200, br#"{"error":"model unavailable"}"#).unwrap_err();
        assert!(matches!(err, ProcessError::Rejected(_)));
        assert_eq!(err.to_string(), "model unavailable");
    }

    #[test]
    fn falsy_error_field_is_ignored() {
        let body = SUCCESS.replacen('{', r#"{"error":"","#, 1);
        assert!(decode_body(200, body.as_bytes()).is_ok());
        let body = SUCCESS.replacen('{', r#"{"error":null,"#, 1);
        assert!(decode_body(200, body.as_bytes()).is_ok());
    }

    #[test]
    fn non_json_body_reports_status() {
        let err = decode_body(502, b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ProcessError::NotJson { status: 502, .. }));
        assert!(err.to_string().contains("HTTP 502"));
    }

    #[test]
    fn missing_fields_are_malformed() {
        let err = decode_body(200, br#"{"classification":{"main_category":"x"}}"#).unwrap_err();
        assert!(matches!(err, ProcessError::Malformed(_)));
    }

    #[test]
    fn confidence_must_be_a_fraction() {
        let body = SUCCESS.replace("0.87", "87");
        let err = decode_body(200, body.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("http://localhost:8000").unwrap();
        assert_eq!(
            endpoint_url(&base).unwrap().as_str(),
            "http://localhost:8000/process-email"
        );
        let base = Url::parse("https://triage.example.com/api").unwrap();
        assert_eq!(
            endpoint_url(&base).unwrap().as_str(),
            "https://triage.example.com/api/process-email"
        );
    }
}
