//! Response classification shared by every authenticated call.

use reqwest::StatusCode;
use serde_json::Value;

use super::Outcome;

/// Message for a successful response that does not carry the expected data.
pub const NO_DATA_RECEIVED: &str = "no data received";

/// Classifies a response into an [`Outcome`].
///
/// - 401 is always `Unauthenticated`, whatever the body says.
/// - Any other non-2xx is a `Failure` carrying the body's `error` field, or a
///   generic description of the status.
/// - A 2xx body that is not JSON, carries an `error`, or lacks
///   `expected_field` is a `Failure`.
pub fn classify(status: StatusCode, body: &str, expected_field: Option<&str>) -> Outcome<Value> {
    if status == StatusCode::UNAUTHORIZED {
        return Outcome::Unauthenticated;
    }

    let parsed = if body.trim().is_empty() {
        None
    } else {
        serde_json::from_str::<Value>(body).ok()
    };

    if !status.is_success() {
        let message = parsed
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| generic_message(status));
        return Outcome::Failure(message);
    }

    let Some(value) = parsed else {
        // An empty body is fine when the caller asked for nothing in particular
        if expected_field.is_none() && body.trim().is_empty() {
            return Outcome::Success(Value::Null);
        }
        return Outcome::failure(NO_DATA_RECEIVED);
    };

    if let Some(message) = error_message(&value) {
        return Outcome::Failure(message);
    }

    match expected_field {
        Some(field) if value.get(field).is_none_or(Value::is_null) => {
            Outcome::failure(NO_DATA_RECEIVED)
        }
        _ => Outcome::Success(value),
    }
}

/// Extracts the backend's `error` field, if it carries anything.
pub fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn generic_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed: HTTP {} {}", status.as_u16(), reason),
        None => format!("Request failed: HTTP {}", status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unauthorized_ignores_body() {
        for body in ["", "not json", r#"{"error": "Token verification failed"}"#, r#"{"translated_text": "Hola"}"#] {
            assert_eq!(
                classify(StatusCode::UNAUTHORIZED, body, Some("translated_text")),
                Outcome::Unauthenticated
            );
        }
    }

    #[test]
    fn test_server_error_uses_error_field() {
        let outcome = classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "server down"}"#,
            Some("translated_text"),
        );
        assert_eq!(outcome, Outcome::Failure("server down".to_string()));
    }

    #[test]
    fn test_client_error_without_body_is_generic() {
        let outcome = classify(StatusCode::BAD_REQUEST, "", None);
        assert_eq!(
            outcome,
            Outcome::Failure("Request failed: HTTP 400 Bad Request".to_string())
        );
    }

    #[test]
    fn test_forbidden_is_failure_not_unauthenticated() {
        let outcome = classify(StatusCode::FORBIDDEN, "<html>nope</html>", None);
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_success_with_expected_field() {
        let outcome = classify(
            StatusCode::OK,
            r#"{"translated_text": "Hola"}"#,
            Some("translated_text"),
        );
        assert_eq!(outcome, Outcome::Success(json!({"translated_text": "Hola"})));
    }

    #[test]
    fn test_success_missing_expected_field() {
        let outcome = classify(StatusCode::OK, r#"{"source_lang": "en"}"#, Some("translated_text"));
        assert_eq!(outcome, Outcome::Failure(NO_DATA_RECEIVED.to_string()));

        let outcome = classify(StatusCode::OK, r#"{"translated_text": null}"#, Some("translated_text"));
        assert_eq!(outcome, Outcome::Failure(NO_DATA_RECEIVED.to_string()));
    }

    #[test]
    fn test_success_with_error_field_is_failure() {
        let outcome = classify(StatusCode::OK, r#"{"error": "No text provided"}"#, None);
        assert_eq!(outcome, Outcome::Failure("No text provided".to_string()));
    }

    #[test]
    fn test_success_with_empty_error_field_is_ignored() {
        let outcome = classify(StatusCode::OK, r#"{"error": "", "message": "ok"}"#, Some("message"));
        assert!(outcome.is_success());
    }

    #[test]
    fn test_success_non_json_is_failure() {
        let outcome = classify(StatusCode::OK, "<html></html>", None);
        assert_eq!(outcome, Outcome::Failure(NO_DATA_RECEIVED.to_string()));
    }

    #[test]
    fn test_no_content_without_expectation_is_success() {
        assert_eq!(
            classify(StatusCode::NO_CONTENT, "", None),
            Outcome::Success(Value::Null)
        );
        assert!(classify(StatusCode::NO_CONTENT, "", Some("message")).is_failure());
    }

    #[test]
    fn test_error_message_variants() {
        assert_eq!(error_message(&json!({"error": "x"})), Some("x".to_string()));
        assert_eq!(error_message(&json!({"error": null})), None);
        assert_eq!(error_message(&json!({"error": {"code": 7}})), Some(r#"{"code":7}"#.to_string()));
        assert_eq!(error_message(&json!({"message": "ok"})), None);
        assert_eq!(error_message(&json!(["error"])), None);
    }
}
