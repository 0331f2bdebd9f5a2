use serde::{Deserialize, Serialize};

/// Uniform response envelope.
///
/// Success: `{"ok": true, "data": …}`. Failure: `{"ok": false, "error":
/// "<code>"}`. Exactly one of `data`/`error` is present.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn failure(code: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(code.into()),
        }
    }
}

/// An identifier field as submitted by a client.
///
/// Clients send course/session/user identifiers inconsistently as JSON
/// strings or numbers; both forms are accepted and rendered to text before
/// they reach the services.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Int(n) => n.to_string(),
            FieldValue::Float(f) => f.to_string(),
        }
    }
}

/// Render an optional body field for the service layer; absent and `null`
/// become empty and are rejected there as missing.
pub(crate) fn text_or_empty(value: Option<FieldValue>) -> String {
    value.map(FieldValue::into_text).unwrap_or_default()
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueTokenRequest {
    #[serde(default)]
    pub course_id: Option<FieldValue>,
    #[serde(default)]
    pub session_id: Option<FieldValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRequest {
    #[serde(default)]
    pub user_id: Option<FieldValue>,
    #[serde(default)]
    pub device_id: Option<FieldValue>,
    #[serde(default)]
    pub course_id: Option<FieldValue>,
    #[serde(default)]
    pub session_id: Option<FieldValue>,
    #[serde(default)]
    pub token: Option<FieldValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusParams {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckinResponse {
    pub presence_id: rollcall::PresenceId,
    pub status: rollcall::PresenceStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_accepts_strings_and_numbers() {
        let v: FieldValue = serde_json::from_str("\"C1\"").unwrap();
        assert_eq!(v.into_text(), "C1");

        let v: FieldValue = serde_json::from_str("101").unwrap();
        assert_eq!(v.into_text(), "101");

        let v: FieldValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(v.into_text(), "1.5");
    }

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(ok, serde_json::json!({"ok": true, "data": 42}));

        let err = serde_json::to_value(ApiResponse::failure("token_invalid")).unwrap();
        assert_eq!(err, serde_json::json!({"ok": false, "error": "token_invalid"}));
    }

    #[test]
    fn test_checkin_request_tolerates_missing_fields() {
        let request: CheckinRequest = serde_json::from_str("{\"user_id\": 7}").unwrap();
        assert_eq!(text_or_empty(request.user_id), "7");
        assert_eq!(text_or_empty(request.token), "");
    }
}
