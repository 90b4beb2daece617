//! HTTP transport types for the harness.
//!
//! # Design
//! Requests and responses are plain owned data. `RequestBody` names the two
//! payload encodings the harness ever sends (JSON and form-urlencoded), and
//! `ResponseBody` makes the "try JSON, fall back to raw text" rule a total
//! function: decoding a body can classify it but never fail.

use serde::Serialize;
use serde_json::Value;

use crate::error::HarnessError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// An HTTP request described as plain data, ready for a `Transport`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// A request payload before encoding. The `Form` variant holds the payload
/// already urlencoded, since `serde_urlencoded` consumes the typed value.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(Value),
    Form(String),
}

impl RequestBody {
    /// Build a JSON body from any serializable payload.
    pub fn json<T: Serialize>(payload: &T) -> Result<Self, HarnessError> {
        let value = serde_json::to_value(payload)
            .map_err(|e| HarnessError::InvalidBody(e.to_string()))?;
        Ok(RequestBody::Json(value))
    }

    /// Build a form-urlencoded body from any serializable payload.
    pub fn form<T: Serialize>(payload: &T) -> Result<Self, HarnessError> {
        serde_urlencoded::to_string(payload)
            .map(RequestBody::Form)
            .map_err(|e| HarnessError::InvalidBody(e.to_string()))
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => "application/json",
            RequestBody::Form(_) => "application/x-www-form-urlencoded",
        }
    }

    /// Encode the payload to the wire string.
    pub fn encode(&self) -> Result<String, HarnessError> {
        match self {
            RequestBody::Json(value) => serde_json::to_string(value)
                .map_err(|e| HarnessError::InvalidBody(e.to_string())),
            RequestBody::Form(encoded) => Ok(encoded.clone()),
        }
    }
}

/// A decoded response body.
///
/// Decoding attempts JSON first and falls back to raw text; an empty body is
/// its own case so callers never pattern-match on `""`.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str(raw) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_body() {
        let body = ResponseBody::parse(r#"{"scenarios":[]}"#);
        assert!(matches!(body, ResponseBody::Json(_)));
        assert!(body.as_json().unwrap().get("scenarios").is_some());
    }

    #[test]
    fn parse_falls_back_to_text() {
        let body = ResponseBody::parse("<html>not json</html>");
        assert_eq!(body, ResponseBody::Text("<html>not json</html>".to_string()));
        assert!(body.as_json().is_none());
    }

    #[test]
    fn parse_empty_body() {
        assert_eq!(ResponseBody::parse(""), ResponseBody::Empty);
        assert_eq!(ResponseBody::parse("  \n"), ResponseBody::Empty);
    }

    #[test]
    fn json_body_encodes_and_names_content_type() {
        let body = RequestBody::Json(serde_json::json!({"userId": 1}));
        assert_eq!(body.content_type(), "application/json");
        assert_eq!(body.encode().unwrap(), r#"{"userId":1}"#);
    }

    #[test]
    fn form_body_encodes_pairs() {
        #[derive(serde::Serialize)]
        struct Login {
            user_id: String,
            roles: String,
        }
        let body = RequestBody::form(&Login {
            user_id: "test user".to_string(),
            roles: "Learner".to_string(),
        })
        .unwrap();
        assert_eq!(body.content_type(), "application/x-www-form-urlencoded");
        let encoded = body.encode().unwrap();
        assert!(encoded.contains("user_id=test+user"));
        assert!(encoded.contains("roles=Learner"));
    }

    #[test]
    fn method_names() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }
}
