//! Wire Protocol Module
//!
//! Defines the request and response DTOs exchanged on the line-delimited
//! JSON protocol, one object per line.

use chrono::Utc;
use serde::{Deserialize, Serialize};

// == Request Type ==
/// Command tag carried by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    Login,
    FindAll,
    FindById,
    FindByCategory,
    FindByYear,
    Save,
    Update,
    Delete,
    Exit,
}

// == Request ==
/// One client request.
///
/// `content` is command-specific: credentials encoded as JSON text for LOGIN,
/// a record encoded as JSON text for SAVE/UPDATE, an identifier or label
/// string otherwise, absent for FIND_ALL and EXIT. `token` is absent only
/// for LOGIN. `created_at` is an informational timestamp string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub created_at: String,
}

impl Request {
    // == Constructor ==
    /// Creates a request stamped with the current time.
    pub fn new(request_type: RequestType, content: Option<String>, token: Option<String>) -> Self {
        Self {
            request_type,
            content,
            token,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

// == Response Status ==
/// Outcome kind carried by every response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Ok,
    Error,
    Token,
    Close,
}

// == Response ==
/// One server response. Exactly one is produced per decoded request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub created_at: String,
}

impl Response {
    fn stamped(status: ResponseStatus, content: Option<String>) -> Self {
        Self {
            status,
            content,
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Successful command result with a payload.
    pub fn ok(content: impl Into<String>) -> Self {
        Self::stamped(ResponseStatus::Ok, Some(content.into()))
    }

    /// Failure with a human-readable reason.
    pub fn error(reason: impl Into<String>) -> Self {
        Self::stamped(ResponseStatus::Error, Some(reason.into()))
    }

    /// Successful login carrying the issued token.
    pub fn token(token: impl Into<String>) -> Self {
        Self::stamped(ResponseStatus::Token, Some(token.into()))
    }

    /// Session termination acknowledgment.
    pub fn close() -> Self {
        Self::stamped(ResponseStatus::Close, Some("Closing connection".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_wire_names() {
        assert_eq!(serde_json::to_string(&RequestType::Login).unwrap(), "\"LOGIN\"");
        assert_eq!(serde_json::to_string(&RequestType::FindAll).unwrap(), "\"FIND_ALL\"");
        assert_eq!(serde_json::to_string(&RequestType::FindById).unwrap(), "\"FIND_BY_ID\"");
        assert_eq!(
            serde_json::to_string(&RequestType::FindByCategory).unwrap(),
            "\"FIND_BY_CATEGORY\""
        );
        assert_eq!(serde_json::to_string(&RequestType::FindByYear).unwrap(), "\"FIND_BY_YEAR\"");
        assert_eq!(serde_json::to_string(&RequestType::Exit).unwrap(), "\"EXIT\"");
    }

    #[test]
    fn test_request_round_trip() {
        let request = Request::new(
            RequestType::FindById,
            Some("1".to_string()),
            Some("a.b.c".to_string()),
        );
        let json = serde_json::to_string(&request).unwrap();
        let back: Request = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }

    #[test]
    fn test_request_token_absent_for_login() {
        let json = r#"{"type":"LOGIN","content":"{\"username\":\"pepe\",\"password\":\"pepe1234\"}","createdAt":"2023-10-01T00:00:00Z"}"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.request_type, RequestType::Login);
        assert!(request.token.is_none());
    }

    #[test]
    fn test_request_unknown_tag_fails_to_decode() {
        let json = r#"{"type":"DROP_TABLES","content":null,"createdAt":"now"}"#;
        assert!(serde_json::from_str::<Request>(json).is_err());
    }

    #[test]
    fn test_response_round_trip() {
        let response = Response::ok("[]");
        let json = serde_json::to_string(&response).unwrap();
        let back: Response = serde_json::from_str(&json).unwrap();
        assert_eq!(response, back);
    }

    #[test]
    fn test_response_constructors() {
        assert_eq!(Response::ok("x").status, ResponseStatus::Ok);
        assert_eq!(Response::error("bad").status, ResponseStatus::Error);
        assert_eq!(Response::token("a.b.c").status, ResponseStatus::Token);
        assert_eq!(Response::close().status, ResponseStatus::Close);
    }

    #[test]
    fn test_response_status_wire_names() {
        let json = serde_json::to_string(&Response::error("nope")).unwrap();
        assert!(json.contains("\"ERROR\""));
        assert!(json.contains("\"createdAt\""));
    }
}
