// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, MESSAGE_NOT_TEXT, MESSAGE_REQUIRED};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
}

impl ChatRequest {
    /// The message text. Absent or falsy values (`null`, `""`, `0`, `false`,
    /// `[]`, `{}`) are missing; other non-string values are rejected.
    pub fn message(&self) -> Result<&str, AppError> {
        match &self.message {
            Some(Value::String(text)) if !text.is_empty() => Ok(text.as_str()),
            None => Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string())),
            Some(value) if is_falsy(value) => {
                Err(AppError::BadRequest(MESSAGE_REQUIRED.to_string()))
            }
            Some(_) => Err(AppError::BadRequest(MESSAGE_NOT_TEXT.to_string())),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Outgoing payload: a reply or an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Reply { response: String },
    Error { error: String },
}

impl ChatResponse {
    pub fn reply(text: impl Into<String>) -> Self {
        ChatResponse::Reply { response: text.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ChatResponse::Error { error: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ChatRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn falsy_messages_are_missing() {
        for json in [
            r#"{}"#,
            r#"{"message": null}"#,
            r#"{"message": ""}"#,
            r#"{"message": 0}"#,
            r#"{"message": 0.0}"#,
            r#"{"message": false}"#,
            r#"{"message": []}"#,
            r#"{"message": {}}"#,
        ] {
            let err = parse(json).message().unwrap_err();
            assert_eq!(err.to_string(), MESSAGE_REQUIRED, "body: {}", json);
        }
    }

    #[test]
    fn whitespace_is_a_message() {
        assert_eq!(parse(r#"{"message": "   "}"#).message().unwrap(), "   ");
        assert_eq!(parse(r#"{"message": " hi "}"#).message().unwrap(), " hi ");
    }

    #[test]
    fn truthy_non_text_is_rejected() {
        for json in [r#"{"message": 5}"#, r#"{"message": true}"#, r#"{"message": ["hi"]}"#] {
            let err = parse(json).message().unwrap_err();
            assert_eq!(err.to_string(), MESSAGE_NOT_TEXT, "body: {}", json);
        }
    }

    #[test]
    fn response_serializes_single_key() {
        let json = serde_json::to_value(ChatResponse::reply("Hi there")).unwrap();
        assert_eq!(json, serde_json::json!({ "response": "Hi there" }));

        let json = serde_json::to_value(ChatResponse::error("boom")).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "boom" }));
    }
}
