use anyhow::{Context, Result};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Describes one HTTP call: method, path relative to the API base URL,
/// optional JSON body, and the field a successful response must carry.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub expected_field: Option<String>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            expected_field: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<B: Serialize + ?Sized>(self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).context("Failed to serialize request body")?;
        Ok(self.with_body(value))
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// A 2xx response without this field (or with it set to null) is
    /// classified as a failure.
    pub fn expect_field(mut self, field: impl Into<String>) -> Self {
        self.expected_field = Some(field.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder() {
        #[derive(Serialize)]
        struct Body<'a> {
            purpose: &'a str,
        }

        let descriptor = RequestDescriptor::post("/api/chatbot/start")
            .json(&Body { purpose: "travel" })
            .unwrap()
            .expect_field("messages");

        assert_eq!(descriptor.method, Method::POST);
        assert_eq!(descriptor.path, "/api/chatbot/start");
        assert_eq!(descriptor.body, Some(json!({"purpose": "travel"})));
        assert_eq!(descriptor.expected_field.as_deref(), Some("messages"));
    }

    #[test]
    fn test_get_has_no_body() {
        let descriptor = RequestDescriptor::get("/api/dashboard/stats");
        assert_eq!(descriptor.method, Method::GET);
        assert!(descriptor.body.is_none());
        assert!(descriptor.expected_field.is_none());
    }
}
