use serde::{Deserialize, Serialize};

/// Body of every single-attribute update call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpdateRequest {
    pub id: String,
    pub value: String,
}

/// Acknowledgement returned by the update and diary services.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_without_message() {
        let resp: ServiceResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(resp, ServiceResponse::ok());
        assert_eq!(serde_json::to_string(&resp).unwrap(), r#"{"success":true}"#);
    }

    #[test]
    fn test_rejected_carries_message() {
        let resp: ServiceResponse =
            serde_json::from_str(r#"{"success":false,"message":"taken"}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message.as_deref(), Some("taken"));
    }
}
