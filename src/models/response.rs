// src/models/response.rs
// DOCUMENTATION: Success envelope shared by every endpoint
// PURPOSE: Keep `success`/`message`/`count`/`data` shaped the same everywhere

use serde::Serialize;

/// Successful response body
/// Optional members are omitted from the JSON when unset
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `{success, data}`
    pub fn data(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            count: None,
            data: Some(data),
        }
    }

    /// `{success, message, data}`
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            count: None,
            data: Some(data),
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// `{success, count, data}`
    pub fn list(data: Vec<T>) -> Self {
        ApiResponse {
            success: true,
            message: None,
            count: Some(data.len()),
            data: Some(data),
        }
    }

    /// `{success, message, count, data}` as returned by the seed endpoints
    pub fn seeded(message: impl Into<String>, data: Vec<T>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            count: Some(data.len()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// `{success, message}` for deletes
    pub fn message(message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            count: None,
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_counts_items() {
        let body = serde_json::to_value(ApiResponse::list(vec![1, 2, 3])).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert!(body.get("message").is_none());
    }

    #[test]
    fn test_message_envelope_has_no_data() {
        let body = serde_json::to_value(ApiResponse::message("Crop deleted successfully")).unwrap();
        assert_eq!(body["message"], "Crop deleted successfully");
        assert!(body.get("data").is_none());
        assert!(body.get("count").is_none());
    }
}
