//! Uniform response envelope.
//!
//! Every response body, success or failure, is
//! `{"success": bool, "message": string, "data"?: payload}`. `data` is
//! omitted on failures and when an operation has nothing to return.

use serde::{Deserialize, Serialize};

/// JSON envelope wrapping every API payload.
///
/// # Examples
/// ```
/// use user_service::inbound::http::envelope::ApiResponse;
///
/// let body = serde_json::to_value(ApiResponse::<()>::failure("User not found"))
///     .expect("serialise envelope");
/// assert_eq!(body, serde_json::json!({"success": false, "message": "User not found"}));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response without a payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed response; never carries a payload.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{json, Value};

    #[rstest]
    #[case(ApiResponse::ok("User found", json!({"id": 1})), json!({"success": true, "message": "User found", "data": {"id": 1}}))]
    #[case(ApiResponse::done("User deleted successfully"), json!({"success": true, "message": "User deleted successfully"}))]
    #[case(ApiResponse::failure("Invalid user ID"), json!({"success": false, "message": "Invalid user ID"}))]
    fn data_key_is_omitted_without_payload(
        #[case] envelope: ApiResponse<Value>,
        #[case] expected: Value,
    ) {
        assert_eq!(serde_json::to_value(envelope).expect("serialise"), expected);
    }

    #[rstest]
    fn empty_list_payload_is_kept() {
        let body = serde_json::to_value(ApiResponse::ok("Users retrieved successfully", Vec::<u8>::new()))
            .expect("serialise");

        assert_eq!(body.get("data"), Some(&json!([])));
    }
}
