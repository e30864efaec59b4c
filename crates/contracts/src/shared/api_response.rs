use serde::{Deserialize, Serialize};

/// Конверт ответа API: `{success, message, data, errors?}`
///
/// `data` равно `null` в ответах с ошибкой.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Option<Vec<String>>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_serializes_null_data() {
        let resp: ApiResponse<u32> = ApiResponse::failure("Category not found", None);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_deserializes_without_data_field() {
        let resp: ApiResponse<u32> =
            serde_json::from_str(r#"{"success":true,"message":"Logout successful"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data, None);
    }
}
