use contracts::shared::ApiResponse;
use contracts::system::auth::ApiError;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Сообщение для пользователя по статусу ошибки
pub fn user_message(error: &ApiError) -> String {
    match error.status {
        0 => format!("Error: {}", error.message),
        400 => "Bad Request. Please check your input.".into(),
        401 => "Unauthorized. Please login again.".into(),
        403 => "Access Denied. You do not have permission.".into(),
        404 => "Resource not found.".into(),
        409 => "Conflict. The resource already exists.".into(),
        422 => "Validation error. Please check your data.".into(),
        500 => "Server error. Please try again later.".into(),
        503 => "Service unavailable. Please try again later.".into(),
        status => format!("Error {}: {}", status, error.message),
    }
}

/// Причина неудачной попытки запроса
#[derive(Debug, Clone, PartialEq)]
pub enum RequestFailure {
    /// Сеть недоступна, CORS, обрыв соединения
    Transport(String),
    Timeout(u32),
    /// Ответ с не-2xx статусом
    Status(ApiError),
    /// Тело 2xx ответа не разобрано
    Decode(String),
}

impl RequestFailure {
    /// Повторять можно только транспортные ошибки, таймауты и 5xx
    pub fn is_retryable(&self) -> bool {
        match self {
            RequestFailure::Transport(_) | RequestFailure::Timeout(_) => true,
            RequestFailure::Status(e) => e.status >= 500,
            RequestFailure::Decode(_) => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RequestFailure::Status(e) if e.status == 401)
    }
}

impl From<RequestFailure> for ApiError {
    fn from(failure: RequestFailure) -> Self {
        match failure {
            RequestFailure::Transport(msg) => ApiError::client(format!("Network error: {}", msg)),
            RequestFailure::Timeout(ms) => {
                ApiError::client(format!("Request timed out after {} ms", ms))
            }
            RequestFailure::Status(error) => error,
            RequestFailure::Decode(msg) => {
                ApiError::client(format!("Failed to parse response: {}", msg))
            }
        }
    }
}

/// Ошибка из не-2xx ответа; сообщение берётся из конверта, если он есть
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ApiResponse<Value>>(body) {
        Ok(envelope) => ApiError::new(status, envelope.message).with_errors(envelope.errors),
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() {
                format!("Request failed with status {}", status)
            } else {
                text.to_string()
            };
            ApiError::new(status, message)
        }
    }
}

/// Распаковать конверт 2xx ответа: `success == false` = ошибка с сообщением конверта
pub fn unpack<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RequestFailure> {
    let envelope: ApiResponse<Value> =
        serde_json::from_str(body).map_err(|e| RequestFailure::Decode(e.to_string()))?;

    if !envelope.success {
        return Err(RequestFailure::Status(
            ApiError::new(status, envelope.message).with_errors(envelope.errors),
        ));
    }

    serde_json::from_value(envelope.data.unwrap_or(Value::Null))
        .map_err(|e| RequestFailure::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_table() {
        let cases = [
            (400, "Bad Request. Please check your input."),
            (401, "Unauthorized. Please login again."),
            (403, "Access Denied. You do not have permission."),
            (404, "Resource not found."),
            (409, "Conflict. The resource already exists."),
            (422, "Validation error. Please check your data."),
            (500, "Server error. Please try again later."),
            (503, "Service unavailable. Please try again later."),
        ];
        for (status, expected) in cases {
            assert_eq!(user_message(&ApiError::new(status, "x")), expected);
        }
        assert_eq!(user_message(&ApiError::new(418, "teapot")), "Error 418: teapot");
        assert_eq!(user_message(&ApiError::client("offline")), "Error: offline");
    }

    #[test]
    fn test_retry_policy() {
        assert!(RequestFailure::Transport("reset".into()).is_retryable());
        assert!(RequestFailure::Timeout(30_000).is_retryable());
        assert!(RequestFailure::Status(ApiError::new(503, "down")).is_retryable());
        assert!(!RequestFailure::Status(ApiError::new(404, "missing")).is_retryable());
        assert!(!RequestFailure::Status(ApiError::new(401, "auth")).is_retryable());
        assert!(!RequestFailure::Decode("eof".into()).is_retryable());
        assert!(RequestFailure::Status(ApiError::new(401, "auth")).is_unauthorized());
    }

    #[test]
    fn test_unpack_success_returns_data() {
        let body = r#"{"success":true,"message":"ok","data":[1,2,3]}"#;
        let data: Vec<i32> = unpack(200, body).unwrap();
        assert_eq!(data, vec![1, 2, 3]);

        assert!(unpack::<()>(200, r#"{"success":true,"message":"Logged out","data":null}"#).is_ok());
    }

    #[test]
    fn test_unpack_failure_envelope_is_an_error() {
        let body = r#"{"success":false,"message":"Nope","data":null,"errors":["a"]}"#;
        let err = unpack::<Vec<i32>>(200, body).unwrap_err();
        let api: ApiError = err.into();
        assert_eq!(api.status, 200);
        assert_eq!(api.message, "Nope");
        assert_eq!(api.errors, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_error_from_body() {
        let body = r#"{"success":false,"message":"Category not found","data":null}"#;
        let err = error_from_body(404, body);
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Category not found");

        let plain = error_from_body(502, "");
        assert_eq!(plain.message, "Request failed with status 502");
    }
}
