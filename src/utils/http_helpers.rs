use axum::extract::rejection::JsonRejection;
use axum::http::header::{CONTENT_TYPE, WWW_AUTHENTICATE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::todos::TodoError;

/// A general purpose HTTP error type that can be converted into an `IntoResponse`.
#[derive(Debug)]
pub struct HTTPError {
    status: StatusCode,
    message: String,
    challenge: Option<String>,
}

impl HTTPError {
    /// Creates a new HTTP error. `challenge` becomes a `WWW-Authenticate` header.
    pub fn new(status: StatusCode, message: impl Into<String>, challenge: Option<String>) -> Self {
        HTTPError {
            status,
            message: message.into(),
            challenge,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Converts our `HTTPError` into a JSON error response.
impl IntoResponse for HTTPError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.message }).to_string();
        let mut response = (self.status, body).into_response();
        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(challenge) = self.challenge {
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                response.headers_mut().insert(WWW_AUTHENTICATE, value);
            }
        }
        response
    }
}

/// Maps business errors onto status codes. Internal details are logged, never returned.
impl From<TodoError> for HTTPError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::Validation(msg) => HTTPError::new(StatusCode::BAD_REQUEST, msg, None),
            TodoError::NotFound(item_id) => HTTPError::new(
                StatusCode::NOT_FOUND,
                format!("Todo item '{}' not found", item_id),
                None,
            ),
            TodoError::Storage(_) | TodoError::Attachment(_) => {
                error!("Request failed: {}", e);
                HTTPError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        }
    }
}

impl From<JsonRejection> for HTTPError {
    fn from(rejection: JsonRejection) -> Self {
        HTTPError::new(rejection.status(), rejection.body_text(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn json_rejection(request: axum::extract::Request) -> HTTPError {
        use axum::extract::FromRequest;
        axum::Json::<serde_json::Value>::from_request(request, &())
            .await
            .unwrap_err()
            .into()
    }

    #[tokio::test]
    async fn test_missing_content_type_keeps_415() {
        let request = http::Request::builder()
            .method("POST")
            .body(axum::body::Body::from("{}"))
            .unwrap();
        let err = json_rejection(request).await;
        assert_eq!(err.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_syntax_error_is_400() {
        let request = http::Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();
        let err = json_rejection(request).await;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err: HTTPError = TodoError::NotFound("abc".to_string()).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_is_opaque() {
        let err: HTTPError = TodoError::Storage("connection reset".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_challenge_header_is_set() {
        let response = HTTPError::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized access",
            Some("Bearer".to_string()),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
