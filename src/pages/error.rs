use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

use super::layout;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let detail = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "An error occurred while processing your request.".to_string()
        } else {
            tracing::debug!(error = %self, "rejected request");
            self.to_string()
        };

        let body = format!(
            r#"<h1 class="text-danger">Error.</h1>
<p id="error-detail">{}</p>"#,
            html_escape::encode_text(&detail)
        );
        (status, layout::page("Error", None, &body)).into_response()
    }
}

pub async fn not_found() -> Response {
    let body = r#"<h1>Page not found</h1>
<p>Sorry, there's nothing at this address.</p>"#;
    (StatusCode::NOT_FOUND, layout::page("Not found", None, body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_is_a_404_page() {
        let response = not_found().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_hide_details() {
        let response = AppError::Identity("identity store lock poisoned".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_input_is_a_bad_request() {
        let response = AppError::InvalidInput("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
