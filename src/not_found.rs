//! The 404 Not Found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The fallback route handler for unmatched paths.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// Render the 404 Not Found page.
pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Something's missing.",
        "Sorry, we can't find that page.",
    );

    (StatusCode::NOT_FOUND, page).into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;

    use super::get_404_not_found;

    #[tokio::test]
    async fn returns_not_found_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
