//! The 500 Internal Server Error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;

use crate::{endpoints, html::error_view};

/// Render the 500 Internal Server Error page with a `description` of what
/// went wrong and a suggested `fix`.
pub fn render_internal_server_error(description: &str, fix: &str) -> Response {
    let page = error_view("Internal Server Error", "500", description, fix);

    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}

/// The route handler for the internal server error page.
pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error("An unexpected error occurred.", "Try refreshing the page.")
}

/// An HTMX redirect to the internal server error page.
pub fn get_internal_server_error_redirect() -> Response {
    (
        HxRedirect(endpoints::INTERNAL_ERROR_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::http::StatusCode;
    use axum_htmx::HX_REDIRECT;

    use crate::endpoints;

    use super::{get_internal_server_error_page, get_internal_server_error_redirect};

    #[tokio::test]
    async fn returns_internal_server_error_status() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn redirect_points_at_error_page() {
        let response = get_internal_server_error_redirect();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(HX_REDIRECT)
                .and_then(|value| value.to_str().ok()),
            Some(endpoints::INTERNAL_ERROR_VIEW)
        );
    }
}
