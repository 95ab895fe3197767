//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router, middleware,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    account::{create_account_endpoint, get_accounts_page},
    auth::{
        auth_guard, auth_guard_hx, get_forgot_password_page, get_log_in_page, get_log_out,
        get_register_page, post_log_in, register_user,
    },
    endpoints,
    insights::get_insights_page,
    internal_server_error::get_internal_server_error_page,
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, get_new_transaction_page, get_transactions_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::REGISTER_VIEW, get(get_register_page))
        .route(
            endpoints::FORGOT_PASSWORD_VIEW,
            get(get_forgot_password_page),
        )
        .route(endpoints::USERS_API, post(register_user))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::INSIGHTS_VIEW, get(get_insights_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::NEW_TRANSACTION_VIEW, get(get_new_transaction_page))
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These POST routes need to use the HX-Redirect header for auth redirects
    // to work properly for HTMX requests.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(
                endpoints::TRANSACTIONS_API,
                post(create_transaction_endpoint),
            )
            .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' redirects to the insights page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::INSIGHTS_VIEW)
}

#[cfg(test)]
mod routing_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, endpoints};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        let state = AppState::new(connection, "nafstenoas", "Etc/UTC")
            .expect("Could not create app state");

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn root_redirects_unauthenticated_client_to_log_in() {
        let server = get_test_server();

        let response = server.get(endpoints::INSIGHTS_VIEW).await;

        response.assert_status_see_other();
        let location = response.header("location");
        let location = location.to_str().unwrap();
        assert!(
            location.starts_with(endpoints::LOG_IN_VIEW),
            "want redirect to the log-in page, got {location}"
        );
    }

    #[tokio::test]
    async fn log_in_page_is_public() {
        let server = get_test_server();

        server
            .get(endpoints::LOG_IN_VIEW)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn register_page_is_public() {
        let server = get_test_server();

        server
            .get(endpoints::REGISTER_VIEW)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let server = get_test_server();

        server
            .get("/does/not/exist")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
