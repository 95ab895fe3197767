//! Alert fragments for displaying error messages to users.
//!
//! Form endpoints set `hx-target-error="#alert-container"` so that error
//! responses are swapped into the alert container of the current page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, PreEscaped, html};

/// Render an error alert fragment with the given `message` headline and
/// `details` text.
pub fn error_alert(status_code: StatusCode, message: &str, details: &str) -> Response {
    (status_code, alert_markup(message, details)).into_response()
}

fn alert_markup(message: &str, details: &str) -> Markup {
    html! {
        div
            role="alert"
            class="flex items-start justify-between gap-2 p-4 rounded-lg shadow \
                text-red-800 bg-red-50 dark:bg-gray-800 dark:text-red-400"
        {
            div
            {
                p class="font-medium" { (message) }

                @if !details.is_empty()
                {
                    p class="text-sm" { (details) }
                }
            }

            button
                type="button"
                class="text-red-800 dark:text-red-400 font-bold"
                aria-label="Dismiss"
                onclick="document.getElementById('alert-container').classList.add('hidden')"
            {
                "✕"
            }
        }

        // The container starts out hidden, reveal it once it has content.
        script
        {
            (PreEscaped("document.getElementById('alert-container').classList.remove('hidden');"))
        }
    }
}

#[cfg(test)]
mod alert_tests {
    use axum::http::StatusCode;
    use scraper::Html;

    use super::alert_markup;

    #[test]
    fn alert_contains_message_and_details() {
        let markup = alert_markup("Invalid amount", "Enter a non-negative number.");

        let html = Html::parse_fragment(&markup.into_string());
        let selector = scraper::Selector::parse("div[role=alert]").unwrap();
        let alert = html
            .select(&selector)
            .next()
            .expect("no alert element found");
        let text = alert.text().collect::<String>();

        assert!(text.contains("Invalid amount"));
        assert!(text.contains("Enter a non-negative number."));
    }

    #[test]
    fn error_alert_sets_status_code() {
        let response = super::error_alert(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid amount",
            "Enter a non-negative number.",
        );

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
