//! A static page describing how to reset the application password.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::html::base;

fn forgot_password_template() -> Markup {
    let content = html! {
        div
            class="flex flex-col items-center justify-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            div
                class="w-full bg-white rounded shadow dark:border md:mt-0 sm:max-w-md xl:p-0 dark:bg-gray-800 dark:border-gray-700"
            {
                div class="p-6 space-y-4 md:space-y-6 sm:p-8"
                {
                    h1
                        class="text-xl font-bold md:text-2xl"
                    {
                        "Forgot your password?"
                    }
                    p class="text-justify"
                    {
                        "To reset your password, go to the directory where this server is
                    running from and run the program 'reset_password', pointing it to
                    your database file:"
                    }
                    pre class="p-2 rounded bg-gray-100 dark:bg-gray-700 text-sm overflow-x-auto"
                    {
                        "reset_password --db-path <path to your database file>"
                    }
                    p class="text-justify"
                    {
                        "The program will prompt you for a new password and update the
                    database in place. Restarting the server is not required."
                    }
                }
            }
        }
    };

    base("Forgot Password", &[], &content)
}

/// Renders a page describing how the user's password can be reset.
pub async fn get_forgot_password_page() -> Response {
    forgot_password_template().into_response()
}
