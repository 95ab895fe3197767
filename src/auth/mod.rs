//! Authentication for the single-user application: password hashing, the auth
//! cookie, the log-in, log-out and registration routes, and the middleware
//! that protects the rest of the application.

mod cookie;
mod forgot_password;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod register_user;
mod token;
mod user;

pub use cookie::DEFAULT_COOKIE_DURATION;
#[cfg(test)]
pub(crate) use cookie::set_auth_cookie;
pub use forgot_password::get_forgot_password_page;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use password::{PasswordHash, ValidatedPassword};
pub use register_user::{get_register_page, register_user};
pub use user::{create_user_table, set_password};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;
