//! Defines functions for handling user authentication with cookies.
//!
//! The auth cookie stores a serialized [Token] in a private (encrypted and
//! signed) cookie jar.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::token::Token, database_id::UserId};

/// The name of the cookie holding the serialized auth token.
pub(crate) const COOKIE_TOKEN: &str = "token";

/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(5);

/// Add an auth cookie to the cookie jar, indicating that a user is logged in
/// and authenticated.
///
/// Sets the expiry of the cookie to `duration` from the current time.
///
/// # Errors
/// Returns an [Error::JSONSerializationError] if the token cannot be
/// serialized.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserId,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expires_at = OffsetDateTime::now_utc() + duration;

    set_auth_cookie_with_expiry(jar, user_id, expires_at)
}

fn set_auth_cookie_with_expiry(
    jar: PrivateCookieJar,
    user_id: UserId,
    expires_at: OffsetDateTime,
) -> Result<PrivateCookieJar, Error> {
    let token = Token {
        user_id,
        expires_at,
    };
    let token_string =
        serde_json::to_string(&token).map_err(|error| Error::JSONSerializationError(error.to_string()))?;

    Ok(jar.add(
        Cookie::build((COOKIE_TOKEN, token_string))
            .expires(expires_at)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which
/// should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_TOKEN, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Parse the auth token from the cookie jar.
///
/// # Errors
/// Returns an:
/// - [Error::CookieMissing] if the auth cookie is not in the jar,
/// - or [Error::InvalidCredentials] if the token cannot be parsed or has
///   expired.
pub(crate) fn get_token_from_cookies(jar: &PrivateCookieJar) -> Result<Token, Error> {
    let cookie = jar.get(COOKIE_TOKEN).ok_or(Error::CookieMissing)?;
    let token: Token =
        serde_json::from_str(cookie.value_trimmed()).map_err(|_| Error::InvalidCredentials)?;

    if token.expires_at <= OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    Ok(token)
}

/// Set the expiry of the auth cookie in `jar` to the later of UTC now plus
/// `duration` and the token's current expiry.
///
/// # Errors
/// The cookie jar is not modified if an error is returned.
///
/// Returns an:
/// - [Error::CookieMissing] if the auth cookie is not in the jar,
/// - or [Error::InvalidCredentials] if the token cannot be parsed or has
///   expired.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let token = get_token_from_cookies(&jar)?;

    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or(Error::InvalidCredentials)?;
    let expires_at = max(token.expires_at, new_expiry);

    set_auth_cookie_with_expiry(jar, token.user_id, expires_at)
}
