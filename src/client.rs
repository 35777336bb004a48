use error_stack::{Result, ResultExt};
use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, ACCEPT_LANGUAGE, COOKIE};
use secrecy::{ExposeSecret, Secret};

use crate::error::ApplicationError;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
/// The name of the cookie holding the authenticated session.
pub const SESSION_COOKIE: &str = "_ncfa";
/// The public site, used to print links to users, maps and games.
pub const SITE_URL: &str = "https://www.geoguessr.com";

fn default_headers(
    cookie: Option<&Secret<String>>,
) -> std::result::Result<HeaderMap, InvalidHeaderValue> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    if let Some(cookie) = cookie {
        let mut value =
            HeaderValue::from_str(&format!("{SESSION_COOKIE}={}", cookie.expose_secret()))?;
        value.set_sensitive(true);
        default_headers.insert(COOKIE, value);
    }

    Ok(default_headers)
}

/// Builds the client every command uses, sending the session cookie with each
/// request when one is given.
///
/// # Errors
/// - If the cookie cannot be used as a header value
/// - If the TLS backend fails to initialize
pub fn build_client(cookie: Option<&Secret<String>>) -> Result<reqwest::Client, ApplicationError> {
    let headers = default_headers(cookie)
        .change_context(ApplicationError::MissingCredentials {})
        .attach_printable("the session cookie cannot be sent as a header value")?;

    reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .build()
        .change_context(ApplicationError::HttpError {})
}

/// Builds a client that stores the cookies the server sets, so a session
/// obtained by signing in is reused by the following requests.
///
/// # Errors
/// If the TLS backend fails to initialize.
pub fn build_session_client() -> Result<reqwest::Client, ApplicationError> {
    let headers = default_headers(None).change_context(ApplicationError::HttpError {})?;

    reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .default_headers(headers)
        .cookie_store(true)
        .build()
        .change_context(ApplicationError::HttpError {})
}

/// Reduces a pasted URL such as `https://www.geoguessr.com/challenge/abc` to
/// its token, `abc`. Anything without a slash is returned trimmed.
pub fn extract_token(input: &str) -> &str {
    let input = input.trim().trim_end_matches('/');
    match input.rsplit_once('/') {
        Some((_, token)) => token,
        None => input,
    }
}
