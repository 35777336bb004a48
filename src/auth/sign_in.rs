use std::fmt::{self, Display};

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    client::SESSION_COOKIE,
    format::{or_na, thousands, yes_no},
    model::Progress,
    profiles::get_profile,
};

#[derive(Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// The account returned after a successful sign in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedInUser {
    pub nick: String,
    #[serde(default)]
    pub progress: Progress,
    #[serde(default)]
    pub is_pro_user: bool,
}

pub enum SignInOutcome {
    /// The server answered 401.
    InvalidCredentials,
    SignedIn {
        user: SignedInUser,
        /// The `_ncfa` cookie set by the response, if any.
        session_cookie: Option<Secret<String>>,
    },
}

/// Signs in with an email and password.
///
/// A rejected login is reported as [`SignInOutcome::InvalidCredentials`]
/// rather than as an error.
#[tracing::instrument(name = "sign in", level = "debug", skip_all)]
pub async fn sign_in(
    client: &Client,
    base_url: &str,
    email: &str,
    password: &Secret<String>,
) -> Result<SignInOutcome, reqwest::Error> {
    let response = client
        .post(format!("{base_url}/v3/accounts/signin"))
        .json(&SignInRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    if response.status() == StatusCode::UNAUTHORIZED {
        return Ok(SignInOutcome::InvalidCredentials);
    }

    let response = response.error_for_status()?;
    let session_cookie = response
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| Secret::new(cookie.value().to_string()));
    let user = response.json().await?;

    Ok(SignInOutcome::SignedIn {
        user,
        session_cookie,
    })
}

/// Checks that the client now holds a working session, returning the nick
/// of the signed in user, or `None` when the server does not recognise it.
#[tracing::instrument(name = "verify sign in", level = "debug", skip_all)]
pub async fn verify_sign_in(
    client: &Client,
    base_url: &str,
) -> Result<Option<String>, reqwest::Error> {
    match get_profile(client, base_url).await {
        Ok(profile) => Ok(Some(profile.user.nick)),
        Err(error) if error.status().is_some() => Ok(None),
        Err(error) => Err(error),
    }
}

/// The console report printed after signing in.
pub struct SignInReport<'a> {
    pub user: &'a SignedInUser,
    pub session_cookie: Option<&'a Secret<String>>,
}

impl Display for SignInReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self.user;

        writeln!(f, "\n✅ Sign In Successful!\n")?;
        writeln!(f, "Welcome, {}!", user.nick)?;
        writeln!(f, "Level: {}", or_na(user.progress.level))?;
        writeln!(f, "XP: {}", thousands(user.progress.xp.unwrap_or_default()))?;
        writeln!(f, "Pro User: {}", yes_no(user.is_pro_user))?;

        writeln!(f, "\n🔐 Authentication Cookies Set:")?;
        writeln!(f, "- {SESSION_COOKIE} - Main session cookie")?;
        writeln!(f, "- session - Session identifier")?;

        if let Some(cookie) = self.session_cookie {
            writeln!(f, "\n💡 Your {SESSION_COOKIE} cookie (save this for API requests):")?;
            writeln!(f, "{}", cookie.expose_secret())?;
        }

        Ok(())
    }
}

pub const SIGN_IN_WARNING: &str = "\
============================================================
⚠️  WARNING: EDUCATIONAL USE ONLY
============================================================

Programmatic login may violate GeoGuessr's Terms of Service.
This example is for educational purposes to understand the API.
In production, use proper OAuth flows or manual cookie extraction.
";

pub const NEXT_STEPS: &str = "\
📝 Next Steps:
- Save your _ncfa cookie to GEOGUESSR_COOKIE environment variable
- Use that cookie for future API requests
- Don't share your cookie publicly";

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn report_prints_cookie_when_present() {
        let user: SignedInUser = serde_json::from_value(json!({
            "nick": "Plonker",
            "progress": { "level": 7, "xp": 12500 },
            "isProUser": false
        }))
        .unwrap();
        let cookie = Secret::new("secret-session".to_string());

        let report = SignInReport {
            user: &user,
            session_cookie: Some(&cookie),
        }
        .to_string();

        assert!(report.contains("Welcome, Plonker!"));
        assert!(report.contains("XP: 12,500"));
        assert!(report.contains("Pro User: ❌ No"));
        assert!(report.ends_with("secret-session\n"));
    }

    #[test]
    fn report_without_cookie() {
        let user: SignedInUser = serde_json::from_value(json!({ "nick": "Plonker" })).unwrap();

        let report = SignInReport {
            user: &user,
            session_cookie: None,
        }
        .to_string();

        assert!(!report.contains("save this for API requests"));
    }
}
