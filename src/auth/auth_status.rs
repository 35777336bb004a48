use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};

use crate::{
    format::{or_na, thousands, yes_no},
    profiles::{write_competitive, Profile},
};

pub enum AuthStatus {
    /// The cookie was rejected with a 401.
    NotAuthenticated,
    Authenticated(Box<Profile>),
}

impl AuthStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Checks whether the session cookie is accepted.
#[tracing::instrument(name = "check auth status", level = "debug", skip_all)]
pub async fn check_auth_status(
    client: &Client,
    base_url: &str,
) -> Result<AuthStatus, reqwest::Error> {
    let response = client.get(format!("{base_url}/v3/profiles")).send().await?;

    if response.status() == StatusCode::UNAUTHORIZED {
        return Ok(AuthStatus::NotAuthenticated);
    }

    let profile = response.error_for_status()?.json().await?;
    Ok(AuthStatus::Authenticated(Box::new(profile)))
}

/// The console report for `auth-status`, relative to `now`.
pub struct AuthStatusReport<'a> {
    pub status: &'a AuthStatus,
    pub now: DateTime<Utc>,
}

impl Display for AuthStatusReport<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let profile = match self.status {
            AuthStatus::NotAuthenticated => {
                writeln!(f, "❌ Not authenticated")?;
                return writeln!(f, "Cookie is invalid or expired.");
            }
            AuthStatus::Authenticated(profile) => profile,
        };
        let user = &profile.user;

        writeln!(f, "\n✅ Authenticated\n")?;
        writeln!(f, "Username: {}", user.nick)?;
        writeln!(f, "User ID: {}", user.id)?;
        writeln!(f, "Email: {}", or_na(profile.email.as_deref()))?;
        writeln!(f, "Country: {}", user.country_code.to_uppercase())?;
        writeln!(f, "Pro User: {}", yes_no(user.is_pro_user))?;
        writeln!(f, "Level: {}", or_na(user.progress.level))?;
        writeln!(f, "XP: {}", thousands(user.progress.xp.unwrap_or_default()))?;

        if let Some(competitive) = &user.competitive {
            write_competitive(f, competitive)?;
        }

        let age_in_days = (self.now - user.created).num_days();
        writeln!(f, "\n📅 Account Info:")?;
        writeln!(f, "Created: {}", user.created.format("%Y-%m-%d"))?;
        writeln!(
            f,
            "Age: {:.1} years ({age_in_days} days)",
            age_in_days as f64 / 365.0
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::profiles::profile_json;

    #[test]
    fn report_computes_account_age() {
        let profile: Profile = serde_json::from_value(profile_json()).unwrap();
        let status = AuthStatus::Authenticated(Box::new(profile));
        let now = Utc.with_ymd_and_hms(2021, 3, 4, 10, 0, 0).unwrap();

        let report = AuthStatusReport {
            status: &status,
            now,
        }
        .to_string();

        assert!(report.contains("Email: plonker@example.com"));
        assert!(report.contains("Rating: 1105"));
        assert!(report.contains("Age: 2.0 years (731 days)"));
        assert!(status.is_authenticated());
    }

    #[test]
    fn report_for_rejected_cookie() {
        let report = AuthStatusReport {
            status: &AuthStatus::NotAuthenticated,
            now: Utc::now(),
        }
        .to_string();

        assert_eq!(report, "❌ Not authenticated\nCookie is invalid or expired.\n");
    }
}
