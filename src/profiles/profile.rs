use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    format::{or_na, thousands, value_text, yes_no},
    model::{Competitive, Medals, Progress},
};

/// Describes the response of `/v3/profiles` for the signed in user.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user: ProfileUser,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUser {
    pub id: String,
    pub nick: String,
    #[serde(default)]
    pub country_code: String,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub is_pro_user: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub progress: Progress,
    pub competitive: Option<Competitive>,
    pub streak_progress: Option<Medals>,
    pub explorer_progress: Option<Medals>,
}

/// Retrieves the profile of the user owning the session cookie.
#[tracing::instrument(name = "get profile", level = "debug", skip_all)]
pub async fn get_profile(client: &Client, base_url: &str) -> Result<Profile, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/profiles"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// Writes the competitive block shared by the profile and auth status reports.
pub(crate) fn write_competitive(
    f: &mut fmt::Formatter<'_>,
    competitive: &Competitive,
) -> fmt::Result {
    writeln!(f, "\n🏆 Competitive:")?;
    writeln!(f, "Rating: {}", or_na(competitive.rating))?;
    if let Some(kind) = competitive
        .division
        .as_ref()
        .map(|division| division.kind.as_ref().map_or_else(|| "N/A".to_string(), value_text))
    {
        writeln!(f, "Division: {kind}")?;
    }

    Ok(())
}

fn write_medals(f: &mut fmt::Formatter<'_>, label: &str, medals: &Medals) -> fmt::Result {
    writeln!(
        f,
        "{label} Badges: Bronze {}, Silver {}, Gold {}, Platinum {}",
        medals.bronze, medals.silver, medals.gold, medals.platinum
    )
}

/// The console report for `profile`.
pub struct ProfileReport<'a>(pub &'a Profile);

impl Display for ProfileReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = &self.0.user;

        writeln!(f, "\n👤 Your Profile\n")?;
        writeln!(f, "Username: {}", user.nick)?;
        writeln!(f, "User ID: {}", user.id)?;
        writeln!(f, "Country: {}", user.country_code.to_uppercase())?;
        writeln!(f, "Created: {}", user.created.format("%Y-%m-%d"))?;
        writeln!(f, "Pro User: {}", yes_no(user.is_pro_user))?;
        writeln!(f, "Verified: {}", yes_no(user.is_verified))?;

        let progress = &user.progress;
        let xp = progress.xp.unwrap_or_default();
        writeln!(f, "\n📊 Progress:")?;
        writeln!(f, "Level: {}", or_na(progress.level))?;
        writeln!(f, "XP: {}", thousands(xp))?;
        if let (Some(next_level), Some(next_level_xp)) =
            (progress.next_level, progress.next_level_xp)
        {
            writeln!(f, "Next Level: {next_level} ({} XP)", thousands(next_level_xp))?;
            writeln!(f, "XP to Next Level: {}", thousands(next_level_xp - xp))?;
        }

        if let Some(competitive) = &user.competitive {
            write_competitive(f, competitive)?;
            writeln!(f, "On Leaderboard: {}", yes_no(competitive.on_leaderboard))?;
        }

        writeln!(f, "\n🌍 Achievements:")?;
        if let Some(streak) = &user.streak_progress {
            write_medals(f, "Streak", streak)?;
        }
        if let Some(explorer) = &user.explorer_progress {
            write_medals(f, "Explorer", explorer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::{json, Value};

    use super::*;

    pub(crate) fn profile_json() -> Value {
        json!({
            "user": {
                "id": "5b68bcc7f438a60f64005817",
                "nick": "Plonker",
                "countryCode": "se",
                "created": "2019-03-04T10:00:00.000Z",
                "isProUser": true,
                "isVerified": false,
                "progress": { "level": 42, "xp": 123456, "nextLevel": 43, "nextLevelXp": 130000 },
                "competitive": { "rating": 1105, "division": { "type": 30 }, "onLeaderboard": true },
                "streakProgress": { "bronze": 1, "silver": 2, "gold": 3, "platinum": 0 }
            },
            "email": "plonker@example.com"
        })
    }

    #[test]
    fn report_contains_progress_and_competitive() {
        let profile: Profile = serde_json::from_value(profile_json()).unwrap();
        let report = ProfileReport(&profile).to_string();

        assert!(report.contains("Username: Plonker"));
        assert!(report.contains("Country: SE"));
        assert!(report.contains("Created: 2019-03-04"));
        assert!(report.contains("Pro User: ✅ Yes"));
        assert!(report.contains("Verified: ❌ No"));
        assert!(report.contains("XP: 123,456"));
        assert!(report.contains("Next Level: 43 (130,000 XP)"));
        assert!(report.contains("XP to Next Level: 6,544"));
        assert!(report.contains("Rating: 1105"));
        assert!(report.contains("Division: 30"));
        assert!(report.contains("On Leaderboard: ✅ Yes"));
        assert!(report.contains("Streak Badges: Bronze 1, Silver 2, Gold 3, Platinum 0"));
        assert!(!report.contains("Explorer Badges"));
    }
}
