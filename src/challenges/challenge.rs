use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::format::{allowed, or_na, time_limit};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub map: ChallengeMap,
    pub creator: Creator,
    pub created: DateTime<Utc>,
    pub round_count: u32,
    #[serde(default)]
    pub time_limit: u32,
    #[serde(default)]
    pub forbid_moving: bool,
    #[serde(default)]
    pub forbid_rotating: bool,
    #[serde(default)]
    pub forbid_zooming: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeMap {
    pub name: String,
    pub description: Option<String>,
    pub coordinate_count: Option<Value>,
    pub bounds: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub nick: String,
    #[serde(default)]
    pub country_code: String,
}

/// Retrieves a challenge by its token.
#[tracing::instrument(name = "get challenge", level = "debug", skip_all, fields(%token))]
pub async fn get_challenge(
    client: &Client,
    base_url: &str,
    token: &str,
) -> Result<Challenge, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/challenges/{token}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// The console report for `challenge`.
pub struct ChallengeReport<'a>(pub &'a Challenge);

impl Display for ChallengeReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let challenge = self.0;
        let map = &challenge.map;

        writeln!(f, "\n🎮 Challenge Information\n")?;
        writeln!(f, "Map: {}", map.name)?;
        writeln!(
            f,
            "Creator: {} ({})",
            challenge.creator.nick, challenge.creator.country_code
        )?;
        writeln!(
            f,
            "Created: {}",
            challenge.created.format("%Y-%m-%d %H:%M:%S")
        )?;

        writeln!(f, "\n⚙️  Settings:")?;
        writeln!(f, "- Rounds: {}", challenge.round_count)?;
        writeln!(f, "- Time Limit: {}", time_limit(challenge.time_limit))?;
        writeln!(f, "- Movement: {}", allowed(challenge.forbid_moving))?;
        writeln!(f, "- Panning: {}", allowed(challenge.forbid_rotating))?;
        writeln!(f, "- Zooming: {}", allowed(challenge.forbid_zooming))?;

        writeln!(f, "\n📍 Map Details:")?;
        writeln!(f, "- Name: {}", map.name)?;
        writeln!(f, "- Description: {}", or_na(map.description.as_deref()))?;
        writeln!(
            f,
            "- Locations: {}",
            map.coordinate_count
                .as_ref()
                .map_or_else(|| "Unknown".to_string(), crate::format::value_text)
        )?;
        if let Some(bounds) = &map.bounds {
            writeln!(f, "- Bounds: {bounds}")?;
        }

        Ok(())
    }
}
