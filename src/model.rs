//! Response shapes shared by several API areas.

use serde::{Deserialize, Serialize};

/// A numeric amount that the API sends either as a JSON number or as a
/// string holding one, e.g. `"amount": "21345"`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount(pub f64);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl TryFrom<RawAmount> for Amount {
    type Error = String;

    fn try_from(value: RawAmount) -> Result<Self, Self::Error> {
        match value {
            RawAmount::Number(number) => Ok(Self(number)),
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Self)
                .map_err(|_| format!("'{text}' is not a number")),
        }
    }
}

impl Amount {
    /// The amount with any fraction dropped.
    #[allow(clippy::cast_possible_truncation)]
    pub fn whole(self) -> i64 {
        self.0.trunc() as i64
    }
}

/// The `{ "amount": ... }` wrapper used for scores and distances.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct Quantity {
    pub amount: Amount,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub level: Option<u32>,
    pub xp: Option<i64>,
    pub next_level: Option<u32>,
    pub next_level_xp: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitive {
    pub rating: Option<i64>,
    pub division: Option<Division>,
    #[serde(default)]
    pub on_leaderboard: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Division {
    /// The numeric or named division, shown as-is.
    #[serde(rename = "type")]
    pub kind: Option<serde_json::Value>,
}

/// Badge counts for streak and explorer achievements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Medals {
    #[serde(default)]
    pub bronze: u32,
    #[serde(default)]
    pub silver: u32,
    #[serde(default)]
    pub gold: u32,
    #[serde(default)]
    pub platinum: u32,
}

/// A user as returned by user search and the friends list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub id: String,
    pub nick: String,
    pub progress: Option<Progress>,
    pub country_code: Option<String>,
    #[serde(default)]
    pub is_pro_user: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_online: bool,
    pub competitive: Option<Competitive>,
}

impl UserSummary {
    pub fn level(&self) -> Option<u32> {
        self.progress.as_ref().and_then(|progress| progress.level)
    }

    pub fn xp(&self) -> Option<i64> {
        self.progress.as_ref().and_then(|progress| progress.xp)
    }

    pub fn rating(&self) -> Option<i64> {
        self.competitive
            .as_ref()
            .and_then(|competitive| competitive.rating)
    }

    /// The upper-cased country code, or `N/A`.
    pub fn country(&self) -> String {
        self.country_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map_or_else(|| "N/A".to_string(), str::to_uppercase)
    }
}
