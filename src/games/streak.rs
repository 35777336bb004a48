use std::fmt::{self, Display};

use reqwest::Client;
use serde::Serialize;

use super::Game;
use crate::{
    client::SITE_URL,
    format::{allowed, or_na, time_limit},
};

/// The restrictions a country streak is started with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSettings {
    pub forbid_moving: bool,
    pub forbid_rotating: bool,
    pub forbid_zooming: bool,
    pub time_limit: u32,
    pub streak_type: StreakType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StreakType {
    CountryStreak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakPreset {
    Easy,
    Medium,
    Hard,
    Nmpz,
}

impl StreakPreset {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Nmpz];

    pub fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Nmpz => "nmpz",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Easy => "Easy (no restrictions, no time limit)",
            Self::Medium => "Medium (no restrictions, 60s)",
            Self::Hard => "Hard (no moving or zooming, 30s)",
            Self::Nmpz => "NMPZ (no moving, panning or zooming)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name))
    }

    pub fn settings(self) -> StreakSettings {
        let (forbid_moving, forbid_rotating, forbid_zooming, time_limit) = match self {
            Self::Easy => (false, false, false, 0),
            Self::Medium => (false, false, false, 60),
            Self::Hard => (true, false, true, 30),
            Self::Nmpz => (true, true, true, 0),
        };

        StreakSettings {
            forbid_moving,
            forbid_rotating,
            forbid_zooming,
            time_limit,
            streak_type: StreakType::CountryStreak,
        }
    }
}

/// Starts a new country streak game.
#[tracing::instrument(name = "create streak game", level = "debug", skip_all, fields(time_limit = settings.time_limit))]
pub async fn create_streak_game(
    client: &Client,
    base_url: &str,
    settings: &StreakSettings,
) -> Result<Game, reqwest::Error> {
    client
        .post(format!("{base_url}/v3/games/streak"))
        .json(settings)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// The console report for `streak`.
pub struct StreakGameReport<'a> {
    pub game: &'a Game,
    pub settings: &'a StreakSettings,
}

impl Display for StreakGameReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.game;
        let settings = self.settings;

        writeln!(f, "\n✅ Streak game created!\n")?;
        writeln!(f, "Game Token: {}", game.token)?;
        writeln!(f, "Game URL: {SITE_URL}/game/{}", game.token)?;

        writeln!(f, "\n⚙️  Settings:")?;
        writeln!(f, "Movement: {}", allowed(settings.forbid_moving))?;
        writeln!(f, "Panning: {}", allowed(settings.forbid_rotating))?;
        writeln!(f, "Zooming: {}", allowed(settings.forbid_zooming))?;
        writeln!(f, "Time Limit: {}", time_limit(settings.time_limit))?;

        if let Some(round) = game.rounds.first() {
            writeln!(f, "\n📍 Starting Location:")?;
            writeln!(f, "Coordinates: {:.4}, {:.4}", round.lat, round.lng)?;
            writeln!(
                f,
                "Country: {}",
                or_na(round.streak_location_code.as_deref())
            )?;
        }

        Ok(())
    }
}
