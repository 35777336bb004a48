use std::fmt::{self, Display};

use reqwest::Client;
use serde::Deserialize;

use crate::{
    format::{allowed, or_na, rounded_thousands, thousands, time_limit},
    model::Quantity,
};

/// A single player game, as returned by `/v3/games/{token}` and by game creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub token: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub mode: Option<String>,
    pub state: Option<String>,
    pub map_name: Option<String>,
    pub round_count: Option<u32>,
    #[serde(default)]
    pub time_limit: u32,
    #[serde(default)]
    pub forbid_moving: bool,
    #[serde(default)]
    pub forbid_rotating: bool,
    #[serde(default)]
    pub forbid_zooming: bool,
    /// The current round, 1-based.
    pub round: Option<u32>,
    pub player: Option<GamePlayer>,
    #[serde(default)]
    pub rounds: Vec<Round>,
    pub streak_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayer {
    #[serde(default)]
    pub total_score: Quantity,
    #[serde(default)]
    pub total_distance_in_meters: f64,
    #[serde(default)]
    pub total_time: i64,
    pub total_streak: Option<i64>,
    #[serde(default)]
    pub guesses: Vec<Guess>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guess {
    pub round_score: Quantity,
    pub distance: GuessDistance,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuessDistance {
    pub meters: Quantity,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub lat: f64,
    pub lng: f64,
    pub streak_location_code: Option<String>,
}

impl Game {
    pub fn guess_count(&self) -> usize {
        self.player.as_ref().map_or(0, |player| player.guesses.len())
    }
}

/// Retrieves the state of a game.
#[tracing::instrument(name = "get game", level = "debug", skip_all, fields(%token))]
pub async fn get_game(
    client: &Client,
    base_url: &str,
    token: &str,
) -> Result<Game, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/games/{token}"))
        .query(&[("client", "web")])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// The console report for `game`.
pub struct GameStateReport<'a>(pub &'a Game);

impl Display for GameStateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let game = self.0;
        let round_count = or_na(game.round_count);

        writeln!(f, "\n🎮 Game State\n")?;
        writeln!(f, "Token: {}", game.token)?;
        writeln!(
            f,
            "Mode: {} ({})",
            or_na(game.mode.as_deref()),
            or_na(game.kind.as_deref())
        )?;
        writeln!(f, "State: {}", or_na(game.state.as_deref()))?;
        writeln!(f, "Map: {}", or_na(game.map_name.as_deref()))?;

        writeln!(f, "\n⚙️  Settings:")?;
        writeln!(f, "Rounds: {round_count}")?;
        writeln!(f, "Time Limit: {}", time_limit(game.time_limit))?;
        writeln!(f, "Movement: {}", allowed(game.forbid_moving))?;
        writeln!(f, "Panning: {}", allowed(game.forbid_rotating))?;
        writeln!(f, "Zooming: {}", allowed(game.forbid_zooming))?;

        writeln!(f, "\n📊 Progress:")?;
        writeln!(f, "Current Round: {} of {round_count}", or_na(game.round))?;

        if let Some(player) = &game.player {
            writeln!(f, "\n👤 Player Stats:")?;
            writeln!(
                f,
                "Score: {} points",
                thousands(player.total_score.amount.whole())
            )?;
            writeln!(
                f,
                "Distance: {}m",
                rounded_thousands(player.total_distance_in_meters)
            )?;
            writeln!(f, "Time: {}s", player.total_time)?;
            writeln!(f, "Guesses: {}", player.guesses.len())?;
            if game.mode.as_deref() == Some("streak") {
                writeln!(f, "Streak: {}", or_na(player.total_streak))?;
            }
        }

        if !game.rounds.is_empty() {
            writeln!(f, "\n📍 Rounds:")?;
            for (index, round) in game.rounds.iter().enumerate() {
                let status = if game.guess_count() > index { "✅" } else { "⏳" };
                writeln!(
                    f,
                    "{status} Round {}: {:.4}, {:.4}",
                    index + 1,
                    round.lat,
                    round.lng
                )?;
            }
        }

        if let Some(player) = game.player.as_ref().filter(|p| !p.guesses.is_empty()) {
            writeln!(f, "\n🎯 Your Guesses:")?;
            for (index, guess) in player.guesses.iter().enumerate() {
                writeln!(
                    f,
                    "Round {}: {} points ({}m away)",
                    index + 1,
                    thousands(guess.round_score.amount.whole()),
                    thousands(guess.distance.meters.amount.whole())
                )?;
            }
        }

        Ok(())
    }
}
