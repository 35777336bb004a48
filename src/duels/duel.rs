use std::fmt::{self, Display};

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// How many completed rounds the round summary covers.
const SUMMARY_ROUNDS: usize = 5;

pub const FINISHED: &str = "Finished";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duel {
    pub game_id: String,
    pub status: String,
    #[serde(default)]
    pub current_round_number: u32,
    #[serde(default)]
    pub initial_health: i64,
    #[serde(default)]
    pub options: DuelOptions,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub rounds: Vec<DuelRound>,
    pub result: Option<DuelResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelOptions {
    pub competitive_game_mode: Option<String>,
    pub map: Option<DuelMap>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuelMap {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: String,
    pub name: String,
    pub health: i64,
    #[serde(default = "one")]
    pub current_multiplier: f64,
    #[serde(default)]
    pub players: Vec<DuelPlayer>,
    #[serde(default)]
    pub round_results: Vec<RoundResult>,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelPlayer {
    pub player_id: String,
    pub rating: Option<i64>,
    #[serde(default)]
    pub country_code: String,
    #[serde(default)]
    pub guesses: Vec<DuelGuess>,
    pub progress_change: Option<ProgressChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DuelGuess {
    pub score: Option<f64>,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressChange {
    pub ranked_system_progress: Option<RankedProgress>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProgress {
    pub game_mode_rating_before: i64,
    pub game_mode_rating_after: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelRound {
    pub round_number: u32,
    #[serde(default)]
    pub has_processed_round_timeout: bool,
    pub panorama: Option<Panorama>,
    #[serde(default = "one")]
    pub multiplier: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panorama {
    #[serde(default)]
    pub country_code: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    pub round_number: u32,
    pub score: Option<f64>,
    #[serde(default)]
    pub damage_dealt: i64,
    #[serde(default = "one")]
    pub multiplier: f64,
}

impl Duel {
    /// Reads the typed view of a raw duel document.
    ///
    /// # Errors
    /// If the document is missing fields every duel has.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    pub fn is_finished(&self) -> bool {
        self.status == FINISHED
    }

    pub fn winner(&self) -> Option<&Team> {
        let winning_id = self.result.as_ref()?.winning_team_id.as_deref()?;
        self.teams.iter().find(|team| team.id == winning_id)
    }

    pub fn completed_rounds(&self) -> impl Iterator<Item = &DuelRound> {
        self.rounds
            .iter()
            .filter(|round| round.has_processed_round_timeout)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuelResult {
    pub winning_team_id: Option<String>,
    pub winner_style: Option<String>,
}

impl Team {
    pub fn display_name(&self) -> String {
        self.name.to_uppercase()
    }

    pub fn result_of(&self, round_number: u32) -> Option<&RoundResult> {
        self.round_results
            .iter()
            .find(|result| result.round_number == round_number)
    }
}

/// Retrieves a duel from the game server. The raw document is returned so it
/// can be exported untouched.
#[tracing::instrument(name = "get duel", level = "debug", skip_all, fields(%duel_id))]
pub async fn get_duel(
    client: &Client,
    game_server_url: &str,
    duel_id: &str,
) -> Result<Value, reqwest::Error> {
    client
        .get(format!("{game_server_url}/duels/{duel_id}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// The console report for `duel`.
pub struct DuelReport<'a>(pub &'a Duel);

impl Display for DuelReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duel = self.0;

        writeln!(f, "=== Duel Game State ===")?;
        writeln!(f, "Game ID: {}", duel.game_id)?;
        writeln!(f, "Status: {}", duel.status)?;
        writeln!(f, "Current Round: {}", duel.current_round_number)?;
        writeln!(
            f,
            "Game Mode: {}",
            duel.options.competitive_game_mode.as_deref().unwrap_or("N/A")
        )?;
        writeln!(
            f,
            "Map: {}",
            duel.options.map.as_ref().map_or("N/A", |map| map.name.as_str())
        )?;

        writeln!(f, "\n=== Teams ===")?;
        for team in &duel.teams {
            writeln!(f, "\nTeam {}:", team.display_name())?;
            writeln!(f, "  Health: {}/{}", team.health, duel.initial_health)?;
            writeln!(f, "  Current Multiplier: {}x", team.current_multiplier)?;
            writeln!(f, "  Players: {}", team.players.len())?;
            for player in &team.players {
                writeln!(f, "    - Player ID: {}", player.player_id)?;
                writeln!(
                    f,
                    "      Rating: {}",
                    player.rating.map_or_else(|| "N/A".to_string(), |r| r.to_string())
                )?;
                writeln!(f, "      Country: {}", player.country_code.to_uppercase())?;
                writeln!(f, "      Guesses: {}", player.guesses.len())?;
            }
        }

        if duel.is_finished() {
            writeln!(f, "\n=== Game Result ===")?;
            if let Some(winner) = duel.winner() {
                writeln!(f, "Winner: Team {}", winner.display_name())?;
                writeln!(
                    f,
                    "Victory Type: {}",
                    duel.result
                        .as_ref()
                        .and_then(|result| result.winner_style.as_deref())
                        .unwrap_or("N/A")
                )?;
                writeln!(f, "Final Score: {} HP remaining", winner.health)?;
            } else {
                writeln!(f, "Winner: unknown")?;
            }
        }

        writeln!(f, "\n=== Round Summary ===")?;
        writeln!(f, "Completed Rounds: {}", duel.completed_rounds().count())?;
        for round in duel.completed_rounds().take(SUMMARY_ROUNDS) {
            writeln!(f, "\nRound {}:", round.round_number)?;
            writeln!(
                f,
                "  Location: {}",
                round
                    .panorama
                    .as_ref()
                    .map_or_else(|| "N/A".to_string(), |p| p.country_code.to_uppercase())
            )?;
            writeln!(f, "  Multiplier: {}x", round.multiplier)?;

            for team in &duel.teams {
                if let Some(result) = team.result_of(round.round_number) {
                    writeln!(
                        f,
                        "  Team {}: Score {}, Damage {}",
                        team.name,
                        result.score.map_or_else(|| "N/A".to_string(), |s| s.to_string()),
                        result.damage_dealt
                    )?;
                }
            }
        }

        Ok(())
    }
}
