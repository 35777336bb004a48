use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    format::{rounded_thousands, thousands},
    model::Quantity,
    stats::mean,
};

/// How many leaderboard rows are printed.
const SHOWN_ENTRIES: usize = 20;

#[derive(Deserialize)]
struct HighscoresResponse {
    items: Vec<HighscoreItem>,
}

#[derive(Deserialize)]
struct HighscoreItem {
    game: HighscoreGame,
}

#[derive(Deserialize)]
struct HighscoreGame {
    player: HighscorePlayer,
    created: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HighscorePlayer {
    id: String,
    nick: String,
    total_score: Quantity,
    #[serde(default)]
    is_pro_user: bool,
    #[serde(default)]
    country_code: String,
}

/// A ranked row of a challenge leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based position on the board.
    pub rank: usize,
    pub user_id: String,
    pub username: String,
    pub score: i64,
    pub is_pro: bool,
    pub country: String,
    pub played_at: DateTime<Utc>,
}

/// Retrieves the highscores of a challenge, in board order.
#[tracing::instrument(name = "get leaderboard", level = "debug", skip_all, fields(%token))]
pub async fn get_leaderboard(
    client: &Client,
    base_url: &str,
    token: &str,
) -> Result<Vec<LeaderboardEntry>, reqwest::Error> {
    let res: HighscoresResponse = client
        .get(format!("{base_url}/v3/results/highscores/{token}"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let entries = res
        .items
        .into_iter()
        .enumerate()
        .map(|(index, item)| LeaderboardEntry {
            rank: index + 1,
            user_id: item.game.player.id,
            username: item.game.player.nick,
            score: item.game.player.total_score.amount.whole(),
            is_pro: item.game.player.is_pro_user,
            country: item.game.player.country_code,
            played_at: item.game.created,
        })
        .collect();

    Ok(entries)
}

/// All scores of the board, in board order.
#[allow(clippy::cast_precision_loss)]
pub fn scores(entries: &[LeaderboardEntry]) -> Vec<f64> {
    entries.iter().map(|entry| entry.score as f64).collect()
}

/// The console report for `leaderboard`.
pub struct LeaderboardReport<'a>(pub &'a [LeaderboardEntry]);

impl Display for LeaderboardReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.0;
        let Some(winner) = entries.first() else {
            return writeln!(f, "Nobody has played this challenge yet.");
        };

        writeln!(f, "\n🏆 Challenge Leaderboard ({} players)\n", entries.len())?;
        writeln!(
            f,
            "{:<6} {:<20} {:<10} {:<5} Country",
            "Rank", "Username", "Score", "Pro"
        )?;
        writeln!(f, "{}", "-".repeat(60))?;

        for entry in entries.iter().take(SHOWN_ENTRIES) {
            writeln!(
                f,
                "{:<6} {:<20} {:<10} {:<5} {}",
                entry.rank,
                entry.username,
                thousands(entry.score),
                if entry.is_pro { "✓" } else { " " },
                entry.country
            )?;
        }

        let average = mean(&scores(entries)).unwrap_or_default();
        writeln!(f, "\n📊 Statistics:")?;
        writeln!(f, "Total Players: {}", entries.len())?;
        writeln!(f, "Average Score: {}", rounded_thousands(average))?;
        writeln!(f, "Top Score: {}", thousands(winner.score))?;
        writeln!(f, "Winner: {}", winner.username)
    }
}
