use std::fmt::{self, Display};

use super::{Duel, DuelPlayer, RoundResult, Team};
use crate::format::or_na;

/// Damage a team dealt over the duel.
#[derive(Debug, Clone)]
pub struct DamageAnalysis<'a> {
    pub team: &'a Team,
    pub total: i64,
    /// Integer average per round result.
    pub average: Option<i64>,
    /// The round with the most damage, the earliest on a tie.
    pub biggest_hit: Option<&'a RoundResult>,
}

impl<'a> DamageAnalysis<'a> {
    pub fn of(team: &'a Team) -> Self {
        let total: i64 = team.round_results.iter().map(|r| r.damage_dealt).sum();
        let rounds = i64::try_from(team.round_results.len()).unwrap_or(i64::MAX);
        let biggest_hit = team
            .round_results
            .iter()
            .fold(None, |best: Option<&RoundResult>, result| match best {
                Some(best) if best.damage_dealt >= result.damage_dealt => Some(best),
                _ => Some(result),
            });

        Self {
            team,
            total,
            average: (rounds > 0).then(|| total / rounds),
            biggest_hit,
        }
    }
}

/// How a player did over the rounds they guessed in.
#[derive(Debug, Clone)]
pub struct PlayerPerformance<'a> {
    pub player: &'a DuelPlayer,
    pub rounds_played: usize,
    pub average_score: f64,
    pub average_distance_km: f64,
    pub rating_change: Option<i64>,
}

impl<'a> PlayerPerformance<'a> {
    /// Returns `None` when the player has no scored guess.
    #[allow(clippy::cast_precision_loss)]
    pub fn of(player: &'a DuelPlayer) -> Option<Self> {
        let scored: Vec<(f64, f64)> = player
            .guesses
            .iter()
            .filter_map(|guess| guess.score.map(|score| (score, guess.distance)))
            .collect();
        if scored.is_empty() {
            return None;
        }

        let count = scored.len() as f64;
        let rating_change = player
            .progress_change
            .as_ref()
            .and_then(|change| change.ranked_system_progress.as_ref())
            .map(|progress| progress.game_mode_rating_after - progress.game_mode_rating_before);

        Some(Self {
            player,
            rounds_played: scored.len(),
            average_score: scored.iter().map(|(score, _)| score).sum::<f64>() / count,
            average_distance_km: scored.iter().map(|(_, distance)| distance).sum::<f64>()
                / count
                / 1000.0,
            rating_change,
        })
    }
}

/// The first 8 characters of an id, for compact headings.
pub fn short_id(id: &str) -> &str {
    crate::format::truncate(id, 8)
}

/// The `--analyze` sections of the `duel` report.
pub struct DuelAnalysisReport<'a>(pub &'a Duel);

impl Display for DuelAnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duel = self.0;

        writeln!(f, "\n=== Damage Analysis ===")?;
        for team in &duel.teams {
            let damage = DamageAnalysis::of(team);
            writeln!(f, "\nTeam {}:", team.display_name())?;
            writeln!(f, "  Total Damage Dealt: {}", damage.total)?;
            writeln!(f, "  Average per Round: {}", or_na(damage.average))?;
            if let Some(hit) = damage.biggest_hit {
                writeln!(
                    f,
                    "  Biggest Hit: {} (Round {}, {}x)",
                    hit.damage_dealt, hit.round_number, hit.multiplier
                )?;
            }
        }

        writeln!(f, "\n=== Player Performance ===")?;
        for team in &duel.teams {
            writeln!(f, "\nTeam {}:", team.display_name())?;
            for performance in team.players.iter().filter_map(PlayerPerformance::of) {
                let player = performance.player;
                writeln!(f, "\n  Player {}...", short_id(&player.player_id))?;
                writeln!(f, "    Rating: {}", or_na(player.rating))?;
                writeln!(f, "    Country: {}", player.country_code.to_uppercase())?;
                writeln!(f, "    Rounds Played: {}", performance.rounds_played)?;
                writeln!(f, "    Average Score: {:.0}", performance.average_score)?;
                writeln!(
                    f,
                    "    Average Distance: {:.1} km",
                    performance.average_distance_km
                )?;
                if let Some(change) = performance.rating_change {
                    writeln!(f, "    Rating Change: {change:+}")?;
                }
            }
        }

        Ok(())
    }
}
