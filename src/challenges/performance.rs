use std::fmt::{self, Display};

use super::{scores, LeaderboardEntry};
use crate::{
    format::{rounded_thousands, signed_thousands, thousands},
    stats::{mean, median, percentile},
};

/// How the signed in user did on a challenge compared to everyone else.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceAnalysis {
    /// 1-based position on the board.
    pub rank: usize,
    pub score: i64,
    pub total_players: usize,
    /// Share of players ranked at or below the user.
    pub percentile: f64,
    pub top_score: i64,
    pub average_score: f64,
    pub median_score: f64,
}

impl PerformanceAnalysis {
    /// Finds `user_id` on the board. Returns `None` if the user has not
    /// played the challenge.
    pub fn analyze(entries: &[LeaderboardEntry], user_id: &str) -> Option<Self> {
        let mine = entries.iter().find(|entry| entry.user_id == user_id)?;
        let scores = scores(entries);

        Some(Self {
            rank: mine.rank,
            score: mine.score,
            total_players: entries.len(),
            percentile: percentile(mine.rank, entries.len()),
            top_score: entries.first().map_or(mine.score, |entry| entry.score),
            average_score: mean(&scores).unwrap_or_default(),
            median_score: median(&scores).unwrap_or_default(),
        })
    }

    /// The share of the board ranked at or above the user.
    #[allow(clippy::cast_precision_loss)]
    pub fn top_share(&self) -> f64 {
        self.rank as f64 / self.total_players as f64 * 100.0
    }
}

/// The console report for `performance`.
pub struct PerformanceReport<'a> {
    pub analysis: &'a PerformanceAnalysis,
    pub entries: &'a [LeaderboardEntry],
    pub user_id: &'a str,
}

#[allow(clippy::cast_possible_truncation)]
fn difference(other: f64, mine: i64) -> String {
    signed_thousands(other.round() as i64 - mine)
}

impl Display for PerformanceReport<'_> {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.analysis;

        writeln!(f, "\n📊 Your Performance Analysis\n")?;
        writeln!(
            f,
            "Your Rank: #{} of {}",
            analysis.rank, analysis.total_players
        )?;
        writeln!(f, "Your Score: {}", thousands(analysis.score))?;
        writeln!(
            f,
            "Percentile: {:.1} (Top {:.1}%)",
            analysis.percentile,
            analysis.top_share()
        )?;

        writeln!(f, "\n📈 Comparison:")?;
        writeln!(
            f,
            "Top Score: {} ({})",
            thousands(analysis.top_score),
            signed_thousands(analysis.top_score - analysis.score)
        )?;
        writeln!(
            f,
            "Average Score: {} ({})",
            rounded_thousands(analysis.average_score),
            difference(analysis.average_score, analysis.score)
        )?;
        writeln!(
            f,
            "Median Score: {} ({})",
            rounded_thousands(analysis.median_score),
            difference(analysis.median_score, analysis.score)
        )?;

        writeln!(f, "\n👥 Nearby Players:")?;
        let start = analysis.rank.saturating_sub(3);
        let end = (analysis.rank + 2).min(self.entries.len());
        for entry in self.entries.get(start..end).unwrap_or_default() {
            let indicator = if entry.user_id == self.user_id {
                "👉"
            } else {
                "  "
            };
            writeln!(
                f,
                "{indicator} #{} {}: {}",
                entry.rank,
                entry.username,
                thousands(entry.score)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenges::leaderboard::tests::entry;

    fn board() -> Vec<LeaderboardEntry> {
        vec![
            entry(1, "a", 25_000),
            entry(2, "b", 22_000),
            entry(3, "c", 20_000),
            entry(4, "me", 15_000),
            entry(5, "d", 9_000),
            entry(6, "e", 8_000),
            entry(7, "f", 1_000),
        ]
    }

    #[test]
    fn analysis_of_a_played_challenge() {
        let analysis = PerformanceAnalysis::analyze(&board(), "me").unwrap();

        assert_eq!(analysis.rank, 4);
        assert_eq!(analysis.score, 15_000);
        assert_eq!(analysis.total_players, 7);
        assert_eq!(analysis.top_score, 25_000);
        assert!((analysis.percentile - 4.0 / 7.0 * 100.0).abs() < 1e-9);
        assert!((analysis.average_score - 100_000.0 / 7.0).abs() < 1e-9);
        assert!((analysis.median_score - 15_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn not_played() {
        assert!(PerformanceAnalysis::analyze(&board(), "stranger").is_none());
        assert!(PerformanceAnalysis::analyze(&[], "me").is_none());
    }

    #[test]
    fn report_shows_differences_and_neighbours() {
        let entries = board();
        let analysis = PerformanceAnalysis::analyze(&entries, "me").unwrap();

        let report = PerformanceReport {
            analysis: &analysis,
            entries: &entries,
            user_id: "me",
        }
        .to_string();

        assert!(report.contains("Your Rank: #4 of 7"));
        assert!(report.contains("Percentile: 57.1 (Top 57.1%)"));
        assert!(report.contains("Top Score: 25,000 (+10,000)"));
        assert!(report.contains("Average Score: 14,286 (-714)"));
        assert!(report.contains("Median Score: 15,000 (+0)"));
        assert!(report.contains("   #2 player-b: 22,000"));
        assert!(report.contains("👉 #4 player-me: 15,000"));
        assert!(report.contains("   #6 player-e: 8,000"));
        assert!(!report.contains("#1 player-a"));
        assert!(!report.contains("#7 player-f"));
    }

    #[test]
    fn neighbours_are_clamped_at_the_top() {
        let entries = board();
        let analysis = PerformanceAnalysis::analyze(&entries, "a").unwrap();

        let report = PerformanceReport {
            analysis: &analysis,
            entries: &entries,
            user_id: "a",
        }
        .to_string();

        assert!(report.contains("👉 #1 player-a: 25,000"));
        assert!(report.contains("#3 player-c"));
        assert!(!report.contains("#4 player-me"));
        assert!(report.contains("Percentile: 100.0 (Top 14.3%)"));
    }
}
