mod challenge;
mod leaderboard;
mod performance;
mod run;

pub use challenge::{get_challenge, Challenge, ChallengeMap, ChallengeReport, Creator};
pub use leaderboard::{get_leaderboard, scores, LeaderboardEntry, LeaderboardReport};
pub use performance::{PerformanceAnalysis, PerformanceReport};
pub use run::{analyze_performance, show_challenge, show_leaderboard, NOT_PLAYED_HINT};
