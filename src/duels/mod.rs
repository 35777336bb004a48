mod analysis;
mod batch;
mod duel;
mod monitor;
mod replay;
mod run;

pub use analysis::{short_id, DamageAnalysis, DuelAnalysisReport, PlayerPerformance};
pub use batch::{
    compare_player_replays, get_round_replays, ComparedReplay, ReplayComparison, RoundReplay,
};
pub use duel::{
    get_duel, Duel, DuelGuess, DuelMap, DuelOptions, DuelPlayer, DuelReport, DuelResult,
    DuelRound, Panorama, ProgressChange, RankedProgress, RoundResult, Team, FINISHED,
};
pub use monitor::{
    monitor_duel, MonitorOutcome, MonitorSettings, MonitorUpdate, DEFAULT_INTERVAL,
    DEFAULT_MAX_CHECKS,
};
pub use replay::{
    csv_rows, event_breakdown, get_replay, BehaviorReport, ReplayAnalysis, ReplayComparisonEntry,
    ReplayEvent, ReplayKey, ReplaySummaryReport, TimelineReport, CSV_HEADER,
    DEFAULT_TIMELINE_EVENTS,
};
pub use run::{compare_replays, replay_rounds, run_monitor, show_duel, show_replay};
