use std::fmt::{self, Display};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{format::or_na, stats::most_common};

pub const DEFAULT_TIMELINE_EVENTS: usize = 20;
pub const CSV_HEADER: [&str; 4] = ["Timestamp", "RelativeTime(s)", "EventType", "Data"];

const MAP_DISPLAY: &str = "MapDisplay";
const PIN_POSITION: &str = "PinPosition";
const GUESS: &str = "GuessWithLatLng";
const PANO_POSITION: &str = "PanoPosition";
const PANO_ZOOM: &str = "PanoZoom";
const PANO_POV: &str = "PanoPov";

/// One recorded player action. Unknown fields are kept for exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEvent {
    /// Milliseconds since the epoch.
    pub time: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReplayEvent {
    fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    fn is_active(&self) -> bool {
        self.payload
            .get("isActive")
            .is_some_and(|active| active.as_bool().unwrap_or(false))
    }

    fn number(&self, field: &str) -> Option<f64> {
        self.payload.get(field).and_then(Value::as_f64)
    }

    fn lat_lng(&self) -> Option<(f64, f64)> {
        Some((self.number("lat")?, self.number("lng")?))
    }

    fn is_map_open(&self) -> bool {
        self.is(MAP_DISPLAY) && self.is_active()
    }
}

/// Seconds between `start` and `event`.
#[allow(clippy::cast_precision_loss)]
fn seconds_since(start: i64, event: &ReplayEvent) -> f64 {
    (event.time - start) as f64 / 1000.0
}

/// Where a player is in a duel: the replay endpoint key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayKey<'a> {
    pub player_id: &'a str,
    pub duel_id: &'a str,
    pub round: u32,
}

/// Retrieves a player's recorded events for one round of a duel.
#[tracing::instrument(name = "get replay", level = "debug", skip_all, fields(player_id = key.player_id, duel_id = key.duel_id, round = key.round))]
pub async fn get_replay(
    client: &Client,
    game_server_url: &str,
    key: ReplayKey<'_>,
) -> Result<Vec<ReplayEvent>, reqwest::Error> {
    client
        .get(format!(
            "{game_server_url}/replays/{}/{}/{}",
            key.player_id, key.duel_id, key.round
        ))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// Event types with their counts, most common first.
pub fn event_breakdown(events: &[ReplayEvent]) -> Vec<(&str, usize)> {
    most_common(events.iter().map(|event| event.kind.as_str()))
}

/// What a player did during a round.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayAnalysis {
    pub total_seconds: f64,
    pub map_opens: usize,
    pub map_closes: usize,
    pub pin_adjustments: usize,
    pub zoom_changes: usize,
    pub time_to_guess: Option<f64>,
    pub final_guess: Option<(f64, f64)>,
    pub first_map_open: Option<f64>,
    pub pov_changes: usize,
    /// Degrees between the smallest and largest heading looked at.
    pub heading_range: Option<f64>,
    pub total_actions: usize,
}

impl ReplayAnalysis {
    /// Returns `None` for an empty replay.
    pub fn analyze(events: &[ReplayEvent]) -> Option<Self> {
        let start = events.first()?.time;
        let last = events.last()?;
        let count = |kind: &str| events.iter().filter(|event| event.is(kind)).count();

        let guess = events.iter().find(|event| event.is(GUESS));
        let headings: Vec<f64> = events
            .iter()
            .filter(|event| event.is(PANO_POV))
            .filter_map(|event| event.number("heading"))
            .collect();
        let heading_range = headings
            .iter()
            .copied()
            .reduce(f64::max)
            .zip(headings.iter().copied().reduce(f64::min))
            .map(|(max, min)| max - min);

        Some(Self {
            total_seconds: seconds_since(start, last),
            map_opens: events.iter().filter(|event| event.is_map_open()).count(),
            map_closes: events
                .iter()
                .filter(|event| event.is(MAP_DISPLAY) && !event.is_active())
                .count(),
            pin_adjustments: count(PIN_POSITION),
            zoom_changes: count(PANO_ZOOM),
            time_to_guess: guess.map(|event| seconds_since(start, event)),
            final_guess: guess.and_then(ReplayEvent::lat_lng),
            first_map_open: events
                .iter()
                .find(|event| event.is_map_open())
                .map(|event| seconds_since(start, event)),
            pov_changes: count(PANO_POV),
            heading_range,
            total_actions: events.len(),
        })
    }
}

/// The CSV rows of a replay, times relative to the first event.
pub fn csv_rows(events: &[ReplayEvent]) -> Vec<Vec<String>> {
    let Some(start) = events.first().map(|event| event.time) else {
        return Vec::new();
    };

    events
        .iter()
        .map(|event| {
            vec![
                event.time.to_string(),
                format!("{:.3}", seconds_since(start, event)),
                event.kind.clone(),
                event.payload.to_string(),
            ]
        })
        .collect()
}

/// The console report for `replay`: the fetched ids and the event breakdown.
pub struct ReplaySummaryReport<'a> {
    pub key: ReplayKey<'a>,
    pub events: &'a [ReplayEvent],
}

impl Display for ReplaySummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Duel Replay Events ===")?;
        writeln!(f, "Player ID: {}", self.key.player_id)?;
        writeln!(f, "Duel ID: {}", self.key.duel_id)?;
        writeln!(f, "Round: {}", self.key.round)?;
        writeln!(f, "Total Events: {}", self.events.len())?;

        writeln!(f, "\nEvent Type Breakdown:")?;
        for (kind, count) in event_breakdown(self.events) {
            writeln!(f, "  {kind}: {count}")?;
        }

        Ok(())
    }
}

pub struct BehaviorReport<'a>(pub &'a [ReplayEvent]);

impl Display for BehaviorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Player Behavior Analysis ===")?;
        let Some(analysis) = ReplayAnalysis::analyze(self.0) else {
            return writeln!(f, "No events to analyze");
        };

        writeln!(f, "\nTiming:")?;
        writeln!(f, "  Total Time: {:.1}s", analysis.total_seconds)?;

        writeln!(f, "\nActions:")?;
        writeln!(f, "  Map Opens: {}", analysis.map_opens)?;
        writeln!(f, "  Pin Adjustments: {}", analysis.pin_adjustments)?;
        writeln!(f, "  Zoom Changes: {}", analysis.zoom_changes)?;
        if let Some(seconds) = analysis.time_to_guess {
            writeln!(f, "  Time to Guess: {seconds:.1}s")?;
        }
        if let Some((lat, lng)) = analysis.final_guess {
            writeln!(f, "  Final Guess: {lat:.5}, {lng:.5}")?;
        }

        if let Some(seconds) = analysis.first_map_open {
            writeln!(f, "\nMap Usage:")?;
            writeln!(f, "  First Map Open: {seconds:.1}s")?;
            writeln!(f, "  Map Closes: {} times", analysis.map_closes)?;
        }

        if analysis.pov_changes > 0 {
            writeln!(f, "\nCamera Movement:")?;
            writeln!(f, "  POV Changes: {}", analysis.pov_changes)?;
            if let Some(range) = analysis.heading_range {
                writeln!(f, "  Heading Range: {range:.0}°")?;
            }
        }

        Ok(())
    }
}

fn describe(event: &ReplayEvent) -> Option<String> {
    let position = || {
        event
            .lat_lng()
            .map_or_else(|| "?".to_string(), |(lat, lng)| format!("{lat:.2}, {lng:.2}"))
    };

    let description = match event.kind.as_str() {
        MAP_DISPLAY if event.is_active() => "📍 Opened map".to_string(),
        MAP_DISPLAY => "📍 Closed map".to_string(),
        PIN_POSITION => format!("📌 Placed pin at {}", position()),
        GUESS => format!("✅ FINAL GUESS at {}", position()),
        PANO_POSITION => format!(
            "🌍 Moved to {}",
            event
                .payload
                .get("countryCode")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_uppercase()
        ),
        _ => return None,
    };

    Some(description)
}

/// The important events of a replay, at most `limit` of them.
pub struct TimelineReport<'a> {
    pub events: &'a [ReplayEvent],
    pub limit: usize,
}

impl Display for TimelineReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n=== Replay Timeline ===")?;
        let Some(start) = self.events.first().map(|event| event.time) else {
            return writeln!(f, "No events to display");
        };

        let important: Vec<(&ReplayEvent, String)> = self
            .events
            .iter()
            .filter_map(|event| describe(event).map(|description| (event, description)))
            .collect();

        for (event, description) in important.iter().take(self.limit) {
            writeln!(f, "[{:.1}s] {description}", seconds_since(start, event))?;
        }
        if important.len() > self.limit {
            writeln!(f, "\n... and {} more events", important.len() - self.limit)?;
        }

        Ok(())
    }
}

/// One player's line in `replay-compare`.
pub struct ReplayComparisonEntry<'a> {
    /// 1-based position in the comparison.
    pub index: usize,
    pub player_id: &'a str,
    pub analysis: &'a ReplayAnalysis,
}

impl Display for ReplayComparisonEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.analysis;

        writeln!(
            f,
            "\nPlayer {} ({}...):",
            self.index,
            super::short_id(self.player_id)
        )?;
        writeln!(f, "  Total Time: {:.1}s", analysis.total_seconds)?;
        writeln!(
            f,
            "  Time to Guess: {}",
            or_na(analysis.time_to_guess.map(|seconds| format!("{seconds:.1}s")))
        )?;
        writeln!(f, "  Map Opens: {}", analysis.map_opens)?;
        writeln!(f, "  Pin Adjustments: {}", analysis.pin_adjustments)?;
        writeln!(f, "  Total Actions: {}", analysis.total_actions)
    }
}
