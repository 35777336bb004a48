use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use chrono::{DateTime, Timelike, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{format::value_text, stats::most_common};

/// How many entries are printed line by line.
const SHOWN_ENTRIES: usize = 20;
const TOP_FRIENDS: usize = 5;
const TOP_HOURS: usize = 3;

/// What a feed entry is about, from its numeric `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ActivityKind {
    StandardGame,
    CompetitiveStarted,
    Batch,
    PartyGame,
    CompetitiveFinished,
    Other(u32),
}

impl From<u32> for ActivityKind {
    fn from(code: u32) -> Self {
        match code {
            2 => Self::StandardGame,
            6 => Self::CompetitiveStarted,
            7 => Self::Batch,
            9 => Self::PartyGame,
            11 => Self::CompetitiveFinished,
            other => Self::Other(other),
        }
    }
}

impl ActivityKind {
    pub fn code(self) -> u32 {
        match self {
            Self::StandardGame => 2,
            Self::CompetitiveStarted => 6,
            Self::Batch => 7,
            Self::PartyGame => 9,
            Self::CompetitiveFinished => 11,
            Self::Other(code) => code,
        }
    }

    /// The heading used in the activity breakdown.
    pub fn plural_name(self) -> String {
        match self {
            Self::StandardGame => "Standard Games".to_string(),
            Self::CompetitiveStarted => "Duels Started".to_string(),
            Self::Batch => "Batch Activities".to_string(),
            Self::PartyGame => "Party Games".to_string(),
            Self::CompetitiveFinished => "Duels Completed".to_string(),
            Self::Other(code) => format!("Type {code}"),
        }
    }

    /// Describes what the user did, using the decoded payload.
    pub fn describe(self, payload: &Value) -> String {
        let field = |name: &str, fallback: &str| {
            payload
                .get(name)
                .map_or_else(|| fallback.to_string(), value_text)
        };

        match self {
            Self::StandardGame => format!(
                "scored {} points on {}",
                field("points", "N/A"),
                field("mapName", "a map")
            ),
            Self::CompetitiveStarted => format!(
                "started a {} game",
                field("competitiveGameMode", "competitive")
            ),
            Self::PartyGame => format!("is playing {}", field("gameMode", "a game")),
            Self::CompetitiveFinished => format!(
                "finished a {} game",
                field("competitiveGameMode", "competitive")
            ),
            Self::Batch => "completed multiple activities".to_string(),
            Self::Other(code) => format!("activity type {code}"),
        }
    }
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: u32,
    time: DateTime<Utc>,
    user: RawUser,
    /// A JSON document encoded as a string.
    payload: Option<String>,
}

#[derive(Deserialize)]
struct RawUser {
    nick: String,
}

/// A feed entry with its payload decoded.
#[derive(Debug, Clone)]
pub struct Activity {
    pub kind: ActivityKind,
    pub time: DateTime<Utc>,
    pub nick: String,
    pub payload: Value,
}

impl Activity {
    /// Decodes a raw feed entry, including the JSON string in its `payload`.
    ///
    /// # Errors
    /// If the entry does not have the expected shape or its payload is not JSON.
    pub fn from_raw(entry: &Value) -> Result<Self, serde_json::Error> {
        let raw = RawEntry::deserialize(entry)?;
        let payload = match raw.payload.as_deref() {
            Some(text) => serde_json::from_str(text)?,
            None => Value::Null,
        };

        Ok(Self {
            kind: ActivityKind::from(raw.kind),
            time: raw.time,
            nick: raw.user.nick,
            payload,
        })
    }

    pub fn describe(&self) -> String {
        self.kind.describe(&self.payload)
    }
}

/// The console report for `activity`.
pub struct ActivityReport<'a>(pub &'a [Activity]);

impl Display for ActivityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let activities = self.0;

        writeln!(
            f,
            "\n🌟 Friends Activity Feed ({} activities)\n",
            activities.len()
        )?;
        for activity in activities.iter().take(SHOWN_ENTRIES) {
            writeln!(
                f,
                "[{}] {}: {}",
                activity.time.format("%Y-%m-%d %H:%M"),
                activity.nick,
                activity.describe()
            )?;
        }

        writeln!(f, "\n📊 Activity Breakdown:")?;
        let mut by_code: BTreeMap<u32, (ActivityKind, usize)> = BTreeMap::new();
        for activity in activities {
            by_code
                .entry(activity.kind.code())
                .or_insert((activity.kind, 0))
                .1 += 1;
        }
        for (kind, count) in by_code.values() {
            writeln!(f, "{}: {count}", kind.plural_name())?;
        }

        writeln!(f, "\n🏆 Most Active Friends:")?;
        let friends = most_common(activities.iter().map(|activity| activity.nick.as_str()));
        for (rank, (nick, count)) in friends.iter().take(TOP_FRIENDS).enumerate() {
            writeln!(f, "{}. {nick}: {count} activities", rank + 1)?;
        }

        writeln!(f, "\n⏰ Most Active Hours:")?;
        let hours = most_common(activities.iter().map(|activity| activity.time.hour()));
        for (hour, count) in hours.iter().take(TOP_HOURS) {
            writeln!(f, "  {hour:02}:00 - {count} activities")?;
        }

        Ok(())
    }
}
