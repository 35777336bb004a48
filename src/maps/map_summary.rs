use serde::Deserialize;
use serde_json::Value;

use crate::format::value_text;

/// A map as listed by search and browse results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub id: String,
    pub name: String,
    pub creator: MapCreator,
    pub coordinate_count: Option<Value>,
    pub difficulty: Option<Value>,
    #[serde(default)]
    pub likes: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapCreator {
    pub nick: String,
}

impl MapSummary {
    pub fn locations(&self) -> String {
        self.coordinate_count
            .as_ref()
            .map_or_else(|| "Unknown".to_string(), value_text)
    }

    /// The difficulty label, `None` when the map has none.
    pub fn difficulty(&self) -> Option<String> {
        self.difficulty.as_ref().map(value_text)
    }
}
