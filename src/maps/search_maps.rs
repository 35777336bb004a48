use std::fmt::{self, Display};

use reqwest::Client;

use super::MapSummary;
use crate::{client::SITE_URL, format::truncate, stats::most_common};

const MAP_LINKS: usize = 10;

/// Searches maps by name or keyword. Needs no session.
#[tracing::instrument(name = "search maps", level = "debug", skip_all, fields(%query))]
pub async fn search_maps(
    client: &Client,
    base_url: &str,
    query: &str,
) -> Result<Vec<MapSummary>, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/search/map"))
        .query(&[("q", query)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// Writes the `#, name, creator, locations` table shared by the map reports.
pub(crate) fn write_map_table(
    f: &mut fmt::Formatter<'_>,
    maps: &[MapSummary],
    with_difficulty: bool,
) -> fmt::Result {
    if with_difficulty {
        writeln!(
            f,
            "{:<4} {:<40} {:<20} {:<12} Difficulty",
            "#", "Map Name", "Creator", "Locations"
        )?;
        writeln!(f, "{}", "-".repeat(100))?;
    } else {
        writeln!(f, "{:<4} {:<40} {:<20} Locations", "#", "Map Name", "Creator")?;
        writeln!(f, "{}", "-".repeat(90))?;
    }

    for (index, map) in maps.iter().enumerate() {
        let name = truncate(&map.name, 39);
        let creator = truncate(&map.creator.nick, 19);
        if with_difficulty {
            writeln!(
                f,
                "{:<4} {name:<40} {creator:<20} {:<12} {}",
                index + 1,
                map.locations(),
                map.difficulty().unwrap_or_else(|| "N/A".to_string())
            )?;
        } else {
            writeln!(
                f,
                "{:<4} {name:<40} {creator:<20} {}",
                index + 1,
                map.locations()
            )?;
        }
    }

    Ok(())
}

pub(crate) fn write_map_links(
    f: &mut fmt::Formatter<'_>,
    maps: &[MapSummary],
    count: usize,
) -> fmt::Result {
    for map in maps.iter().take(count) {
        writeln!(f, "{}: {SITE_URL}/maps/{}", map.name, map.id)?;
    }

    Ok(())
}

/// Difficulty labels with their counts, most common first.
pub fn difficulty_counts(maps: &[MapSummary]) -> Vec<(String, usize)> {
    most_common(
        maps.iter()
            .map(|map| map.difficulty().unwrap_or_else(|| "Unknown".to_string())),
    )
}

/// The console report for `search-maps`.
pub struct MapSearchReport<'a> {
    pub query: &'a str,
    pub maps: &'a [MapSummary],
}

impl Display for MapSearchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query;
        if self.maps.is_empty() {
            return writeln!(f, "❌ No maps found matching \"{query}\"");
        }

        writeln!(
            f,
            "\n🔍 Search Results for \"{query}\" ({} maps found)\n",
            self.maps.len()
        )?;
        write_map_table(f, self.maps, false)?;

        writeln!(f, "\n🔗 Map Links:")?;
        write_map_links(f, self.maps, MAP_LINKS)?;

        writeln!(f, "\n📊 Difficulty Distribution:")?;
        for (difficulty, count) in difficulty_counts(self.maps) {
            writeln!(f, "  {difficulty}: {count}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use serde_json::json;

    use super::*;

    pub(crate) fn maps() -> Vec<MapSummary> {
        serde_json::from_value(json!([
            { "id": "m1", "name": "A Diverse World", "creator": { "nick": "alpha" },
              "coordinateCount": 50000, "difficulty": "Medium", "likes": 120 },
            { "id": "m2", "name": "An Extraordinarily Long Map Name That Keeps Going", "creator": { "nick": "beta" },
              "coordinateCount": "1.2K", "difficulty": "Hard", "likes": 30 },
            { "id": "m3", "name": "Urban World", "creator": { "nick": "alpha" },
              "difficulty": "Hard", "likes": 0 },
            { "id": "m4", "name": "Tiny", "creator": { "nick": "gamma" } }
        ]))
        .unwrap()
    }

    #[test]
    fn difficulty_distribution_is_sorted_by_count() {
        assert_eq!(
            difficulty_counts(&maps()),
            vec![
                ("Hard".to_string(), 2),
                ("Medium".to_string(), 1),
                ("Unknown".to_string(), 1),
            ]
        );
    }

    #[test]
    fn report_lists_maps() {
        let maps = maps();
        let report = MapSearchReport {
            query: "world",
            maps: &maps,
        }
        .to_string();

        assert!(report.contains("(4 maps found)"));
        assert!(report.contains("1    A Diverse World"));
        assert!(report.contains("An Extraordinarily Long Map Name That K  beta"));
        assert!(report.contains("Urban World                              alpha                Unknown"));
        assert!(report.contains("Tiny: https://www.geoguessr.com/maps/m4"));
        assert!(report.contains("  Hard: 2"));
    }

    #[test]
    fn report_for_no_results() {
        let report = MapSearchReport {
            query: "zzz",
            maps: &[],
        }
        .to_string();
        assert_eq!(report, "❌ No maps found matching \"zzz\"\n");
    }
}
