use std::fmt::{self, Display};

use reqwest::Client;

use super::{
    search_maps::{difficulty_counts, write_map_links, write_map_table},
    MapSummary,
};
use crate::stats::{mean, most_common};

const SAMPLE_LINKS: usize = 5;
const TOP_CREATORS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapCategory {
    Popular,
    Featured,
    New,
    Hot,
}

impl MapCategory {
    pub const ALL: [Self; 4] = [Self::Popular, Self::Featured, Self::New, Self::Hot];

    /// The path segment of the browse endpoint.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Featured => "featured",
            Self::New => "new",
            Self::Hot => "hot",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Popular => "🗺️  Popular Maps",
            Self::Featured => "🌟 Featured Maps",
            Self::New => "🆕 New Maps",
            Self::Hot => "🔥 Hot Maps",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(slug))
    }
}

/// Lists the maps of a browse category. Needs no session.
#[tracing::instrument(name = "browse maps", level = "debug", skip_all, fields(category = category.slug()))]
pub async fn browse_maps(
    client: &Client,
    base_url: &str,
    category: MapCategory,
) -> Result<Vec<MapSummary>, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/maps/browse/{}", category.slug()))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// The console report for `browse-maps`. Popular maps get the full table and
/// statistics, the other categories a plain list.
pub struct BrowseReport<'a> {
    pub category: MapCategory,
    pub maps: &'a [MapSummary],
}

impl BrowseReport<'_> {
    fn write_statistics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let maps = self.maps;
        let likes: Vec<f64> = maps.iter().map(|map| map.likes).collect();

        writeln!(f, "\n📊 Statistics:")?;
        writeln!(f, "Total Maps: {}", maps.len())?;
        writeln!(f, "Average Likes: {:.1}", mean(&likes).unwrap_or_default())?;

        writeln!(f, "\nDifficulties:")?;
        for (difficulty, count) in difficulty_counts(maps) {
            writeln!(f, "  {difficulty}: {count}")?;
        }

        writeln!(f, "\n👤 Top Creators:")?;
        let creators = most_common(maps.iter().map(|map| map.creator.nick.as_str()));
        for (creator, count) in creators.into_iter().take(TOP_CREATORS) {
            writeln!(f, "  {creator}: {count} maps")?;
        }

        writeln!(f, "\n🔗 Sample Map Links:")?;
        write_map_links(f, maps, SAMPLE_LINKS)
    }
}

impl Display for BrowseReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let maps = self.maps;

        if self.category == MapCategory::Popular {
            writeln!(f, "\n{} ({} maps)\n", self.category.title(), maps.len())?;
            write_map_table(f, maps, true)?;
            return self.write_statistics(f);
        }

        writeln!(f, "\n{}:", self.category.title())?;
        for (index, map) in maps.iter().enumerate() {
            writeln!(f, "{}. {} by {}", index + 1, map.name, map.creator.nick)?;
        }

        Ok(())
    }
}
