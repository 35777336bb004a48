mod browse_maps;
mod map_summary;
mod run;
mod search_maps;

pub use browse_maps::{browse_maps, BrowseReport, MapCategory};
pub use map_summary::{MapCreator, MapSummary};
pub use run::{browse, search};
pub use search_maps::{difficulty_counts, search_maps, MapSearchReport};
