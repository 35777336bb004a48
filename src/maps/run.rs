use error_stack::{Report, Result};
use reqwest::Client;

use crate::{
    command::Options,
    error::{http_error, ApplicationError, EMPTY_QUERY_HINT},
    maps::{browse_maps, search_maps, BrowseReport, MapCategory, MapSearchReport},
    prompt::{option_or_prompt, select},
};

/// Searches maps by the `--query` option.
///
/// # Errors
/// - If the query is empty
/// - If the search request fails
pub async fn search(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let query = option_or_prompt(options, "--query", "Enter map name or keyword to search")?;
    if query.is_empty() {
        return Err(Report::new(ApplicationError::InvalidOption {
            option: "--query".to_string(),
        })
        .attach_printable("search query cannot be empty"));
    }

    let maps = search_maps(client, base_url, &query)
        .await
        .map_err(|e| http_error(e, &[EMPTY_QUERY_HINT]))?;

    print!(
        "{}",
        MapSearchReport {
            query: &query,
            maps: &maps,
        }
    );
    if !maps.is_empty() {
        println!("\n✅ Found {} maps!", maps.len());
    }

    Ok(())
}

fn category(options: &Options) -> Result<MapCategory, ApplicationError> {
    if let Some(slug) = options.get("--category") {
        return MapCategory::from_slug(slug).ok_or_else(|| {
            Report::new(ApplicationError::InvalidOption {
                option: "--category".to_string(),
            })
            .attach_printable(format!(
                "unknown category {slug:?}, expected popular, featured, new or hot"
            ))
        });
    }

    let titles: Vec<&str> = MapCategory::ALL.iter().map(|c| c.title()).collect();
    let index = select("Select a category", &titles)?;
    Ok(MapCategory::ALL
        .get(index)
        .copied()
        .unwrap_or(MapCategory::Popular))
}

/// Lists the maps of `--category`, offering a menu when it is missing.
///
/// # Errors
/// - If the category is unknown
/// - If the browse request fails
pub async fn browse(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let category = category(options)?;
    let maps = browse_maps(client, base_url, category)
        .await
        .map_err(|e| http_error(e, &[]))?;

    print!(
        "{}",
        BrowseReport {
            category,
            maps: &maps,
        }
    );
    if !maps.is_empty() {
        println!("\n✅ Retrieved {} maps!", maps.len());
    }

    Ok(())
}
