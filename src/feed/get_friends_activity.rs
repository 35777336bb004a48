use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

/// Describes a single page of the friends feed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedPage {
    entries: Vec<Value>,
    /// Present while there are older entries to fetch.
    pagination_token: Option<String>,
}

/// Retrieves up to `pages` pages of the friends feed, following the
/// pagination token. The entries are kept as raw JSON so they can be exported
/// unchanged.
#[tracing::instrument(name = "get friends activity", level = "debug", skip_all, fields(%pages))]
pub async fn get_friends_activity(
    client: &Client,
    base_url: &str,
    pages: u32,
) -> Result<Vec<Value>, reqwest::Error> {
    let mut entries = Vec::new();
    let mut pagination_token: Option<String> = None;

    for page in 0..pages.max(1) {
        let mut request = client.get(format!("{base_url}/v4/feed/friends"));
        if let Some(token) = &pagination_token {
            request = request.query(&[("paginationToken", token)]);
        }

        let feed: FeedPage = request.send().await?.error_for_status()?.json().await?;
        tracing::debug!(page, entries = feed.entries.len(), "retrieved feed page");
        entries.extend(feed.entries);

        match feed.pagination_token {
            Some(token) if page + 1 < pages => pagination_token = Some(token),
            _ => break,
        }
    }

    Ok(entries)
}
