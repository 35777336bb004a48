use std::path::Path;

use error_stack::{Result, ResultExt};
use reqwest::Client;

use crate::{
    command::Options,
    error::{http_error, ApplicationError, EXPIRED_COOKIE_HINT},
    export::write_json,
    feed::{get_friends_activity, Activity, ActivityReport},
    prompt::{confirm, option_or_prompt},
};

pub const DEFAULT_EXPORT_PATH: &str = "activity_feed.json";

/// Reads `--pages`, asking for it when missing. Also returns whether it was
/// asked. An unreadable answer to the prompt means one page.
fn page_count(options: &Options) -> Result<(u32, bool), ApplicationError> {
    if let Some(pages) = options.parse::<u32>("--pages")? {
        return Ok((pages.max(1), false));
    }

    let pages = option_or_prompt(
        options,
        "--pages",
        "How many pages to fetch? (1 page ≈ 31 activities) [default: 1]",
    )?
    .parse::<u32>()
    .ok()
    .filter(|pages| *pages > 0)
    .unwrap_or(1);

    Ok((pages, true))
}

/// Prints the friends feed over `--pages` pages and optionally exports it
/// with `--export [PATH]`.
///
/// When the page count is asked interactively, the export is offered too.
///
/// # Errors
/// - If a feed request fails
/// - If an entry payload cannot be decoded
/// - If the export cannot be written
pub async fn run(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let (pages, interactive) = page_count(options)?;

    let entries = get_friends_activity(client, base_url, pages)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT]))?;

    let activities = entries
        .iter()
        .map(Activity::from_raw)
        .collect::<std::result::Result<Vec<_>, _>>()
        .change_context(ApplicationError::ParseError {})
        .attach_printable("when decoding an activity payload")?;

    print!("{}", ActivityReport(&activities));
    if entries.is_empty() {
        return Ok(());
    }
    println!("\n✅ Retrieved {} activities!", entries.len());

    let export = options.has_flag("--export")
        || (interactive && confirm("Export to JSON?", false)?);
    if export {
        let path = options.get("--export").unwrap_or(DEFAULT_EXPORT_PATH);
        write_json(Path::new(path), &entries)?;
        println!("\n💾 Exported {} activities to {path}", entries.len());
    }

    Ok(())
}
