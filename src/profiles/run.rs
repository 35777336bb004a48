use error_stack::{Report, Result};
use reqwest::Client;

use crate::{
    command::Options,
    error::{http_error, ApplicationError, EMPTY_QUERY_HINT, EXPIRED_COOKIE_HINT},
    profiles::{
        compare_users, get_profile, search_users, Comparison, ComparisonReport, ProfileReport,
        UserSearchReport,
    },
    prompt::option_or_prompt,
};

/// Prints the profile of the signed in user.
///
/// # Errors
/// - If the profile request fails
pub async fn show_profile(client: &Client, base_url: &str) -> Result<(), ApplicationError> {
    let profile = get_profile(client, base_url)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT]))?;

    println!("{}", ProfileReport(&profile));
    println!("✅ Profile retrieved successfully!");

    Ok(())
}

/// Searches users by the `--query` option, prompting for it when missing.
///
/// # Errors
/// - If the query is empty
/// - If the search request fails
pub async fn search(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let query = option_or_prompt(options, "--query", "Enter username to search")?;
    if query.is_empty() {
        return Err(Report::new(ApplicationError::InvalidOption {
            option: "--query".to_string(),
        })
        .attach_printable("search query cannot be empty"));
    }

    let users = search_users(client, base_url, &query)
        .await
        .map_err(|e| http_error(e, &[EMPTY_QUERY_HINT, EXPIRED_COOKIE_HINT]))?;
    tracing::debug!("{} users matched", users.len());

    print!(
        "{}",
        UserSearchReport {
            query: &query,
            users: &users,
        }
    );
    if !users.is_empty() {
        println!("\n✅ Found {} users!", users.len());
    }

    Ok(())
}

/// Compares the users named by `--first` and `--second`.
///
/// # Errors
/// - If either search request fails
pub async fn compare(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let first = option_or_prompt(options, "--first", "First username")?;
    let second = option_or_prompt(options, "--second", "Second username")?;

    let comparison = compare_users(client, base_url, &first, &second)
        .await
        .map_err(|e| http_error(e, &[EMPTY_QUERY_HINT, EXPIRED_COOKIE_HINT]))?;

    match comparison {
        Comparison::Found(first, second) => print!(
            "{}",
            ComparisonReport {
                first: &first,
                second: &second,
            }
        ),
        Comparison::NotFound(name) => println!("❌ User \"{name}\" not found"),
    }

    Ok(())
}
