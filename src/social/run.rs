use error_stack::Result;
use reqwest::Client;

use crate::{
    error::{http_error, ApplicationError, EXPIRED_COOKIE_HINT},
    social::{get_friends, FriendsReport},
};

/// Prints the friends list with a few statistics.
///
/// # Errors
/// - If the friends request fails
pub async fn run(client: &Client, base_url: &str) -> Result<(), ApplicationError> {
    let friends = get_friends(client, base_url)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT]))?;

    print!("{}", FriendsReport(&friends));
    if !friends.is_empty() {
        println!("\n✅ Retrieved {} friends!", friends.len());
    }

    Ok(())
}
