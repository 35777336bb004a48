use std::fmt::{self, Display};

use reqwest::Client;

use crate::{
    client::SITE_URL,
    format::{check_mark, or_na, truncate},
    model::UserSummary,
};

/// How many profile links are printed below the results table.
const PROFILE_LINKS: usize = 5;

/// Searches users by nickname.
#[tracing::instrument(name = "search users", level = "debug", skip_all, fields(%query))]
pub async fn search_users(
    client: &Client,
    base_url: &str,
    query: &str,
) -> Result<Vec<UserSummary>, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/search/user"))
        .query(&[("q", query)])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// The console report for `search-users`.
pub struct UserSearchReport<'a> {
    pub query: &'a str,
    pub users: &'a [UserSummary],
}

impl Display for UserSearchReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = self.query;
        if self.users.is_empty() {
            return writeln!(f, "❌ No users found matching \"{query}\"");
        }

        writeln!(
            f,
            "\n🔍 Search Results for \"{query}\" ({} users found)\n",
            self.users.len()
        )?;
        writeln!(
            f,
            "{:<20} {:<8} {:<10} {:<5} Verified",
            "Username", "Level", "Country", "Pro"
        )?;
        writeln!(f, "{}", "-".repeat(60))?;

        for user in self.users {
            writeln!(
                f,
                "{:<20} {:<8} {:<10} {:<5} {}",
                truncate(&user.nick, 19),
                or_na(user.level()),
                user.country(),
                check_mark(user.is_pro_user),
                check_mark(user.is_verified)
            )?;
        }

        writeln!(f, "\n🔗 Profile Links:")?;
        for user in self.users.iter().take(PROFILE_LINKS) {
            writeln!(f, "{}: {SITE_URL}/user/{}", user.nick, user.id)?;
        }

        Ok(())
    }
}
