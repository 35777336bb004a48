use std::fmt::{self, Display};

use reqwest::Client;

use crate::{
    format::{check_mark, or_na, truncate},
    model::UserSummary,
    stats::{mean, most_common},
};

/// How many countries are listed in the breakdown.
const TOP_COUNTRIES: usize = 5;

/// Retrieves the friends of the signed in user.
#[tracing::instrument(name = "get friends", level = "debug", skip_all)]
pub async fn get_friends(
    client: &Client,
    base_url: &str,
) -> Result<Vec<UserSummary>, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/social/friends"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// Aggregates over a friends list.
#[derive(Debug, PartialEq)]
pub struct FriendStats {
    pub total: usize,
    pub online: usize,
    pub pro: usize,
    /// Average over the friends whose level is known.
    pub average_level: f64,
    /// Upper-cased country codes with their counts, most common first.
    pub top_countries: Vec<(String, usize)>,
}

impl FriendStats {
    pub fn from_friends(friends: &[UserSummary]) -> Self {
        let levels = friends
            .iter()
            .filter_map(UserSummary::level)
            .filter(|level| *level > 0)
            .map(f64::from)
            .collect::<Vec<_>>();

        let mut top_countries = most_common(
            friends
                .iter()
                .filter_map(|friend| friend.country_code.as_deref())
                .filter(|code| !code.is_empty())
                .map(str::to_uppercase),
        );
        top_countries.truncate(TOP_COUNTRIES);

        Self {
            total: friends.len(),
            online: friends.iter().filter(|friend| friend.is_online).count(),
            pro: friends.iter().filter(|friend| friend.is_pro_user).count(),
            average_level: mean(&levels).unwrap_or_default(),
            top_countries,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    pub fn pro_share(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.pro as f64 / self.total as f64 * 100.0
    }
}

/// The console report for `friends`.
pub struct FriendsReport<'a>(pub &'a [UserSummary]);

impl Display for FriendsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let friends = self.0;
        if friends.is_empty() {
            return writeln!(
                f,
                "You have no friends yet. Add some friends to see them here!"
            );
        }

        writeln!(f, "\n👥 Your Friends ({} total)\n", friends.len())?;
        writeln!(
            f,
            "{:<20} {:<8} {:<10} {:<5} Online",
            "Username", "Level", "Country", "Pro"
        )?;
        writeln!(f, "{}", "-".repeat(60))?;

        for friend in friends {
            writeln!(
                f,
                "{:<20} {:<8} {:<10} {:<5} {}",
                truncate(&friend.nick, 19),
                or_na(friend.level()),
                friend.country(),
                check_mark(friend.is_pro_user),
                if friend.is_online { "🟢" } else { "⚪" }
            )?;
        }

        let stats = FriendStats::from_friends(friends);
        writeln!(f, "\n📊 Statistics:")?;
        writeln!(f, "Total Friends: {}", stats.total)?;
        writeln!(f, "Online Now: {}", stats.online)?;
        writeln!(f, "Pro Users: {} ({:.1}%)", stats.pro, stats.pro_share())?;
        writeln!(f, "Average Level: {:.1}", stats.average_level)?;

        writeln!(f, "\n🌍 Top Countries:")?;
        for (country, count) in &stats.top_countries {
            writeln!(f, "{country}: {count}")?;
        }

        Ok(())
    }
}
