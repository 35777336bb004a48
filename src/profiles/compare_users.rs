use std::fmt::{self, Display};

use reqwest::Client;

use super::search_users;
use crate::{
    format::{check_mark, or_na, thousands},
    model::UserSummary,
};

/// The outcome of looking up two users to compare.
#[derive(Debug)]
pub enum Comparison {
    /// The first search result for each name.
    Found(Box<UserSummary>, Box<UserSummary>),
    /// No user matched the given name.
    NotFound(String),
}

/// Searches both names concurrently and keeps the best match of each.
#[tracing::instrument(name = "compare users", level = "debug", skip_all, fields(%first, %second))]
pub async fn compare_users(
    client: &Client,
    base_url: &str,
    first: &str,
    second: &str,
) -> Result<Comparison, reqwest::Error> {
    let (first_results, second_results) = futures::try_join!(
        search_users(client, base_url, first),
        search_users(client, base_url, second)
    )?;

    let Some(first_user) = first_results.into_iter().next() else {
        return Ok(Comparison::NotFound(first.to_string()));
    };
    let Some(second_user) = second_results.into_iter().next() else {
        return Ok(Comparison::NotFound(second.to_string()));
    };

    Ok(Comparison::Found(Box::new(first_user), Box::new(second_user)))
}

/// The console report for `compare-users`.
pub struct ComparisonReport<'a> {
    pub first: &'a UserSummary,
    pub second: &'a UserSummary,
}

impl ComparisonReport<'_> {
    fn rows(&self) -> Vec<(&'static str, String, String)> {
        let (a, b) = (self.first, self.second);
        let xp = |user: &UserSummary| user.xp().map_or_else(|| "N/A".to_string(), thousands);

        vec![
            ("Username", a.nick.clone(), b.nick.clone()),
            ("Level", or_na(a.level()), or_na(b.level())),
            ("XP", xp(a), xp(b)),
            ("Rating", or_na(a.rating()), or_na(b.rating())),
            ("Country", a.country(), b.country()),
            (
                "Pro User",
                check_mark(a.is_pro_user).to_string(),
                check_mark(b.is_pro_user).to_string(),
            ),
            (
                "Verified",
                check_mark(a.is_verified).to_string(),
                check_mark(b.is_verified).to_string(),
            ),
        ]
    }
}

impl Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = (self.first, self.second);

        writeln!(f, "\n⚔️  User Comparison\n")?;
        writeln!(f, "{:<10} {:<20} {:<20}", "Stat", a.nick, b.nick)?;
        writeln!(f, "{}", "-".repeat(52))?;
        for (stat, left, right) in self.rows() {
            writeln!(f, "{stat:<10} {left:<20} {right:<20}")?;
        }

        writeln!(f, "\n📊 Head-to-Head:\n")?;

        if let (Some(level_a), Some(level_b)) = (a.level(), b.level()) {
            match level_a.cmp(&level_b) {
                std::cmp::Ordering::Greater => {
                    writeln!(f, "🏆 {} is {} levels ahead", a.nick, level_a - level_b)?;
                }
                std::cmp::Ordering::Less => {
                    writeln!(f, "🏆 {} is {} levels ahead", b.nick, level_b - level_a)?;
                }
                std::cmp::Ordering::Equal => writeln!(f, "🤝 Same level!")?,
            }
        }

        if let (Some(xp_a), Some(xp_b)) = (a.xp(), b.xp()) {
            let difference = xp_a - xp_b;
            if difference != 0 {
                let leader = if difference > 0 { &a.nick } else { &b.nick };
                writeln!(f, "📈 {leader} has {} more XP", thousands(difference.abs()))?;
            }
        }

        if let (Some(rating_a), Some(rating_b)) = (a.rating(), b.rating()) {
            let difference = rating_a - rating_b;
            if difference != 0 {
                let leader = if difference > 0 { &a.nick } else { &b.nick };
                writeln!(f, "⭐ {leader} has {} higher rating", difference.abs())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn user(value: serde_json::Value) -> UserSummary {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn head_to_head_names_the_leader() {
        let first = user(json!({
            "nick": "alpha", "progress": { "level": 50, "xp": 200000 },
            "competitive": { "rating": 900 }, "countryCode": "de"
        }));
        let second = user(json!({
            "nick": "beta", "progress": { "level": 45, "xp": 150000 },
            "competitive": { "rating": 1000 }
        }));

        let report = ComparisonReport {
            first: &first,
            second: &second,
        }
        .to_string();

        assert!(report.contains("🏆 alpha is 5 levels ahead"));
        assert!(report.contains("📈 alpha has 50,000 more XP"));
        assert!(report.contains("⭐ beta has 100 higher rating"));
        assert!(report.contains("Country    DE"));
    }

    #[test]
    fn same_level_and_missing_rating() {
        let first = user(json!({ "nick": "a", "progress": { "level": 10, "xp": 5 } }));
        let second = user(json!({ "nick": "b", "progress": { "level": 10, "xp": 5 } }));

        let report = ComparisonReport {
            first: &first,
            second: &second,
        }
        .to_string();

        assert!(report.contains("🤝 Same level!"));
        assert!(!report.contains("more XP"));
        assert!(!report.contains("higher rating"));
        assert!(report.contains("Rating     N/A"));
    }
}
