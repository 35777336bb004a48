use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::format::{or_na, value_text};

const SECONDS_PER_DAY: i64 = 86_400;

/// The billing interval code of monthly plans. Anything else bills yearly.
pub const MONTHLY_INTERVAL: u32 = 1;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub plan_id: Option<Value>,
    pub plan: Option<Value>,
    pub currency: String,
    pub cost: f64,
    pub interval: u32,
    pub started_at: DateTime<Utc>,
    pub period_ending_at: DateTime<Utc>,
    #[serde(default)]
    pub is_in_trial_period: bool,
    pub trial_ending_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub canceled: bool,
    #[serde(default)]
    pub is_active: bool,
    pub pay_provider: Option<Value>,
}

pub fn billing(interval: u32) -> &'static str {
    if interval == MONTHLY_INTERVAL {
        "Monthly"
    } else {
        "Yearly"
    }
}

impl Subscription {
    /// Whole days until the period ends, rounded down. Negative once expired.
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.period_ending_at - now)
            .num_seconds()
            .div_euclid(SECONDS_PER_DAY)
    }

    pub fn monthly_cost(&self) -> f64 {
        if self.interval == MONTHLY_INTERVAL {
            self.cost
        } else {
            self.cost / 12.0
        }
    }
}

/// Retrieves the subscription of the signed in user, `None` when there is
/// none.
#[tracing::instrument(name = "get subscription", level = "debug", skip_all)]
pub async fn get_subscription(
    client: &Client,
    base_url: &str,
) -> Result<Option<Subscription>, reqwest::Error> {
    let res = client
        .get(format!("{base_url}/v3/subscriptions"))
        .send()
        .await?;

    if res.status() == StatusCode::NOT_FOUND {
        tracing::debug!("no subscription");
        return Ok(None);
    }

    res.error_for_status()?.json().await.map(Some)
}

fn text(value: Option<&Value>) -> String {
    or_na(value.map(value_text))
}

/// The console report for `subscription`, relative to `now`.
pub struct SubscriptionReport<'a> {
    pub subscription: &'a Subscription,
    pub now: DateTime<Utc>,
}

impl Display for SubscriptionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sub = self.subscription;
        let currency = &sub.currency;
        let renews = sub.period_ending_at.format("%Y-%m-%d");

        writeln!(f, "\n💳 Subscription Status\n")?;
        if sub.is_active {
            writeln!(f, "✅ Active Subscription")?;
        } else {
            writeln!(f, "❌ Inactive Subscription")?;
        }

        writeln!(f, "\n📋 Plan Details:")?;
        writeln!(f, "Plan: {}", text(sub.plan.as_ref()))?;
        writeln!(f, "Cost: {currency} {:.2}", sub.cost)?;
        writeln!(f, "Billing: {}", billing(sub.interval))?;

        writeln!(f, "\n📅 Dates:")?;
        writeln!(f, "Started: {}", sub.started_at.format("%Y-%m-%d"))?;
        writeln!(f, "Renews: {renews}")?;
        if sub.is_in_trial_period {
            writeln!(
                f,
                "Trial: ✅ In trial period (ends {})",
                or_na(sub.trial_ending_at.map(|at| at.format("%Y-%m-%d")))
            )?;
        }
        if sub.canceled {
            writeln!(
                f,
                "\n⚠️  Subscription is canceled (access until {renews})"
            )?;
        }

        writeln!(f, "\n⏰ Time Remaining:")?;
        let days = sub.days_remaining(self.now);
        if days > 0 {
            writeln!(f, "{days} days until renewal")?;
        } else {
            writeln!(f, "Expired {} days ago", days.abs())?;
        }

        writeln!(f, "\n💰 Value:")?;
        writeln!(f, "Effective monthly cost: {currency} {:.2}", sub.monthly_cost())?;

        writeln!(f, "\n🔍 Additional Info:")?;
        writeln!(f, "Subscription ID: {}", sub.id)?;
        writeln!(f, "Plan ID: {}", text(sub.plan_id.as_ref()))?;
        writeln!(f, "Payment Provider: {}", text(sub.pay_provider.as_ref()))
    }
}
