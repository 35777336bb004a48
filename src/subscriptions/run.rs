use chrono::Utc;
use error_stack::Result;
use reqwest::Client;

use crate::{
    command::Options,
    error::{http_error, ApplicationError, EXPIRED_COOKIE_HINT},
    subscriptions::{get_plans, get_subscription, PlanComparison, PlansReport, SubscriptionReport},
};

/// Prints the subscription of the signed in user.
///
/// # Errors
/// - If the subscription request fails for a reason other than there being none
pub async fn show_subscription(client: &Client, base_url: &str) -> Result<(), ApplicationError> {
    let subscription = get_subscription(client, base_url)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT]))?;

    let Some(subscription) = subscription else {
        println!("❌ No active subscription found.");
        return Ok(());
    };

    print!(
        "{}",
        SubscriptionReport {
            subscription: &subscription,
            now: Utc::now(),
        }
    );

    Ok(())
}

/// Compares the available plans, limited to `--currency` when given.
///
/// # Errors
/// - If the plans request fails
pub async fn compare_plans(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let mut plans = get_plans(client, base_url)
        .await
        .map_err(|e| http_error(e, &[]))?;

    if let Some(currency) = options.get("--currency") {
        plans.retain(|plan| plan.currency.eq_ignore_ascii_case(currency));
        if plans.is_empty() {
            println!("❌ No plans found in {currency}");
            return Ok(());
        }
    }

    let comparison = PlanComparison::new(&plans);
    print!("{}", PlansReport(&comparison));
    println!("\n✅ Retrieved {} plans!", plans.len());

    Ok(())
}
