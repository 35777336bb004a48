use std::{
    collections::BTreeMap,
    fmt::{self, Display},
};

use reqwest::Client;
use serde::Deserialize;

use super::{billing, MONTHLY_INTERVAL};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub currency: String,
    pub product: u32,
    pub interval: u32,
    pub price: f64,
    pub price_per_month: f64,
}

impl Plan {
    pub fn is_monthly(&self) -> bool {
        self.interval == MONTHLY_INTERVAL
    }

    pub fn product_name(&self) -> String {
        product_name(self.product)
    }
}

pub fn product_name(product: u32) -> String {
    match product {
        2 => "Pro".to_string(),
        3 => "Unlimited".to_string(),
        4 => "Premium".to_string(),
        5 => "Team".to_string(),
        other => format!("Product {other}"),
    }
}

/// Lists every purchasable plan. Needs no session.
#[tracing::instrument(name = "get plans", level = "debug", skip_all)]
pub async fn get_plans(client: &Client, base_url: &str) -> Result<Vec<Plan>, reqwest::Error> {
    client
        .get(format!("{base_url}/v3/subscriptions/plans"))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// A monthly plan set against the yearly plan of the same product and currency.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlySaving<'a> {
    pub monthly: &'a Plan,
    pub yearly: &'a Plan,
}

impl YearlySaving<'_> {
    pub fn monthly_total(&self) -> f64 {
        self.monthly.price * 12.0
    }

    pub fn amount(&self) -> f64 {
        self.monthly_total() - self.yearly.price
    }

    pub fn percent(&self) -> f64 {
        self.amount() / self.monthly_total() * 100.0
    }
}

/// The plans grouped and cross-referenced for the `plans` report.
#[derive(Debug)]
pub struct PlanComparison<'a> {
    pub plans: &'a [Plan],
    /// Plans per currency, currencies in first-seen order, each group sorted
    /// by product then interval.
    pub groups: Vec<(&'a str, Vec<&'a Plan>)>,
}

impl<'a> PlanComparison<'a> {
    pub fn new(plans: &'a [Plan]) -> Self {
        let mut groups: Vec<(&str, Vec<&Plan>)> = Vec::new();
        for plan in plans {
            match groups.iter_mut().find(|(currency, _)| *currency == plan.currency) {
                Some((_, group)) => group.push(plan),
                None => groups.push((&plan.currency, vec![plan])),
            }
        }
        for (_, group) in &mut groups {
            group.sort_by_key(|plan| (plan.product, plan.interval));
        }

        Self { plans, groups }
    }

    fn yearly_for(&self, monthly: &Plan) -> Option<&'a Plan> {
        self.plans.iter().find(|plan| {
            !plan.is_monthly()
                && plan.currency == monthly.currency
                && plan.product == monthly.product
        })
    }

    /// What a yearly plan saves over twelve months of its monthly plan.
    pub fn saving_of(&self, yearly: &Plan) -> Option<f64> {
        if yearly.is_monthly() {
            return None;
        }

        self.plans
            .iter()
            .find(|plan| {
                plan.is_monthly()
                    && plan.currency == yearly.currency
                    && plan.product == yearly.product
            })
            .map(|monthly| monthly.price * 12.0 - yearly.price)
    }

    /// The yearly plan with the lowest monthly price. Ties keep the first.
    pub fn best_value(&self) -> Option<&'a Plan> {
        self.plans
            .iter()
            .filter(|plan| !plan.is_monthly())
            .fold(None, |best: Option<&Plan>, plan| match best {
                Some(best) if best.price_per_month <= plan.price_per_month => Some(best),
                _ => Some(plan),
            })
    }

    pub fn yearly_savings(&self) -> Vec<YearlySaving<'a>> {
        self.plans
            .iter()
            .filter(|plan| plan.is_monthly())
            .filter_map(|monthly| {
                self.yearly_for(monthly)
                    .map(|yearly| YearlySaving { monthly, yearly })
            })
            .collect()
    }

    /// Every currency offered, sorted.
    pub fn currencies(&self) -> Vec<&'a str> {
        let mut currencies: Vec<&str> = self.plans.iter().map(|p| p.currency.as_str()).collect();
        currencies.sort_unstable();
        currencies.dedup();
        currencies
    }

    pub fn plans_per_product(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for plan in self.plans {
            *counts.entry(plan.product_name()).or_insert(0) += 1;
        }
        counts
    }
}

/// The console report for `plans`.
pub struct PlansReport<'a>(pub &'a PlanComparison<'a>);

impl Display for PlansReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let comparison = self.0;

        writeln!(
            f,
            "\n💳 Available Subscription Plans ({} plans)",
            comparison.plans.len()
        )?;

        for (currency, group) in &comparison.groups {
            writeln!(f, "\n💰 {currency} Plans:\n")?;
            writeln!(
                f,
                "{:<10} {:<12} {:<15} {:<15} Savings",
                "Billing", "Product", "Total Price", "Per Month"
            )?;
            writeln!(f, "{}", "-".repeat(70))?;

            for plan in group {
                let savings = comparison
                    .saving_of(plan)
                    .map_or_else(|| "-".to_string(), |saved| format!("{currency} {saved:.2}"));
                writeln!(
                    f,
                    "{:<10} {:<12} {:<15} {:<15} {savings}",
                    billing(plan.interval),
                    plan.product_name(),
                    format!("{currency} {:.2}", plan.price),
                    format!("{currency} {:.2}", plan.price_per_month),
                )?;
            }
        }

        writeln!(f, "\n🏆 Best Value Analysis:\n")?;
        if let Some(best) = comparison.best_value() {
            writeln!(f, "Best value: {} Yearly", best.product_name())?;
            writeln!(
                f,
                "Price: {0} {1:.2}/year ({0} {2:.2}/month)",
                best.currency, best.price, best.price_per_month
            )?;
        }

        writeln!(f, "\n📊 Monthly vs Yearly Savings:\n")?;
        for saving in comparison.yearly_savings() {
            let currency = &saving.monthly.currency;
            writeln!(f, "{currency} {}:", saving.monthly.product_name())?;
            writeln!(
                f,
                "  Monthly: {currency} {:.2}/month × 12 = {currency} {:.2}",
                saving.monthly.price,
                saving.monthly_total()
            )?;
            writeln!(
                f,
                "  Yearly:  {currency} {:.2}/year ({currency} {:.2}/month)",
                saving.yearly.price,
                saving.yearly.price / 12.0
            )?;
            writeln!(
                f,
                "  💰 Save: {currency} {:.2}/year ({:.0}% savings)\n",
                saving.amount(),
                saving.percent()
            )?;
        }

        writeln!(
            f,
            "Available currencies: {}",
            comparison.currencies().join(", ")
        )?;
        writeln!(f, "\nPlans per product:")?;
        for (product, count) in comparison.plans_per_product() {
            writeln!(f, "  {product}: {count} options")?;
        }

        Ok(())
    }
}
