mod plans;
mod run;
mod subscription;

pub use plans::{get_plans, product_name, Plan, PlanComparison, PlansReport, YearlySaving};
pub use run::{compare_plans, show_subscription};
pub use subscription::{
    billing, get_subscription, Subscription, SubscriptionReport, MONTHLY_INTERVAL,
};
