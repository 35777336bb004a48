mod activity;
mod get_friends_activity;
mod run;

pub use activity::{Activity, ActivityKind, ActivityReport};
pub use get_friends_activity::get_friends_activity;
pub use run::{run, DEFAULT_EXPORT_PATH};
