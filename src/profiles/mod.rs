mod compare_users;
mod profile;
mod run;
mod search_users;

pub use compare_users::{compare_users, Comparison, ComparisonReport};
pub use profile::{get_profile, Profile, ProfileReport, ProfileUser};
pub(crate) use profile::write_competitive;
pub use run::{compare, search, show_profile};
pub use search_users::{search_users, UserSearchReport};

#[cfg(test)]
pub(crate) use profile::tests::profile_json;
