mod friends;
mod run;

pub use friends::{get_friends, FriendStats, FriendsReport};
pub use run::run;
