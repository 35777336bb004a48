mod game;
mod run;
mod streak;

pub use game::{get_game, Game, GamePlayer, GameStateReport, Guess, GuessDistance, Round};
pub use run::{show_game, start_streak};
pub use streak::{
    create_streak_game, StreakGameReport, StreakPreset, StreakSettings, StreakType,
};
