use std::fmt;

use error_stack::{Context, Report, ResultExt};

use crate::telemetry::VERBOSE_FLAG;

/// Every subcommand the binary understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SignIn,
    AuthStatus,
    Profile,
    SearchUsers,
    CompareUsers,
    Friends,
    Activity,
    Challenge,
    Leaderboard,
    Performance,
    Game,
    Streak,
    SearchMaps,
    BrowseMaps,
    Subscription,
    Plans,
    Duel,
    DuelMonitor,
    Replay,
    ReplayCompare,
    ReplayRounds,
}

impl<'a> Command {
    /// Retrieves all the valid values that will be parsed with [`TryFrom`]
    pub fn get_allowed_types() -> &'a [&'static str] {
        &[
            "sign-in",
            "auth-status",
            "profile",
            "search-users",
            "compare-users",
            "friends",
            "activity",
            "challenge",
            "leaderboard",
            "performance",
            "game",
            "streak",
            "search-maps",
            "browse-maps",
            "subscription",
            "plans",
            "duel",
            "duel-monitor",
            "replay",
            "replay-compare",
            "replay-rounds",
        ]
    }

    /// Whether the command talks to endpoints that need the `_ncfa` cookie.
    pub fn requires_cookie(self) -> bool {
        !matches!(
            self,
            Command::SignIn | Command::SearchMaps | Command::BrowseMaps | Command::Plans
        )
    }
}

/// A struct to represent failures to convert a given [`String`] into a [`Command`].
pub struct CommandConversionError(String);

impl TryFrom<String> for Command {
    type Error = CommandConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let command = match value.as_str() {
            "sign-in" => Command::SignIn,
            "auth-status" => Command::AuthStatus,
            "profile" => Command::Profile,
            "search-users" => Command::SearchUsers,
            "compare-users" => Command::CompareUsers,
            "friends" => Command::Friends,
            "activity" => Command::Activity,
            "challenge" => Command::Challenge,
            "leaderboard" => Command::Leaderboard,
            "performance" => Command::Performance,
            "game" => Command::Game,
            "streak" => Command::Streak,
            "search-maps" => Command::SearchMaps,
            "browse-maps" => Command::BrowseMaps,
            "subscription" => Command::Subscription,
            "plans" => Command::Plans,
            "duel" => Command::Duel,
            "duel-monitor" => Command::DuelMonitor,
            "replay" => Command::Replay,
            "replay-compare" => Command::ReplayCompare,
            "replay-rounds" => Command::ReplayRounds,
            _ => return Err(CommandConversionError(value)),
        };

        Ok(command)
    }
}

#[derive(Debug)]
pub enum CommandRetrievalError {
    MissingCommand {},
    ParseError { command: String },
}

impl fmt::Display for CommandRetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandRetrievalError::MissingCommand {} => write!(f, "No command was passed"),
            CommandRetrievalError::ParseError { command } => {
                write!(f, "Unknown command '{command}' passed")
            }
        }
    }
}

impl Context for CommandRetrievalError {}

fn allowed_types_suggestion() -> String {
    format!(
        "suggestion: valid commands are {}",
        Command::get_allowed_types()
            .iter()
            .map(|s| format!("'{s}'"))
            .collect::<Vec<_>>()
            .join(", ")
    )
}

/// Attempts to retrieve the command the user asked for: the first argument
/// passed to the binary, after any leading `--verbose`.
///
/// If the user did not provide any argument, [`CommandRetrievalError::MissingCommand`] is returned.
///
/// If the user provided an unknown command, [`CommandRetrievalError::ParseError`] is returned.
pub fn get_command(args: &[String]) -> Result<Command, Report<CommandRetrievalError>> {
    let command = args
        .iter()
        .find(|arg| *arg != VERBOSE_FLAG)
        .ok_or(CommandRetrievalError::MissingCommand {})
        .attach_printable_lazy(allowed_types_suggestion)?;

    let parsed_command = Command::try_from(command.clone())
        .map_err(|e| CommandRetrievalError::ParseError { command: e.0 })
        .attach_printable_lazy(allowed_types_suggestion)?;

    Ok(parsed_command)
}

/// The `--name value` options passed after the command.
#[derive(Debug, Clone, Default)]
pub struct Options {
    args: Vec<String>,
}

impl Options {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Returns the value following the first occurrence of `name`.
    ///
    /// A value that itself looks like an option is treated as missing.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).into_iter().next()
    }

    /// Returns the values following every occurrence of `name`, in order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.args
            .iter()
            .enumerate()
            .filter(|(_, arg)| *arg == name)
            // we want the next option passed
            .filter_map(|(pos, _)| self.args.get(pos + 1))
            .filter(|value| !value.starts_with("--"))
            .map(String::as_str)
            .collect()
    }

    /// Returns whether the flag `name` was passed at all.
    pub fn has_flag(&self, name: &str) -> bool {
        self.args.iter().any(|arg| arg == name)
    }

    /// Parses the value of `name`, if present.
    ///
    /// # Errors
    /// If the value is present but does not parse as `T`.
    pub fn parse<T: std::str::FromStr>(
        &self,
        name: &str,
    ) -> Result<Option<T>, Report<crate::error::ApplicationError>> {
        self.get(name)
            .map(|value| {
                value.parse::<T>().map_err(|_| {
                    Report::new(crate::error::ApplicationError::InvalidOption {
                        option: name.to_string(),
                    })
                    .attach_printable(format!("could not parse '{value}'"))
                })
            })
            .transpose()
    }
}
