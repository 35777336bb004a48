use std::{env, ffi::OsStr, fmt::Display};

use error_stack::{Context, Result, ResultExt};
use secrecy::Secret;

use crate::{
    command::{get_command, Command, Options},
    telemetry::VERBOSE_FLAG,
};

/// The default root of the public web API.
pub const DEFAULT_API_URL: &str = "https://www.geoguessr.com/api";
/// The default root of the game server, which hosts duels and replays.
pub const DEFAULT_GAME_SERVER_URL: &str = "https://game-server.geoguessr.com/api";

pub struct Config {
    pub application: ApplicationConfig,
    pub credentials: CredentialsConfig,
    pub endpoints: EndpointConfig,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct ApplicationConfig {
    /// The command the user asked to run.
    pub command: Command,
    /// Everything passed after the command.
    pub options: Options,
}

#[allow(clippy::module_name_repetitions)]
pub struct CredentialsConfig {
    /// The value of the `_ncfa` session cookie.
    cookie: Option<Secret<String>>,
    /// The account email, only used to sign in.
    email: Option<String>,
    /// The account password, only used to sign in.
    password: Option<Secret<String>>,
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Root of the web API, e.g. `https://www.geoguessr.com/api`.
    pub api_url: String,
    /// Root of the game server API, e.g. `https://game-server.geoguessr.com/api`.
    pub game_server_url: String,
}

#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum ConfigError {
    /// The variable that was missing when trying to load it.
    LoadVariable { variable: String },
    InvalidOption {
        /// The invalid option the user passed.
        option: String,
    },
    /// No valid command was passed as the first argument.
    UnknownCommand,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadVariable { variable } => {
                write!(f, "Failed to load environment variable '{variable}'")
            }
            Self::InvalidOption { option } => write!(f, "Invalid option '{option}'"),
            Self::UnknownCommand => write!(f, "Failed to determine the command to run"),
        }
    }
}
impl Context for ConfigError {}

impl Config {
    /// Reads configuration values from environment and arguments passed to the application.
    ///
    /// # Errors
    /// - If unable to load a section of the config.
    pub fn read_from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let args = env::args().skip(1).collect::<Vec<_>>();

        Ok(Self {
            application: ApplicationConfig::read_from_args(args)
                .attach_printable("When loading application configuration")?,
            credentials: CredentialsConfig::read_from_env(),
            endpoints: EndpointConfig::read_from_env(),
        })
    }
}

impl ApplicationConfig {
    /// Reads the application configuration from the arguments passed to the
    /// binary, without the binary name.
    ///
    /// # Errors
    /// Errors if the user provides no command or an unknown one.
    pub fn read_from_args(mut args: Vec<String>) -> Result<Self, ConfigError> {
        args.retain(|arg| arg != VERBOSE_FLAG);
        let command = get_command(&args).change_context(ConfigError::UnknownCommand)?;
        args.remove(0);

        Ok(Self {
            command,
            options: Options::new(args),
        })
    }
}

fn load_env<U>(variable: U) -> Result<String, ConfigError>
where
    U: AsRef<OsStr> + Into<String> + Clone,
{
    env::var(variable.clone()).change_context(ConfigError::LoadVariable {
        variable: variable.into(),
    })
}

/// Loads an optional variable, treating an empty value as unset.
fn load_optional_env(variable: &str) -> Option<String> {
    load_env(variable).ok().filter(|value| !value.trim().is_empty())
}

impl CredentialsConfig {
    /// Reads every credential the application knows about. None of them are
    /// required at this point, commands ask for what they need.
    fn read_from_env() -> Self {
        Self::new(
            load_optional_env("GEOGUESSR_COOKIE"),
            load_optional_env("GEOGUESSR_EMAIL"),
            load_optional_env("GEOGUESSR_PASSWORD"),
        )
    }

    pub fn new(cookie: Option<String>, email: Option<String>, password: Option<String>) -> Self {
        Self {
            cookie: cookie.map(Secret::new),
            email,
            password: password.map(Secret::new),
        }
    }

    /// Returns the session cookie.
    ///
    /// # Errors
    /// If `GEOGUESSR_COOKIE` is not set.
    pub fn require_cookie(&self) -> Result<&Secret<String>, ConfigError> {
        self.cookie
            .as_ref()
            .ok_or(ConfigError::LoadVariable {
                variable: "GEOGUESSR_COOKIE".to_string(),
            })
            .attach_printable("suggestion: set it with export GEOGUESSR_COOKIE='your_cookie_value'")
    }

    /// Returns the email and password used to sign in.
    ///
    /// # Errors
    /// If either `GEOGUESSR_EMAIL` or `GEOGUESSR_PASSWORD` is not set.
    pub fn require_login(&self) -> Result<(&str, &Secret<String>), ConfigError> {
        let email = self
            .email
            .as_deref()
            .ok_or(ConfigError::LoadVariable {
                variable: "GEOGUESSR_EMAIL".to_string(),
            })
            .attach_printable(
                "suggestion: set it with export GEOGUESSR_EMAIL='your_email@example.com'",
            )?;
        let password = self
            .password
            .as_ref()
            .ok_or(ConfigError::LoadVariable {
                variable: "GEOGUESSR_PASSWORD".to_string(),
            })
            .attach_printable("suggestion: set it with export GEOGUESSR_PASSWORD='your_password'")
            .attach_printable("never commit credentials to version control")?;

        Ok((email, password))
    }
}

impl EndpointConfig {
    fn read_from_env() -> Self {
        Self {
            api_url: load_optional_env("GEOGUESSR_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            game_server_url: load_optional_env("GEOGUESSR_GAME_SERVER_URL")
                .unwrap_or_else(|| DEFAULT_GAME_SERVER_URL.to_string()),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            game_server_url: DEFAULT_GAME_SERVER_URL.to_string(),
        }
    }
}
