use error_stack::{Result, ResultExt};

use geoguessr_explorer::{
    auth, challenges,
    client::build_client,
    command::Command,
    config::Config,
    duels,
    error::ApplicationError,
    feed, games, maps, profiles, social, subscriptions,
    telemetry::{get_tracing_subscriber, init_subscriber, VERBOSE_FLAG},
};

/// Shown when a command needs the session cookie and none is configured.
const COOKIE_SETUP: &str = "set GEOGUESSR_COOKIE to the value of the _ncfa cookie: \
sign in on geoguessr.com, open the developer tools and copy it from the site's cookies \
(or run the sign-in command)";

#[tokio::main]
async fn main() -> Result<(), ApplicationError> {
    let verbose = std::env::args().any(|arg| arg == VERBOSE_FLAG);
    // reports go to stdout, logs stay out of their way
    init_subscriber(get_tracing_subscriber(std::io::stderr, verbose))?;

    let config = Config::read_from_env().change_context(ApplicationError::InvalidOption {
        option: String::from("command"),
    })?;
    let command = config.application.command;
    let options = &config.application.options;
    let api = config.endpoints.api_url.as_str();
    let game_server = config.endpoints.game_server_url.as_str();

    let cookie = if command.requires_cookie() {
        Some(
            config
                .credentials
                .require_cookie()
                .change_context(ApplicationError::MissingCredentials {})
                .attach_printable(COOKIE_SETUP)?,
        )
    } else {
        None
    };
    let client = build_client(cookie)?;
    tracing::debug!(?command, "running command");

    match command {
        Command::SignIn => auth::run_sign_in(api, options, &config.credentials).await,
        Command::AuthStatus => auth::run_auth_status(&client, api).await,
        Command::Profile => profiles::show_profile(&client, api).await,
        Command::SearchUsers => profiles::search(&client, api, options).await,
        Command::CompareUsers => profiles::compare(&client, api, options).await,
        Command::Friends => social::run(&client, api).await,
        Command::Activity => feed::run(&client, api, options).await,
        Command::Challenge => challenges::show_challenge(&client, api, options).await,
        Command::Leaderboard => challenges::show_leaderboard(&client, api, options).await,
        Command::Performance => challenges::analyze_performance(&client, api, options).await,
        Command::Game => games::show_game(&client, api, options).await,
        Command::Streak => games::start_streak(&client, api, options).await,
        Command::SearchMaps => maps::search(&client, api, options).await,
        Command::BrowseMaps => maps::browse(&client, api, options).await,
        Command::Subscription => subscriptions::show_subscription(&client, api).await,
        Command::Plans => subscriptions::compare_plans(&client, api, options).await,
        Command::Duel => duels::show_duel(&client, game_server, options).await,
        Command::DuelMonitor => duels::run_monitor(&client, game_server, options).await,
        Command::Replay => duels::show_replay(&client, game_server, options).await,
        Command::ReplayCompare => duels::compare_replays(&client, game_server, options).await,
        Command::ReplayRounds => duels::replay_rounds(&client, game_server, options).await,
    }
}
