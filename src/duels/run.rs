use std::{path::Path, str::FromStr, time::Duration};

use error_stack::{Report, Result, ResultExt};
use reqwest::{Client, StatusCode};

use crate::{
    command::Options,
    duels::{
        compare_player_replays, csv_rows, get_duel, get_replay, get_round_replays, monitor_duel,
        BehaviorReport, Duel, DuelAnalysisReport, DuelReport, MonitorSettings, ReplayKey,
        ReplaySummaryReport, TimelineReport, CSV_HEADER, DEFAULT_TIMELINE_EVENTS,
    },
    error::{http_error, ApplicationError, StatusHint, EXPIRED_COOKIE_HINT},
    export::{write_csv, write_json},
    prompt::option_or_prompt,
};

pub const DEFAULT_DUEL_EXPORT_PATH: &str = "duel_state.json";
pub const DEFAULT_REPLAY_CSV_PATH: &str = "replay_events.csv";
pub const DEFAULT_REPLAY_JSON_PATH: &str = "replay_events.json";

const DUEL_NOT_FOUND_HINT: StatusHint = (
    StatusCode::NOT_FOUND,
    "note: no duel or replay was found for these ids",
);

fn required(options: &Options, option: &str, prompt: &str) -> Result<String, ApplicationError> {
    let value = option_or_prompt(options, option, prompt)?;
    if value.is_empty() {
        return Err(Report::new(ApplicationError::InvalidOption {
            option: option.to_string(),
        })
        .attach_printable(format!("{option} cannot be empty")));
    }

    Ok(value)
}

fn required_number<T: FromStr>(
    options: &Options,
    option: &str,
    prompt: &str,
) -> Result<T, ApplicationError> {
    let value = required(options, option, prompt)?;
    value.parse().map_err(|_| {
        Report::new(ApplicationError::InvalidOption {
            option: option.to_string(),
        })
        .attach_printable(format!("could not parse '{value}'"))
    })
}

/// The path of an optional export flag, `default` when passed without one.
fn export_path<'a>(options: &'a Options, flag: &str, default: &'a str) -> Option<&'a str> {
    options
        .has_flag(flag)
        .then(|| options.get(flag).unwrap_or(default))
}

/// Prints the state of the duel given by `--id`, with `--analyze` adding the
/// damage and player sections and `--export [PATH]` saving the raw document.
///
/// # Errors
/// - If no id is given
/// - If the duel request fails or the document cannot be read
/// - If the export cannot be written
pub async fn show_duel(
    client: &Client,
    game_server_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let duel_id = required(options, "--id", "Enter duel id")?;

    let raw = get_duel(client, game_server_url, &duel_id)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT, DUEL_NOT_FOUND_HINT]))?;
    let duel = Duel::from_value(&raw)
        .change_context(ApplicationError::ParseError {})
        .attach_printable_lazy(|| format!("when reading duel {duel_id}"))?;

    print!("{}", DuelReport(&duel));
    if options.has_flag("--analyze") {
        print!("{}", DuelAnalysisReport(&duel));
    }

    if let Some(path) = export_path(options, "--export", DEFAULT_DUEL_EXPORT_PATH) {
        write_json(Path::new(path), &raw)?;
        println!("\n💾 Game data exported to {path}");
    }

    Ok(())
}

/// Follows the duel given by `--id` until it finishes.
///
/// # Errors
/// - If no id is given
/// - If `--interval` or `--max-checks` is not a number
pub async fn run_monitor(
    client: &Client,
    game_server_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let duel_id = required(options, "--id", "Enter duel id")?;
    let defaults = MonitorSettings::default();
    let settings = MonitorSettings {
        interval: options
            .parse::<u64>("--interval")?
            .map_or(defaults.interval, Duration::from_secs),
        max_checks: options
            .parse::<u32>("--max-checks")?
            .unwrap_or(defaults.max_checks),
    };

    let outcome = monitor_duel(client, game_server_url, &duel_id, settings).await;
    tracing::info!(?outcome, "monitor stopped");

    Ok(())
}

/// Prints the analysis of one player's round replay.
///
/// # Errors
/// - If an id or the round is missing
/// - If the replay request fails
/// - If an export cannot be written
pub async fn show_replay(
    client: &Client,
    game_server_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let player_id = required(options, "--player", "Enter player id")?;
    let duel_id = required(options, "--duel", "Enter duel id")?;
    let round = required_number(options, "--round", "Enter round number")?;
    let limit = options
        .parse::<usize>("--timeline")?
        .unwrap_or(DEFAULT_TIMELINE_EVENTS);
    let key = ReplayKey {
        player_id: &player_id,
        duel_id: &duel_id,
        round,
    };

    let events = get_replay(client, game_server_url, key)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT, DUEL_NOT_FOUND_HINT]))?;

    print!("{}", ReplaySummaryReport { key, events: &events });
    print!("{}", BehaviorReport(&events));
    print!(
        "{}",
        TimelineReport {
            events: &events,
            limit,
        }
    );

    if let Some(path) = export_path(options, "--export-csv", DEFAULT_REPLAY_CSV_PATH) {
        if events.is_empty() {
            println!("No events to export");
        } else {
            write_csv(Path::new(path), &CSV_HEADER, csv_rows(&events))?;
            println!("\n💾 Replay data exported to {path}");
        }
    }
    if let Some(path) = export_path(options, "--export-json", DEFAULT_REPLAY_JSON_PATH) {
        write_json(Path::new(path), &events)?;
        println!("\n💾 Replay data exported to {path}");
    }

    Ok(())
}

/// Compares the replays of every `--player` for one round. Players whose replay
/// cannot be fetched are reported first and left out.
///
/// # Errors
/// - If the duel id, round or players are missing
pub async fn compare_replays(
    client: &Client,
    game_server_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let duel_id = required(options, "--duel", "Enter duel id")?;
    let round = required_number(options, "--round", "Enter round number")?;
    let players = options.get_all("--player");
    if players.is_empty() {
        return Err(Report::new(ApplicationError::InvalidOption {
            option: "--player".to_string(),
        })
        .attach_printable("pass --player once per player to compare"));
    }

    println!("\n=== Comparing Player Replays ===");
    let comparison =
        compare_player_replays(client, game_server_url, &duel_id, round, &players).await;
    for (player_id, error) in &comparison.failures {
        println!("Error fetching replay for {player_id}: {error}");
    }

    println!("\nComparison Results:");
    for replay in &comparison.compared {
        print!("{}", replay.entry());
    }

    Ok(())
}

/// Analyses rounds 1 to `--rounds` of a player's duel. A round that cannot be
/// fetched is reported and skipped.
///
/// # Errors
/// - If an id or the round count is missing
pub async fn replay_rounds(
    client: &Client,
    game_server_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let player_id = required(options, "--player", "Enter player id")?;
    let duel_id = required(options, "--duel", "Enter duel id")?;
    let rounds: u32 = required_number(options, "--rounds", "How many rounds to analyze?")?;

    println!(
        "\n=== Analyzing all rounds for player {}... ===",
        super::short_id(&player_id)
    );

    for replay in get_round_replays(client, game_server_url, &player_id, &duel_id, rounds).await {
        let round = replay.round;
        println!("\n--- Round {round} ---");
        match replay.events {
            Ok(events) => {
                let key = ReplayKey {
                    player_id: &player_id,
                    duel_id: &duel_id,
                    round,
                };
                print!("{}", ReplaySummaryReport { key, events: &events });
                print!("{}", BehaviorReport(&events));
            }
            Err(error) => println!("Error in round {round}: {error}"),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(values: &[&str]) -> Options {
        Options::new(values.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn export_path_defaults() {
        let given = options(&["--export", "out.json", "--analyze"]);
        assert_eq!(
            export_path(&given, "--export", DEFAULT_DUEL_EXPORT_PATH),
            Some("out.json")
        );

        let bare = options(&["--export", "--analyze"]);
        assert_eq!(
            export_path(&bare, "--export", DEFAULT_DUEL_EXPORT_PATH),
            Some(DEFAULT_DUEL_EXPORT_PATH)
        );

        assert_eq!(export_path(&options(&[]), "--export", "x"), None);
    }

    #[test]
    fn round_must_be_a_number() {
        let error = required_number::<u32>(&options(&["--round", "first"]), "--round", "")
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            ApplicationError::InvalidOption { option } if option == "--round"
        ));
    }
}
