use error_stack::{Report, Result};
use reqwest::{Client, StatusCode};

use crate::{
    client::extract_token,
    command::Options,
    error::{http_error, ApplicationError, StatusHint, EXPIRED_COOKIE_HINT},
    games::{
        create_streak_game, get_game, GameStateReport, StreakGameReport, StreakPreset,
        StreakSettings, StreakType,
    },
    prompt::{confirm, option_or_prompt, select},
};

const GAME_NOT_FOUND_HINT: StatusHint = (
    StatusCode::NOT_FOUND,
    "note: the game was not found, check the token",
);

/// Prints the state of the game given by `--token`.
///
/// # Errors
/// - If no token is given
/// - If the game request fails
pub async fn show_game(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let input = option_or_prompt(options, "--token", "Enter game token (or URL)")?;
    let token = extract_token(&input);
    if token.is_empty() {
        return Err(Report::new(ApplicationError::InvalidOption {
            option: "--token".to_string(),
        })
        .attach_printable("game token cannot be empty"));
    }

    let game = get_game(client, base_url, token)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT, GAME_NOT_FOUND_HINT]))?;

    print!("{}", GameStateReport(&game));
    println!("\n✅ Successfully retrieved game state!");

    Ok(())
}

/// Reads `--time-limit`, asking for it when missing. An unreadable answer to
/// the prompt means no limit.
fn time_limit(options: &Options) -> Result<u32, ApplicationError> {
    if let Some(seconds) = options.parse::<u32>("--time-limit")? {
        return Ok(seconds);
    }

    Ok(
        option_or_prompt(options, "--time-limit", "Time limit in seconds (0 for none)")?
            .parse()
            .unwrap_or(0),
    )
}

fn custom_settings(options: &Options) -> Result<StreakSettings, ApplicationError> {
    let forbid_moving = !confirm("Allow moving?", true)?;
    let forbid_rotating = !confirm("Allow panning?", true)?;
    let forbid_zooming = !confirm("Allow zooming?", true)?;
    let time_limit = time_limit(options)?;

    Ok(StreakSettings {
        forbid_moving,
        forbid_rotating,
        forbid_zooming,
        time_limit,
        streak_type: StreakType::CountryStreak,
    })
}

/// Resolves `--preset` to settings, showing a menu when it is missing.
fn streak_settings(options: &Options) -> Result<StreakSettings, ApplicationError> {
    let name = match options.get("--preset") {
        Some(name) => name.to_string(),
        None => {
            let mut items: Vec<&str> = StreakPreset::ALL
                .iter()
                .map(|preset| preset.description())
                .collect();
            items.push("Custom");

            let index = select("Choose a streak preset", &items)?;
            StreakPreset::ALL
                .get(index)
                .map_or("custom", |preset| preset.name())
                .to_string()
        }
    };

    if name.eq_ignore_ascii_case("custom") {
        return custom_settings(options);
    }

    StreakPreset::from_name(&name)
        .map(StreakPreset::settings)
        .ok_or_else(|| {
            Report::new(ApplicationError::InvalidOption {
                option: "--preset".to_string(),
            })
            .attach_printable(format!(
                "unknown preset {name:?}, expected one of easy, medium, hard, nmpz or custom"
            ))
        })
}

/// Starts a country streak with the settings of `--preset`.
///
/// # Errors
/// - If the preset is unknown
/// - If the game cannot be created
pub async fn start_streak(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let settings = streak_settings(options)?;
    tracing::info!(?settings, "starting country streak");

    let game = create_streak_game(client, base_url, &settings)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT]))?;

    print!(
        "{}",
        StreakGameReport {
            game: &game,
            settings: &settings,
        }
    );

    Ok(())
}
