use error_stack::{Report, Result};
use reqwest::{Client, StatusCode};

use crate::{
    challenges::{
        get_challenge, get_leaderboard, ChallengeReport, LeaderboardReport, PerformanceAnalysis,
        PerformanceReport,
    },
    client::extract_token,
    command::Options,
    error::{http_error, ApplicationError, StatusHint, EXPIRED_COOKIE_HINT},
    profiles::get_profile,
    prompt::option_or_prompt,
};

pub const NOT_PLAYED_HINT: StatusHint = (
    StatusCode::FORBIDDEN,
    "note: you may need to play the challenge first to view details",
);

/// Reads the challenge token from `--token`, accepting a full challenge URL.
fn challenge_token(options: &Options) -> Result<String, ApplicationError> {
    let input = option_or_prompt(options, "--token", "Enter challenge token (or URL)")?;
    let token = extract_token(&input);
    if token.is_empty() {
        return Err(Report::new(ApplicationError::InvalidOption {
            option: "--token".to_string(),
        })
        .attach_printable("challenge token cannot be empty"));
    }

    Ok(token.to_string())
}

/// Prints the settings and map of a challenge.
///
/// # Errors
/// - If no token is given
/// - If the challenge request fails
pub async fn show_challenge(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let token = challenge_token(options)?;
    let challenge = get_challenge(client, base_url, &token)
        .await
        .map_err(|e| http_error(e, &[NOT_PLAYED_HINT, EXPIRED_COOKIE_HINT]))?;

    println!("{}", ChallengeReport(&challenge));
    println!("✅ Successfully retrieved challenge information!");

    Ok(())
}

/// Prints the leaderboard of a challenge.
///
/// # Errors
/// - If no token is given
/// - If the highscores request fails
pub async fn show_leaderboard(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let token = challenge_token(options)?;
    let entries = get_leaderboard(client, base_url, &token)
        .await
        .map_err(|e| http_error(e, &[NOT_PLAYED_HINT, EXPIRED_COOKIE_HINT]))?;

    print!("{}", LeaderboardReport(&entries));
    if !entries.is_empty() {
        println!("\n✅ Successfully retrieved leaderboard!");
    }

    Ok(())
}

/// Compares the signed in user's score on a challenge to the rest of the board.
///
/// # Errors
/// - If no token is given
/// - If the profile or highscores request fails
pub async fn analyze_performance(
    client: &Client,
    base_url: &str,
    options: &Options,
) -> Result<(), ApplicationError> {
    let token = challenge_token(options)?;

    let profile = get_profile(client, base_url)
        .await
        .map_err(|e| http_error(e, &[EXPIRED_COOKIE_HINT]))?;
    let entries = get_leaderboard(client, base_url, &token)
        .await
        .map_err(|e| http_error(e, &[NOT_PLAYED_HINT, EXPIRED_COOKIE_HINT]))?;

    let Some(analysis) = PerformanceAnalysis::analyze(&entries, &profile.user.id) else {
        println!("❌ You have not played this challenge yet.");
        return Ok(());
    };

    print!(
        "{}",
        PerformanceReport {
            analysis: &analysis,
            entries: &entries,
            user_id: &profile.user.id,
        }
    );
    println!("\n✅ Analysis complete!");

    Ok(())
}
