use chrono::Utc;
use error_stack::{Result, ResultExt};
use reqwest::Client;

use crate::{
    auth::{
        check_auth_status, sign_in, verify_sign_in, AuthStatusReport, SignInOutcome,
        SignInReport, NEXT_STEPS, SIGN_IN_WARNING,
    },
    client::build_session_client,
    command::Options,
    config::CredentialsConfig,
    error::{http_error, ApplicationError},
    prompt::confirm,
};

/// Signs in with `GEOGUESSR_EMAIL` and `GEOGUESSR_PASSWORD`, then checks the
/// new session works.
///
/// `--yes` skips the confirmation prompt.
///
/// # Errors
/// - If the credentials are not configured
/// - If the sign in request fails for another reason than bad credentials
pub async fn run_sign_in(
    base_url: &str,
    options: &Options,
    credentials: &CredentialsConfig,
) -> Result<(), ApplicationError> {
    println!("{SIGN_IN_WARNING}");
    if !options.has_flag("--yes") && !confirm("Do you understand and wish to proceed?", false)? {
        println!("Exiting...");
        return Ok(());
    }

    let (email, password) = credentials
        .require_login()
        .change_context(ApplicationError::MissingCredentials {})?;

    let client = build_session_client()?;
    let outcome = sign_in(&client, base_url, email, password)
        .await
        .map_err(|e| http_error(e, &[]))?;

    let (user, session_cookie) = match outcome {
        SignInOutcome::InvalidCredentials => {
            println!("❌ Invalid email or password");
            return Ok(());
        }
        SignInOutcome::SignedIn {
            user,
            session_cookie,
        } => (user, session_cookie),
    };
    tracing::info!(nick = %user.nick, "signed in");

    print!(
        "{}",
        SignInReport {
            user: &user,
            session_cookie: session_cookie.as_ref(),
        }
    );

    match verify_sign_in(&client, base_url).await {
        Ok(Some(nick)) => println!("\n✅ Verified: Signed in as {nick}"),
        Ok(None) => println!("❌ Not signed in"),
        Err(error) => println!("Error verifying sign in: {error}"),
    }

    println!("\n{NEXT_STEPS}");
    Ok(())
}

/// Reports whether the configured cookie is accepted.
///
/// # Errors
/// - If the request fails for another reason than a rejected cookie
pub async fn run_auth_status(client: &Client, base_url: &str) -> Result<(), ApplicationError> {
    let status = check_auth_status(client, base_url)
        .await
        .map_err(|e| http_error(e, &[]))?;

    print!(
        "{}",
        AuthStatusReport {
            status: &status,
            now: Utc::now(),
        }
    );

    if status.is_authenticated() {
        println!("\n✅ Authentication verified!");
    } else {
        println!("\n❌ Not authenticated");
    }

    Ok(())
}
