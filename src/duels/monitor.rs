use std::{
    fmt::{self, Display},
    time::Duration,
};

use reqwest::Client;

use super::{get_duel, Duel};

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CHECKS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    pub interval: Duration,
    pub max_checks: u32,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_checks: DEFAULT_MAX_CHECKS,
        }
    }
}

/// Why the monitor stopped, with the number of completed checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorOutcome {
    Finished { checks: u32 },
    Exhausted { checks: u32 },
    Failed { checks: u32 },
}

/// One status line of the monitor.
pub struct MonitorUpdate<'a> {
    /// 1-based check number.
    pub check: u32,
    pub duel: &'a Duel,
}

impl Display for MonitorUpdate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let duel = self.duel;

        writeln!(
            f,
            "\n[Update {}] Round {} - Status: {}",
            self.check, duel.current_round_number, duel.status
        )?;
        for team in &duel.teams {
            writeln!(
                f,
                "  Team {}: {} HP ({}x)",
                team.name, team.health, team.current_multiplier
            )?;
        }

        Ok(())
    }
}

/// Polls a duel until it finishes, printing an update per check. The first
/// failed check is printed and stops the monitor.
pub async fn monitor_duel(
    client: &Client,
    game_server_url: &str,
    duel_id: &str,
    settings: MonitorSettings,
) -> MonitorOutcome {
    println!("Monitoring game {duel_id}...");

    for check in 1..=settings.max_checks {
        let duel = match get_duel(client, game_server_url, duel_id).await {
            Ok(value) => Duel::from_value(&value).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        let duel = match duel {
            Ok(duel) => duel,
            Err(error) => {
                tracing::warn!(check, %error, "duel check failed");
                println!("Monitor error: {error}");
                return MonitorOutcome::Failed { checks: check - 1 };
            }
        };

        print!("{}", MonitorUpdate { check, duel: &duel });

        if duel.is_finished() {
            println!("\nGame finished! Stopping monitor.");
            return MonitorOutcome::Finished { checks: check };
        }
        if check < settings.max_checks {
            tokio::time::sleep(settings.interval).await;
        }
    }

    MonitorOutcome::Exhausted {
        checks: settings.max_checks,
    }
}
