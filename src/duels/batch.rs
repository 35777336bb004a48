use std::fmt::Display;

use futures::future::join_all;
use reqwest::Client;

use crate::duels::{get_replay, ReplayAnalysis, ReplayComparisonEntry, ReplayEvent, ReplayKey};

/// A fetched, non-empty replay taking part in a comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparedReplay {
    /// 1-based position among the replays that were fetched.
    pub index: usize,
    pub player_id: String,
    pub analysis: ReplayAnalysis,
}

impl ComparedReplay {
    pub fn entry(&self) -> ReplayComparisonEntry<'_> {
        ReplayComparisonEntry {
            index: self.index,
            player_id: &self.player_id,
            analysis: &self.analysis,
        }
    }
}

/// Several players' replays of the same round.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayComparison {
    /// Players whose replay could not be fetched, with the reason.
    pub failures: Vec<(String, String)>,
    pub compared: Vec<ComparedReplay>,
}

impl ReplayComparison {
    /// Splits fetch results into failures and analyses.
    ///
    /// Only fetched replays are numbered. An empty replay keeps its number but
    /// is left out of the comparison.
    pub fn from_results<I, E>(results: I) -> Self
    where
        I: IntoIterator<Item = (String, Result<Vec<ReplayEvent>, E>)>,
        E: Display,
    {
        let mut comparison = Self::default();
        let mut fetched = 0;

        for (player_id, result) in results {
            let events = match result {
                Ok(events) => events,
                Err(error) => {
                    comparison.failures.push((player_id, error.to_string()));
                    continue;
                }
            };
            fetched += 1;

            if let Some(analysis) = ReplayAnalysis::analyze(&events) {
                comparison.compared.push(ComparedReplay {
                    index: fetched,
                    player_id,
                    analysis,
                });
            }
        }

        comparison
    }
}

/// Fetches every player's replay of one round concurrently.
#[tracing::instrument(name = "compare replays", level = "debug", skip_all, fields(duel_id = duel_id, round = round, players = players.len()))]
pub async fn compare_player_replays(
    client: &Client,
    game_server_url: &str,
    duel_id: &str,
    round: u32,
    players: &[&str],
) -> ReplayComparison {
    let replays = join_all(players.iter().map(|player_id| {
        get_replay(
            client,
            game_server_url,
            ReplayKey {
                player_id,
                duel_id,
                round,
            },
        )
    }))
    .await;

    ReplayComparison::from_results(players.iter().map(ToString::to_string).zip(replays))
}

/// One round of a player's duel, fetched or not.
#[derive(Debug)]
pub struct RoundReplay {
    pub round: u32,
    pub events: Result<Vec<ReplayEvent>, reqwest::Error>,
}

/// Fetches rounds 1 to `rounds` one after another. A failed round does not
/// stop the ones after it.
#[tracing::instrument(name = "get round replays", level = "debug", skip_all, fields(player_id = player_id, duel_id = duel_id, rounds = rounds))]
pub async fn get_round_replays(
    client: &Client,
    game_server_url: &str,
    player_id: &str,
    duel_id: &str,
    rounds: u32,
) -> Vec<RoundReplay> {
    let mut replays = Vec::new();
    for round in 1..=rounds {
        let key = ReplayKey {
            player_id,
            duel_id,
            round,
        };
        let events = get_replay(client, game_server_url, key).await;
        if let Err(error) = &events {
            tracing::warn!(round, %error, "failed to fetch round replay");
        }
        replays.push(RoundReplay { round, events });
    }

    replays
}
