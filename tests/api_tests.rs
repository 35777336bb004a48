//! Fetch functions exercised against a mock GeoGuessr server.

use std::time::Duration;

use geoguessr_explorer::{
    auth::{check_auth_status, sign_in, AuthStatus, SignInOutcome},
    challenges::{get_challenge, get_leaderboard, NOT_PLAYED_HINT},
    client::{build_client, build_session_client},
    duels::{
        compare_player_replays, get_duel, get_replay, get_round_replays, monitor_duel, Duel,
        MonitorOutcome, MonitorSettings, ReplayKey,
    },
    error::{http_error, ApplicationError, EXPIRED_COOKIE_HINT},
    feed::get_friends_activity,
    games::{create_streak_game, get_game, StreakPreset},
    maps::{browse_maps, search_maps, MapCategory},
    profiles::{compare_users, get_profile, Comparison},
    social::{get_friends, FriendStats},
    subscriptions::{get_plans, get_subscription, PlanComparison},
};
use secrecy::{ExposeSecret, Secret};
use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path, query_param, query_param_is_missing},
    Mock, MockServer, ResponseTemplate,
};

fn authenticated_client() -> reqwest::Client {
    build_client(Some(&Secret::new("session-value".to_string()))).unwrap()
}

fn anonymous_client() -> reqwest::Client {
    build_client(None).unwrap()
}

fn profile_body() -> Value {
    json!({
        "user": {
            "id": "5b68bcc7f438a60f64005817",
            "nick": "Plonker",
            "countryCode": "se",
            "created": "2019-03-04T10:00:00.000Z",
            "isProUser": true,
            "progress": { "level": 42, "xp": 123456 }
        },
        "email": "plonker@example.com"
    })
}

fn duel_body(status: &str) -> Value {
    json!({
        "gameId": "duel-1",
        "status": status,
        "currentRoundNumber": 2,
        "initialHealth": 6000,
        "teams": [
            { "id": "t1", "name": "red", "health": 6000, "currentMultiplier": 1 },
            { "id": "t2", "name": "blue", "health": 4200, "currentMultiplier": 1 }
        ],
        "rounds": [],
        "result": { "winningTeamId": "t1", "winnerStyle": "Knockout" }
    })
}

#[tokio::test]
async fn profile_request_carries_the_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/profiles"))
        .and(header("cookie", "_ncfa=session-value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let profile = get_profile(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap();

    assert_eq!(profile.user.nick, "Plonker");
    assert_eq!(profile.email.as_deref(), Some("plonker@example.com"));
}

#[tokio::test]
async fn rejected_cookie_is_reported_with_a_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/profiles"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let error = get_profile(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap_err();
    let report = http_error(error, &[EXPIRED_COOKIE_HINT]);

    assert!(matches!(
        report.current_context(),
        ApplicationError::HttpError {}
    ));
    assert!(format!("{report:?}").contains("your cookie may be invalid or expired"));
}

#[tokio::test]
async fn auth_status_treats_401_as_signed_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/profiles"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let status = check_auth_status(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap();

    assert!(matches!(status, AuthStatus::NotAuthenticated));
}

#[tokio::test]
async fn auth_status_with_a_valid_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body()))
        .mount(&mock_server)
        .await;

    let status = check_auth_status(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap();

    match status {
        AuthStatus::Authenticated(profile) => assert_eq!(profile.user.nick, "Plonker"),
        AuthStatus::NotAuthenticated => panic!("expected a signed in user"),
    }
}

#[tokio::test]
async fn sign_in_returns_the_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/accounts/signin"))
        .and(body_json(json!({ "email": "me@example.com", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "_ncfa=fresh-session; Path=/; HttpOnly")
                .set_body_json(json!({ "nick": "Plonker", "isProUser": false })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_session_client().unwrap();
    let outcome = sign_in(
        &client,
        &mock_server.uri(),
        "me@example.com",
        &Secret::new("hunter2".to_string()),
    )
    .await
    .unwrap();

    let SignInOutcome::SignedIn {
        user,
        session_cookie,
    } = outcome
    else {
        panic!("expected a successful sign in");
    };
    assert_eq!(user.nick, "Plonker");
    assert_eq!(session_cookie.unwrap().expose_secret(), "fresh-session");
}

#[tokio::test]
async fn sign_in_with_bad_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/accounts/signin"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let outcome = sign_in(
        &build_session_client().unwrap(),
        &mock_server.uri(),
        "me@example.com",
        &Secret::new("wrong".to_string()),
    )
    .await
    .unwrap();

    assert!(matches!(outcome, SignInOutcome::InvalidCredentials));
}

#[tokio::test]
async fn feed_follows_pagination_tokens() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/feed/friends"))
        .and(query_param("paginationToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [{ "type": 7, "time": "2024-01-01T10:00:00Z" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/feed/friends"))
        .and(query_param_is_missing("paginationToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [
                { "type": 2, "time": "2024-01-02T10:00:00Z" },
                { "type": 6, "time": "2024-01-02T09:00:00Z" }
            ],
            "paginationToken": "page-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // a third page is never requested because page 2 has no token
    let entries = get_friends_activity(&authenticated_client(), &mock_server.uri(), 3)
        .await
        .unwrap();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[2]["type"], 7);
}

#[tokio::test]
async fn feed_stops_at_the_requested_page_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/feed/friends"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "entries": [{ "type": 2 }],
            "paginationToken": "more"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let entries = get_friends_activity(&authenticated_client(), &mock_server.uri(), 1)
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn leaderboard_is_ranked_in_board_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/results/highscores/AbCd1234"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "game": { "created": "2024-01-01T12:00:00Z", "player": {
                    "id": "u1", "nick": "first", "totalScore": { "amount": "24500" },
                    "isProUser": true, "countryCode": "se" } } },
                { "game": { "created": "2024-01-01T13:00:00Z", "player": {
                    "id": "u2", "nick": "second", "totalScore": { "amount": 19000 } } } }
            ]
        })))
        .mount(&mock_server)
        .await;

    let entries = get_leaderboard(&authenticated_client(), &mock_server.uri(), "AbCd1234")
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].score, 24_500);
    assert!(entries[0].is_pro);
    assert_eq!(entries[1].rank, 2);
    assert_eq!(entries[1].username, "second");
    assert_eq!(entries[1].score, 19_000);
}

#[tokio::test]
async fn game_state_is_requested_for_the_web_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/games/GaMe1234"))
        .and(query_param("client", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "GaMe1234",
            "mode": "standard",
            "roundCount": 5,
            "round": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let game = get_game(&authenticated_client(), &mock_server.uri(), "GaMe1234")
        .await
        .unwrap();

    assert_eq!(game.token, "GaMe1234");
    assert_eq!(game.round_count, Some(5));
}

#[tokio::test]
async fn streak_game_posts_the_preset_settings() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/games/streak"))
        .and(body_json(json!({
            "forbidMoving": true,
            "forbidRotating": false,
            "forbidZooming": true,
            "timeLimit": 30,
            "streakType": "CountryStreak"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "StReAk",
            "mode": "streak",
            "rounds": [{ "lat": 1.0, "lng": 2.0, "streakLocationCode": "br" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let game = create_streak_game(
        &authenticated_client(),
        &mock_server.uri(),
        &StreakPreset::Hard.settings(),
    )
    .await
    .unwrap();

    assert_eq!(game.token, "StReAk");
    assert_eq!(
        game.rounds[0].streak_location_code.as_deref(),
        Some("br")
    );
}

#[tokio::test]
async fn map_search_needs_no_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/search/map"))
        .and(query_param("q", "urban world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "m1", "name": "Urban World", "creator": { "nick": "alpha" }, "difficulty": "Hard" }
        ])))
        .mount(&mock_server)
        .await;

    let maps = search_maps(&anonymous_client(), &mock_server.uri(), "urban world")
        .await
        .unwrap();

    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].difficulty().as_deref(), Some("Hard"));

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("cookie").is_none());
}

#[tokio::test]
async fn browse_uses_the_category_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/maps/browse/hot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let maps = browse_maps(&anonymous_client(), &mock_server.uri(), MapCategory::Hot)
        .await
        .unwrap();

    assert!(maps.is_empty());
}

#[tokio::test]
async fn missing_subscription_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/subscriptions"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let subscription = get_subscription(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap();

    assert!(subscription.is_none());
}

#[tokio::test]
async fn subscription_server_error_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/subscriptions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let error = get_subscription(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn plans_are_compared_per_currency() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/subscriptions/plans"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "currency": "SEK", "product": 2, "interval": 1, "price": 35.0, "pricePerMonth": 35.0 },
            { "currency": "SEK", "product": 2, "interval": 2, "price": 300.0, "pricePerMonth": 25.0 }
        ])))
        .mount(&mock_server)
        .await;

    let plans = get_plans(&anonymous_client(), &mock_server.uri())
        .await
        .unwrap();
    let comparison = PlanComparison::new(&plans);

    let saved = comparison.saving_of(&plans[1]).unwrap();
    assert!((saved - 120.0).abs() < f64::EPSILON);
    assert_eq!(comparison.currencies(), ["SEK"]);
}

#[tokio::test]
async fn duel_and_replay_live_on_the_game_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duels/duel-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duel_body("Finished")))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/replays/player-1/duel-1/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "time": 1000, "type": "MapDisplay", "payload": { "isActive": true } },
            { "time": 4000, "type": "GuessWithLatLng", "payload": { "lat": 10.0, "lng": 20.0 } }
        ])))
        .mount(&mock_server)
        .await;

    let client = authenticated_client();
    let raw = get_duel(&client, &mock_server.uri(), "duel-1").await.unwrap();
    let duel = Duel::from_value(&raw).unwrap();
    assert!(duel.is_finished());
    assert_eq!(duel.winner().unwrap().name, "red");

    let events = get_replay(
        &client,
        &mock_server.uri(),
        ReplayKey {
            player_id: "player-1",
            duel_id: "duel-1",
            round: 2,
        },
    )
    .await
    .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].kind, "GuessWithLatLng");
}

#[tokio::test]
async fn monitor_stops_when_the_duel_finishes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duels/duel-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duel_body("Finished")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = monitor_duel(
        &authenticated_client(),
        &mock_server.uri(),
        "duel-1",
        MonitorSettings {
            interval: Duration::ZERO,
            max_checks: 5,
        },
    )
    .await;

    assert_eq!(outcome, MonitorOutcome::Finished { checks: 1 });
}

#[tokio::test]
async fn monitor_gives_up_after_max_checks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duels/duel-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duel_body("Ongoing")))
        .expect(3)
        .mount(&mock_server)
        .await;

    let outcome = monitor_duel(
        &authenticated_client(),
        &mock_server.uri(),
        "duel-1",
        MonitorSettings {
            interval: Duration::ZERO,
            max_checks: 3,
        },
    )
    .await;

    assert_eq!(outcome, MonitorOutcome::Exhausted { checks: 3 });
}

#[tokio::test]
async fn monitor_stops_at_the_first_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/duels/duel-1"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let outcome = monitor_duel(
        &authenticated_client(),
        &mock_server.uri(),
        "duel-1",
        MonitorSettings {
            interval: Duration::ZERO,
            max_checks: 10,
        },
    )
    .await;

    assert_eq!(outcome, MonitorOutcome::Failed { checks: 0 });
}

fn search_hit(nick: &str, level: u32) -> Value {
    json!({ "id": format!("{nick}-id"), "nick": nick, "progress": { "level": level } })
}

#[tokio::test]
async fn compare_users_keeps_the_first_hit_of_each_search() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/search/user"))
        .and(query_param("q", "plonker"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([search_hit("Plonker", 42), search_hit("Plonker2", 3)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/search/user"))
        .and(query_param("q", "rainbolt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([search_hit("Rainbolt", 120)])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let comparison = compare_users(&anonymous_client(), &mock_server.uri(), "plonker", "rainbolt")
        .await
        .unwrap();

    let Comparison::Found(first, second) = comparison else {
        panic!("expected both users to be found, got {comparison:?}");
    };
    assert_eq!(first.nick, "Plonker");
    assert_eq!(second.nick, "Rainbolt");
    assert_eq!(second.level(), Some(120));
}

#[tokio::test]
async fn compare_users_names_the_user_without_hits() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/search/user"))
        .and(query_param("q", "plonker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([search_hit("Plonker", 42)])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/search/user"))
        .and(query_param("q", "nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let comparison = compare_users(&anonymous_client(), &mock_server.uri(), "plonker", "nobody")
        .await
        .unwrap();

    assert!(matches!(comparison, Comparison::NotFound(name) if name == "nobody"));
}

#[tokio::test]
async fn compare_users_fails_when_either_search_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/search/user"))
        .and(query_param("q", "plonker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([search_hit("Plonker", 42)])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v3/search/user"))
        .and(query_param("q", "rainbolt"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let error = compare_users(&anonymous_client(), &mock_server.uri(), "plonker", "rainbolt")
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn friends_list_is_fetched_with_the_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/social/friends"))
        .and(header("cookie", "_ncfa=session-value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "a", "nick": "Alice", "countryCode": "se", "isOnline": true, "progress": { "level": 10 } },
            { "id": "b", "nick": "Bob", "countryCode": "se", "isProUser": true, "progress": { "level": 30 } }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let friends = get_friends(&authenticated_client(), &mock_server.uri())
        .await
        .unwrap();
    let stats = FriendStats::from_friends(&friends);

    assert_eq!(friends.len(), 2);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.online, 1);
    assert_eq!(stats.pro, 1);
    assert!((stats.average_level - 20.0).abs() < f64::EPSILON);
    assert_eq!(stats.top_countries, vec![("SE".to_string(), 2)]);
}

#[tokio::test]
async fn challenge_is_fetched_by_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/challenges/AbCdEf123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "map": { "name": "A Diverse World" },
            "creator": { "nick": "Plonker", "countryCode": "se" },
            "created": "2024-05-01T12:00:00Z",
            "roundCount": 5,
            "timeLimit": 120,
            "forbidMoving": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let challenge = get_challenge(&authenticated_client(), &mock_server.uri(), "AbCdEf123")
        .await
        .unwrap();

    assert_eq!(challenge.map.name, "A Diverse World");
    assert_eq!(challenge.round_count, 5);
    assert_eq!(challenge.time_limit, 120);
    assert!(challenge.forbid_moving);
    assert!(!challenge.forbid_zooming);
}

#[tokio::test]
async fn unplayed_challenge_is_reported_with_a_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v3/challenges/AbCdEf123"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let error = get_challenge(&authenticated_client(), &mock_server.uri(), "AbCdEf123")
        .await
        .unwrap_err();
    let report = http_error(error, &[NOT_PLAYED_HINT, EXPIRED_COOKIE_HINT]);

    assert!(matches!(
        report.current_context(),
        ApplicationError::HttpError {}
    ));
    let debug = format!("{report:?}");
    assert!(debug.contains("you may need to play the challenge first"));
    assert!(!debug.contains("your cookie may be invalid or expired"));
}

fn replay_body(times: &[i64]) -> Value {
    Value::Array(
        times
            .iter()
            .map(|time| json!({ "time": time, "type": "PinPosition", "payload": {} }))
            .collect(),
    )
}

#[tokio::test]
async fn replay_comparison_skips_failed_and_empty_replays() {
    let mock_server = MockServer::start().await;

    for (player_id, response) in [
        ("alpha", ResponseTemplate::new(500)),
        ("bravo", ResponseTemplate::new(200).set_body_json(replay_body(&[0, 1500]))),
        ("charlie", ResponseTemplate::new(200).set_body_json(json!([]))),
        ("delta", ResponseTemplate::new(200).set_body_json(replay_body(&[0, 500, 4000]))),
    ] {
        Mock::given(method("GET"))
            .and(path(format!("/replays/{player_id}/duel-1/2")))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let comparison = compare_player_replays(
        &anonymous_client(),
        &mock_server.uri(),
        "duel-1",
        2,
        &["alpha", "bravo", "charlie", "delta"],
    )
    .await;

    assert_eq!(comparison.failures.len(), 1);
    assert_eq!(comparison.failures[0].0, "alpha");
    let compared: Vec<(usize, &str)> = comparison
        .compared
        .iter()
        .map(|replay| (replay.index, replay.player_id.as_str()))
        .collect();
    assert_eq!(compared, vec![(1, "bravo"), (3, "delta")]);
    assert!((comparison.compared[1].analysis.total_seconds - 4.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn round_replays_continue_past_a_failed_round() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/replays/player-1/duel-1/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(replay_body(&[0, 1000])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/replays/player-1/duel-1/2"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/replays/player-1/duel-1/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(replay_body(&[0, 1000, 2000])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let replays = get_round_replays(
        &anonymous_client(),
        &mock_server.uri(),
        "player-1",
        "duel-1",
        3,
    )
    .await;

    let rounds: Vec<u32> = replays.iter().map(|replay| replay.round).collect();
    assert_eq!(rounds, vec![1, 2, 3]);
    assert_eq!(replays[0].events.as_ref().unwrap().len(), 2);
    assert_eq!(
        replays[1].events.as_ref().unwrap_err().status(),
        Some(reqwest::StatusCode::NOT_FOUND)
    );
    assert_eq!(replays[2].events.as_ref().unwrap().len(), 3);
}
