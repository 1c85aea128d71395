//! RiotClient status handling against a local stand-in for the Riot API.

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use rifttrack_error::UpstreamErrorKind;
use rifttrack_riot::{QueueType, RiotClient, RiotConfig};
use serde_json::json;
use std::collections::HashMap;

const KEY: &str = "RGAPI-test-key";

fn riot_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({"status": {"message": message, "status_code": status.as_u16()}})),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("X-Riot-Token").and_then(|v| v.to_str().ok()) == Some(KEY)
}

async fn account(headers: HeaderMap, Path((game, tag)): Path<(String, String)>) -> Response {
    if !authorized(&headers) {
        return riot_error(StatusCode::FORBIDDEN, "Forbidden");
    }
    match (game.as_str(), tag.as_str()) {
        ("Hide on bush", "KR1") => {
            Json(json!({"puuid": "puuid-faker", "gameName": game, "tagLine": tag})).into_response()
        }
        ("Nameless", _) => Json(json!({"gameName": game, "tagLine": tag})).into_response(),
        _ => riot_error(StatusCode::NOT_FOUND, "Data not found - No results found for player with riot id"),
    }
}

async fn lol_matches(
    headers: HeaderMap,
    Path(rest): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return riot_error(StatusCode::FORBIDDEN, "Forbidden");
    }
    let parts: Vec<&str> = rest.trim_start_matches('/').split('/').collect();
    match parts.as_slice() {
        ["by-puuid", _, "ids"] => {
            if query.get("type").map(String::as_str) != Some("ranked") {
                return riot_error(StatusCode::BAD_REQUEST, "type must be ranked");
            }
            let count: usize = query.get("count").and_then(|c| c.parse().ok()).unwrap_or(20);
            let ids: Vec<String> = (1..=5).rev().map(|n| format!("KR_{n}")).take(count).collect();
            Json(ids).into_response()
        }
        ["KR_RATE"] => riot_error(StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded"),
        ["KR_GARBAGE"] => (StatusCode::OK, "{\"info\": [").into_response(),
        ["KR_EMPTY"] => (StatusCode::OK, "").into_response(),
        [id] => Json(json!({
            "metadata": {"matchId": id},
            "info": {
                "queueId": 420,
                "gameDuration": 1834,
                "gameStartTimestamp": 1704067200000_i64,
                "participants": [
                    {"puuid": "puuid-faker", "win": true, "championName": "Ahri",
                     "kills": 5, "deaths": 2, "assists": 7, "goldEarned": 12345}
                ]
            }
        }))
        .into_response(),
        _ => riot_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn tft_matches(Path(rest): Path<String>) -> Response {
    let parts: Vec<&str> = rest.trim_start_matches('/').split('/').collect();
    match parts.as_slice() {
        ["by-puuid", _, "ids"] => Json(json!([])).into_response(),
        ["KR_DOWN"] => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => riot_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn lol_league(Path(puuid): Path<String>) -> Response {
    match puuid.as_str() {
        "puuid-faker" => Json(json!([
            {"queueType": "RANKED_FLEX_SR", "tier": "DIAMOND", "rank": "I", "leaguePoints": 3},
            {"queueType": "RANKED_SOLO_5x5", "tier": "CHALLENGER", "rank": "I", "leaguePoints": 1402}
        ]))
        .into_response(),
        "puuid-broken" => riot_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        _ => riot_error(StatusCode::NOT_FOUND, "Data not found"),
    }
}

async fn tft_league(Path(puuid): Path<String>) -> Response {
    match puuid.as_str() {
        "puuid-faker" => Json(json!(
            {"queueType": "RANKED_TFT", "tier": "GOLD", "rank": "II", "leaguePoints": 75}
        ))
        .into_response(),
        "puuid-empty" => Json(json!([])).into_response(),
        _ => riot_error(StatusCode::NOT_FOUND, "Data not found"),
    }
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/riot/account/v1/accounts/by-riot-id/:game/:tag", get(account))
        .route("/lol/match/v5/matches/*rest", get(lol_matches))
        .route("/tft/match/v1/matches/*rest", get(tft_matches))
        .route("/lol/league/v4/entries/by-puuid/:puuid", get(lol_league))
        .route("/tft/league/v1/by-puuid/:puuid", get(tft_league));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    base
}

fn client_for(base: &str, key: &str) -> RiotClient {
    let config = RiotConfig::default()
        .with_regional_url(base.to_string())
        .with_platform_url(base.to_string());
    RiotClient::new(&config, key).unwrap()
}

async fn spawn_riot() -> RiotClient {
    client_for(&spawn_server().await, KEY)
}

#[tokio::test]
async fn test_account_resolves_encoded_riot_id() {
    let client = spawn_riot().await;
    let account = client.account_by_riot_id("Hide on bush", "KR1").await.unwrap();
    assert_eq!(account.puuid(), "puuid-faker");
    assert_eq!(account.riot_id(), "Hide on bush#KR1");
}

#[tokio::test]
async fn test_account_not_found_is_an_error_with_message() {
    let client = spawn_riot().await;
    let err = client.account_by_riot_id("Ghost", "0000").await.unwrap_err();
    assert!(err.is_not_found());
    match &err.kind {
        UpstreamErrorKind::Status { message, url, .. } => {
            assert!(message.starts_with("Data not found"));
            assert!(url.contains("/by-riot-id/Ghost/0000"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_account_without_puuid_is_missing_field() {
    let client = spawn_riot().await;
    let err = client.account_by_riot_id("Nameless", "KR1").await.unwrap_err();
    assert_eq!(
        err.kind,
        UpstreamErrorKind::MissingField("puuid".to_string())
    );
}

#[tokio::test]
async fn test_wrong_key_is_forbidden() {
    let stranger = client_for(&spawn_server().await, "RGAPI-expired");
    let err = stranger.lol_match_ids("puuid-faker", 3).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_match_ids_respect_count() {
    let client = spawn_riot().await;
    let ids = client.lol_match_ids("puuid-faker", 3).await.unwrap();
    assert_eq!(ids, vec!["KR_5", "KR_4", "KR_3"]);
}

#[tokio::test]
async fn test_match_decodes() {
    let client = spawn_riot().await;
    let m = client.lol_match("KR_9").await.unwrap().unwrap();
    assert_eq!(m.metadata().match_id(), "KR_9");
    assert!(m.is_ranked());
    assert!(*m.participant("puuid-faker").unwrap().win());
}

#[tokio::test]
async fn test_match_payload_keeps_every_field() {
    let client = spawn_riot().await;
    let payload = client.lol_match_payload("KR_9").await.unwrap();
    assert_eq!(payload["info"]["gameDuration"], 1834);
    assert_eq!(payload["info"]["participants"][0]["goldEarned"], 12345);
}

#[tokio::test]
async fn test_empty_match_body_is_none() {
    let client = spawn_riot().await;
    assert!(client.lol_match_payload("KR_EMPTY").await.unwrap().is_null());
    assert!(client.lol_match("KR_EMPTY").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rate_limit_surfaces_without_retry() {
    let client = spawn_riot().await;
    let err = client.lol_match("KR_RATE").await.unwrap_err();
    assert!(err.is_rate_limited());
}

#[tokio::test]
async fn test_undecodable_body_is_decode_error() {
    let client = spawn_riot().await;
    let err = client.lol_match("KR_GARBAGE").await.unwrap_err();
    assert!(matches!(err.kind, UpstreamErrorKind::Decode(_)));
}

#[tokio::test]
async fn test_empty_5xx_body_uses_reason_phrase() {
    let client = spawn_riot().await;
    let err = client.tft_match("KR_DOWN").await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    match err.kind {
        UpstreamErrorKind::Status { message, .. } => assert_eq!(message, "Service Unavailable"),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lol_standing_prefers_solo() {
    let client = spawn_riot().await;
    let entry = client.lol_ranked_entry("puuid-faker").await.unwrap().unwrap();
    assert_eq!(entry.queue(), Some(QueueType::RankedSolo));
    assert_eq!(*entry.league_points(), Some(1402));
}

#[tokio::test]
async fn test_standing_404_is_unranked() {
    let client = spawn_riot().await;
    assert_eq!(client.lol_ranked_entry("puuid-new").await.unwrap(), None);
    assert_eq!(client.tft_ranked_entry("puuid-new").await.unwrap(), None);
}

#[tokio::test]
async fn test_standing_5xx_is_still_an_error() {
    let client = spawn_riot().await;
    let err = client.lol_ranked_entry("puuid-broken").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_tft_standing_accepts_single_object_and_empty_array() {
    let client = spawn_riot().await;
    let entry = client.tft_ranked_entry("puuid-faker").await.unwrap().unwrap();
    assert_eq!(entry.tier().as_deref(), Some("GOLD"));
    assert_eq!(client.tft_ranked_entry("puuid-empty").await.unwrap(), None);
}

#[tokio::test]
async fn test_empty_candidate_list() {
    let client = spawn_riot().await;
    assert!(client.tft_match_ids("puuid-faker", 30).await.unwrap().is_empty());
}
