//! Authenticated Riot API client.

use crate::account::AccountResponse;
use crate::league::TftLeagueResponse;
use crate::{Account, LeagueEntry, LolMatch, RiotConfig, TftMatch, pick_lol_entry, pick_tft_entry};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use rifttrack_error::{ConfigError, RiftResult, UpstreamError, UpstreamErrorKind, UpstreamResult};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Riot Games API client.
///
/// Each method is exactly one GET. Cloning is cheap and shares the connection pool.
#[derive(Debug, Clone)]
pub struct RiotClient {
    http: Client,
    regional: Url,
    platform: Url,
}

/// Error body shape: `{"status": {"message": "...", "status_code": 403}}`.
#[derive(Debug, Deserialize)]
struct RiotErrorBody {
    status: RiotErrorStatus,
}

#[derive(Debug, Deserialize)]
struct RiotErrorStatus {
    message: String,
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<RiotErrorBody>(body) {
        return parsed.status.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        status.canonical_reason().unwrap_or("Unknown").to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_base(name: &str, value: &str) -> RiftResult<Url> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::new(format!("Invalid {} '{}': {}", name, value, e)))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::new(format!("{} '{}' cannot be a base URL", name, value)).into());
    }
    Ok(url)
}

/// Decode a raw record payload. JSON `null` (an empty upstream body) is `None`.
///
/// # Errors
///
/// A `Decode` failure naming `record_id` when the payload does not fit `T`.
///
/// ```
/// use rifttrack_riot::{LolMatch, decode_record};
///
/// let none: Option<LolMatch> = decode_record("KR_1", serde_json::Value::Null).unwrap();
/// assert!(none.is_none());
/// ```
pub fn decode_record<T: DeserializeOwned>(
    record_id: &str,
    payload: Value,
) -> UpstreamResult<Option<T>> {
    if payload.is_null() {
        return Ok(None);
    }
    serde_json::from_value(payload).map(Some).map_err(|e| {
        UpstreamError::new(UpstreamErrorKind::Decode(format!("record {}: {}", record_id, e)))
    })
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // Bases are validated in `RiotClient::new`, so the path is always mutable
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

impl RiotClient {
    /// Build a client for the hosts in `config`, authenticating with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a host URL is invalid, the key is not a valid
    /// header value, or the HTTP client cannot be initialized.
    #[instrument(skip_all)]
    pub fn new(config: &RiotConfig, api_key: impl AsRef<str>) -> RiftResult<Self> {
        let regional = parse_base("riot.regional_url", config.regional_url())?;
        let platform = parse_base("riot.platform_url", config.platform_url())?;

        let mut token = HeaderValue::from_str(api_key.as_ref())
            .map_err(|e| ConfigError::new(format!("RIOT_API_KEY is not a valid header: {}", e)))?;
        token.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(RIOT_TOKEN_HEADER, token);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent().as_str())
            .timeout(Duration::from_secs(*config.request_timeout_secs()))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!(regional = %regional, platform = %platform, "Created Riot client");
        Ok(Self {
            http,
            regional,
            platform,
        })
    }

    /// Build a client reading the key from `RIOT_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset or empty.
    pub fn from_env(config: &RiotConfig) -> RiftResult<Self> {
        let api_key = std::env::var("RIOT_API_KEY")
            .map_err(|e| ConfigError::new(format!("RIOT_API_KEY not set: {}", e)))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::new("RIOT_API_KEY is empty").into());
        }
        Self::new(config, api_key.trim())
    }

    #[instrument(skip(self, url), fields(url = %url))]
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> UpstreamResult<T> {
        let started = Instant::now();
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            UpstreamError::new(UpstreamErrorKind::Transport(format!("GET {}: {}", url, e)))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            UpstreamError::new(UpstreamErrorKind::Transport(format!(
                "Reading body of {}: {}",
                url, e
            )))
        })?;
        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Riot API response"
        );

        if !status.is_success() {
            return Err(UpstreamError::new(UpstreamErrorKind::Status {
                status: status.as_u16(),
                message: error_message(status, &text),
                url: url.to_string(),
            }));
        }

        // An empty 200 decodes as JSON null
        let body = if text.trim().is_empty() {
            "null"
        } else {
            text.as_str()
        };
        serde_json::from_str(body)
            .map_err(|e| UpstreamError::new(UpstreamErrorKind::Decode(format!("{}: {}", url, e))))
    }

    /// Look up an account by Riot ID. A 404 is returned as an error.
    ///
    /// # Errors
    ///
    /// Any upstream failure, or `MissingField("puuid")` when the response has no puuid.
    #[instrument(skip(self))]
    pub async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> UpstreamResult<Account> {
        let url = endpoint(
            &self.regional,
            &[
                "riot",
                "account",
                "v1",
                "accounts",
                "by-riot-id",
                game_name,
                tag_line,
            ],
        );
        let response: Option<AccountResponse> = self.get_json(url).await?;
        let response = response.ok_or_else(|| {
            UpstreamError::new(UpstreamErrorKind::MissingField("account".to_string()))
        })?;

        let puuid = response
            .puuid
            .filter(|p| !p.is_empty())
            .ok_or_else(|| UpstreamError::new(UpstreamErrorKind::MissingField("puuid".to_string())))?;

        Ok(Account::new(
            puuid,
            response.game_name.unwrap_or_else(|| game_name.to_string()),
            response.tag_line.unwrap_or_else(|| tag_line.to_string()),
        ))
    }

    /// Recent ranked LoL match ids, newest first, at most `count`.
    #[instrument(skip(self))]
    pub async fn lol_match_ids(&self, puuid: &str, count: usize) -> UpstreamResult<Vec<String>> {
        let mut url = endpoint(
            &self.regional,
            &["lol", "match", "v5", "matches", "by-puuid", puuid, "ids"],
        );
        url.query_pairs_mut()
            .append_pair("type", "ranked")
            .append_pair("start", "0")
            .append_pair("count", &count.to_string());
        let ids: Option<Vec<String>> = self.get_json(url).await?;
        Ok(ids.unwrap_or_default())
    }

    /// A single LoL match exactly as Riot returned it; an empty body is `null`.
    #[instrument(skip(self))]
    pub async fn lol_match_payload(&self, match_id: &str) -> UpstreamResult<Value> {
        let url = endpoint(&self.regional, &["lol", "match", "v5", "matches", match_id]);
        self.get_json(url).await
    }

    /// A single LoL match, `None` when Riot answered with an empty body.
    pub async fn lol_match(&self, match_id: &str) -> UpstreamResult<Option<LolMatch>> {
        decode_record(match_id, self.lol_match_payload(match_id).await?)
    }

    /// Every LoL league entry for `puuid`; a 404 means unranked and yields an empty list.
    #[instrument(skip(self))]
    pub async fn lol_league_entries(&self, puuid: &str) -> UpstreamResult<Vec<LeagueEntry>> {
        let url = endpoint(
            &self.platform,
            &["lol", "league", "v4", "entries", "by-puuid", puuid],
        );
        match self.get_json::<Option<Vec<LeagueEntry>>>(url).await {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(e) if e.is_not_found() => {
                debug!("No LoL league entries");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// The LoL standing to display, `None` when unranked.
    pub async fn lol_ranked_entry(&self, puuid: &str) -> UpstreamResult<Option<LeagueEntry>> {
        Ok(pick_lol_entry(self.lol_league_entries(puuid).await?))
    }

    /// Recent TFT match ids, newest first, at most `count`.
    #[instrument(skip(self))]
    pub async fn tft_match_ids(&self, puuid: &str, count: usize) -> UpstreamResult<Vec<String>> {
        let mut url = endpoint(
            &self.regional,
            &["tft", "match", "v1", "matches", "by-puuid", puuid, "ids"],
        );
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());
        let ids: Option<Vec<String>> = self.get_json(url).await?;
        Ok(ids.unwrap_or_default())
    }

    /// A single TFT match exactly as Riot returned it; an empty body is `null`.
    #[instrument(skip(self))]
    pub async fn tft_match_payload(&self, match_id: &str) -> UpstreamResult<Value> {
        let url = endpoint(&self.regional, &["tft", "match", "v1", "matches", match_id]);
        self.get_json(url).await
    }

    /// A single TFT match, `None` when Riot answered with an empty body.
    pub async fn tft_match(&self, match_id: &str) -> UpstreamResult<Option<TftMatch>> {
        decode_record(match_id, self.tft_match_payload(match_id).await?)
    }

    /// The TFT standing to display, `None` when unranked or on a 404.
    #[instrument(skip(self))]
    pub async fn tft_ranked_entry(&self, puuid: &str) -> UpstreamResult<Option<LeagueEntry>> {
        let url = endpoint(&self.platform, &["tft", "league", "v1", "by-puuid", puuid]);
        match self.get_json::<Option<TftLeagueResponse>>(url).await {
            Ok(Some(response)) => Ok(pick_tft_entry(response.into_entries())),
            Ok(None) => Ok(None),
            Err(e) if e.is_not_found() => {
                debug!("No TFT league entry");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
