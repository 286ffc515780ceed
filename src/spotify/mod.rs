//! # Spotify Integration Module
//!
//! Thin client for the two Spotify Web API endpoints the analyser consumes:
//!
//! - `GET /playlists/{id}/tracks` - paged track listing of a playlist
//! - `GET /audio-features?ids=...` - audio features for up to 100 tracks
//!
//! Authentication uses the client-credentials grant handled by
//! [`crate::management::TokenManager`]; no user login is involved.
//!
//! ## Retry behaviour
//!
//! - `502 Bad Gateway` is retried after 10 seconds
//! - `429 Too Many Requests` is retried after `Retry-After` seconds when that
//!   is at most 120 seconds, anything longer fails the request
//! - every other error status is returned as [`AnalyserError::Api`]
//!
//! The fetch pipeline only talks to the [`SpotifyApi`] trait, so tests can
//! drive it with canned pages.

mod features;
mod playlists;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config,
    error::AnalyserError,
    management::TokenManager,
    types::{AudioFeatures, AudioFeaturesResponse, Credentials, PlaylistTracksPage},
    warning,
};

const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);
const MAX_RETRY_AFTER: u64 = 120;

/// The remote calls the playlist fetcher depends on.
#[async_trait]
pub trait SpotifyApi: Send {
    /// Fetches one page of playlist items. `next` is the `next` URL of the
    /// previous page, `None` for the first page.
    async fn playlist_tracks(
        &mut self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Result<PlaylistTracksPage, AnalyserError>;

    /// Fetches audio features for at most 100 track ids. Unknown tracks come
    /// back as `None`.
    async fn audio_features(
        &mut self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, AnalyserError>;
}

/// HTTP client for the Spotify Web API.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token_mgr: TokenManager,
}

impl SpotifyClient {
    /// Client for the endpoints from [`config::spotify_apiurl`] and
    /// [`config::spotify_apitoken_url`].
    pub fn new(credentials: Credentials) -> Self {
        Self::with_endpoints(
            credentials,
            config::spotify_apiurl(),
            config::spotify_apitoken_url(),
        )
    }

    pub fn with_endpoints(
        credentials: Credentials,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token_mgr: TokenManager::new(credentials, token_url),
        }
    }

    /// Authorized GET returning the decoded JSON body.
    async fn get_json<T: DeserializeOwned + Send>(&mut self, url: &str) -> Result<T, AnalyserError> {
        loop {
            let token = self.token_mgr.get_valid_token(&self.http).await?;
            let response = self.http.get(url).bearer_auth(token).send().await?;

            match response.status() {
                StatusCode::BAD_GATEWAY => {
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue; // retry
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);

                    if retry_after > MAX_RETRY_AFTER {
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds.",
                            retry_after
                        );
                        return Err(AnalyserError::Api {
                            status: Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
                            message: format!("rate limited for {} seconds", retry_after),
                        });
                    }

                    sleep(Duration::from_secs(retry_after)).await;
                    continue; // retry
                }
                status if !status.is_success() => {
                    let body = response.text().await.unwrap_or_default();
                    return Err(AnalyserError::Api {
                        status: Some(status.as_u16()),
                        message: format!("GET {} failed: {}", url, body),
                    });
                }
                _ => return Ok(response.json::<T>().await?),
            }
        }
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn playlist_tracks(
        &mut self,
        playlist_id: &str,
        next: Option<&str>,
    ) -> Result<PlaylistTracksPage, AnalyserError> {
        let url = match next {
            Some(next) => next.to_string(),
            None => playlists::first_page_url(&self.api_url, playlist_id),
        };
        self.get_json(&url).await
    }

    async fn audio_features(
        &mut self,
        ids: &[String],
    ) -> Result<Vec<Option<AudioFeatures>>, AnalyserError> {
        let url = features::audio_features_url(&self.api_url, ids)?;
        let response: AudioFeaturesResponse = self.get_json(&url).await?;
        Ok(response.audio_features)
    }
}
