use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{
    error::AnalyserError,
    types::{Credentials, Token, TokenResponse},
};

/// Seconds before the advertised expiry at which a token is renewed.
const EXPIRY_MARGIN: u64 = 240;

/// Holds the client-credentials access token and renews it on demand.
///
/// Tokens live in memory only; every run authenticates once on first use.
pub struct TokenManager {
    credentials: Credentials,
    token_url: String,
    token: Option<Token>,
}

impl TokenManager {
    pub fn new(credentials: Credentials, token_url: impl Into<String>) -> Self {
        TokenManager {
            credentials,
            token_url: token_url.into(),
            token: None,
        }
    }

    /// Returns an access token that is valid for at least a few minutes.
    pub async fn get_valid_token(&mut self, client: &Client) -> Result<String, AnalyserError> {
        match &self.token {
            Some(token) if !is_expired(token, Utc::now().timestamp() as u64) => {
                Ok(token.access_token.clone())
            }
            _ => {
                let token = self.request_token(client).await?;
                let access_token = token.access_token.clone();
                self.token = Some(token);
                Ok(access_token)
            }
        }
    }

    async fn request_token(&self, client: &Client) -> Result<Token, AnalyserError> {
        let res = client
            .post(&self.token_url)
            .header(
                reqwest::header::AUTHORIZATION,
                basic_authorization(&self.credentials),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AnalyserError::Auth(format!(
                "token endpoint answered {}: {}",
                status, body
            )));
        }

        let json: TokenResponse = res.json().await?;
        let access_token = json
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AnalyserError::Auth("response carries no access_token".to_string()))?;

        Ok(Token {
            access_token,
            expires_in: json.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

}

/// Value of the `Authorization` header for the client-credentials grant.
pub fn basic_authorization(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Whether `token` is expired, or about to be, at unix time `now`.
pub fn is_expired(token: &Token, now: u64) -> bool {
    now + EXPIRY_MARGIN >= token.obtained_at + token.expires_in
}
