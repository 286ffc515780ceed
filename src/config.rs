//! Configuration management for the Playlist Analyser.
//!
//! This module handles loading the Spotify application credentials and the
//! API endpoints. Values are resolved in this order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `config.ini` with a `[SpotifyApp]` section (credentials only)
//! 4. Application defaults (endpoints only)

use std::{
    env,
    path::{Path, PathBuf},
};

use ini::Ini;

use crate::{error::AnalyserError, types::Credentials};

const APP_DIR: &str = "playlist-analyser";
const CONFIG_FILES: [&str; 2] = ["config.ini", "config.toml"];
const SECTION: &str = "SpotifyApp";

const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is optional: a missing `.env` leaves the environment untouched.
/// The function looks for it in:
/// - Linux: `~/.local/share/playlist-analyser/.env`
/// - macOS: `~/Library/Application Support/playlist-analyser/.env`
/// - Windows: `%LOCALAPPDATA%/playlist-analyser/.env`
///
/// # Errors
///
/// Returns [`AnalyserError::Config`] when the file exists but cannot be parsed.
pub async fn load_env() -> Result<(), AnalyserError> {
    let path = app_dir().join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| AnalyserError::Config(format!("cannot load {}: {}", path.display(), e)))
}

/// Resolves the Spotify application credentials.
///
/// `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_API_AUTH_CLIENT_SECRET` win over
/// the configuration file. When both are set the file is not read at all.
/// Otherwise the file at `path` is used, or, without an explicit path,
/// `config.ini` then `config.toml` in the working directory, followed by the
/// same names in the local data directory.
///
/// The file is an INI document of the form:
///
/// ```ini
/// [SpotifyApp]
/// ClientID = 0123abcd
/// ClientSecret = 4567efgh
/// ```
///
/// Values may be wrapped in double quotes.
///
/// # Errors
///
/// Returns [`AnalyserError::Config`] if no file is found, the file cannot be
/// parsed, or the `SpotifyApp` section lacks one of the keys.
pub async fn load_credentials(path: Option<&Path>) -> Result<Credentials, AnalyserError> {
    let env_id = non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID");
    let env_secret = non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET");

    if let (Some(client_id), Some(client_secret)) = (env_id.clone(), env_secret.clone()) {
        return Ok(Credentials {
            client_id,
            client_secret,
        });
    }

    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path().ok_or_else(|| {
            AnalyserError::Config(format!(
                "no {} found in the working directory or in {}",
                CONFIG_FILES.join(" or "),
                app_dir().display()
            ))
        })?,
    };

    let content = async_fs::read_to_string(&path)
        .await
        .map_err(|e| AnalyserError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    let file = parse_config(&content)
        .map_err(|e| AnalyserError::Config(format!("{}: {}", path.display(), e)))?;

    Ok(Credentials {
        client_id: env_id.unwrap_or(file.client_id),
        client_secret: env_secret.unwrap_or(file.client_secret),
    })
}

/// Parses the content of a configuration file into credentials.
pub fn parse_credentials(content: &str) -> Result<Credentials, AnalyserError> {
    parse_config(content).map_err(AnalyserError::Config)
}

fn parse_config(content: &str) -> Result<Credentials, String> {
    let ini = Ini::load_from_str(content).map_err(|e| e.to_string())?;
    let section = ini
        .section(Some(SECTION))
        .ok_or_else(|| format!("missing [{}] section", SECTION))?;

    let value = |key: &str| {
        section
            .get(key)
            .map(|v| v.trim().trim_matches('"').trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| format!("{}.{} is missing or empty", SECTION, key))
    };

    Ok(Credentials {
        client_id: value("ClientID")?,
        client_secret: value("ClientSecret")?,
    })
}

fn default_config_path() -> Option<PathBuf> {
    let local = CONFIG_FILES.iter().map(PathBuf::from);
    let data = CONFIG_FILES.iter().map(|name| app_dir().join(name));
    local.chain(data).find(|p| p.is_file())
}

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    non_empty_var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify OAuth token URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, falling back to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    non_empty_var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}
