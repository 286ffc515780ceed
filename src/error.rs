use thiserror::Error;

/// Everything that can go wrong between reading the configuration and writing
/// the rendered figure.
#[derive(Debug, Error)]
pub enum AnalyserError {
    /// The given playlist URL or identifier could not be parsed.
    #[error("invalid playlist url or identifier: {0:?}")]
    InvalidPlaylist(String),

    /// Credentials or other settings are missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The token endpoint refused the client credentials.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The Web API answered with an error status.
    #[error("spotify api request failed ({}): {message}", .status.map_or("no status".to_string(), |s| s.to_string()))]
    Api {
        status: Option<u16>,
        message: String,
    },

    /// Network or decoding failure below the API layer.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Averages were requested for a playlist without usable rows.
    #[error("playlist {0} has no tracks with audio features")]
    EmptyPlaylist(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
