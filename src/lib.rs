//! Spotify Playlist Analyser Library
//!
//! This library fetches track metadata and audio features for Spotify
//! playlists, reduces them to per-playlist averages and renders a composite
//! figure: one radar chart per playlist plus a word cloud of the artists found
//! in the analysed playlist.
//!
//! # Modules
//!
//! - `analysis` - Playlist fetching, artist frequencies and feature summaries
//! - `cli` - Command-line pipeline driving fetch, summary and rendering
//! - `config` - Configuration management and environment variables
//! - `error` - Error kinds surfaced by the library
//! - `management` - Access token lifecycle
//! - `render` - Radar charts, word cloud and the composite figure
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playlist_analyser::{config, error::AnalyserError, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AnalyserError> {
//!     config::load_env().await?;
//!     let credentials = config::load_credentials(None).await?;
//!     let client = SpotifyClient::new(credentials);
//!     // Fetch and analyse playlists...
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod render;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching playlist {}", id);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing. Only meant
/// for fatal errors at the top of the pipeline.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, e.g. tracks that could
/// not be matched with their audio features.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
