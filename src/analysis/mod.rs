//! # Analysis Module
//!
//! Turns a playlist reference into numbers:
//!
//! - [`fetch_playlist`] builds the playlist table from the Web API
//! - [`frequency`] counts the distinct values of a column
//! - [`summarize`] averages the audio features into a [`FeatureSummary`]
//!
//! [`FeatureSummary`]: crate::types::FeatureSummary

mod fetcher;
mod frequency;
mod summary;

pub use fetcher::FetchReport;
pub use fetcher::FetchedPlaylist;
pub use fetcher::apply_audio_features;
pub use fetcher::fetch_playlist;
pub use frequency::Column;
pub use frequency::frequency;
pub use summary::summarize;
