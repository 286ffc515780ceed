//! # CLI Module
//!
//! Drives one analysis run from the command line. [`analyse`] walks through
//! the [`Stage`]s in order:
//!
//! ```text
//! Init -> FetchTarget -> FetchReferences -> Render -> Display -> Done
//! ```
//!
//! The target playlist is fetched first, then the five genre references from
//! [`reference_playlists`]. Every playlist is summarized, printed as a table
//! and drawn as a radar chart next to a word cloud of the target's artists.
//! The first error aborts the run.
//!
//! [`collect`] and [`render`] are exposed separately so the pipeline can be
//! driven with any [`SpotifyApi`](crate::spotify::SpotifyApi) implementation.

mod analyse;

pub use analyse::{
    AnalyseOptions, AnalysedPlaylist, Analysis, Stage, TARGET_LABEL, analyse, collect,
    reference_playlists, render,
};
