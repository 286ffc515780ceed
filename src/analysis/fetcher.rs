use std::collections::HashMap;

use crate::{
    error::AnalyserError,
    spotify::SpotifyApi,
    types::{AudioFeatures, PlaylistItem, TrackRecord},
    utils,
};

const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A fetched playlist table plus the rows and responses that were dropped on
/// the way.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPlaylist {
    pub id: String,
    pub tracks: Vec<TrackRecord>,
    pub report: FetchReport,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    /// Playlist items without a track or without a track id (local files).
    pub skipped_items: usize,
    /// Tracks for which the API returned no audio features.
    pub missing_features: usize,
    /// Audio feature entries whose id matched no track.
    pub unknown_ids: usize,
    /// Number of audio-features requests issued.
    pub batches: usize,
}

impl FetchReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_items == 0 && self.missing_features == 0 && self.unknown_ids == 0
    }
}

/// Fetches every track of a playlist together with its audio features.
///
/// Pages are followed until the API stops returning a `next` link. Audio
/// features are requested in batches of at most
/// [`utils::AUDIO_FEATURES_BATCH`] ids and matched back by id.
///
/// # Errors
///
/// - [`AnalyserError::InvalidPlaylist`] if no identifier can be extracted
/// - any API error from `api`, unchanged
pub async fn fetch_playlist<A: SpotifyApi + ?Sized>(
    api: &mut A,
    input: &str,
) -> Result<FetchedPlaylist, AnalyserError> {
    let id = utils::playlist_id_from_url(input)?;
    let mut report = FetchReport::default();

    let mut tracks: Vec<TrackRecord> = Vec::new();
    let mut next: Option<String> = None;
    loop {
        let page = api.playlist_tracks(&id, next.as_deref()).await?;
        for item in page.items {
            match track_record(item) {
                Some(record) => tracks.push(record),
                None => report.skipped_items += 1,
            }
        }

        next = page.next;
        if next.is_none() {
            break;
        }
    }

    let ids: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
    let mut returned: Vec<AudioFeatures> = Vec::with_capacity(ids.len());
    for batch in utils::audio_feature_batches(&ids) {
        report.batches += 1;
        let features = api.audio_features(batch).await?;
        returned.extend(features.into_iter().flatten());
    }

    report.unknown_ids = apply_audio_features(&mut tracks, &returned);
    report.missing_features = tracks.iter().filter(|t| t.danceability.is_none()).count();

    Ok(FetchedPlaylist { id, tracks, report })
}

/// Fills in the audio features of every track whose id has a matching entry.
///
/// Returns how many entries matched no track.
pub fn apply_audio_features(tracks: &mut [TrackRecord], features: &[AudioFeatures]) -> usize {
    let mut by_id: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, track) in tracks.iter().enumerate() {
        by_id.entry(track.id.as_str()).or_default().push(i);
    }

    let mut matches: Vec<(usize, &AudioFeatures)> = Vec::new();
    let mut unknown = 0;
    for entry in features {
        match by_id.get(entry.id.as_str()) {
            Some(rows) => matches.extend(rows.iter().map(|&row| (row, entry))),
            None => unknown += 1,
        }
    }

    for (row, entry) in matches {
        tracks[row].apply_features(entry);
    }

    unknown
}

fn track_record(item: PlaylistItem) -> Option<TrackRecord> {
    let track = item.track?;
    let id = track.id.filter(|id| !id.is_empty())?;
    let artist_name = track
        .artists
        .into_iter()
        .next()
        .map(|a| a.name)
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    Some(TrackRecord::new(id, artist_name, track.name, track.popularity))
}
