use std::collections::BTreeMap;

use crate::types::TrackRecord;

/// Categorical columns of a playlist table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    TrackId,
    ArtistName,
    TrackName,
}

impl Column {
    fn value<'a>(&self, track: &'a TrackRecord) -> &'a str {
        match self {
            Column::TrackId => &track.id,
            Column::ArtistName => &track.artist_name,
            Column::TrackName => &track.track_name,
        }
    }
}

/// Counts how often each distinct value of `column` occurs.
///
/// The counts add up to `tracks.len()`. The result is ordered by value, so the
/// same rows in any order give the same mapping.
pub fn frequency(tracks: &[TrackRecord], column: Column) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for track in tracks {
        *counts.entry(column.value(track).to_string()).or_insert(0) += 1;
    }
    counts
}
