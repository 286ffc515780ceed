use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksPage {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<PlaylistTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub popularity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub valence: f64,
}

/// One row of a playlist table.
///
/// Audio features stay `None` until the matching batch response arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    pub id: String,
    pub artist_name: String,
    pub track_name: String,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub instrumentalness: Option<f64>,
    pub speechiness: Option<f64>,
    pub valence: Option<f64>,
    pub popularity: u32,
}

impl TrackRecord {
    pub fn new(id: String, artist_name: String, track_name: String, popularity: u32) -> Self {
        Self {
            id,
            artist_name,
            track_name,
            danceability: None,
            energy: None,
            instrumentalness: None,
            speechiness: None,
            valence: None,
            popularity,
        }
    }

    pub fn apply_features(&mut self, features: &AudioFeatures) {
        self.danceability = Some(features.danceability);
        self.energy = Some(features.energy);
        self.instrumentalness = Some(features.instrumentalness);
        self.speechiness = Some(features.speechiness);
        self.valence = Some(features.valence);
    }

    /// Raw value of a feature column, popularity included.
    pub fn feature(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Speechiness => self.speechiness,
            Feature::Valence => self.valence,
            Feature::Popularity => Some(self.popularity as f64),
        }
    }
}

/// The summarized columns, in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Danceability,
    Energy,
    Instrumentalness,
    Speechiness,
    Valence,
    Popularity,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Instrumentalness,
        Feature::Speechiness,
        Feature::Valence,
        Feature::Popularity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::Danceability => "Danceability",
            Feature::Energy => "Energy",
            Feature::Instrumentalness => "Instrumentalness",
            Feature::Speechiness => "Speechiness",
            Feature::Valence => "Optimism",
            Feature::Popularity => "Popularity",
        }
    }

    /// Whether the raw value is a [0,1] fraction that gets rescaled to percent.
    pub fn is_fractional(&self) -> bool {
        !matches!(self, Feature::Popularity)
    }
}

/// Per-feature means of one playlist on a 0-100 scale.
///
/// `None` marks a mean that is undefined because no row carried a value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSummary {
    pub track_count: usize,
    pub means: [Option<f64>; 6],
}

impl FeatureSummary {
    pub fn get(&self, feature: Feature) -> Option<f64> {
        Feature::ALL
            .iter()
            .position(|f| *f == feature)
            .and_then(|i| self.means[i])
    }

    pub fn is_defined(&self) -> bool {
        self.means.iter().all(Option::is_some)
    }
}

/// Static description of a playlist taking part in the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDescriptor {
    pub url: String,
    pub label: String,
}

impl PlaylistDescriptor {
    pub fn new(url: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            label: label.into(),
        }
    }
}

#[derive(Tabled)]
pub struct SummaryTableRow {
    #[tabled(rename = "Playlist")]
    pub playlist: String,
    #[tabled(rename = "Tracks")]
    pub tracks: usize,
    #[tabled(rename = "Danceability")]
    pub danceability: String,
    #[tabled(rename = "Energy")]
    pub energy: String,
    #[tabled(rename = "Instrumentalness")]
    pub instrumentalness: String,
    #[tabled(rename = "Speechiness")]
    pub speechiness: String,
    #[tabled(rename = "Optimism")]
    pub valence: String,
    #[tabled(rename = "Popularity")]
    pub popularity: String,
}
