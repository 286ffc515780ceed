use crate::{
    error::AnalyserError,
    types::{Feature, FeatureSummary, TrackRecord},
};

/// Reduces a playlist table to the mean of every feature.
///
/// Null values are skipped column by column. Fractional features are rescaled
/// from [0,1] to [0,100]; popularity is already on that scale. A column
/// without any value, which is every column of an empty table, stays `None`.
pub fn summarize(tracks: &[TrackRecord]) -> FeatureSummary {
    let means = Feature::ALL.map(|feature| {
        let (sum, count) = tracks
            .iter()
            .filter_map(|t| t.feature(feature))
            .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count == 0 {
            return None;
        }

        let mean = sum / count as f64;
        Some(if feature.is_fractional() {
            mean * 100.0
        } else {
            mean
        })
    });

    FeatureSummary {
        track_count: tracks.len(),
        means,
    }
}

impl FeatureSummary {
    /// All six means in chart order.
    ///
    /// # Errors
    ///
    /// [`AnalyserError::EmptyPlaylist`] naming `label` when any mean is
    /// undefined.
    pub fn values(&self, label: &str) -> Result<[f64; 6], AnalyserError> {
        let mut values = [0.0; 6];
        for (slot, mean) in values.iter_mut().zip(self.means.iter()) {
            *slot = mean.ok_or_else(|| AnalyserError::EmptyPlaylist(label.to_string()))?;
        }
        Ok(values)
    }
}
