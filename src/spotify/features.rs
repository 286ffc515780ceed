use crate::{error::AnalyserError, utils::AUDIO_FEATURES_BATCH};

/// URL of one audio-features batch request.
///
/// Fails with [`AnalyserError::Api`] before any request is sent when the batch
/// is empty or larger than the endpoint accepts.
pub fn audio_features_url(api_url: &str, ids: &[String]) -> Result<String, AnalyserError> {
    if ids.is_empty() || ids.len() > AUDIO_FEATURES_BATCH {
        return Err(AnalyserError::Api {
            status: None,
            message: format!(
                "audio features batch must hold 1 to {} ids, got {}",
                AUDIO_FEATURES_BATCH,
                ids.len()
            ),
        });
    }

    Ok(format!(
        "{url}/audio-features?ids={ids}",
        url = api_url,
        ids = ids.join(",")
    ))
}
