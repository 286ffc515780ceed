use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

use crate::error::AnalyserError;

/// Largest number of track ids the audio-features endpoint accepts per call.
pub const AUDIO_FEATURES_BATCH: usize = 100;

/// Extracts the playlist identifier from a URL, URI or bare identifier.
///
/// The identifier is the last path segment, cut at an optional query string.
/// `spotify:playlist:<id>` URIs are accepted as well.
pub fn playlist_id_from_url(input: &str) -> Result<String, AnalyserError> {
    let trimmed = input.trim();
    let last_segment = trimmed
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    let without_query = last_segment.split('?').next().unwrap_or_default();
    let id = without_query.rsplit(':').next().unwrap_or_default();

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AnalyserError::InvalidPlaylist(input.to_string()));
    }

    Ok(id.to_string())
}

/// Splits track ids into audio-feature request batches.
pub fn audio_feature_batches(ids: &[String]) -> Vec<&[String]> {
    ids.chunks(AUDIO_FEATURES_BATCH).collect()
}

/// Grid cell `(row, column)` of the radar chart at `index` out of `total`.
///
/// The first `(total + 1) / 2` charts fill row 0, the rest row 1.
pub fn grid_position(index: usize, total: usize) -> (usize, usize) {
    let split = grid_columns(total);
    if index < split {
        (0, index)
    } else {
        (1, index - split)
    }
}

/// Number of grid columns needed for `total` radar charts.
pub fn grid_columns(total: usize) -> usize {
    total.div_ceil(2)
}

/// Color of the playlist at `index` on an HSV wheel split into `total` hues.
pub fn playlist_color(index: usize, total: usize) -> Rgb888 {
    let hue = if total == 0 {
        0.0
    } else {
        index as f32 / total as f32 * 360.0
    };
    hsv_to_rgb(hue, 1.0, 1.0)
}

/// Converts a hue in degrees plus saturation and value in [0,1] to RGB.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb888 {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = value * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb888::new(channel(r), channel(g), channel(b))
}

/// Mixes `color` over `background` with the given opacity.
pub fn blend(color: Rgb888, background: Rgb888, alpha: f32) -> Rgb888 {
    let mix = |fg: u8, bg: u8| (fg as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
    Rgb888::new(
        mix(color.r(), background.r()),
        mix(color.g(), background.g()),
        mix(color.b(), background.b()),
    )
}

/// Formats an optional percentage for terminal output.
pub fn format_mean(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "n/a".to_string(),
    }
}
