use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use playlist_analyser::config::parse_credentials;
use playlist_analyser::error::AnalyserError;
use playlist_analyser::management::{basic_authorization, is_expired};
use playlist_analyser::types::{Credentials, Token};
use playlist_analyser::utils::*;
use std::collections::BTreeSet;

fn ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("track{}", i)).collect()
}

#[test]
fn test_playlist_id_from_url() {
    // Share link with query string
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/37i9dQZF1DX5hHfOi73rY3?si=abc")
            .unwrap(),
        "37i9dQZF1DX5hHfOi73rY3"
    );

    // Plain link
    assert_eq!(
        playlist_id_from_url("https://open.spotify.com/playlist/37i9dQZF1DX5hHfOi73rY3").unwrap(),
        "37i9dQZF1DX5hHfOi73rY3"
    );

    // Bare identifier
    assert_eq!(playlist_id_from_url("abc123").unwrap(), "abc123");

    // Trailing slash and surrounding whitespace
    assert_eq!(
        playlist_id_from_url("  https://open.spotify.com/playlist/abc123/ ").unwrap(),
        "abc123"
    );

    // Spotify URI
    assert_eq!(
        playlist_id_from_url("spotify:playlist:37i9dQZF1EQncLwOalG3K7").unwrap(),
        "37i9dQZF1EQncLwOalG3K7"
    );
}

#[test]
fn test_playlist_id_from_url_rejects_garbage() {
    for input in ["", "   ", "https://open.spotify.com/playlist/?si=abc", "not an id!"] {
        assert!(
            matches!(
                playlist_id_from_url(input),
                Err(AnalyserError::InvalidPlaylist(_))
            ),
            "accepted {:?}",
            input
        );
    }
}

#[test]
fn test_audio_feature_batches() {
    let ids = ids(250);
    let batches = audio_feature_batches(&ids);

    // 250 ids need three requests
    let sizes: Vec<usize> = batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);

    // Every id is requested exactly once, order preserved
    let flattened: Vec<&String> = batches.iter().flat_map(|b| b.iter()).collect();
    assert_eq!(flattened.len(), 250);
    let unique: BTreeSet<&String> = flattened.iter().copied().collect();
    assert_eq!(unique.len(), 250);
    assert_eq!(flattened[0], "track0");
    assert_eq!(flattened[249], "track249");
}

#[test]
fn test_audio_feature_batches_edges() {
    assert!(audio_feature_batches(&[]).is_empty());
    assert_eq!(audio_feature_batches(&ids(100)).len(), 1);
    assert_eq!(audio_feature_batches(&ids(101)).len(), 2);
}

#[test]
fn test_grid_position_for_six_charts() {
    let positions: Vec<(usize, usize)> = (0..6).map(|i| grid_position(i, 6)).collect();
    assert_eq!(
        positions,
        vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
    );
    assert_eq!(grid_columns(6), 3);
}

#[test]
fn test_grid_position_for_odd_count() {
    // Row 0 takes the extra chart
    assert_eq!(grid_columns(5), 3);
    assert_eq!(grid_position(2, 5), (0, 2));
    assert_eq!(grid_position(3, 5), (1, 0));
    assert_eq!(grid_position(4, 5), (1, 1));
}

#[test]
fn test_playlist_colors_are_distinct() {
    let colors: Vec<Rgb888> = (0..6).map(|i| playlist_color(i, 6)).collect();
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            assert_ne!(a, b);
        }
    }

    // First color starts the wheel at red
    assert_eq!(colors[0], Rgb888::RED);
}

#[test]
fn test_hsv_to_rgb() {
    assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Rgb888::RED);
    assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Rgb888::GREEN);
    assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Rgb888::BLUE);
    assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), Rgb888::RED);
    assert_eq!(hsv_to_rgb(42.0, 0.0, 1.0), Rgb888::WHITE);
}

#[test]
fn test_blend() {
    assert_eq!(blend(Rgb888::RED, Rgb888::WHITE, 1.0), Rgb888::RED);
    assert_eq!(blend(Rgb888::RED, Rgb888::WHITE, 0.0), Rgb888::WHITE);
    assert_eq!(
        blend(Rgb888::BLACK, Rgb888::WHITE, 0.5),
        Rgb888::new(128, 128, 128)
    );
}

#[test]
fn test_format_mean() {
    assert_eq!(format_mean(Some(42.0)), "42.0");
    assert_eq!(format_mean(Some(66.666)), "66.7");
    assert_eq!(format_mean(None), "n/a");
}

#[test]
fn test_basic_authorization() {
    let credentials = Credentials {
        client_id: "id".to_string(),
        client_secret: "secret".to_string(),
    };

    // base64("id:secret")
    assert_eq!(basic_authorization(&credentials), "Basic aWQ6c2VjcmV0");
}

#[test]
fn test_is_expired() {
    let token = Token {
        access_token: "token".to_string(),
        expires_in: 3600,
        obtained_at: 1_000,
    };

    assert!(!is_expired(&token, 1_000));
    assert!(!is_expired(&token, 1_000 + 3600 - 241));

    // Renewed a few minutes before the actual expiry
    assert!(is_expired(&token, 1_000 + 3600 - 240));
    assert!(is_expired(&token, 1_000 + 3600 + 10));
}

#[test]
fn test_parse_credentials() {
    let content = r#"
[SpotifyApp]
ClientID = "abc"
ClientSecret = "def"
"#;
    let credentials = parse_credentials(content).unwrap();
    assert_eq!(credentials.client_id, "abc");
    assert_eq!(credentials.client_secret, "def");
}

#[test]
fn test_parse_credentials_unquoted_ini() {
    let content = "; Spotify app\n[Other]\nClientID = nope\n\n[SpotifyApp]\nClientID = 0123abcd\nClientSecret = 4567efgh\n";
    let credentials = parse_credentials(content).unwrap();
    // values come from the SpotifyApp section only
    assert_eq!(credentials.client_id, "0123abcd");
    assert_eq!(credentials.client_secret, "4567efgh");
}

#[test]
fn test_parse_credentials_rejects_incomplete_config() {
    let missing_secret = "[SpotifyApp]\nClientID = \"abc\"\n";
    let empty_id = "[SpotifyApp]\nClientID = \"\"\nClientSecret = \"def\"\n";
    let wrong_section = "[Spotify]\nClientID = \"abc\"\nClientSecret = \"def\"\n";
    let malformed = "[SpotifyApp\nClientID = ";

    for content in [missing_secret, empty_id, wrong_section, malformed] {
        assert!(
            matches!(parse_credentials(content), Err(AnalyserError::Config(_))),
            "accepted {:?}",
            content
        );
    }
}
