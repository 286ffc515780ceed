use std::{collections::BTreeMap, fmt, path::PathBuf, time::Duration};

use embedded_graphics::geometry::Size;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    analysis::{self, Column, FetchedPlaylist},
    config,
    error::AnalyserError,
    info,
    render::{self, Figure, RadarChart, WordCloud},
    spotify::{SpotifyApi, SpotifyClient},
    success,
    types::{FeatureSummary, PlaylistDescriptor, SummaryTableRow},
    utils, warning,
};

pub const TARGET_LABEL: &str = "Your Playlist";

const REFERENCE_PLAYLISTS: [(&str, &str); 5] = [
    ("https://open.spotify.com/playlist/37i9dQZF1EQncLwOalG3K7", "Pop"),
    ("https://open.spotify.com/playlist/37i9dQZF1DWVmps5U8gHNv", "Folk"),
    ("https://open.spotify.com/playlist/37i9dQZF1DWWEJlAGA9gs0", "Classical"),
    ("https://open.spotify.com/playlist/37i9dQZF1DWXRqgorJj26U", "Rock"),
    ("https://open.spotify.com/playlist/37i9dQZF1DX5hHfOi73rY3", "Dance"),
];

const WINDOW_TITLE: &str = "Playlist Analyser";

/// The genre playlists every analysis is compared against.
pub fn reference_playlists() -> Vec<PlaylistDescriptor> {
    REFERENCE_PLAYLISTS
        .iter()
        .map(|(url, label)| PlaylistDescriptor::new(*url, *label))
        .collect()
}

/// Steps of one analysis run. Each is entered once, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    FetchTarget,
    FetchReferences,
    Render,
    Display,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::FetchTarget => "fetch target playlist",
            Stage::FetchReferences => "fetch reference playlists",
            Stage::Render => "render",
            Stage::Display => "display",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

pub struct AnalyseOptions {
    pub playlist: String,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub wordcloud_output: Option<PathBuf>,
    pub show_window: bool,
}

/// Summary of one playlist, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysedPlaylist {
    pub descriptor: PlaylistDescriptor,
    pub summary: FeatureSummary,
}

/// Everything the figure is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    /// Target first, then the references in their fixed order.
    pub playlists: Vec<AnalysedPlaylist>,
    /// Artist frequencies of the target playlist.
    pub artists: BTreeMap<String, usize>,
}

/// Runs the whole pipeline: credentials, fetch, render, display.
///
/// Any failure aborts the run; nothing is retried or cached.
pub async fn analyse(options: AnalyseOptions) -> Result<(), AnalyserError> {
    enter(Stage::Init);
    let credentials = config::load_credentials(options.config.as_deref()).await?;
    let mut client = SpotifyClient::new(credentials);

    let target = PlaylistDescriptor::new(options.playlist.clone(), TARGET_LABEL);
    let analysis = collect(&mut client, &target, &reference_playlists()).await?;
    print_summary_table(&analysis);

    enter(Stage::Render);
    let figure = render(&analysis)?;
    if let Some(path) = &options.output {
        figure.save_png(path)?;
        success!("Figure written to {}", path.display());
    }

    if let Some(path) = &options.wordcloud_output {
        render::save_wordcloud_png(
            &WordCloud::new(&analysis.artists),
            Size::new(render::CELL_WIDTH * 2, render::WORDCLOUD_HEIGHT),
            path,
        )?;
        success!("Word cloud written to {}", path.display());
    }

    enter(Stage::Display);
    if !display(&figure, options.show_window) && options.output.is_none() {
        warning!("The figure was not shown, pass --output to save it as PNG.");
    }

    enter(Stage::Done);
    Ok(())
}

/// Fetches and summarizes the target and every reference playlist, in order.
pub async fn collect<A: SpotifyApi + ?Sized>(
    api: &mut A,
    target: &PlaylistDescriptor,
    references: &[PlaylistDescriptor],
) -> Result<Analysis, AnalyserError> {
    enter(Stage::FetchTarget);
    let fetched = fetch(api, target).await?;
    let artists = analysis::frequency(&fetched.tracks, Column::ArtistName);

    let mut playlists = Vec::with_capacity(references.len() + 1);
    playlists.push(AnalysedPlaylist {
        descriptor: target.clone(),
        summary: analysis::summarize(&fetched.tracks),
    });

    enter(Stage::FetchReferences);
    for descriptor in references {
        let fetched = fetch(api, descriptor).await?;
        playlists.push(AnalysedPlaylist {
            descriptor: descriptor.clone(),
            summary: analysis::summarize(&fetched.tracks),
        });
    }

    Ok(Analysis { playlists, artists })
}

/// Draws every radar chart and the word cloud into one figure.
pub fn render(analysis: &Analysis) -> Result<Figure, AnalyserError> {
    let total = analysis.playlists.len();
    let mut figure = Figure::new(total)?;

    for (index, playlist) in analysis.playlists.iter().enumerate() {
        let chart = RadarChart::new(
            playlist.descriptor.label.clone(),
            utils::playlist_color(index, total),
            &playlist.summary,
        );
        if let Err(e) = playlist.summary.values(&playlist.descriptor.label) {
            warning!("{}", e);
        }
        figure.draw_radar(index, &chart)?;
    }

    figure.draw_wordcloud(&WordCloud::new(&analysis.artists))?;
    Ok(figure)
}

async fn fetch<A: SpotifyApi + ?Sized>(
    api: &mut A,
    descriptor: &PlaylistDescriptor,
) -> Result<FetchedPlaylist, AnalyserError> {
    let pb = spinner(format!("Fetching {}...", descriptor.label));
    let result = analysis::fetch_playlist(api, &descriptor.url).await;
    pb.finish_and_clear();

    let fetched = result?;
    let report = &fetched.report;
    if report.skipped_items > 0 {
        warning!(
            "{}: skipped {} items without a track id (local files or removed tracks).",
            descriptor.label,
            report.skipped_items
        );
    }
    if report.missing_features > 0 {
        warning!(
            "{}: no audio features for {} of {} tracks.",
            descriptor.label,
            report.missing_features,
            fetched.tracks.len()
        );
    }
    if report.unknown_ids > 0 {
        warning!(
            "{}: ignored {} audio feature entries for unknown tracks.",
            descriptor.label,
            report.unknown_ids
        );
    }

    success!(
        "Fetched {} tracks for {} ({}).",
        fetched.tracks.len(),
        descriptor.label,
        fetched.id
    );
    Ok(fetched)
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

fn print_summary_table(analysis: &Analysis) {
    let rows: Vec<SummaryTableRow> = analysis
        .playlists
        .iter()
        .map(|p| {
            let means = p.summary.means;
            SummaryTableRow {
                playlist: p.descriptor.label.clone(),
                tracks: p.summary.track_count,
                danceability: utils::format_mean(means[0]),
                energy: utils::format_mean(means[1]),
                instrumentalness: utils::format_mean(means[2]),
                speechiness: utils::format_mean(means[3]),
                valence: utils::format_mean(means[4]),
                popularity: utils::format_mean(means[5]),
            }
        })
        .collect();

    println!("{}", Table::new(rows));
}

/// Shows the figure in a window. Returns whether a window was opened.
#[cfg(feature = "window")]
fn display(figure: &Figure, show_window: bool) -> bool {
    if show_window {
        info!("Close the window to exit.");
        figure.show(WINDOW_TITLE);
    }
    show_window
}

#[cfg(not(feature = "window"))]
fn display(_figure: &Figure, show_window: bool) -> bool {
    if show_window {
        info!("{} was built without the window feature.", WINDOW_TITLE);
    }
    false
}

fn enter(stage: Stage) {
    info!("Stage: {}", stage);
}
