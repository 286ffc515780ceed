use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use playlist_analyser::{
    cli::{self, AnalyseOptions},
    config, error, info,
};

const EXAMPLE_URL: &str =
    "https://open.spotify.com/playlist/37i9dQZEVXbNG2KDcFcKOF?si=1333723a6eff4b7f";

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Playlist URL, URI or id. Asked for interactively when missing
    playlist: Option<String>,

    /// Config file holding the Spotify app credentials
    #[clap(long)]
    config: Option<PathBuf>,

    /// Also save the figure as PNG
    #[clap(long)]
    output: Option<PathBuf>,

    /// Also write the artist word cloud on its own
    #[clap(long)]
    wordcloud_output: Option<PathBuf>,

    /// Do not open a window with the figure
    #[clap(long)]
    no_window: bool,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

fn prompt_playlist() -> io::Result<String> {
    info!("No playlist specified, please specify playlist url.");
    info!("Example: {}", EXAMPLE_URL);

    print!("URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let playlist = match cli.playlist {
        Some(p) => p,
        None => match prompt_playlist() {
            Ok(p) => p,
            Err(e) => error!("Cannot read playlist from stdin. Err: {}", e),
        },
    };

    let options = AnalyseOptions {
        playlist,
        config: cli.config,
        output: cli.output,
        wordcloud_output: cli.wordcloud_output,
        show_window: !cli.no_window,
    };

    if let Err(e) = cli::analyse(options).await {
        error!("{}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_show_window_without_saving() {
        let cli = Cli::try_parse_from(["playlist-analyser", "37i9dQZF1DX5hHfOi73rY3"]).unwrap();

        assert_eq!(cli.playlist.as_deref(), Some("37i9dQZF1DX5hHfOi73rY3"));
        assert!(cli.output.is_none());
        assert!(cli.wordcloud_output.is_none());
        assert!(!cli.no_window);
    }

    #[test]
    fn test_output_flags() {
        let cli = Cli::try_parse_from([
            "playlist-analyser",
            "--output",
            "figure.png",
            "--wordcloud-output",
            "cloud.png",
            "--no-window",
        ])
        .unwrap();

        assert!(cli.playlist.is_none());
        assert_eq!(cli.output, Some(PathBuf::from("figure.png")));
        assert_eq!(cli.wordcloud_output, Some(PathBuf::from("cloud.png")));
        assert!(cli.no_window);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
