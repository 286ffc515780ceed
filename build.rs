//! Build script for the playlist analyser.
//!
//! Copies the configuration templates into the local data directory so a
//! fresh install has examples next to where `config.ini` and `.env` are
//! looked up:
//!
//! - Linux: `~/.local/share/playlist-analyser/`
//! - macOS: `~/Library/Application Support/playlist-analyser/`
//! - Windows: `%LOCALAPPDATA%/playlist-analyser/`
//!
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = ["config.example.ini", ".env.example"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("playlist-analyser");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={}", template);

        let template_path = manifest_dir.join(template);
        if template_path.is_file() {
            let contents = fs::read_to_string(&template_path)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!(
                "cargo:warning={} not found at {}",
                template,
                template_path.display()
            );
        }
    }

    Ok(())
}
