mod core;
mod decoder;
mod shared;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::extractor::{self, ExtractRequest};
use crate::shared::constants;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Save every N-th frame of a video as numbered PNG files",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract frames from a video at the requested rate
    Extract {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output_dir: PathBuf,
        #[arg(
            short,
            long,
            default_value_t = constants::CLI_DEFAULT_FPS,
            allow_negative_numbers = true,
            help = "Frames to keep per second of video; zero or negative falls back to 1"
        )]
        fps: f64,
    },
    /// Print the video's frame rate, frame count and size as JSON
    Probe {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    crate::utils::logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract { input, output_dir, fps } => {
            let request = ExtractRequest {
                video_path: input,
                output_dir,
                desired_fps: fps,
            };
            match extractor::extract(&request) {
                Ok(summary) => {
                    crate::utils::logger::info(&format!(
                        "summary: source_fps={} desired_fps={} step={} read={} saved={} \
                         warnings={} elapsed={:?}",
                        summary.source_fps,
                        summary.desired_fps,
                        summary.step,
                        summary.frames_read,
                        summary.frames_saved,
                        summary.warnings.len(),
                        summary.elapsed
                    ));
                }
                Err(e) => {
                    crate::utils::logger::error(&format!("extract failed: {}", e));
                    return Err(e.into());
                }
            }
        }
        Commands::Probe { input } => {
            let info = crate::decoder::probe(&input)?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn extract_accepts_negative_fps() {
        let cli = Cli::try_parse_from([
            "frame-sampler", "extract", "-i", "video.mp4", "-o", "frames", "--fps", "-2",
        ])
        .unwrap();

        match cli.command {
            Commands::Extract { input, output_dir, fps } => {
                assert_eq!(input, PathBuf::from("video.mp4"));
                assert_eq!(output_dir, PathBuf::from("frames"));
                assert_eq!(fps, -2.0);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn extract_defaults_to_thirty_fps() {
        let cli =
            Cli::try_parse_from(["frame-sampler", "extract", "-i", "v.mp4", "-o", "out"]).unwrap();
        assert!(matches!(cli.command, Commands::Extract { fps, .. } if fps == 30.0));
    }

    #[test]
    fn extract_requires_output_dir() {
        assert!(Cli::try_parse_from(["frame-sampler", "extract", "-i", "v.mp4"]).is_err());
    }
}
