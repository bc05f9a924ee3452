use std::{path::PathBuf, sync::Arc};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use framesift::{
    DEFAULT_EXTENSION, DEFAULT_JPEG_QUALITY, DEFAULT_NUM_FRAMES, FfmpegLogLevel, FfmpegOpener,
    ProgressCallback, ProgressInfo, ReportOutcome, SampleOptions, SampleOutcome,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  framesift info\n  framesift info videos --json\n  framesift sample fractal_set --frames 200\n  framesift sample fractal_set --out-root frames --progress\n  framesift completions zsh > _framesift";

#[derive(Debug, Parser)]
#[command(
    name = "framesift",
    version,
    about = "Report video metadata and sample evenly spaced frames as JPEG",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone)]
struct GlobalOptions {
    /// Show debug logging.
    #[arg(long, global = true)]
    verbose: bool,

    /// FFmpeg's own log level.
    #[arg(long, global = true, value_enum)]
    ffmpeg_log_level: Option<FfmpegLogLevel>,

    /// File extension that marks a video (case-insensitive).
    #[arg(long, global = true, default_value = DEFAULT_EXTENSION)]
    extension: String,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print frame rate, duration and resolution of every video under a directory.
    #[command(visible_alias = "probe")]
    Info {
        /// Directory to search recursively.
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Print one JSON object per file.
        #[arg(long)]
        json: bool,
    },

    /// Extract evenly spaced frames from each video in a directory.
    Sample {
        /// Directory holding the videos (not searched recursively).
        #[arg(default_value = ".")]
        source: PathBuf,

        /// Frames to take from each video.
        #[arg(long, default_value_t = DEFAULT_NUM_FRAMES, value_parser = parse_frame_count)]
        frames: usize,

        /// Parent directory for per-video output folders (defaults to SOURCE).
        #[arg(long)]
        out_root: Option<PathBuf>,

        /// JPEG quality (1-100).
        #[arg(
            long,
            default_value_t = DEFAULT_JPEG_QUALITY,
            value_parser = clap::value_parser!(u8).range(1..=100)
        )]
        quality: u8,

        /// Show a progress bar per video.
        #[arg(long)]
        progress: bool,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_frame_count(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be greater than 0".to_string()),
        Ok(count) => Ok(count),
        Err(error) => Err(error.to_string()),
    }
}

fn init_logging(global: &GlobalOptions) {
    let default_filter = if global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    if let Some(level) = global.ffmpeg_log_level {
        framesift::set_ffmpeg_log_level(level);
    }
}

struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let bar = ProgressBar::new(0);
        let style =
            ProgressStyle::with_template("{spinner:.green} {bar:40.cyan/blue} {pos}/{len} {msg}")?;
        bar.set_style(style.progress_chars("##-"));
        Ok(Self { bar })
    }
}

impl ProgressCallback for TerminalProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.bar.set_length(info.total);
        self.bar.set_position(info.current);
        self.bar.set_message(format!("frame {}", info.frame_index));
        if info.current == info.total {
            self.bar.finish_and_clear();
            self.bar.reset();
        }
    }
}

fn print_report(outcome: &ReportOutcome, as_json: bool) {
    if as_json {
        let payload = match outcome {
            ReportOutcome::Reported { path, metadata } => json!({
                "path": path.display().to_string(),
                "fps": metadata.frames_per_second,
                "frame_count": metadata.frame_count,
                "duration_seconds": metadata.duration_seconds,
                "width": metadata.width,
                "height": metadata.height,
            }),
            ReportOutcome::Unopenable { path, reason } => json!({
                "path": path.display().to_string(),
                "error": reason,
            }),
        };
        println!("{payload}");
        return;
    }

    match outcome {
        ReportOutcome::Reported { .. } => println!("{outcome}"),
        ReportOutcome::Unopenable { .. } => {
            println!("{} {}", "skip:".yellow().bold(), outcome.to_string().yellow())
        }
    }
}

fn print_sample(outcome: &SampleOutcome) {
    match outcome {
        SampleOutcome::Saved(summary) => {
            let rendered = outcome.to_string();
            let mut lines = rendered.lines();
            for line in lines.by_ref().take(summary.failures.len()) {
                println!("{} {}", "warning:".yellow().bold(), line.yellow());
            }
            for line in lines {
                println!("{} {}", "done:".green().bold(), line);
            }
        }
        SampleOutcome::Unopenable { .. } | SampleOutcome::TooShort { .. } => {
            println!("{} {}", "skip:".yellow().bold(), outcome.to_string().yellow());
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match cli.command {
        Commands::Info { root, json } => {
            for outcome in framesift::report_all(&FfmpegOpener, &root, &cli.global.extension) {
                print_report(&outcome, json);
            }
        }
        Commands::Sample {
            source,
            frames,
            out_root,
            quality,
            progress,
        } => {
            let mut options = SampleOptions::new()
                .with_num_frames(frames)
                .with_extension(cli.global.extension.clone())
                .with_jpeg_quality(quality);
            if let Some(root) = out_root {
                options = options.with_output_root(root);
            }
            if progress {
                options = options.with_progress(Arc::new(TerminalProgress::new()?));
            }

            for outcome in framesift::extract_all(&FfmpegOpener, &source, &options)? {
                print_sample(&outcome?);
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "framesift", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{} {error}", "error:".red().bold());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, Commands, parse_frame_count};

    #[test]
    fn info_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["framesift", "info"]).unwrap();
        assert_eq!(cli.global.extension, "mp4");
        match cli.command {
            Commands::Info { root, json } => {
                assert_eq!(root, PathBuf::from("."));
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn sample_defaults() {
        let cli = Cli::try_parse_from(["framesift", "sample", "videos"]).unwrap();
        match cli.command {
            Commands::Sample {
                source,
                frames,
                out_root,
                quality,
                progress,
            } => {
                assert_eq!(source, PathBuf::from("videos"));
                assert_eq!(frames, 200);
                assert!(out_root.is_none());
                assert_eq!(quality, 95);
                assert!(!progress);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "framesift",
            "sample",
            "--extension",
            "MOV",
            "--ffmpeg-log-level",
            "quiet",
        ])
        .unwrap();
        assert_eq!(cli.global.extension, "MOV");
        assert!(cli.global.ffmpeg_log_level.is_some());
    }

    #[test]
    fn rejects_zero_frames_and_bad_quality() {
        assert!(Cli::try_parse_from(["framesift", "sample", "--frames", "0"]).is_err());
        assert!(Cli::try_parse_from(["framesift", "sample", "--quality", "0"]).is_err());
        assert!(Cli::try_parse_from(["framesift", "sample", "--quality", "101"]).is_err());
    }

    #[test]
    fn frame_count_parser() {
        assert_eq!(parse_frame_count("12"), Ok(12));
        assert!(parse_frame_count("0").is_err());
        assert!(parse_frame_count("ten").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
