//! Cutline CLI
//!
//! Usage:
//!   cutline new <PATH>        Create an empty project file
//!   cutline validate <PATH>   Report every problem in a project
//!   cutline compile <PATH>    Print the render graph or export arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cutline", about = "Timeline compiler for filter-graph renderers", version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format for reports
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new project file with one video, audio and text track
    New {
        /// Project file to write
        path: PathBuf,

        /// Project name
        #[arg(short, long, default_value = "Untitled Project")]
        name: String,

        /// Canvas width
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Canvas height
        #[arg(long, default_value = "1080")]
        height: u32,

        /// Frames per second
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a project file
    Validate {
        /// Project file
        path: PathBuf,
    },

    /// Compile a project to its render graph
    Compile {
        /// Project file
        path: PathBuf,

        /// Print backend arguments for this export preset
        /// (h264_hd, h265_4k, prores_422, vp9_web)
        #[arg(long)]
        preset: Option<String>,

        /// Output file for the export arguments
        #[arg(short, long, default_value = "out.mp4")]
        output: PathBuf,

        /// Directory media ids are resolved against
        #[arg(long, default_value = ".")]
        media_dir: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::New {
            path,
            name,
            width,
            height,
            fps,
            force,
        } => commands::new::run(path, name, width, height, fps, force),
        Commands::Validate { path } => commands::validate::run(path, cli.format),
        Commands::Compile {
            path,
            preset,
            output,
            media_dir,
        } => commands::compile::run(path, preset, output, media_dir, cli.format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new() {
        let cli = Cli::try_parse_from(["cutline", "new", "p.json", "--width", "1280", "--height", "720"])
            .unwrap();
        match cli.command {
            Commands::New { width, height, fps, .. } => {
                assert_eq!((width, height, fps), (1280, 720, 30));
            }
            _ => panic!("expected new"),
        }
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::try_parse_from(["cutline", "validate", "p.json", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(Cli::try_parse_from(["cutline", "validate", "p.json", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_parse_compile_defaults() {
        let cli = Cli::try_parse_from(["cutline", "compile", "p.json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        match cli.command {
            Commands::Compile { preset, media_dir, .. } => {
                assert_eq!(preset, None);
                assert_eq!(media_dir, PathBuf::from("."));
            }
            _ => panic!("expected compile"),
        }
    }
}
