//! seqcanvas - Entry Point

use clap::Parser;
use seqcanvas::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    ResolvedConfig,
};
use seqcanvas::model::{Annotation, AppError, Sequence};
use seqcanvas::view::{AsciiSurface, ColorConfig};
use seqcanvas::view_state::{LayoutEngine, MonospaceMeasurer, RenderReport, Zoom};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use tracing::info;

/// Lay out a DNA sequence as stacked lines and print the canvas
#[derive(Parser, Debug)]
#[command(name = "seqcanvas")]
#[command(version)]
#[command(about = "Render a DNA sequence with ruler, complement strand and feature bars")]
pub struct Args {
    /// Forward strand bases (read from stdin if not provided)
    pub sequence: Option<String>,

    /// Positions per line
    #[arg(short, long, value_parser = parse_zoom)]
    pub zoom: Option<Zoom>,

    /// Viewport width in columns
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Annotation as NAME=LOCATION, e.g. lacZ=complement(10..42); repeatable
    #[arg(short, long = "feature", value_name = "NAME=LOCATION")]
    pub features: Vec<String>,

    /// Print the render report as JSON instead of the canvas
    #[arg(long)]
    pub json: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the configured log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_zoom(value: &str) -> Result<Zoom, String> {
    let n: usize = value.parse().map_err(|e| format!("{e}"))?;
    Zoom::new(n).map_err(|e| e.to_string())
}

/// Strip whitespace and FASTA header lines.
fn clean_sequence(raw: &str) -> String {
    raw.lines()
        .filter(|line| !line.starts_with('>'))
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect()
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged)?;
    let mut config = apply_cli_overrides(with_env, args.zoom, args.width);
    if let Some(path) = &args.log_file {
        config.log_file_path = path.clone();
    }
    Ok(config)
}

fn build_engine(config: &ResolvedConfig, features: Vec<Annotation>) -> LayoutEngine<AsciiSurface> {
    let viewport = config.viewport();
    let mut engine = LayoutEngine::new(
        config.layout_config(),
        viewport,
        Box::new(MonospaceMeasurer::default()),
        AsciiSurface::new(viewport.width),
    );
    for plugin in seqcanvas::plugins::standard(features) {
        let enabled = match plugin.name() {
            "ruler" => config.show_ruler,
            "complement" => config.show_complement,
            _ => true,
        };
        if enabled {
            engine.register_plugin(plugin);
        }
    }
    engine
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;
    seqcanvas::logging::init(&config.log_file_path)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let raw = match &args.sequence {
        Some(text) => text.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let sequence = Sequence::new(clean_sequence(&raw))?;

    let features = args
        .features
        .iter()
        .map(|pair| Annotation::parse_pair(pair))
        .collect::<Result<Vec<_>, _>>()?;

    let mut engine = build_engine(&config, features);
    let report: RenderReport = engine.render(&sequence);
    info!(
        lines = report.line_count,
        failed = report.failed.len(),
        canvas_height = report.canvas_height,
        "Render pass finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let stdout = std::io::stdout();
        let colors = ColorConfig::from_env_and_args(args.no_color || !stdout.is_terminal());
        engine.surface().write_canvas(&mut stdout.lock(), colors)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run(Args::parse())?;
    Ok(())
}
