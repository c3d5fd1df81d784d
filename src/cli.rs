use crate::config::{Config, load_config};
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_svg};
use crate::theme::ThemeMode;
use crate::{RenderOptions, diagram_state};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "apdiag",
    version,
    about = "Place an aircraft from ATC position text on a top-down airport diagram"
)]
pub struct Args {
    /// Position text, e.g. "holding short runway 27". Read from stdin if omitted.
    #[arg(short = 'p', long = "position")]
    pub position: Option<String>,

    /// Weather/ATIS text used for the runway in use when the position names none
    #[arg(short = 'w', long = "weather", default_value = "")]
    pub weather: String,

    /// Draw the crossing runway of a towered field
    #[arg(long = "towered")]
    pub towered: bool,

    /// Base palette
    #[arg(short = 't', long = "theme", value_enum, default_value = "light")]
    pub theme: ThemeArg,

    /// Config JSON/JSON5 file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Width in pixels
    #[arg(long = "width")]
    pub width: Option<f32>,

    /// Height in pixels
    #[arg(long = "height")]
    pub height: Option<f32>,

    /// Seed for placing unrecognized text
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Also write the computed layout as JSON to this path
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => ThemeMode::Light,
            ThemeArg::Dark => ThemeMode::Dark,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging();

    let config = load_config(args.config.as_deref(), args.theme.into())?;
    let options = render_options(&args, config);

    let position = match args.position.as_deref() {
        Some(position) => position.to_string(),
        None => read_stdin()?,
    };

    let state = diagram_state(&position, &args.weather, &options);
    if !state.placement.valid {
        tracing::warn!("empty position text, drawing the field without an aircraft");
    }

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &state)
            .with_context(|| format!("failed to write layout dump {}", path.display()))?;
    }

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&state, &options.theme, &options.render);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(args.output.as_deref(), "png")?;
            let svg = render_svg(&state, &options.theme, &options.render);
            write_png(&svg, output, &options.render)?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&state)?;
            match args.output.as_deref() {
                Some(path) => std::fs::write(path, json)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

fn render_options(args: &Args, config: Config) -> RenderOptions {
    let mut options = RenderOptions::from_config(config);
    if let Some(width) = args.width {
        options.render.width = width;
    }
    if let Some(height) = args.height {
        options.render.height = height;
    }
    options.is_towered = args.towered;
    options.seed = args.seed;
    options
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // stdout carries the diagram
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end().to_string())
}

fn ensure_output<'a>(output: Option<&'a Path>, ext: &str) -> Result<&'a Path> {
    output.ok_or_else(|| anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, render: &crate::config::RenderConfig) -> Result<()> {
    crate::render::write_output_png(svg, output, render)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _render: &crate::config::RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
