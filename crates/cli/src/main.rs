#![deny(unsafe_code)]
//! Headless driver for the flow-field animation.
//!
//! Subcommands:
//! - `render` — run N frames, write the last one as PNG
//! - `sequence` — run N frames, write every k-th frame into a directory
//! - `field` — print the flow field of a canvas
//! - `params` — print the effect parameters with defaults and ranges
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` for details.

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use flowfield_core::{EffectConfig, FlowField, Player, Srgb, StrokeStyle};
use flowfield_raster::snapshot::{frame_path, write_png};
use flowfield_raster::Raster;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowfield", about = "Flow-field particle animation CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct CanvasArgs {
    /// Canvas width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Canvas height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Effect parameters as a JSON string (no_of_particles, cell_size, curve, zoom, seed).
    #[arg(long, default_value = "{}")]
    params: String,

    /// PRNG seed; overrides "seed" in --params.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct StyleArgs {
    /// Trail color as #rrggbb.
    #[arg(long, default_value = "#ffffff")]
    stroke: String,

    /// Background color as #rrggbb.
    #[arg(long, default_value = "#000000")]
    background: String,

    /// Trail width in pixels.
    #[arg(long, default_value_t = 1.0)]
    line_width: f64,
}

#[derive(Subcommand)]
enum Command {
    /// Run the animation for N frames and write the final frame as PNG.
    Render {
        #[command(flatten)]
        canvas: CanvasArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Number of frames to render.
        #[arg(short, long, default_value_t = 300)]
        frames: usize,

        /// Output file path.
        #[arg(short, long, default_value = "flowfield.png")]
        output: PathBuf,
    },
    /// Run the animation and write every k-th frame into a directory.
    Sequence {
        #[command(flatten)]
        canvas: CanvasArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Number of frames to render.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// Write one frame out of every N.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        every: u64,

        /// Output directory (created if missing).
        #[arg(short, long, default_value = "frames")]
        dir: PathBuf,
    },
    /// Print the flow field computed for a canvas.
    Field {
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// List effect parameters with defaults and ranges.
    Params,
}

impl CanvasArgs {
    fn config(&self) -> Result<EffectConfig, CliError> {
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut config = EffectConfig::from_json(&params);
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

impl StyleArgs {
    fn raster(&self, width: usize, height: usize) -> Result<Raster, CliError> {
        let stroke = StrokeStyle {
            color: Srgb::from_hex(&self.stroke)?,
            line_width: self.line_width,
        };
        let background = Srgb::from_hex(&self.background)?;
        Ok(Raster::new(width, height, stroke, background)?)
    }
}

fn build_player(canvas: &CanvasArgs, style: &StyleArgs) -> Result<Player<Raster>, CliError> {
    let config = canvas.config()?;
    let raster = style.raster(canvas.width, canvas.height)?;
    Ok(Player::new(raster, config)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Params => {
            let schema = EffectConfig::param_schema();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else if let Some(entries) = schema.as_object() {
                println!("Parameters:");
                for (name, spec) in entries {
                    println!(
                        "  {name:<16} default {:<6} {}",
                        spec["default"],
                        spec["description"].as_str().unwrap_or_default()
                    );
                }
            }
        }
        Command::Field { canvas } => {
            let config = canvas.config()?;
            config.validate()?;
            let field = FlowField::new(
                canvas.width,
                canvas.height,
                config.cell_size,
                config.curve,
                config.zoom,
            )?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&field)?);
            } else {
                let (min, max) = field
                    .cells()
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &a| {
                        (lo.min(a), hi.max(a))
                    });
                println!(
                    "{} cols x {} rows of {}px cells, angles in [{min:.4}, {max:.4}] rad",
                    field.cols(),
                    field.rows(),
                    field.cell_size()
                );
            }
        }
        Command::Render {
            canvas,
            style,
            frames,
            output,
        } => {
            let mut player = build_player(&canvas, &style)?;
            if frames > 0 {
                player.start()?;
                player.run_frames(frames - 1)?;
            }
            let rendered = player.frames_rendered();
            let config = *player.config();
            let raster = player.into_surface();
            write_png(&raster, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": canvas.width,
                    "height": canvas.height,
                    "frames": rendered,
                    "params": config.to_json(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {rendered} frames ({}x{}, {} particles, seed {}) -> {}",
                    canvas.width,
                    canvas.height,
                    config.no_of_particles,
                    config.seed,
                    output.display()
                );
            }
        }
        Command::Sequence {
            canvas,
            style,
            frames,
            every,
            dir,
        } => {
            std::fs::create_dir_all(&dir)?;
            let mut player = build_player(&canvas, &style)?;
            let mut written = Vec::new();
            for i in 0..frames as u64 {
                if i == 0 {
                    player.start()?;
                } else {
                    player.pump()?;
                }
                if i % every == 0 {
                    let path = frame_path(&dir, i);
                    write_png(player.surface(), &path)?;
                    written.push(path.display().to_string());
                }
            }
            log::info!("wrote {} of {} frames to {}", written.len(), frames, dir.display());

            if cli.json {
                let info = serde_json::json!({
                    "frames": frames,
                    "every": every,
                    "files": written,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!("wrote {} frames to {}", written.len(), dir.display());
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
