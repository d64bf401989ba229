//! fpsim - Headless driver for the first-person simulation
//!
//! Runs a scripted scenario through the frame simulation and prints the result.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use fpsim_core::SimConfig;

use fpsim::settings;
use fpsim::{FrameOutput, FrameSimulation, Scenario};

#[derive(Parser, Debug)]
#[command(
    name = "fpsim",
    about = "Run scripted first-person movement and recoil scenarios"
)]
struct Cli {
    /// Scenario to simulate
    #[arg(value_enum, default_value_t = Scenario::Walk)]
    scenario: Scenario,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 300)]
    ticks: u64,

    /// Frame delta in seconds
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    delta: f32,

    /// Settings file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON snapshot per frame
    #[arg(long)]
    json: bool,

    /// Enable debug logging (repeat for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write the default settings file and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    if cli.write_default_config {
        let path = settings::save(&SimConfig::default(), cli.config.as_deref())?;
        info!("Wrote default settings to {}", path.display());
        return Ok(());
    }

    if !cli.delta.is_finite() || cli.delta <= 0.0 {
        anyhow::bail!("--delta must be a positive number of seconds (got {})", cli.delta);
    }

    let config = settings::load(cli.config.as_deref());
    info!(
        scenario = ?cli.scenario,
        ticks = cli.ticks,
        delta = cli.delta,
        "Starting simulation"
    );

    let mut sim = FrameSimulation::new(&config).context("Invalid simulation settings")?;
    let mut out = std::io::stdout().lock();
    let mut rejected = 0u64;

    for tick in 0..cli.ticks {
        let frame = cli.scenario.frame(tick);
        match sim.step(frame.input, &frame.camera, cli.delta, frame.fire) {
            Ok(output) => {
                if cli.json {
                    let line = serde_json::to_string(&output).context("Failed to encode frame")?;
                    writeln!(out, "{line}")?;
                }
            }
            Err(err) => {
                warn!(tick, %err, "Frame rejected");
                rejected += 1;
            }
        }
    }

    if !cli.json {
        print_summary(&mut out, &sim.last_output())?;
    }
    info!(frames = sim.clock().frame_count, rejected, "Simulation finished");
    Ok(())
}

fn print_summary(out: &mut impl Write, output: &FrameOutput) -> Result<()> {
    let state = &output.movement;
    writeln!(out, "frame        {}", output.frame)?;
    writeln!(out, "elapsed      {:.3} s", output.elapsed)?;
    writeln!(
        out,
        "position     ({:.3}, {:.3}, {:.3})",
        output.position.x, output.position.y, output.position.z
    )?;
    writeln!(out, "speed        {:.3} u/s", state.planar_speed())?;
    writeln!(out, "phase        {:?}", state.phase())?;
    writeln!(out, "height       {:.3}", state.current_height)?;
    writeln!(out, "stamina      {:.1}", state.stamina)?;
    writeln!(out, "recoil index {}", output.weapon.recoil_index)?;
    writeln!(
        out,
        "total recoil ({:.3}, {:.3})",
        output.total_recoil.x, output.total_recoil.y
    )?;
    writeln!(
        out,
        "sway         ({:.4}, {:.4}, {:.4})",
        output.sway.x, output.sway.y, output.sway.z
    )?;
    writeln!(out, "bob          {:.4}", output.bob)?;
    writeln!(out, "inaccuracy   {:.4}", output.inaccuracy)?;
    Ok(())
}
