use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::time::Time;
use plot::{PlotConfig, PlotState};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Frames simulated per timer period.
const FRAMES_PER_TICK: u32 = 10;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless tools for the 3D scatterplot")]
struct Args {
    /// Plot configuration (JSON); defaults apply to missing fields
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the demo grid and the animation noise
    #[arg(long, global = true, default_value_t = 1)]
    seed: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the demo grid as a JSON row file
    Rows {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Run the animation timer headless and log every rebind
    Simulate {
        /// Number of timer periods to run
        #[arg(long, default_value_t = 8)]
        ticks: u32,

        /// Start with playback enabled
        #[arg(long)]
        play: bool,
    },

    /// Build the scene and write it as X3D markup
    X3d {
        /// Plot these rows instead of the demo grid
        #[arg(long)]
        rows: Option<PathBuf>,

        /// Timer periods (with playback on) to run before exporting
        #[arg(long, default_value_t = 0)]
        ticks: u32,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Rows { out } => cmd_rows(config, args.seed, out),
        Command::Simulate { ticks, play } => cmd_simulate(config, args.seed, ticks, play),
        Command::X3d { rows, ticks, out } => cmd_x3d(config, args.seed, rows, ticks, out),
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PlotConfig, String> {
    let Some(path) = path else {
        return Ok(PlotConfig::default());
    };
    let payload = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    PlotConfig::from_json(&payload).map_err(|e| format!("{}: {e}", path.display()))
}

fn emit(out: Option<PathBuf>, payload: &str) -> Result<(), String> {
    match out {
        Some(path) => {
            fs::write(&path, payload).map_err(|e| format!("{}: {e}", path.display()))?;
            info!(path = %path.display(), bytes = payload.len(), "wrote output");
            Ok(())
        }
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn cmd_rows(config: PlotConfig, seed: u32, out: Option<PathBuf>) -> Result<(), String> {
    let state = PlotState::new(config, seed).map_err(|e| e.to_string())?;
    let json = formats::rows_to_json(state.rows()).map_err(|e| e.to_string())?;
    info!(rows = state.rows().len(), "generated demo grid");
    emit(out, &json)
}

/// Advances `state` through `ticks` timer periods in fixed frame steps.
///
/// Frame times are derived from `start` rather than summed, so the last frame
/// of each period lands exactly on the timer's due time.
fn run_ticks(state: &mut PlotState, start: Time, ticks: u32) -> Time {
    let period = state.config().interval_s();
    let frames = u64::from(ticks) * u64::from(FRAMES_PER_TICK);
    let mut now = start;
    for k in 1..=frames {
        now = start.after(period * (k as f64 / f64::from(FRAMES_PER_TICK)));
        if let Some(report) = state.frame(now) {
            info!(
                t = now.seconds(),
                phase = state.phase(),
                rows = report.rows,
                entered = report.points.entered,
                updated = report.points.updated,
                exited = report.points.exited,
                "timer step"
            );
        }
    }
    now
}

fn cmd_simulate(config: PlotConfig, seed: u32, ticks: u32, play: bool) -> Result<(), String> {
    let mut state = PlotState::new(config, seed).map_err(|e| e.to_string())?;
    let report = state.initialize(Time::ZERO);
    info!(points = report.points.entered, "scene built");
    if play {
        state.toggle_playback(Time::ZERO);
    }
    let end = run_ticks(&mut state, Time::ZERO, ticks);

    let max_y = state
        .rows()
        .iter()
        .map(|r| r.y)
        .fold(0.0f64, f64::max);
    info!(
        t = end.seconds(),
        playback = ?state.playback(),
        max_elevation = max_y,
        diagnostics = state.events().len(),
        "simulation finished"
    );
    Ok(())
}

fn cmd_x3d(
    config: PlotConfig,
    seed: u32,
    rows: Option<PathBuf>,
    ticks: u32,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let mut state = match rows {
        Some(path) => {
            let rows = formats::read_rows(&path).map_err(|e| format!("{}: {e}", path.display()))?;
            PlotState::with_rows(config, rows, seed)
        }
        None => PlotState::new(config, seed),
    }
    .map_err(|e| e.to_string())?;

    state.initialize(Time::ZERO);
    if ticks > 0 {
        state.toggle_playback(Time::ZERO);
        run_ticks(&mut state, Time::ZERO, ticks);
        state.settle();
    }
    emit(out, &formats::to_x3d_string(state.world()))
}
