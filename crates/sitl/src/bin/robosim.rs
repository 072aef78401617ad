//! Command-line front end for robosim.
//!
//! Usage:
//!   robosim demo [--time-mode <MODE>] [--factor <F>]
//!   robosim analyze <FILE>
//!   robosim run <FILE> [--time-mode <MODE>] [--factor <F>]
//!   robosim play <FILE> [--fps <N>]
//!
//! Global options:
//!   --config <PATH>   TOML runtime configuration
//!   -v, --verbose     Increase log verbosity (repeatable)

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use robosim_core::{parse, ParseError, Playback, RobotState, SimulationPlan};
use robosim_sitl::{
    execute_plan, move_robot, ConfigError, KinematicSink, MotionError, SimClock, SimDelay,
    SitlConfig, TimeModeSetting,
};

#[derive(Parser)]
#[command(name = "robosim", version, about = "Run and simulate robot velocity scripts")]
struct Cli {
    /// TOML runtime configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run the built-in demonstration routine against the kinematic sink.
    Demo(TimingArgs),
    /// Parse a script and print the resulting plan.
    Analyze { file: PathBuf },
    /// Execute a script against the kinematic sink.
    Run {
        file: PathBuf,
        #[command(flatten)]
        timing: TimingArgs,
    },
    /// Play a script back on the simulation timeline.
    Play {
        file: PathBuf,
        /// Playback frame rate.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        fps: Option<u32>,
    },
}

#[derive(Args)]
struct TimingArgs {
    /// How delays relate to wall-clock time.
    #[arg(long, value_enum)]
    time_mode: Option<TimeModeSetting>,
    /// Speed-up factor for the scaled time mode.
    #[arg(long)]
    factor: Option<f32>,
}

impl TimingArgs {
    fn apply(&self, config: &mut SitlConfig) {
        if let Some(mode) = self.time_mode {
            config.time_mode = mode;
        }
        if let Some(factor) = self.factor {
            config.scale_factor = factor;
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Motion(#[from] MotionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("fps must be at least 1")]
    InvalidFps,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => SitlConfig::load(path)?,
        None => SitlConfig::default(),
    };

    match cli.command {
        Cmd::Demo(timing) => {
            timing.apply(&mut config);
            demo(&config).await
        }
        Cmd::Analyze { file } => {
            let plan = load_plan(&file)?;
            print_analysis(&plan);
            Ok(())
        }
        Cmd::Run { file, timing } => {
            timing.apply(&mut config);
            let plan = load_plan(&file)?;
            run_plan(&plan, &config).await
        }
        Cmd::Play { file, fps } => {
            if let Some(fps) = fps {
                config.fps = fps;
            }
            let code = read_file(&file)?;
            play(code, config.fps)
        }
    }
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_plan(path: &Path) -> Result<SimulationPlan, CliError> {
    let plan = parse(&read_file(path)?)?;
    log::info!("loaded {} commands from {}", plan.len(), path.display());
    Ok(plan)
}

fn kinematic_sink(clock: &SimClock, config: &SitlConfig) -> KinematicSink {
    let mut sink = KinematicSink::new("kinematic", clock.clone(), config.kinematic());
    sink.connect();
    sink
}

async fn demo(config: &SitlConfig) -> Result<(), CliError> {
    let clock = SimClock::new();
    let mut sink = kinematic_sink(&clock, config);
    let mut delay = SimDelay::new(clock.clone(), config.time_mode());

    move_robot(&mut sink, &mut delay).await?;

    println!("Demonstration routine complete");
    println!("Total delay: {:.2}s", clock.now_secs());
    print_pose("Final pose", &sink.pose(), sink.heading());
    Ok(())
}

async fn run_plan(plan: &SimulationPlan, config: &SitlConfig) -> Result<(), CliError> {
    let clock = SimClock::new();
    let mut sink = kinematic_sink(&clock, config);
    let mut delay = SimDelay::new(clock.clone(), config.time_mode());

    let report = execute_plan(plan, &mut sink, &mut delay).await?;

    println!(
        "Executed {} velocity commands and {} delays ({:.2}s)",
        report.velocity_commands,
        report.delays,
        report.total_delay.as_secs_f64()
    );
    print_pose("Final pose", &sink.pose(), sink.heading());
    Ok(())
}

fn print_analysis(plan: &SimulationPlan) {
    println!("Commands: {}", plan.len());
    println!("Total Duration: {:.2}s", plan.total_duration);
    for (i, cmd) in plan.commands.iter().enumerate() {
        println!("{}. {cmd}", i + 1);
    }
}

fn play(code: String, fps: u32) -> Result<(), CliError> {
    if fps == 0 {
        return Err(CliError::InvalidFps);
    }
    let frame = 1.0 / f64::from(fps);

    let mut playback = Playback::new(code);
    playback.analyze()?;
    println!(
        "Playing {:.2}s at {fps} fps",
        playback.simulation_duration()
    );

    playback.set_playing(true);
    let mut next_report = 1.0;
    let mut last = None;
    while playback.is_playing() {
        let Some(state) = playback.tick(frame) else {
            break;
        };
        if state.time >= next_report {
            print_pose(&format!("t={:>6.2}s", state.time), &state, state.theta);
            next_report = state.time.floor() + 1.0;
        }
        last = Some(state);
    }

    if let Some(state) = last {
        print_pose("Final pose", &state, state.theta);
    }
    Ok(())
}

fn print_pose(label: &str, state: &RobotState, heading: f64) {
    println!(
        "{label}: x={:.3} y={:.3} heading={:.3} rad (v={}, w={})",
        state.x, state.y, heading, state.linear_velocity, state.angular_velocity
    );
}
