mod app;
mod event;
mod script;

use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use voxbox_edit::{DEFAULT_REACH, Hotbar};
use voxbox_world::{WorldGenParams, load_params_from_path};

use crate::app::App;
use crate::script::Session;

#[derive(Parser, Debug)]
#[command(
    name = "voxbox",
    version,
    about = "Headless voxel sandbox: generate terrain and replay edit sessions"
)]
struct Args {
    /// Worldgen TOML (seed, bounds, height, noise)
    #[arg(long, value_name = "PATH")]
    world: Option<PathBuf>,

    /// Hotbar TOML (`items = [...]`)
    #[arg(long, value_name = "PATH")]
    hotbar: Option<PathBuf>,

    /// Session TOML of camera frames and input events to replay
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Override the worldgen seed
    #[arg(long)]
    seed: Option<i32>,

    /// Also write a debug-level log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print per-block counts of visible voxels when done
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn init_logging(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    match log_file {
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .init();
        }
        Some(path) => {
            let file = File::create(path)?;
            CombinedLogger::init(vec![
                TermLogger::new(
                    LevelFilter::Info,
                    Config::default(),
                    TerminalMode::Mixed,
                    ColorChoice::Auto,
                ),
                WriteLogger::new(LevelFilter::Debug, Config::default(), file),
            ])?;
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut params = match &args.world {
        Some(p) => load_params_from_path(p)?,
        None => WorldGenParams::default(),
    };
    if let Some(seed) = args.seed {
        params.seed = seed;
    }
    let hotbar = match &args.hotbar {
        Some(p) => Hotbar::load_from_path(p)?,
        None => Hotbar::default(),
    };
    let session = match &args.script {
        Some(p) => Session::load_from_path(p)?,
        None => Session::default(),
    };
    let reach = match session.reach {
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(r) => {
            log::warn!("ignoring reach {}; using {}", r, DEFAULT_REACH);
            DEFAULT_REACH
        }
        None => DEFAULT_REACH,
    };

    let mut app = App::new(&params, hotbar, reach);
    let applied = app.run_session(&session);
    log::info!(
        "replayed {} frames, {} mutations",
        session.frames.len(),
        applied.len()
    );
    if args.summary {
        println!("{}", app.summary());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("failed to initialise logging: {}", e);
        std::process::exit(2);
    }
    if let Err(e) = run(args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
