use std::path::PathBuf;

use anyhow::ensure;
use blockfall_engine::{EngineConfig, GameSession, PieceSeed};
use tracing::info;

use crate::{command::play::app::PlayApp, logging, tui::Tui};

mod app;

const DEFAULT_FPS: u32 = 60;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Engine configuration file (JSON). Missing fields take their defaults
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// Seed for the piece sequence, as 32 hexadecimal digits
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Frames per second
    #[clap(long, default_value_t = DEFAULT_FPS)]
    pub(crate) fps: u32,
    /// Write log events to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
    /// Log more (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub(crate) verbose: u8,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            config: None,
            seed: None,
            fps: DEFAULT_FPS,
            log_file: None,
            verbose: 0,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        seed,
        fps,
        log_file,
        verbose,
    } = arg;

    ensure!(*fps > 0, "frame rate must be positive");
    logging::init(log_file.as_deref(), *verbose)?;

    let config = match config {
        Some(path) => super::read_config_file(path)?,
        None => EngineConfig::default(),
    };
    let seed = seed.unwrap_or_else(rand::random);
    info!(%seed, fps, "starting session");

    let mut app = PlayApp::new(GameSession::with_seed(config, seed), *fps);
    Tui::new().run(&mut app)
}
