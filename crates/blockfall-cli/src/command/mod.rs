use std::{fs, path::Path};

use anyhow::Context as _;
use blockfall_engine::EngineConfig;
use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;
mod print_config;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the default engine configuration as JSON
    PrintConfig,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::PrintConfig => print_config::run()?,
    }
    Ok(())
}

/// Reads an engine configuration; missing fields take their default values.
fn read_config_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_is_the_default_mode() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_play_arguments() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "play",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
            "--fps",
            "30",
            "-vv",
        ])
        .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(arg.fps, 30);
        assert_eq!(arg.verbose, 2);
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("000102030405060708090a0b0c0d0e0f")
        );
    }

    #[test]
    fn test_bad_seed_is_rejected() {
        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]).is_err());
    }

    #[test]
    fn test_missing_config_file_reports_path() {
        let err = read_config_file(Path::new("/nonexistent/blockfall.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/blockfall.json"));
    }
}
