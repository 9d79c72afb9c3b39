//! Command line arguments.
//!
//! Parsed with clap and folded into a [`GameConfig`]; anything not given on
//! the command line keeps its [`GameConfig::default`] value.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{GameConfig, GameMode};

/// Balloon population mode for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliMode {
    /// Pop every balloon in the scene; the run ends when none are left.
    #[default]
    Classic,
    /// Balloons keep respawning; quit when you have had enough.
    Endless,
}

impl From<CliMode> for GameMode {
    fn from(cli: CliMode) -> Self {
        match cli {
            CliMode::Classic => GameMode::Classic,
            CliMode::Endless => GameMode::Endless,
        }
    }
}

/// Robot Fun Police arguments.
#[derive(Parser, Debug)]
#[command(
    name = "robot-fun-police",
    about = "Steer a robot arm and pop every balloon",
    long_about = "Steer a robot arm and pop every balloon.\n\n\
        CONTROLS:\n\
          A / S    rotate base\n\
          Z / X    rotate lower link\n\
          W / E    rotate middle link\n\
          D / C    rotate upper link\n\
          Tab      zoom out\n\
          LShift   zoom in\n\
          LMB drag orbit the camera\n\
          Esc / Q  quit",
    version
)]
pub struct Args {
    /// Mesh library blob.
    #[arg(long, default_value = "meshes.blob")]
    pub meshes: PathBuf,

    /// Scene description blob.
    #[arg(long, default_value = "scene.blob")]
    pub scene: PathBuf,

    /// Balloon population mode.
    #[arg(long, default_value = "classic", value_enum)]
    pub mode: CliMode,

    /// Move balloons by velocity alone instead of bouncing them.
    #[arg(long)]
    pub kinematic: bool,

    /// Initial window width in pixels.
    #[arg(long, default_value = "1280")]
    pub width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value = "960")]
    pub height: u32,

    /// Disable vertical sync (may cause tearing).
    #[arg(long)]
    pub no_vsync: bool,

    /// Largest simulation step in seconds; 0 disables the clamp.
    #[arg(long, default_value = "0.1")]
    pub max_step: f32,

    /// Seconds a balloon takes to pop.
    #[arg(long, default_value = "1.0")]
    pub pop_duration: f32,

    /// Minimum live balloons in endless mode.
    #[arg(long, default_value = "3")]
    pub min_active: usize,
}

impl From<Args> for GameConfig {
    fn from(args: Args) -> Self {
        if args.min_active != 3 && args.mode != CliMode::Endless {
            log::warn!("--min-active only applies to endless mode");
        }

        Self {
            width: args.width,
            height: args.height,
            vsync: !args.no_vsync,
            meshes_path: args.meshes,
            scene_path: args.scene,
            mode: args.mode.into(),
            kinematic: args.kinematic,
            pop_duration: args.pop_duration,
            min_active: args.min_active,
            max_step: (args.max_step > 0.0).then_some(args.max_step),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_config() {
        let args = Args::try_parse_from(["robot-fun-police"]).unwrap();
        let config = GameConfig::from(args);
        let defaults = GameConfig::default();

        assert_eq!(config.width, defaults.width);
        assert_eq!(config.height, defaults.height);
        assert_eq!(config.mode, GameMode::Classic);
        assert_eq!(config.max_step, Some(0.1));
        assert_eq!(config.meshes_path, defaults.meshes_path);
        assert!(config.vsync);
    }

    #[test]
    fn zero_max_step_disables_clamp() {
        let args = Args::try_parse_from([
            "robot-fun-police",
            "--max-step",
            "0",
            "--mode",
            "endless",
            "--no-vsync",
        ])
        .unwrap();
        let config = GameConfig::from(args);
        assert_eq!(config.max_step, None);
        assert_eq!(config.mode, GameMode::Endless);
        assert!(!config.vsync);
    }
}
