//! Robot Fun Police
//!
//! Run with `cargo run -- --help` for options and controls.

use std::process::ExitCode;

use clap::Parser;

use robot_fun_police::args::Args;
use robot_fun_police::assets::{read_scene_file, MeshLibrary};
use robot_fun_police::{window, Game, GameConfig, GameResult};

fn run(config: GameConfig) -> GameResult<Option<f32>> {
    let meshes = MeshLibrary::load(&config.meshes_path)?;
    let records = read_scene_file(&config.scene_path)?;
    let game = Game::from_records(&config, &meshes, &records)?;
    window::run(game, meshes.vertices())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GameConfig::from(Args::parse());
    log::info!("Starting {} ({:?} mode)", config.title, config.mode);

    match run(config) {
        Ok(Some(total_time)) => {
            println!("your total time was {:.2}!", total_time);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
