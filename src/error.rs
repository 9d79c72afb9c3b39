//! Top-level error type

use thiserror::Error;

use crate::assets::AssetError;
use crate::render::RenderError;
use crate::scene::SceneError;

/// Anything that can stop the game from starting.
///
/// All of these are fatal: startup aborts before the first frame.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("window error: {0}")]
    Window(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_scene_errors() {
        let err: GameError = SceneError::MissingObject("Tip".into()).into();
        assert_eq!(err.to_string(), "scene error: no object named 'Tip'");
    }
}
