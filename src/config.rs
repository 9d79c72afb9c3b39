//! Game configuration

use std::path::PathBuf;

use glam::Vec3;

use crate::balloon::{BalloonPolicy, Motion, Population, RetirePolicy};

/// How the balloon population behaves over a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// One balloon per scene slot. Popped balloons stay in the registry as
    /// inert husks and the run ends once every one of them is gone.
    #[default]
    Classic,
    /// Popped balloons are dropped and fresh ones spawn at a fixed point to
    /// keep a minimum number alive. Runs until the player quits.
    Endless,
}

/// Configuration for a game session
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Window title
    pub title: String,
    /// Initial window width
    pub width: u32,
    /// Initial window height
    pub height: u32,
    /// Enable vsync
    pub vsync: bool,
    /// Mesh library blob
    pub meshes_path: PathBuf,
    /// Scene description blob
    pub scene_path: PathBuf,
    pub mode: GameMode,
    /// Integrate balloons by velocity alone instead of bouncing between the
    /// floor and the ceiling
    pub kinematic: bool,
    /// Objects whose name starts with this become balloons
    pub balloon_prefix: String,
    /// Collision radius of every balloon
    pub balloon_radius: f32,
    /// Initial vertical speed of every balloon
    pub balloon_speed: f32,
    /// Upper bound of the bounce range; the lower bound is the radius
    pub ceiling: f32,
    /// Seconds a balloon spends popping before it is gone
    pub pop_duration: f32,
    /// Seconds between the last pop finishing and the game ending
    pub grace_delay: f32,
    /// Mesh shown where a balloon is popping, if any
    pub pop_effect_mesh: Option<String>,
    /// Mesh drawn for balloons spawned at runtime (endless mode)
    pub spawn_mesh: String,
    /// Endless mode: minimum number of live balloons
    pub min_active: usize,
    /// Endless mode: where new balloons appear
    pub spawn_point: Vec3,
    /// Largest simulation step in seconds; `None` integrates whatever the
    /// frame time was
    pub max_step: Option<f32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "Game2: Robot Fun Police".to_string(),
            width: 1280,
            height: 960,
            vsync: true,
            meshes_path: PathBuf::from("meshes.blob"),
            scene_path: PathBuf::from("scene.blob"),
            mode: GameMode::Classic,
            kinematic: false,
            balloon_prefix: "Balloon".to_string(),
            balloon_radius: 1.0,
            balloon_speed: 1.0,
            ceiling: 3.0,
            pop_duration: 1.0,
            grace_delay: 2.0,
            pop_effect_mesh: Some("Balloon1-Pop".to_string()),
            spawn_mesh: "Balloon1".to_string(),
            min_active: 3,
            spawn_point: Vec3::new(0.0, 0.0, 1.0),
            max_step: Some(0.1),
        }
    }
}

impl GameConfig {
    /// Balloon policy implied by the mode and motion settings.
    pub fn balloon_policy(&self) -> BalloonPolicy {
        let motion = if self.kinematic {
            Motion::Kinematic
        } else {
            Motion::Bounce {
                axis: 2,
                min: self.balloon_radius,
                max: self.ceiling,
            }
        };

        let (population, retire) = match self.mode {
            GameMode::Classic => (Population::Fixed, RetirePolicy::Retain),
            GameMode::Endless => (
                Population::Maintain {
                    min_active: self.min_active,
                    spawn_point: self.spawn_point,
                    velocity: Vec3::Z * self.balloon_speed,
                },
                RetirePolicy::Prune,
            ),
        };

        BalloonPolicy {
            pop_duration: self.pop_duration,
            motion,
            population,
            retire,
            radius: self.balloon_radius,
        }
    }

    /// Clamp a wall-clock frame delta to the configured maximum step.
    pub fn clamp_step(&self, dt: f32) -> f32 {
        match self.max_step {
            Some(max) if dt > max => max,
            _ => dt.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_mode_bounces_between_radius_and_ceiling() {
        let config = GameConfig::default();
        let policy = config.balloon_policy();
        assert_eq!(policy.population, Population::Fixed);
        assert_eq!(policy.retire, RetirePolicy::Retain);
        assert_eq!(
            policy.motion,
            Motion::Bounce {
                axis: 2,
                min: 1.0,
                max: 3.0
            }
        );
    }

    #[test]
    fn endless_mode_prunes_and_respawns() {
        let config = GameConfig {
            mode: GameMode::Endless,
            kinematic: true,
            ..Default::default()
        };
        let policy = config.balloon_policy();
        assert_eq!(policy.retire, RetirePolicy::Prune);
        assert_eq!(policy.motion, Motion::Kinematic);
        assert!(matches!(
            policy.population,
            Population::Maintain { min_active: 3, .. }
        ));
    }

    #[test]
    fn clamp_step() {
        let mut config = GameConfig::default();
        assert_eq!(config.clamp_step(0.016), 0.016);
        assert_eq!(config.clamp_step(5.0), 0.1);
        assert_eq!(config.clamp_step(-1.0), 0.0);

        config.max_step = None;
        assert_eq!(config.clamp_step(5.0), 5.0);
    }
}
