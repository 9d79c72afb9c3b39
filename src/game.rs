//! Game loop state
//!
//! [`Game`] owns the scene, the balloons and the robot, and advances them one
//! tick at a time. It never touches the window or the GPU: input arrives as
//! [`InputEvent`]s and each tick's output is a [`Frame`].

use glam::{Vec2, Vec3};

use crate::assets::{MeshLibrary, SceneRecord};
use crate::balloon::{Balloon, BalloonRegistry, Population};
use crate::config::GameConfig;
use crate::error::GameResult;
use crate::input::{action_for, Action, InputEvent};
use crate::render::Frame;
use crate::robot::{JointAngles, RobotRig};
use crate::scene::{OrbitController, Scene, Transform};

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Running,
    /// The player asked to leave.
    Quit,
    /// Every balloon is gone and the grace delay has passed.
    Finished { total_time: f32 },
}

pub struct Game {
    config: GameConfig,
    scene: Scene,
    balloons: BalloonRegistry,
    rig: RobotRig,
    joints: JointAngles,
    orbit: OrbitController,
    mouse: Vec2,
    total_time: f32,
    /// Run time when the last balloon went, once it has
    end_time: Option<f32>,
    grace_elapsed: f32,
    quit: bool,
}

impl Game {
    /// Build the scene from loaded records. Every record's mesh must exist
    /// in `meshes`, and the robot parts must all be present.
    pub fn from_records(config: &GameConfig, meshes: &MeshLibrary, records: &[SceneRecord]) -> GameResult<Self> {
        let policy = config.balloon_policy();
        let mut scene = Scene::new();
        let mut balloons = BalloonRegistry::new(policy);

        for record in records {
            let mesh = meshes.get(&record.name)?;
            let transform = Transform::from_components(record.position, record.rotation, record.scale);
            let object = scene.add_object(record.name.clone(), transform, mesh);

            if record.name.starts_with(&config.balloon_prefix) {
                let velocity = Vec3::Z * config.balloon_speed;
                balloons.insert(Balloon::new(record.position, config.balloon_radius, velocity).with_object(object));
            }
        }

        if let Some(name) = &config.pop_effect_mesh {
            let effect = scene.add_object(name.clone(), Transform::default(), meshes.get(name)?);
            scene.set_visible(effect, false)?;
            balloons.set_pop_effect(Some(effect));
        }

        if let Population::Maintain { .. } = policy.population {
            balloons.set_spawn_mesh(Some(meshes.get(&config.spawn_mesh)?));
        }

        let rig = RobotRig::wire(&mut scene)?;
        scene.camera.set_aspect(config.width, config.height);

        let orbit = OrbitController::new();
        orbit.apply(&mut scene.camera);

        log::info!(
            "Scene ready: {} objects, {} balloons, {:?} mode",
            scene.len(),
            balloons.len(),
            config.mode
        );

        Ok(Self {
            config: config.clone(),
            scene,
            balloons,
            rig,
            joints: JointAngles::default(),
            orbit,
            mouse: Vec2::ZERO,
            total_time: 0.0,
            end_time: None,
            grace_elapsed: 0.0,
            quit: false,
        })
    }

    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => match action_for(key) {
                Action::Joint(joint, delta) => self.joints.add(joint, delta),
                Action::Zoom(delta) => self.orbit.zoom(delta),
                Action::Quit => self.quit = true,
            },
            InputEvent::MouseMotion { position, left_held } => {
                if left_held {
                    self.orbit.drag(position - self.mouse);
                }
                self.mouse = position;
            }
            InputEvent::Quit => self.quit = true,
        }
    }

    /// Advance the game by `dt` seconds of wall-clock time.
    pub fn update(&mut self, dt: f32) -> GameResult<FrameOutcome> {
        if self.quit {
            return Ok(FrameOutcome::Quit);
        }

        let dt = dt.max(0.0);
        self.total_time += dt;
        let step = self.config.clamp_step(dt);

        self.rig.pose(&mut self.scene, &self.joints)?;
        let probe = self.rig.probe(&self.scene)?;
        self.balloons.pop_touching(probe);
        self.balloons.step(step, &mut self.scene)?;

        if self.balloons.is_cleared() {
            match self.end_time {
                None => {
                    log::info!("Game over! All balloons popped in {:.2}s", self.total_time);
                    self.end_time = Some(self.total_time);
                }
                Some(end) => {
                    self.grace_elapsed += dt;
                    if self.grace_elapsed > self.config.grace_delay {
                        return Ok(FrameOutcome::Finished { total_time: end });
                    }
                }
            }
        }

        self.orbit.apply(&mut self.scene.camera);
        Ok(FrameOutcome::Running)
    }

    /// Draw list for the current state.
    pub fn frame(&self) -> GameResult<Frame> {
        let camera = &self.scene.camera;
        let view = camera.view_matrix();
        Ok(Frame {
            view_projection: camera.projection_matrix() * view,
            to_light: Frame::light_direction(),
            clear_color: Frame::clear_grey(),
            draws: self.scene.collect_draws(view)?,
        })
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.scene.camera.set_aspect(width, height);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn balloons(&self) -> &BalloonRegistry {
        &self.balloons
    }

    pub fn rig(&self) -> &RobotRig {
        &self.rig
    }

    pub fn joints(&self) -> &JointAngles {
        &self.joints
    }

    pub fn orbit(&self) -> &OrbitController {
        &self.orbit
    }

    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    pub fn is_game_over(&self) -> bool {
        self.end_time.is_some()
    }
}
