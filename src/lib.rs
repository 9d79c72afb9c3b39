//! Robot Fun Police - pop balloons with a robot arm
//!
//! A small interactive 3D game built around two pieces:
//! - A scene graph of parent-relative transforms whose world matrices are
//!   composed on demand from the root down
//! - A balloon simulation: bounded motion, probe collision, a timed pop
//!   animation and a Healthy -> Popping -> Gone lifecycle
//!
//! Everything that touches the window or the GPU sits behind the
//! [`render::Renderer`] trait and the [`window`] runner, so the simulation can
//! be driven headless (see `tests/integration.rs`).

pub mod args;
pub mod assets;
pub mod balloon;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod robot;
pub mod scene;
pub mod window;

pub use config::{GameConfig, GameMode};
pub use error::{GameError, GameResult};
pub use game::{FrameOutcome, Game};
