//! Balloon simulation
//!
//! A balloon moves while Healthy, starts Popping when the probe touches it,
//! and becomes Gone once it has been popping for longer than the pop
//! duration. Gone is terminal.

mod registry;

pub use registry::*;

use glam::Vec3;

use crate::scene::ObjectId;

/// Lifecycle state of a balloon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalloonState {
    Healthy,
    Popping,
    Gone,
}

/// How Healthy balloons move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Reflect the velocity component along `axis` (0 = x, 1 = y, 2 = z)
    /// whenever the next step would leave `[min, max]` on that axis.
    Bounce { axis: usize, min: f32, max: f32 },
    /// Integrate velocity with no bounds.
    Kinematic,
}

/// How the registry keeps itself populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Population {
    /// Only the balloons inserted up front.
    Fixed,
    /// Spawn Healthy balloons at `spawn_point` while fewer than
    /// `min_active` balloons are not Gone.
    Maintain {
        min_active: usize,
        spawn_point: Vec3,
        velocity: Vec3,
    },
}

/// What happens to Gone balloons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetirePolicy {
    /// Keep them as inert entries.
    Retain,
    /// Remove them at the start of the next step.
    Prune,
}

/// Rules a [`BalloonRegistry`] simulates by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalloonPolicy {
    /// Seconds spent Popping before Gone
    pub pop_duration: f32,
    pub motion: Motion,
    pub population: Population,
    pub retire: RetirePolicy,
    /// Radius given to spawned balloons
    pub radius: f32,
}

impl Default for BalloonPolicy {
    fn default() -> Self {
        Self {
            pop_duration: 1.0,
            motion: Motion::Bounce {
                axis: 2,
                min: 1.0,
                max: 3.0,
            },
            population: Population::Fixed,
            retire: RetirePolicy::Retain,
            radius: 1.0,
        }
    }
}

/// A single balloon.
#[derive(Debug, Clone)]
pub struct Balloon {
    pub center: Vec3,
    pub radius: f32,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    state: BalloonState,
    elapsed_pop: f32,
    /// Scene object mirroring this balloon, if it is drawn
    pub object: Option<ObjectId>,
}

impl Balloon {
    pub fn new(center: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            center,
            radius,
            velocity,
            acceleration: Vec3::ZERO,
            state: BalloonState::Healthy,
            elapsed_pop: 0.0,
            object: None,
        }
    }

    pub fn with_object(mut self, object: ObjectId) -> Self {
        self.object = Some(object);
        self
    }

    pub fn state(&self) -> BalloonState {
        self.state
    }

    /// Time spent Popping so far; zero in any other state.
    pub fn elapsed_pop(&self) -> f32 {
        self.elapsed_pop
    }

    /// Strictly inside the balloon; touching the surface does not count.
    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance(point) < self.radius
    }

    /// Start popping. Returns whether the balloon was Healthy.
    pub fn pop(&mut self) -> bool {
        if self.state == BalloonState::Healthy {
            self.state = BalloonState::Popping;
            self.elapsed_pop = 0.0;
            true
        } else {
            false
        }
    }

    /// Advance a Healthy balloon by `dt`. Other states do not move.
    pub fn integrate(&mut self, dt: f32, motion: Motion) {
        if self.state != BalloonState::Healthy {
            return;
        }
        self.velocity += dt * self.acceleration;
        if let Motion::Bounce { axis, min, max } = motion {
            if axis < 3 {
                let predicted = self.center[axis] + dt * self.velocity[axis];
                if predicted > max || predicted < min {
                    self.velocity[axis] = -self.velocity[axis];
                }
            }
        }
        self.center += dt * self.velocity;
    }

    /// Accumulate popping time. Returns true on the step that turns the
    /// balloon Gone.
    pub fn advance_pop(&mut self, dt: f32, pop_duration: f32) -> bool {
        if self.state != BalloonState::Popping {
            return false;
        }
        self.elapsed_pop += dt;
        if self.elapsed_pop > pop_duration {
            self.state = BalloonState::Gone;
            self.elapsed_pop = 0.0;
            true
        } else {
            false
        }
    }
}
