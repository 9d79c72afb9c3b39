//! Input events and key bindings
//!
//! The window layer translates platform events into [`InputEvent`]s; the game
//! only ever sees these.

use glam::Vec2;

use crate::robot::{Joint, JOINT_STEP};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    S,
    Z,
    X,
    W,
    E,
    D,
    C,
    Q,
    Tab,
    LeftShift,
    Escape,
}

/// Engine-agnostic input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    /// Cursor moved; `position` is normalized to `[-1, 1]` with +y up.
    MouseMotion { position: Vec2, left_held: bool },
    Quit,
}

/// What a key press does
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Add radians to a joint
    Joint(Joint, f32),
    /// Change the camera orbit radius
    Zoom(f32),
    Quit,
}

/// Key binding table
pub fn action_for(key: Key) -> Action {
    match key {
        Key::A => Action::Joint(Joint::Base, JOINT_STEP),
        Key::S => Action::Joint(Joint::Base, -JOINT_STEP),
        Key::Z => Action::Joint(Joint::Low, JOINT_STEP),
        Key::X => Action::Joint(Joint::Low, -JOINT_STEP),
        Key::W => Action::Joint(Joint::Mid, JOINT_STEP),
        Key::E => Action::Joint(Joint::Mid, -JOINT_STEP),
        Key::D => Action::Joint(Joint::High, JOINT_STEP),
        Key::C => Action::Joint(Joint::High, -JOINT_STEP),
        Key::Tab => Action::Zoom(1.0),
        Key::LeftShift => Action::Zoom(-1.0),
        Key::Escape | Key::Q => Action::Quit,
    }
}

/// Map a pixel position in a `width` x `height` window to `[-1, 1]^2` with
/// +y up.
pub fn normalize_cursor(x: f64, y: f64, width: u32, height: u32) -> Vec2 {
    let width = width.max(1) as f64;
    let height = height.max(1) as f64;
    Vec2::new(
        (x / width * 2.0 - 1.0) as f32,
        -(y / height * 2.0 - 1.0) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings() {
        assert_eq!(action_for(Key::A), Action::Joint(Joint::Base, 0.1));
        assert_eq!(action_for(Key::C), Action::Joint(Joint::High, -0.1));
        assert_eq!(action_for(Key::Tab), Action::Zoom(1.0));
        assert_eq!(action_for(Key::Q), Action::Quit);
    }

    #[test]
    fn cursor_corners() {
        assert_eq!(normalize_cursor(0.0, 0.0, 200, 100), Vec2::new(-1.0, 1.0));
        assert_eq!(normalize_cursor(200.0, 100.0, 200, 100), Vec2::new(1.0, -1.0));
        assert_eq!(normalize_cursor(100.0, 50.0, 200, 100), Vec2::ZERO);
    }
}
