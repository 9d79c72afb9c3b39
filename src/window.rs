//! Window management using winit
//!
//! Owns the event loop for the lifetime of a run: platform events become
//! [`InputEvent`]s, every redraw ticks the [`Game`] once and hands its frame
//! to the renderer.

use std::sync::Arc;
use std::time::Instant;

use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

use crate::assets::MeshVertex;
use crate::error::{GameError, GameResult};
use crate::game::{FrameOutcome, Game};
use crate::input::{normalize_cursor, InputEvent, Key};
use crate::render::{Renderer, WgpuRenderer};

/// Convert a winit [`KeyCode`] to a game [`Key`], if the game uses it.
pub fn map_winit_key(key: KeyCode) -> Option<Key> {
    Some(match key {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyZ => Key::Z,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyQ => Key::Q,
        KeyCode::Tab => Key::Tab,
        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    })
}

/// Per-run state driven by the event loop
struct Runner<R: Renderer> {
    game: Game,
    renderer: R,
    window: Arc<Window>,
    size: PhysicalSize<u32>,
    left_held: bool,
    last_frame: Instant,
    /// Total time once the game has finished, or the error that stopped it
    result: GameResult<Option<f32>>,
}

impl<R: Renderer> Runner<R> {
    fn handle_window_event(&mut self, event: WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, shutting down");
                self.game.handle_event(InputEvent::Quit);
                elwt.exit();
            }

            WindowEvent::Resized(size) => {
                self.size = size;
                self.renderer.resize(size.width, size.height);
                self.game.set_aspect(size.width, size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(key) = map_winit_key(code) {
                    self.game.handle_event(InputEvent::KeyDown(key));
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.left_held = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = normalize_cursor(position.x, position.y, self.size.width, self.size.height);
                self.game.handle_event(InputEvent::MouseMotion {
                    position,
                    left_held: self.left_held,
                });
            }

            WindowEvent::RedrawRequested => self.tick(elwt),

            _ => {}
        }
    }

    fn tick(&mut self, elwt: &EventLoopWindowTarget<()>) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let outcome = self.game.update(dt).and_then(|outcome| {
            if outcome == FrameOutcome::Running {
                let frame = self.game.frame()?;
                self.renderer.render(&frame)?;
            }
            Ok(outcome)
        });

        match outcome {
            Ok(FrameOutcome::Running) => {}
            Ok(FrameOutcome::Quit) => elwt.exit(),
            Ok(FrameOutcome::Finished { total_time }) => {
                self.result = Ok(Some(total_time));
                elwt.exit();
            }
            Err(err) => {
                self.result = Err(err);
                elwt.exit();
            }
        }
    }
}

/// Open a window and run `game` until it finishes or the player quits.
///
/// Returns the total run time if every balloon was popped, `None` if the
/// player left first.
pub fn run(mut game: Game, vertices: &[MeshVertex]) -> GameResult<Option<f32>> {
    let config = game.config().clone();
    let event_loop = EventLoop::new().map_err(|e| GameError::Window(e.to_string()))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .build(&event_loop)
            .map_err(|e| GameError::Window(e.to_string()))?,
    );

    let renderer = WgpuRenderer::new(window.clone(), vertices, config.vsync)?;
    let size = window.inner_size();
    game.set_aspect(size.width, size.height);

    let mut runner = Runner {
        game,
        renderer,
        window,
        size,
        left_held: false,
        last_frame: Instant::now(),
        result: Ok(None),
    };

    event_loop
        .run(|event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => runner.handle_window_event(event, elwt),
                Event::AboutToWait => runner.window.request_redraw(),
                _ => {}
            }
        })
        .map_err(|e| GameError::Window(e.to_string()))?;

    runner.result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_bound_keys_only() {
        assert_eq!(map_winit_key(KeyCode::KeyA), Some(Key::A));
        assert_eq!(map_winit_key(KeyCode::ShiftLeft), Some(Key::LeftShift));
        assert_eq!(map_winit_key(KeyCode::ShiftRight), None);
        assert_eq!(map_winit_key(KeyCode::Space), None);
    }
}
