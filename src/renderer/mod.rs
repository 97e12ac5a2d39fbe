//! Rendering
//!
//! The game is drawn as a short list of immediate-mode primitives rebuilt every
//! frame. Backends implement `Surface`; on the web that is a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::settings::Palette;
use crate::sim::GameState;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

/// One drawing primitive; nothing is retained between frames
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Wipe the whole field, optionally filling it
    Clear {
        width: f32,
        height: f32,
        color: Option<String>,
    },
    /// Stroked dashed line (`dash` = [dash, gap])
    DashedLine {
        from: Vec2,
        to: Vec2,
        dash: [f32; 2],
        color: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: String,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: String,
    },
}

/// Anything that can execute draw commands
pub trait Surface {
    fn draw(&mut self, command: &DrawCommand);

    fn draw_all(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.draw(command);
        }
    }
}

/// Surface that keeps the last frame's commands (headless runs, tests)
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
    pub frames: u64,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for CommandRecorder {
    fn draw(&mut self, command: &DrawCommand) {
        if matches!(command, DrawCommand::Clear { .. }) {
            self.commands.clear();
            self.frames += 1;
        }
        self.commands.push(command.clone());
    }
}

/// Build the commands for one frame
///
/// Order: clear, net, player paddle, computer paddle, ball.
pub fn draw_frame(state: &GameState, palette: &Palette) -> Vec<DrawCommand> {
    let field = state.field;
    let mid_x = field.width / 2.0;

    let mut commands = Vec::with_capacity(5);
    commands.push(DrawCommand::Clear {
        width: field.width,
        height: field.height,
        color: palette.background.clone(),
    });
    commands.push(DrawCommand::DashedLine {
        from: Vec2::new(mid_x, 0.0),
        to: Vec2::new(mid_x, field.height),
        dash: palette.net_dash,
        color: palette.net.clone(),
    });
    for paddle in [&state.player, &state.computer] {
        commands.push(DrawCommand::FillRect {
            x: paddle.x,
            y: paddle.y,
            width: paddle.width,
            height: paddle.height,
            color: palette.paddle.clone(),
        });
    }
    commands.push(DrawCommand::FillCircle {
        center: state.ball.pos,
        radius: state.ball.radius,
        color: palette.ball.clone(),
    });
    commands
}
