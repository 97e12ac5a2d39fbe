//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the DOM,
//! the canvas or a clock:
//! - One call to `tick` is one animation frame
//! - Seeded RNG only
//! - Input arrives through the mailbox and is read at tick boundaries

pub mod collision;
pub mod input;
pub mod opponent;
pub mod state;
pub mod tick;

pub use collision::{hit_offset, overlaps};
pub use input::{InputEvent, InputMailbox, KeyDirection, PlayerIntent, key_direction};
pub use opponent::{OpponentController, track_ball};
pub use state::{Ball, Field, GameState, Paddle, Score, Side, Snapshot};
pub use tick::{TickEvents, tick};
