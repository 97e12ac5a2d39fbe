//! Player input sampling
//!
//! Host callbacks never touch the game directly. They post `InputEvent`s into
//! a bounded mailbox, and the simulation drains it once at the start of every
//! tick, so a tick always sees a whole frame's worth of input or none of it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::{Field, Paddle};
use crate::consts::INPUT_MAILBOX_CAPACITY;

/// Logical key directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyDirection {
    Up,
    Down,
}

/// Map a DOM `KeyboardEvent.code` to a direction
pub fn key_direction(code: &str) -> Option<KeyDirection> {
    match code {
        "ArrowUp" => Some(KeyDirection::Up),
        "ArrowDown" => Some(KeyDirection::Down),
        _ => None,
    }
}

/// A raw input sample from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer moved; `y` is relative to the top of the field
    PointerMoved { y: f32 },
    KeyDown(KeyDirection),
    KeyUp(KeyDirection),
}

/// Held-key state carried between ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIntent {
    pub up: bool,
    pub down: bool,
}

impl PlayerIntent {
    /// Vertical movement for this tick (up is negative)
    ///
    /// Both keys held cancel out.
    pub fn key_delta(&self, speed: f32) -> f32 {
        let mut dy = 0.0;
        if self.up {
            dy -= speed;
        }
        if self.down {
            dy += speed;
        }
        dy
    }

    fn set(&mut self, direction: KeyDirection, held: bool) {
        match direction {
            KeyDirection::Up => self.up = held,
            KeyDirection::Down => self.down = held,
        }
    }
}

/// Bounded FIFO of input events
#[derive(Debug, Clone)]
pub struct InputMailbox {
    events: VecDeque<InputEvent>,
    capacity: usize,
}

impl Default for InputMailbox {
    fn default() -> Self {
        Self::with_capacity(INPUT_MAILBOX_CAPACITY)
    }
}

impl InputMailbox {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Queue an event, making room if the mailbox is full
    ///
    /// A full mailbox first gives up its oldest pointer move, since a newer
    /// position supersedes it. Only with no pointer move queued does the oldest
    /// event of any kind go.
    pub fn push(&mut self, event: InputEvent) {
        if self.events.len() >= self.capacity {
            let stale_pointer = self
                .events
                .iter()
                .position(|e| matches!(e, InputEvent::PointerMoved { .. }));
            let dropped = match stale_pointer {
                Some(idx) => self.events.remove(idx),
                None => self.events.pop_front(),
            };
            log::warn!("Input mailbox full, dropped {:?}", dropped);
        }
        self.events.push_back(event);
    }

    /// Apply every queued event in arrival order and empty the mailbox
    ///
    /// Pointer moves position the paddle immediately (clamped); key events only
    /// update `intent`, which the tick turns into movement afterwards.
    pub fn drain_into(&mut self, paddle: &mut Paddle, intent: &mut PlayerIntent, field: &Field) {
        for event in self.events.drain(..) {
            match event {
                InputEvent::PointerMoved { y } => paddle.center_on(y, field),
                InputEvent::KeyDown(direction) => intent.set(direction, true),
                InputEvent::KeyUp(direction) => intent.set(direction, false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paddle(field: &Field) -> Paddle {
        Paddle::centered(20.0, 14.0, 80.0, 5.0, field)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_direction("ArrowUp"), Some(KeyDirection::Up));
        assert_eq!(key_direction("ArrowDown"), Some(KeyDirection::Down));
        assert_eq!(key_direction("KeyW"), None);
    }

    #[test]
    fn test_key_delta() {
        let mut intent = PlayerIntent::default();
        assert_eq!(intent.key_delta(5.0), 0.0);

        intent.up = true;
        assert_eq!(intent.key_delta(5.0), -5.0);

        intent.down = true;
        assert_eq!(intent.key_delta(5.0), 0.0);

        intent.up = false;
        assert_eq!(intent.key_delta(5.0), 5.0);
    }

    #[test]
    fn test_drain_applies_in_order() {
        let field = Field::default();
        let mut p = paddle(&field);
        let mut intent = PlayerIntent::default();
        let mut mailbox = InputMailbox::default();

        mailbox.push(InputEvent::PointerMoved { y: 100.0 });
        mailbox.push(InputEvent::KeyDown(KeyDirection::Down));
        mailbox.push(InputEvent::PointerMoved { y: 300.0 });
        mailbox.drain_into(&mut p, &mut intent, &field);

        assert!(mailbox.is_empty());
        assert_eq!(p.y, 260.0);
        assert!(intent.down);
        assert!(!intent.up);
    }

    #[test]
    fn test_key_press_and_release_in_one_frame() {
        let field = Field::default();
        let mut p = paddle(&field);
        let mut intent = PlayerIntent::default();
        let mut mailbox = InputMailbox::default();

        mailbox.push(InputEvent::KeyDown(KeyDirection::Up));
        mailbox.push(InputEvent::KeyUp(KeyDirection::Up));
        mailbox.drain_into(&mut p, &mut intent, &field);

        assert_eq!(intent, PlayerIntent::default());
    }

    #[test]
    fn test_pointer_out_of_range_clamps() {
        let field = Field::default();
        let mut p = paddle(&field);
        let mut intent = PlayerIntent::default();
        let mut mailbox = InputMailbox::default();

        mailbox.push(InputEvent::PointerMoved { y: -400.0 });
        mailbox.drain_into(&mut p, &mut intent, &field);
        assert_eq!(p.y, 0.0);

        mailbox.push(InputEvent::PointerMoved { y: 9000.0 });
        mailbox.drain_into(&mut p, &mut intent, &field);
        assert_eq!(p.y, field.height - p.height);
    }

    #[test]
    fn test_overflow_drops_stale_pointer_first() {
        let mut mailbox = InputMailbox::with_capacity(3);
        mailbox.push(InputEvent::KeyDown(KeyDirection::Up));
        mailbox.push(InputEvent::PointerMoved { y: 10.0 });
        mailbox.push(InputEvent::KeyUp(KeyDirection::Up));
        mailbox.push(InputEvent::PointerMoved { y: 20.0 });

        assert_eq!(mailbox.len(), 3);
        let field = Field::default();
        let mut p = paddle(&field);
        let mut intent = PlayerIntent::default();
        mailbox.drain_into(&mut p, &mut intent, &field);

        // Key press and release both survived; the newer pointer move won
        assert!(!intent.up);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_overflow_without_pointer_drops_oldest() {
        let mut mailbox = InputMailbox::with_capacity(2);
        mailbox.push(InputEvent::KeyDown(KeyDirection::Up));
        mailbox.push(InputEvent::KeyDown(KeyDirection::Down));
        mailbox.push(InputEvent::KeyUp(KeyDirection::Down));

        let field = Field::default();
        let mut p = paddle(&field);
        let mut intent = PlayerIntent::default();
        mailbox.drain_into(&mut p, &mut intent, &field);

        assert!(!intent.up);
        assert!(!intent.down);
    }
}
