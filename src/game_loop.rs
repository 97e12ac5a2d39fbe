//! Frame driver
//!
//! Owns the game state and runs input -> tick -> score -> draw once per host
//! frame. The host decides when frames happen; it stops the loop through a
//! `StopHandle`, after which `frame` does nothing and reports `false`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::renderer::{Surface, draw_frame};
use crate::score::ScoreSink;
use crate::settings::{Palette, Settings};
use crate::sim::{GameState, InputEvent, InputMailbox, TickEvents, tick};

/// Cloneable switch that stops a running `GameLoop`
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct GameLoop<S: ScoreSink> {
    state: GameState,
    mailbox: InputMailbox,
    palette: Palette,
    sink: S,
    stop: StopHandle,
    last_events: TickEvents,
}

impl<S: ScoreSink> GameLoop<S> {
    /// Set up a game and push the opening 0-0 to the sink
    pub fn new(seed: u64, settings: &Settings, mut sink: S) -> Self {
        let state = GameState::with_settings(seed, settings);
        sink.update(state.score());
        log::info!(
            "Game ready: field {}x{}, seed {}",
            state.field.width,
            state.field.height,
            seed
        );

        Self {
            state,
            mailbox: InputMailbox::with_capacity(settings.input_capacity),
            palette: settings.palette.clone(),
            sink,
            stop: StopHandle::default(),
            last_events: TickEvents::default(),
        }
    }

    /// Queue host input for the next tick
    pub fn post(&mut self, event: InputEvent) {
        self.mailbox.push(event);
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Events from the most recent tick
    pub fn last_events(&self) -> TickEvents {
        self.last_events
    }

    /// Run one frame; returns `false` once the loop has been stopped
    pub fn frame(&mut self, surface: &mut impl Surface) -> bool {
        if self.stop.is_stopped() {
            return false;
        }

        self.last_events = tick(&mut self.state, &mut self.mailbox);
        if self.last_events.scored.is_some() {
            self.sink.update(self.state.score());
        }

        surface.draw_all(&draw_frame(&self.state, &self.palette));
        true
    }

    /// Run up to `frames` frames, returning how many actually ran
    pub fn run_frames(&mut self, frames: u64, surface: &mut impl Surface) -> u64 {
        let mut ran = 0;
        while ran < frames && self.frame(surface) {
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{CommandRecorder, DrawCommand};
    use crate::score::ScoreBoard;
    use crate::sim::{KeyDirection, Score, Side};
    use glam::Vec2;

    fn new_loop() -> GameLoop<ScoreBoard> {
        GameLoop::new(77, &Settings::default(), ScoreBoard::default())
    }

    #[test]
    fn test_initial_score_pushed() {
        let game = new_loop();
        assert_eq!(game.sink().updates, 1);
        assert_eq!(game.sink().latest, Some(Score::default()));
    }

    #[test]
    fn test_frame_ticks_and_draws() {
        let mut game = new_loop();
        let mut surface = CommandRecorder::new();

        assert!(game.frame(&mut surface));

        assert_eq!(game.state().time_ticks, 1);
        assert_eq!(surface.frames, 1);
        assert!(matches!(
            surface.commands.last(),
            Some(DrawCommand::FillCircle { center, .. }) if *center == game.state().ball.pos
        ));
    }

    #[test]
    fn test_point_pushes_score() {
        let mut game = new_loop();
        game.state.ball.pos = Vec2::new(5.0, 250.0);
        game.state.ball.vel = Vec2::new(-5.0, 0.0);

        game.frame(&mut CommandRecorder::new());

        assert_eq!(game.last_events().scored, Some(Side::Computer));
        assert_eq!(game.sink().updates, 2);
        assert_eq!(
            game.sink().latest,
            Some(Score {
                player: 0,
                computer: 1
            })
        );
    }

    #[test]
    fn test_no_push_without_point() {
        let mut game = new_loop();
        game.state.ball.pos = Vec2::new(400.0, 250.0);
        game.state.ball.vel = Vec2::new(1.0, 0.0);

        game.run_frames(10, &mut CommandRecorder::new());

        assert_eq!(game.sink().updates, 1);
    }

    #[test]
    fn test_posted_input_applies_next_frame() {
        let mut game = new_loop();
        let start = game.state().player.y;
        game.post(InputEvent::KeyDown(KeyDirection::Down));

        assert_eq!(game.state().player.y, start);
        game.frame(&mut CommandRecorder::new());
        assert_eq!(game.state().player.y, start + game.state().player.speed);
    }

    #[test]
    fn test_stop_halts_frames() {
        let mut game = new_loop();
        let mut surface = CommandRecorder::new();

        assert_eq!(game.run_frames(3, &mut surface), 3);
        game.stop();
        assert!(!game.is_running());
        assert!(!game.frame(&mut surface));
        assert_eq!(game.run_frames(5, &mut surface), 0);
        assert_eq!(game.state().time_ticks, 3);
        assert_eq!(surface.frames, 3);
    }

    #[test]
    fn test_stop_from_another_thread() {
        let mut game = new_loop();
        let handle = game.stop_handle();

        std::thread::spawn(move || handle.stop())
            .join()
            .unwrap();

        assert!(!game.frame(&mut CommandRecorder::new()));
    }

    #[test]
    fn test_sink_by_reference() {
        let mut board = ScoreBoard::default();
        {
            let game = GameLoop::new(1, &Settings::default(), &mut board);
            game.stop();
        }
        assert_eq!(board.updates, 1);
    }
}
