//! The simulation loop
//!
//! Owns the world state and the platform. Each iteration polls input,
//! advances the world by a paced `dt`, and draws the result.

pub mod pacing;

pub use pacing::FramePacer;

use crate::platform::{Event, InitError, Platform, WindowConfig};
use crate::renderer::draw_world;
use crate::sim::{CollisionRule, TickInput, TickReport, WorldState, tick};
use crate::tuning::Tuning;

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Window close
    Quit,
    /// Quit key held
    Escape,
    /// Ball left through the open edge
    BallMissed,
}

/// Owns the platform and world state for one run
pub struct Game<P: Platform> {
    platform: P,
    state: WorldState,
    tuning: Tuning,
    pacer: FramePacer,
    input: TickInput,
    stop_reason: Option<StopReason>,
    frames: u64,
}

impl<P: Platform> Game<P> {
    /// Create the platform and the starting world
    ///
    /// Any platform failure is logged and returned; the loop never starts.
    pub fn initialize<F>(tuning: Tuning, create_platform: F) -> Result<Self, InitError>
    where
        F: FnOnce(&WindowConfig) -> Result<P, InitError>,
    {
        match serde_json::to_string(&tuning) {
            Ok(json) => log::debug!("Tuning: {json}"),
            Err(e) => log::warn!("Could not serialize tuning: {e}"),
        }

        let platform = create_platform(&tuning.window_config()).inspect_err(|e| {
            log::error!("{e}");
        })?;

        let mut state = WorldState::new(&tuning);
        state.last_tick_ms = platform.ticks();
        let pacer = FramePacer::new(tuning.frame_interval_ms, tuning.max_delta);

        Ok(Self {
            platform,
            state,
            tuning,
            pacer,
            input: TickInput::default(),
            stop_reason: None,
            frames: 0,
        })
    }

    /// World as of the last update
    pub fn state(&self) -> &WorldState {
        &self.state
    }

    /// Completed loop iterations
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Loop until something clears `running`
    pub fn run(&mut self) -> StopReason {
        log::info!("Game loop started");
        while self.state.running {
            self.poll_input();
            self.update();
            self.render();
            self.frames += 1;
        }
        // `running` only goes false through a path that records a reason
        let reason = self.stop_reason.unwrap_or(StopReason::Quit);
        log::info!("Game loop stopped after {} frames: {:?}", self.frames, reason);
        reason
    }

    fn stop(&mut self, reason: StopReason) {
        self.state.running = false;
        self.stop_reason.get_or_insert(reason);
    }

    /// Drain pending events and read the held keys
    pub fn poll_input(&mut self) {
        while let Some(event) = self.platform.poll_event() {
            match event {
                Event::Quit => self.stop(StopReason::Quit),
            }
        }

        let keyboard = self.platform.keyboard_state();
        let intent = self.tuning.bindings.read(&keyboard);
        if intent.quit {
            self.stop(StopReason::Escape);
        }
        self.input = intent.tick;
    }

    /// Wait for the frame floor, then step the simulation
    pub fn update(&mut self) -> TickReport {
        let dt = self
            .pacer
            .wait_for_frame(&mut self.platform, &mut self.state.last_tick_ms);
        let report = tick(&mut self.state, &self.input, dt, &self.tuning);
        if report.collisions.x == Some(CollisionRule::LeftExit) {
            self.stop(StopReason::BallMissed);
        }
        report
    }

    /// Draw the current world and present it
    pub fn render(&mut self) {
        draw_world(self.platform.canvas(), &self.state, &self.tuning);
    }

    /// Release the platform; the game is consumed
    pub fn shutdown(self) {
        self.platform.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Clock, Key, KeyboardState};
    use crate::renderer::{Canvas, Color, Rect};
    use crate::sim::PaddleDirection;
    use glam::Vec2;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingCanvas {
        clears: usize,
        fills: usize,
        presents: usize,
        last_fill: Option<Rect>,
    }

    impl Canvas for CountingCanvas {
        fn set_draw_color(&mut self, _color: Color) {}
        fn clear(&mut self) {
            self.clears += 1;
        }
        fn fill_rect(&mut self, rect: Rect) {
            self.fills += 1;
            self.last_fill = Some(rect);
        }
        fn present(&mut self) {
            self.presents += 1;
        }
    }

    /// Platform driven by a script: queued events, held keys, fake time
    struct ScriptedPlatform {
        now: Cell<u64>,
        events: VecDeque<Event>,
        keys: KeyboardState,
        canvas: CountingCanvas,
        shutdowns: Rc<Cell<u32>>,
    }

    impl ScriptedPlatform {
        fn new(shutdowns: Rc<Cell<u32>>) -> Self {
            Self {
                now: Cell::new(1_000),
                events: VecDeque::new(),
                keys: KeyboardState::new(),
                canvas: CountingCanvas::default(),
                shutdowns,
            }
        }
    }

    impl Clock for ScriptedPlatform {
        fn ticks(&self) -> u64 {
            self.now.get()
        }

        fn delay(&mut self, ms: u64) {
            self.now.set(self.now.get() + ms);
        }
    }

    impl Platform for ScriptedPlatform {
        type Canvas = CountingCanvas;

        fn poll_event(&mut self) -> Option<Event> {
            self.events.pop_front()
        }

        fn keyboard_state(&self) -> KeyboardState {
            self.keys.clone()
        }

        fn canvas(&mut self) -> &mut CountingCanvas {
            &mut self.canvas
        }

        fn shutdown(self) {
            self.shutdowns.set(self.shutdowns.get() + 1);
        }
    }

    fn game_with(platform: ScriptedPlatform) -> Game<ScriptedPlatform> {
        Game::initialize(Tuning::default(), |_| Ok(platform)).unwrap()
    }

    #[test]
    fn test_initialize_failure_propagates() {
        let result: Result<Game<ScriptedPlatform>, _> = Game::initialize(Tuning::default(), |_| {
            Err(InitError::Window("no display".to_string()))
        });
        assert!(matches!(result, Err(InitError::Window(_))));
    }

    #[test]
    fn test_initialize_receives_window_config() {
        let shutdowns = Rc::new(Cell::new(0));
        let platform = ScriptedPlatform::new(shutdowns);
        let game = Game::initialize(Tuning::default(), |config| {
            assert_eq!(config.title, "Pong");
            assert_eq!((config.width, config.height), (1024, 768));
            Ok(platform)
        })
        .unwrap();
        assert_eq!(game.state().last_tick_ms, 1_000);
        assert!(game.state().running);
    }

    #[test]
    fn test_quit_event_stops_loop_after_one_frame() {
        let shutdowns = Rc::new(Cell::new(0));
        let mut platform = ScriptedPlatform::new(shutdowns.clone());
        platform.events.push_back(Event::Quit);
        let mut game = game_with(platform);

        assert_eq!(game.run(), StopReason::Quit);
        // The quitting iteration still updates and renders
        assert_eq!(game.frames(), 1);
        assert_eq!(game.platform.canvas.presents, 1);

        game.shutdown();
        assert_eq!(shutdowns.get(), 1);
    }

    #[test]
    fn test_escape_key_stops_loop() {
        let shutdowns = Rc::new(Cell::new(0));
        let mut platform = ScriptedPlatform::new(shutdowns);
        platform.keys.press(Key::Escape);
        let mut game = game_with(platform);
        assert_eq!(game.run(), StopReason::Escape);
        assert_eq!(game.frames(), 1);
    }

    #[test]
    fn test_ball_miss_ends_run_and_still_shuts_down() {
        let shutdowns = Rc::new(Cell::new(0));
        let platform = ScriptedPlatform::new(shutdowns.clone());
        let mut game = game_with(platform);

        // Nobody moves the paddle; the ball eventually leaves on the left
        assert_eq!(game.run(), StopReason::BallMissed);
        assert!(!game.state().running);
        assert!(game.state().ball.pos.x <= 0.0);
        assert_eq!(game.platform.canvas.presents as u64, game.frames());
        assert_eq!(game.platform.canvas.clears as u64, game.frames());
        assert_eq!(game.platform.canvas.fills as u64, game.frames() * 5);

        game.shutdown();
        assert_eq!(shutdowns.get(), 1);
    }

    #[test]
    fn test_frames_are_paced_to_floor() {
        let shutdowns = Rc::new(Cell::new(0));
        let platform = ScriptedPlatform::new(shutdowns);
        let mut game = game_with(platform);

        game.poll_input();
        game.update();
        assert_eq!(game.state().last_tick_ms, 1_016);
        game.update();
        assert_eq!(game.state().last_tick_ms, 1_032);
    }

    #[test]
    fn test_held_key_moves_paddle_every_frame() {
        let shutdowns = Rc::new(Cell::new(0));
        let mut platform = ScriptedPlatform::new(shutdowns);
        platform.keys.press(Key::S);
        let mut game = game_with(platform);
        let start = game.state().paddle.pos.y;

        for frame in 1..=3 {
            game.poll_input();
            game.update();
            let expected = start + 300.0 * 0.016 * frame as f32;
            assert!((game.state().paddle.pos.y - expected).abs() < 1e-3);
        }
        assert_eq!(game.state().paddle_direction, PaddleDirection::Down);
    }

    #[test]
    fn test_render_draws_current_ball_position() {
        let shutdowns = Rc::new(Cell::new(0));
        let platform = ScriptedPlatform::new(shutdowns);
        let mut game = game_with(platform);
        game.state.ball.pos = Vec2::new(200.0, 100.0);
        game.render();
        assert_eq!(game.platform.canvas.last_fill, Some(Rect::new(193, 93, 15, 15)));
    }
}
