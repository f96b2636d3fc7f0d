//! Runtime loop wiring the session to its collaborators.
//!
//! One frame: draw, wait briefly for input, advance screen timers, run any
//! due simulation ticks, then forward session events to the screen
//! controller and the audio sink.

use std::io;
use std::time::{Duration, Instant};

use crate::audio::{AudioCue, AudioSink};
use crate::config::GridSize;
use crate::game::{GameEvent, GameSession};
use crate::input::{GameInput, InputSource};
use crate::render::{RenderSurface, Scene};
use crate::screen::{Screen, ScreenController, ScreenEvent};
use crate::ticker::Ticker;

/// Time spent waiting for input per frame.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Values the runtime needs from settings and CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    pub tick_interval: Duration,
    pub max_grid: GridSize,
    pub seed: Option<u64>,
}

pub struct App<S, I, T, A> {
    surface: S,
    input: I,
    ticker: T,
    audio: A,
    session: GameSession,
    screen: ScreenController,
    config: AppConfig,
    quit: bool,
}

impl<S, I, T, A> App<S, I, T, A>
where
    S: RenderSurface,
    I: InputSource,
    T: Ticker,
    A: AudioSink,
{
    /// Builds the runtime with a grid sized to the surface's viewport.
    pub fn new(surface: S, input: I, ticker: T, audio: A, config: AppConfig) -> io::Result<Self> {
        let (columns, rows) = surface.viewport()?;
        let bounds = GridSize::from_viewport(columns, rows, config.max_grid);
        let session = match config.seed {
            Some(seed) => GameSession::new_with_seed(bounds, seed),
            None => GameSession::new(bounds),
        };

        Ok(Self {
            surface,
            input,
            ticker,
            audio,
            session,
            screen: ScreenController::new(),
            config,
            quit: false,
        })
    }

    /// Runs frames until the player quits.
    pub fn run(&mut self) -> io::Result<()> {
        let mut last_frame = Instant::now();

        while !self.quit {
            self.draw()?;

            if let Some(input) = self.input.poll_input(FRAME_INTERVAL)? {
                self.handle_input(input);
            }

            let now = Instant::now();
            self.update(now.duration_since(last_frame));
            last_frame = now;
        }

        Ok(())
    }

    /// Draws the current frame.
    pub fn draw(&mut self) -> io::Result<()> {
        let scene = Scene {
            game: self.session.snapshot(),
            screen: &self.screen,
            sound_muted: self.audio.is_muted(),
        };
        self.surface.render(&scene)
    }

    /// Applies one input event.
    pub fn handle_input(&mut self, input: GameInput) {
        match input {
            GameInput::Quit => self.quit = true,
            GameInput::ToggleSound => {
                let muted = self.audio.toggle_muted();
                log::debug!("Sound muted: {muted}");
            }
            GameInput::Resize { columns, rows } => {
                let bounds = GridSize::from_viewport(columns, rows, self.config.max_grid);
                self.session.resize(bounds);
                self.dispatch_events();
            }
            GameInput::Confirm => match self.screen.screen() {
                Screen::Welcome => {
                    self.screen.begin_loading();
                }
                Screen::GameOver => self.start_session(),
                Screen::Loading(_) | Screen::Playing => {}
            },
            GameInput::Direction(_) => self.session.apply_input(input),
        }
    }

    /// Advances screen timers by `elapsed` and runs due ticks.
    pub fn update(&mut self, elapsed: Duration) {
        if self.screen.advance(elapsed) == Some(ScreenEvent::LoadingFinished) {
            self.start_session();
        }

        let session = &mut self.session;
        self.ticker.run_due(|| session.tick());
        self.dispatch_events();
    }

    #[must_use]
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    #[must_use]
    pub fn screen(&self) -> &ScreenController {
        &self.screen
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn start_session(&mut self) {
        self.session.start();
        self.ticker.start(self.config.tick_interval);
        self.dispatch_events();
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            self.screen.observe(event);
            match event {
                GameEvent::Started => self.audio.play(AudioCue::Start),
                GameEvent::CorrectAnswer { .. } => self.audio.play(AudioCue::Correct),
                GameEvent::WrongAnswer { .. } => self.audio.play(AudioCue::Wrong),
                GameEvent::GameOver { .. } => {
                    self.ticker.stop();
                    self.audio.play(AudioCue::GameOver);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::Duration;

    use crate::audio::{AudioCue, AudioSink};
    use crate::config::{GridSize, MAX_APPLES, MAX_LIVES};
    use crate::game::GameStatus;
    use crate::input::{GameInput, InputSource};
    use crate::render::{RenderSurface, Scene};
    use crate::screen::Screen;
    use crate::ticker::{ManualTicker, Ticker};

    use super::{App, AppConfig};

    const TICK: Duration = Duration::from_millis(180);

    struct FakeSurface {
        frames: usize,
    }

    impl RenderSurface for FakeSurface {
        fn render(&mut self, _scene: &Scene<'_>) -> io::Result<()> {
            self.frames += 1;
            Ok(())
        }

        fn viewport(&self) -> io::Result<(u16, u16)> {
            Ok((200, 60))
        }
    }

    struct ScriptedInput(VecDeque<GameInput>);

    impl InputSource for ScriptedInput {
        fn poll_input(&mut self, _timeout: Duration) -> io::Result<Option<GameInput>> {
            Ok(Some(self.0.pop_front().unwrap_or(GameInput::Quit)))
        }
    }

    #[derive(Default)]
    struct RecordingAudio {
        cues: Vec<AudioCue>,
        muted: bool,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, cue: AudioCue) {
            self.cues.push(cue);
        }

        fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        fn is_muted(&self) -> bool {
            self.muted
        }
    }

    type TestApp = App<FakeSurface, ScriptedInput, ManualTicker, RecordingAudio>;

    fn app(inputs: Vec<GameInput>) -> TestApp {
        App::new(
            FakeSurface { frames: 0 },
            ScriptedInput(inputs.into()),
            ManualTicker::new(),
            RecordingAudio::default(),
            AppConfig {
                tick_interval: TICK,
                max_grid: GridSize {
                    width: 32,
                    height: 27,
                },
                seed: Some(21),
            },
        )
        .expect("fake viewport never fails")
    }

    fn started_app() -> TestApp {
        let mut app = app(Vec::new());
        app.handle_input(GameInput::Confirm);
        app.update(Duration::from_secs(2));
        app.update(Duration::from_millis(300));
        app
    }

    #[test]
    fn grid_is_sized_from_viewport() {
        let app = app(Vec::new());
        assert_eq!(
            app.session().bounds(),
            GridSize {
                width: 32,
                height: 27
            }
        );
    }

    #[test]
    fn confirm_on_welcome_loads_then_starts_session() {
        let mut app = app(Vec::new());
        app.handle_input(GameInput::Confirm);
        assert!(matches!(app.screen().screen(), Screen::Loading(_)));
        assert_eq!(app.session().status, GameStatus::Idle);

        app.update(Duration::from_secs(2));
        app.update(Duration::from_millis(300));

        assert_eq!(app.screen().screen(), Screen::Playing);
        assert_eq!(app.session().status, GameStatus::Active);
        assert_eq!(app.session().apples.len(), MAX_APPLES);
        assert!(app.ticker_mut().is_running());
        assert_eq!(app.audio().cues, vec![AudioCue::Start]);
    }

    #[test]
    fn ticks_only_run_when_due() {
        let mut app = started_app();

        app.update(Duration::ZERO);
        assert_eq!(app.session().tick_count, 0);

        app.ticker_mut().advance(TICK * 2);
        app.update(Duration::ZERO);
        assert_eq!(app.session().tick_count, 2);
    }

    #[test]
    fn game_over_stops_ticker_and_restart_resets() {
        let mut app = started_app();

        // Running straight right always ends the session within the grid width.
        for _ in 0..40 {
            app.ticker_mut().advance(TICK);
            app.update(Duration::ZERO);
        }

        assert_eq!(app.session().status, GameStatus::GameOver);
        assert_eq!(app.screen().screen(), Screen::GameOver);
        assert!(!app.ticker_mut().is_running());
        assert_eq!(app.audio().cues.last(), Some(&AudioCue::GameOver));

        app.handle_input(GameInput::Confirm);

        assert_eq!(app.session().status, GameStatus::Active);
        assert_eq!(app.session().score, 0);
        assert_eq!(app.session().lives, MAX_LIVES);
        assert_eq!(app.session().snake.len(), 3);
        assert_eq!(app.screen().screen(), Screen::Playing);
        assert!(app.ticker_mut().is_running());
    }

    #[test]
    fn toggle_sound_mutes_audio() {
        let mut app = app(Vec::new());
        app.handle_input(GameInput::ToggleSound);
        assert!(app.audio().is_muted());
    }

    #[test]
    fn resize_shrinks_board() {
        let mut app = started_app();
        app.handle_input(GameInput::Resize {
            columns: 50,
            rows: 24,
        });

        let bounds = app.session().bounds();
        assert_eq!(
            bounds,
            GridSize {
                width: 16,
                height: 20
            }
        );
        assert!(app.session().snake.segments().all(|s| s.is_within_bounds(bounds)));
    }

    #[test]
    fn run_draws_until_quit() {
        let mut app = app(vec![GameInput::Confirm, GameInput::ToggleSound]);

        app.run().expect("fake collaborators never fail");

        assert!(app.should_quit());
        assert_eq!(app.surface.frames, 3);
    }
}
