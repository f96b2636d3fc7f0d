//! Screen controller: which overlay is visible and its own animation timing.
//!
//! Runs on frame time, not on simulation ticks. It follows the session
//! through the events the session emits.

use std::time::Duration;

use crate::game::GameEvent;
use crate::snake::Position;

/// Time between loading-bar steps.
pub const LOADING_STEP_INTERVAL: Duration = Duration::from_millis(30);

/// Percent added per loading-bar step.
pub const LOADING_STEP_PERCENT: u8 = 2;

/// Pause on a full loading bar before play starts.
pub const LOADING_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// How long celebration and points overlays stay visible.
pub const OVERLAY_LIFETIME: Duration = Duration::from_millis(800);

const LOADING_MESSAGES: [&str; 4] = [
    "Creating math problems...",
    "Preparing the snake...",
    "Setting up the board...",
    "Almost ready!",
];

/// Loading bar state.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct LoadingProgress {
    percent: u8,
    step_elapsed: Duration,
    settle_elapsed: Duration,
}

impl LoadingProgress {
    #[must_use]
    pub fn percent(self) -> u8 {
        self.percent
    }

    /// Message for the current quarter of the bar.
    #[must_use]
    pub fn message(self) -> &'static str {
        let quarter = usize::from(self.percent / 25).min(LOADING_MESSAGES.len() - 1);
        LOADING_MESSAGES[quarter]
    }

    /// Moves the bar forward; returns true once it is full and settled.
    fn advance(&mut self, elapsed: Duration) -> bool {
        if self.percent < 100 {
            self.step_elapsed += elapsed;
            while self.step_elapsed >= LOADING_STEP_INTERVAL && self.percent < 100 {
                self.step_elapsed -= LOADING_STEP_INTERVAL;
                self.percent = (self.percent + LOADING_STEP_PERCENT).min(100);
            }
            return false;
        }

        self.settle_elapsed += elapsed;
        self.settle_elapsed >= LOADING_SETTLE_DELAY
    }
}

/// Screen currently shown.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Welcome,
    Loading(LoadingProgress),
    Playing,
    GameOver,
}

/// Short-lived effect drawn over the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overlay {
    /// Banner shown after a correct answer
    Celebration,
    /// Points marker next to the eaten apple
    Points { position: Position, points: u32 },
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
struct TimedOverlay {
    overlay: Overlay,
    remaining: Duration,
}

/// Transitions the runtime has to act on.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ScreenEvent {
    LoadingFinished,
}

#[derive(Debug, Clone)]
pub struct ScreenController {
    screen: Screen,
    overlays: Vec<TimedOverlay>,
}

impl Default for ScreenController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            overlays: Vec::new(),
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Leaves the welcome screen for the loading bar. No-op elsewhere.
    pub fn begin_loading(&mut self) -> bool {
        if self.screen != Screen::Welcome {
            return false;
        }
        self.screen = Screen::Loading(LoadingProgress::default());
        true
    }

    /// Advances loading and overlay timers by one frame.
    pub fn advance(&mut self, elapsed: Duration) -> Option<ScreenEvent> {
        self.overlays.retain_mut(|timed| {
            timed.remaining = timed.remaining.saturating_sub(elapsed);
            !timed.remaining.is_zero()
        });

        if let Screen::Loading(progress) = &mut self.screen {
            if progress.advance(elapsed) {
                return Some(ScreenEvent::LoadingFinished);
            }
        }

        None
    }

    /// Follows a session event.
    pub fn observe(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started => {
                self.screen = Screen::Playing;
                self.overlays.clear();
            }
            GameEvent::CorrectAnswer { position, points } => {
                self.show(Overlay::Celebration);
                self.show(Overlay::Points { position, points });
            }
            GameEvent::WrongAnswer { .. } => {}
            GameEvent::GameOver { .. } => {
                self.screen = Screen::GameOver;
                self.overlays.clear();
            }
        }
    }

    /// Overlays still visible.
    pub fn overlays(&self) -> impl Iterator<Item = Overlay> + '_ {
        self.overlays.iter().map(|timed| timed.overlay)
    }

    fn show(&mut self, overlay: Overlay) {
        self.overlays.retain(|timed| {
            std::mem::discriminant(&timed.overlay) != std::mem::discriminant(&overlay)
        });
        self.overlays.push(TimedOverlay {
            overlay,
            remaining: OVERLAY_LIFETIME,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::game::{DeathReason, GameEvent};
    use crate::snake::Position;

    use super::{LOADING_STEP_INTERVAL, Overlay, Screen, ScreenController, ScreenEvent};

    fn loading_percent(controller: &ScreenController) -> u8 {
        match controller.screen() {
            Screen::Loading(progress) => progress.percent(),
            other => panic!("expected loading screen, got {other:?}"),
        }
    }

    #[test]
    fn loading_bar_fills_then_settles() {
        let mut controller = ScreenController::new();
        assert!(controller.begin_loading());

        assert_eq!(controller.advance(LOADING_STEP_INTERVAL * 10), None);
        assert_eq!(loading_percent(&controller), 20);

        assert_eq!(controller.advance(LOADING_STEP_INTERVAL * 40), None);
        assert_eq!(loading_percent(&controller), 100);

        assert_eq!(controller.advance(Duration::from_millis(200)), None);
        assert_eq!(
            controller.advance(Duration::from_millis(100)),
            Some(ScreenEvent::LoadingFinished)
        );
    }

    #[test]
    fn loading_message_follows_progress() {
        let mut controller = ScreenController::new();
        controller.begin_loading();

        let message = |controller: &ScreenController| match controller.screen() {
            Screen::Loading(progress) => progress.message(),
            _ => unreachable!(),
        };

        assert_eq!(message(&controller), "Creating math problems...");
        controller.advance(LOADING_STEP_INTERVAL * 13);
        assert_eq!(message(&controller), "Preparing the snake...");
        controller.advance(LOADING_STEP_INTERVAL * 25);
        assert_eq!(message(&controller), "Almost ready!");
    }

    #[test]
    fn begin_loading_only_from_welcome() {
        let mut controller = ScreenController::new();
        controller.observe(GameEvent::Started);
        assert!(!controller.begin_loading());
        assert_eq!(controller.screen(), Screen::Playing);
    }

    #[test]
    fn correct_answer_shows_overlays_until_they_expire() {
        let mut controller = ScreenController::new();
        controller.observe(GameEvent::Started);
        controller.observe(GameEvent::CorrectAnswer {
            position: Position { x: 4, y: 6 },
            points: 10,
        });

        let overlays: Vec<_> = controller.overlays().collect();
        assert_eq!(
            overlays,
            vec![
                Overlay::Celebration,
                Overlay::Points {
                    position: Position { x: 4, y: 6 },
                    points: 10
                }
            ]
        );

        controller.advance(Duration::from_millis(799));
        assert_eq!(controller.overlays().count(), 2);
        controller.advance(Duration::from_millis(1));
        assert_eq!(controller.overlays().count(), 0);
    }

    #[test]
    fn game_over_switches_screen_and_clears_overlays() {
        let mut controller = ScreenController::new();
        controller.observe(GameEvent::Started);
        controller.observe(GameEvent::CorrectAnswer {
            position: Position { x: 1, y: 1 },
            points: 10,
        });
        controller.observe(GameEvent::GameOver {
            score: 10,
            reason: DeathReason::WallCollision,
        });

        assert_eq!(controller.screen(), Screen::GameOver);
        assert_eq!(controller.overlays().count(), 0);
    }
}
