use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::apple::{self, Apple, Placement, PlacementContext};
use crate::config::{
    GUARANTEED_CORRECT_APPLES, GridSize, INITIAL_SNAKE_LENGTH, MAX_APPLES, MAX_LIVES,
    POINTS_PER_CORRECT_APPLE,
};
use crate::input::{Direction, GameInput};
use crate::question::Question;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Active,
    GameOver,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    OutOfLives,
}

/// Notifications for presentation collaborators, drained once per frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    Started,
    CorrectAnswer { position: Position, points: u32 },
    WrongAnswer { value: i32, lives_left: u8 },
    GameOver { score: u32, reason: DeathReason },
}

/// Read-only view handed to render surfaces.
#[derive(Debug, Clone, Copy)]
pub struct GameSnapshot<'a> {
    pub bounds: GridSize,
    pub snake: &'a Snake,
    pub apples: &'a [Apple],
    pub question: &'a Question,
    pub score: u32,
    pub lives: u8,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub snake: Snake,
    pub apples: Vec<Apple>,
    pub question: Question,
    /// Values carried by apples on the board for the active question.
    pub used_values: HashSet<i32>,
    pub score: u32,
    pub lives: u8,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub tick_count: u64,
    /// Placements accepted after the spacing constraint was relaxed.
    pub relaxed_placements: u32,
    /// Placements skipped because no acceptable cell was found.
    pub dropped_placements: u32,
    bounds: GridSize,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Creates an idle session seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic idle session for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, mut rng: StdRng) -> Self {
        let question = Question::generate(&mut rng);

        Self {
            snake: fresh_snake(bounds),
            apples: Vec::with_capacity(MAX_APPLES),
            question,
            used_values: HashSet::new(),
            score: 0,
            lives: MAX_LIVES,
            status: GameStatus::Idle,
            death_reason: None,
            tick_count: 0,
            relaxed_placements: 0,
            dropped_placements: 0,
            bounds,
            rng,
            events: Vec::new(),
        }
    }

    /// Starts (or restarts) play from any state.
    ///
    /// Resets score, lives and snake, draws a new question and fills the
    /// board: one forced-correct apple first, then unforced apples.
    pub fn start(&mut self) {
        self.snake = fresh_snake(self.bounds);
        self.apples.clear();
        self.score = 0;
        self.lives = MAX_LIVES;
        self.death_reason = None;
        self.tick_count = 0;
        self.relaxed_placements = 0;
        self.dropped_placements = 0;
        self.next_question();

        self.place_apple(true);
        self.fill_apples();

        self.status = GameStatus::Active;
        self.events.push(GameEvent::Started);
        log::info!(
            "Session started on {}x{} grid: {}",
            self.bounds.width,
            self.bounds.height,
            self.question
        );
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) {
        if self.status != GameStatus::Active {
            return;
        }

        self.tick_count += 1;
        self.snake.commit_direction();
        let next_head = self.snake.next_head_position();

        if !next_head.is_within_bounds(self.bounds) {
            self.end(DeathReason::WallCollision);
            return;
        }

        if self.snake.occupies(next_head) {
            self.end(DeathReason::SelfCollision);
            return;
        }

        let mut ate_apple = false;
        let mut ate_correct = false;
        if let Some(index) = self.apples.iter().position(|a| a.position == next_head) {
            let eaten = self.apples[index];
            self.used_values.remove(&eaten.value);

            if eaten.value == self.question.answer {
                self.score += POINTS_PER_CORRECT_APPLE;
                self.events.push(GameEvent::CorrectAnswer {
                    position: next_head,
                    points: POINTS_PER_CORRECT_APPLE,
                });
                self.next_question();
                ate_correct = true;
            } else {
                self.lives = self.lives.saturating_sub(1);
                self.events.push(GameEvent::WrongAnswer {
                    value: eaten.value,
                    lives_left: self.lives,
                });
                if self.lives == 0 {
                    self.end(DeathReason::OutOfLives);
                    return;
                }
            }

            self.apples.remove(index);
            ate_apple = true;
        }

        self.snake.advance(next_head, ate_apple);

        if ate_correct {
            self.apples.clear();
            self.place_apple(true);
        }

        self.fill_apples();
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        if let GameInput::Direction(direction) = input {
            self.request_direction(direction);
        }
    }

    /// Buffers a direction for the next tick; reversals and inputs outside
    /// active play are ignored.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        self.status == GameStatus::Active && self.snake.request_direction(direction)
    }

    /// Adapts the session to a new grid size.
    ///
    /// The snake is clamped into the new bounds, apples outside it or under
    /// the snake are removed and the board is refilled.
    pub fn resize(&mut self, bounds: GridSize) {
        if bounds == self.bounds {
            return;
        }

        self.bounds = bounds;
        self.snake.clamp_into(bounds);

        let snake = &self.snake;
        let used_values = &mut self.used_values;
        self.apples.retain(|apple| {
            let keep = apple.position.is_within_bounds(bounds) && !snake.occupies(apple.position);
            if !keep {
                used_values.remove(&apple.value);
            }
            keep
        });

        if self.status == GameStatus::Active {
            self.fill_apples();
        }
    }

    /// Returns and clears the pending presentation events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of apples on the board carrying the current answer.
    #[must_use]
    pub fn correct_apple_count(&self) -> usize {
        self.apples
            .iter()
            .filter(|apple| apple.value == self.question.answer)
            .count()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Active
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Borrows the state a render surface needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            bounds: self.bounds,
            snake: &self.snake,
            apples: &self.apples,
            question: &self.question,
            score: self.score,
            lives: self.lives,
            status: self.status,
            death_reason: self.death_reason,
        }
    }

    /// Draws a new question; bookkeeping of used values starts over with it.
    fn next_question(&mut self) {
        self.question = Question::generate(&mut self.rng);
        self.used_values.clear();
        log::debug!("New question: {}", self.question);
    }

    /// Restores the guaranteed correct apple, then fills up to `MAX_APPLES`.
    fn fill_apples(&mut self) {
        if self.correct_apple_count() < GUARANTEED_CORRECT_APPLES {
            self.place_apple(true);
        }

        while self.apples.len() < MAX_APPLES {
            if self.place_apple(false).is_none() {
                break;
            }
        }
    }

    fn place_apple(&mut self, force_correct: bool) -> Option<Apple> {
        let context = PlacementContext {
            bounds: self.bounds,
            snake: &self.snake,
            apples: &self.apples,
            answer: self.question.answer,
            used_values: &self.used_values,
        };
        let placement = apple::place_apple(&mut self.rng, force_correct, &context);

        match placement {
            Placement::Placed(_) => {}
            Placement::Relaxed(apple) => {
                self.relaxed_placements += 1;
                log::debug!("Apple {} placed with relaxed spacing", apple.value);
            }
            Placement::Dropped => {
                self.dropped_placements += 1;
                log::debug!("Apple placement dropped (forced: {force_correct})");
            }
        }

        let apple = placement.apple()?;
        self.used_values.insert(apple.value);
        self.apples.push(apple);
        Some(apple)
    }

    fn end(&mut self, reason: DeathReason) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            reason,
        });
        log::info!("Game over ({reason:?}) with score {}", self.score);
    }
}

/// Three-segment snake heading right with its head at the grid centre.
fn fresh_snake(bounds: GridSize) -> Snake {
    let head = Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    };
    Snake::new(head, Direction::Right, INITIAL_SNAKE_LENGTH)
}
