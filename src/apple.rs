use std::collections::HashSet;

use rand::Rng;

use crate::config::{
    APPLE_EDGE_MARGIN, CORRECT_ANSWER_CHANCE, GridSize, MAX_PLACEMENT_ATTEMPTS,
    MIN_APPLE_DISTANCE,
};
use crate::snake::{Position, Snake};

/// Offsets applied to the answer when synthesizing a wrong value.
const WRONG_VALUE_OFFSETS: std::ops::RangeInclusive<i32> = -5..=4;

/// Smallest value an apple may carry.
const MIN_APPLE_VALUE: i32 = 1;

/// Draws allowed when looking for an unused wrong value.
const WRONG_VALUE_DRAWS: u32 = 64;

/// Numbered apple on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Apple {
    pub position: Position,
    pub value: i32,
}

/// Result of one placement request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Placement {
    /// Candidate satisfied every constraint.
    Placed(Apple),
    /// Accepted after the attempt budget ran out; only exact overlap was checked.
    Relaxed(Apple),
    /// No acceptable candidate; nothing is added this call.
    Dropped,
}

impl Placement {
    /// Returns the placed apple, if any.
    #[must_use]
    pub fn apple(self) -> Option<Apple> {
        match self {
            Self::Placed(apple) | Self::Relaxed(apple) => Some(apple),
            Self::Dropped => None,
        }
    }
}

/// Board state an apple placement has to respect.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    pub bounds: GridSize,
    pub snake: &'a Snake,
    pub apples: &'a [Apple],
    pub answer: i32,
    pub used_values: &'a HashSet<i32>,
}

impl PlacementContext<'_> {
    fn on_snake(&self, position: Position) -> bool {
        self.snake.occupies(position)
    }

    fn on_apple(&self, position: Position) -> bool {
        self.apples.iter().any(|apple| apple.position == position)
    }

    fn too_close_to_apple(&self, position: Position) -> bool {
        let min_squared = MIN_APPLE_DISTANCE * MIN_APPLE_DISTANCE;
        self.apples
            .iter()
            .any(|apple| apple.position.distance_squared(position) < min_squared)
    }

    fn answer_on_board(&self) -> bool {
        self.used_values.contains(&self.answer)
    }
}

/// Picks a cell and value for a new apple.
///
/// `force_correct` always assigns the answer. Otherwise the answer is used
/// with `CORRECT_ANSWER_CHANCE` when it is not on the board yet, and a nearby
/// unused wrong value is synthesized in all other cases. After
/// `MAX_PLACEMENT_ATTEMPTS` strict attempts, the last candidate that failed
/// only on spacing is accepted if it does not sit exactly on another apple.
#[must_use]
pub fn place_apple<R: Rng + ?Sized>(
    rng: &mut R,
    force_correct: bool,
    context: &PlacementContext<'_>,
) -> Placement {
    let mut spacing_rejected = None;

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let position = random_interior_cell(rng, context.bounds);
        let Some(value) = candidate_value(rng, force_correct, context) else {
            continue;
        };

        if !force_correct && context.used_values.contains(&value) {
            continue;
        }

        if context.on_snake(position) {
            continue;
        }

        let apple = Apple { position, value };
        if context.too_close_to_apple(position) {
            spacing_rejected = Some(apple);
            continue;
        }

        return Placement::Placed(apple);
    }

    match spacing_rejected {
        Some(apple) if !context.on_apple(apple.position) => Placement::Relaxed(apple),
        _ => Placement::Dropped,
    }
}

fn candidate_value<R: Rng + ?Sized>(
    rng: &mut R,
    force_correct: bool,
    context: &PlacementContext<'_>,
) -> Option<i32> {
    if force_correct {
        return Some(context.answer);
    }

    if rng.gen_bool(CORRECT_ANSWER_CHANCE) && !context.answer_on_board() {
        return Some(context.answer);
    }

    wrong_value(rng, context.answer, context.used_values)
}

/// Synthesizes a value near `answer` that is neither the answer nor used.
fn wrong_value<R: Rng + ?Sized>(rng: &mut R, answer: i32, used: &HashSet<i32>) -> Option<i32> {
    for _ in 0..WRONG_VALUE_DRAWS {
        let mut value = answer + rng.gen_range(WRONG_VALUE_OFFSETS);
        if value == answer {
            value += if rng.gen_bool(0.5) { 1 } else { -1 };
        }
        let value = value.max(MIN_APPLE_VALUE);

        if value != answer && !used.contains(&value) {
            return Some(value);
        }
    }

    None
}

/// Draws a cell at least `APPLE_EDGE_MARGIN` away from every wall.
///
/// Grids too small to have an interior fall back to the whole board.
fn random_interior_cell<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> Position {
    Position {
        x: random_axis(rng, i32::from(bounds.width)),
        y: random_axis(rng, i32::from(bounds.height)),
    }
}

fn random_axis<R: Rng + ?Sized>(rng: &mut R, extent: i32) -> i32 {
    let low = APPLE_EDGE_MARGIN;
    let high = extent - APPLE_EDGE_MARGIN;
    if low < high {
        rng.gen_range(low..high)
    } else {
        rng.gen_range(0..extent.max(1))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{GridSize, MIN_APPLE_DISTANCE};
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{Apple, Placement, PlacementContext, place_apple, wrong_value};

    const BOUNDS: GridSize = GridSize {
        width: 32,
        height: 27,
    };

    fn snake() -> Snake {
        Snake::new(Position { x: 16, y: 13 }, Direction::Right, 3)
    }

    #[test]
    fn forced_apple_carries_the_answer() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = snake();
        let used = HashSet::new();
        let context = PlacementContext {
            bounds: BOUNDS,
            snake: &snake,
            apples: &[],
            answer: 17,
            used_values: &used,
        };

        for _ in 0..50 {
            let apple = place_apple(&mut rng, true, &context)
                .apple()
                .expect("empty board always accepts an apple");
            assert_eq!(apple.value, 17);
        }
    }

    #[test]
    fn apples_stay_off_the_walls_and_the_snake() {
        let mut rng = StdRng::seed_from_u64(2);
        let snake = snake();
        let used = HashSet::new();
        let context = PlacementContext {
            bounds: BOUNDS,
            snake: &snake,
            apples: &[],
            answer: 9,
            used_values: &used,
        };

        for _ in 0..500 {
            let apple = place_apple(&mut rng, false, &context)
                .apple()
                .expect("empty board always accepts an apple");
            assert!((1..31).contains(&apple.position.x));
            assert!((1..26).contains(&apple.position.y));
            assert!(!snake.occupies(apple.position));
        }
    }

    #[test]
    fn unforced_apple_skips_answer_already_on_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let snake = snake();
        let used = HashSet::from([12]);
        let existing = [Apple {
            position: Position { x: 2, y: 2 },
            value: 12,
        }];
        let context = PlacementContext {
            bounds: BOUNDS,
            snake: &snake,
            apples: &existing,
            answer: 12,
            used_values: &used,
        };

        for _ in 0..200 {
            let apple = place_apple(&mut rng, false, &context)
                .apple()
                .expect("board has room");
            assert_ne!(apple.value, 12);
            assert!((7..=16).contains(&apple.value));
        }
    }

    #[test]
    fn placed_apple_respects_minimum_distance() {
        let mut rng = StdRng::seed_from_u64(4);
        let snake = snake();
        let used = HashSet::from([10]);
        let existing = [Apple {
            position: Position { x: 8, y: 8 },
            value: 10,
        }];
        let context = PlacementContext {
            bounds: BOUNDS,
            snake: &snake,
            apples: &existing,
            answer: 10,
            used_values: &used,
        };

        for _ in 0..200 {
            let Placement::Placed(apple) = place_apple(&mut rng, false, &context) else {
                panic!("roomy board should never need relaxation");
            };
            assert!(
                apple.position.distance_squared(existing[0].position)
                    >= MIN_APPLE_DISTANCE * MIN_APPLE_DISTANCE
            );
        }
    }

    #[test]
    fn crowded_board_relaxes_or_drops_without_overlap() {
        let mut rng = StdRng::seed_from_u64(5);
        let bounds = GridSize {
            width: 8,
            height: 8,
        };
        let snake = Snake::new(Position { x: 0, y: 0 }, Direction::Down, 1);
        let used = HashSet::from([4]);
        let existing = [Apple {
            position: Position { x: 3, y: 3 },
            value: 4,
        }];
        let context = PlacementContext {
            bounds,
            snake: &snake,
            apples: &existing,
            answer: 4,
            used_values: &used,
        };

        for _ in 0..50 {
            match place_apple(&mut rng, false, &context) {
                Placement::Relaxed(apple) => assert_ne!(apple.position, existing[0].position),
                Placement::Placed(apple) => assert!(
                    apple.position.distance_squared(existing[0].position)
                        >= MIN_APPLE_DISTANCE * MIN_APPLE_DISTANCE
                ),
                Placement::Dropped => {}
            }
        }
    }

    #[test]
    fn full_snake_board_drops_placement() {
        let mut rng = StdRng::seed_from_u64(6);
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let segments = (0..3)
            .flat_map(|y| (0..3).map(move |x| Position { x, y }))
            .collect();
        let snake = Snake::from_segments(segments, Direction::Right);
        let used = HashSet::new();
        let context = PlacementContext {
            bounds,
            snake: &snake,
            apples: &[],
            answer: 4,
            used_values: &used,
        };

        assert_eq!(place_apple(&mut rng, true, &context), Placement::Dropped);
    }

    #[test]
    fn wrong_values_avoid_answer_and_used_values() {
        let mut rng = StdRng::seed_from_u64(7);
        let used = HashSet::from([2, 3]);

        for _ in 0..100 {
            let value = wrong_value(&mut rng, 1, &used).expect("4 and 5 are still free");
            assert!(value == 4 || value == 5, "unexpected wrong value {value}");
        }
    }

    #[test]
    fn wrong_value_gives_up_when_every_neighbour_is_used() {
        let mut rng = StdRng::seed_from_u64(8);
        let used = HashSet::from([2, 3, 4, 5]);

        assert_eq!(wrong_value(&mut rng, 1, &used), None);
    }
}
