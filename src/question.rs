//! Arithmetic questions shown above the board.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;

/// Operand range for additions.
pub const ADDITION_OPERANDS: RangeInclusive<i32> = 1..=15;

/// Range of the first operand for subtractions; the second is below it.
pub const SUBTRACTION_MINUENDS: RangeInclusive<i32> = 10..=24;

/// Supported arithmetic operations.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }
}

/// One active question and its integer answer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Question {
    pub operation: Operation,
    pub left: i32,
    pub right: i32,
    pub answer: i32,
}

impl Question {
    /// Builds a question from its operands, computing the answer.
    #[must_use]
    pub fn new(operation: Operation, left: i32, right: i32) -> Self {
        let answer = match operation {
            Operation::Add => left + right,
            Operation::Subtract => left - right,
        };

        Self {
            operation,
            left,
            right,
            answer,
        }
    }

    /// Draws a random question.
    ///
    /// Additions pick both operands from `1..=15`. Subtractions pick the
    /// first operand from `10..=24` and the second strictly below it, so the
    /// answer is never negative.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            let left = rng.gen_range(ADDITION_OPERANDS);
            let right = rng.gen_range(ADDITION_OPERANDS);
            Self::new(Operation::Add, left, right)
        } else {
            let left = rng.gen_range(SUBTRACTION_MINUENDS);
            let right = rng.gen_range(0..left);
            Self::new(Operation::Subtract, left, right)
        }
    }

    /// Text shown to the player, e.g. `7 + 5 = ?`.
    #[must_use]
    pub fn display_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.left, self.operation.symbol(), self.right)
    }
}
