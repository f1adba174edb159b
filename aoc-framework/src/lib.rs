//! Framework of traits and utilities for solving Advent of Code puzzles.
//!
//! A puzzle day is solved in two parts. Each part is a type implementing [`Solution`] for one of
//! the part markers, [`PartOne`] or [`PartTwo`]. Input is either handed to a solution as the raw
//! string, or parsed once into a type implementing [`ParseData`] and shared by both parts.
//!
//! # Example
//!
//! ```
//! use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
//!
//! /// Frequency changes, one signed number per line.
//! struct Changes(Vec<i32>);
//!
//! impl ParseData for Changes {
//!     fn parse(input: &str) -> DynamicResult<Self> {
//!         let changes = input
//!             .lines()
//!             .map(str::parse)
//!             .collect::<Result<_, _>>()?;
//!         Ok(Self(changes))
//!     }
//! }
//!
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = Changes;
//!     type Output = i32;
//!
//!     fn solve(input: &Changes) -> DynamicResult<i32> {
//!         Ok(input.0.iter().sum())
//!     }
//! }
//!
//! impl Solution<PartTwo> for Day01 {
//!     type Input = Changes;
//!     type Output = usize;
//!
//!     fn solve(input: &Changes) -> DynamicResult<usize> {
//!         Ok(input.0.iter().filter(|change| change.is_negative()).count())
//!     }
//! }
//!
//! let changes = Changes::parse("+1\n-2\n+3\n+1")?;
//! assert_eq!(<Day01 as Solution<PartOne>>::solve(&changes)?, 3);
//! assert_eq!(<Day01 as Solution<PartTwo>>::solve(&changes)?, 1);
//! # Ok::<(), aoc_framework::DynamicError>(())
//! ```
//!
//! Use the [`runner`] module to execute solutions with an output handler.

#![warn(clippy::pedantic)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::branches_sharing_code,
    clippy::collection_is_never_read,
    clippy::equatable_if_let,
    clippy::needless_collect,
    clippy::needless_pass_by_ref_mut,
    clippy::option_if_let_else,
    clippy::set_contains_or_insert,
    clippy::suboptimal_flops,
    clippy::trait_duplication_in_bounds,
    clippy::type_repetition_in_bounds,
    clippy::use_self,
    clippy::useless_let_if_seq
)]
#![deny(
    clippy::expect_used,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::unwrap_used
)]

use std::error::Error;
use std::fmt::Display;

pub mod parsing;
pub mod runner;

mod sealed {
    /// Restricts implementations of [`Part`][super::Part] to the markers of this crate.
    pub trait Sealed {}
}

/// A dynamically dispatched error, wrapped in a [`Box`].
pub type DynamicError = Box<dyn Error + Send + Sync + 'static>;
/// A result that can return a [`DynamicError`] as an error.
pub type DynamicResult<T> = Result<T, DynamicError>;

/// Identifies a solution part at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    One,
    Two,
}

impl Display for PartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let number = match self {
            Self::One => 1,
            Self::Two => 2,
        };
        write!(f, "Part {number}")
    }
}

/// A marker for the part a [`Solution<P>`] solves.
pub trait Part: sealed::Sealed {
    /// Get the related [`PartKind`] for this part.
    fn kind() -> PartKind;
}

/// Marks a [`Solution`] for part one.
pub struct PartOne;
impl sealed::Sealed for PartOne {}
impl Part for PartOne {
    fn kind() -> PartKind {
        PartKind::One
    }
}

/// Marks a [`Solution`] for part two.
pub struct PartTwo;
impl sealed::Sealed for PartTwo {}
impl Part for PartTwo {
    fn kind() -> PartKind {
        PartKind::Two
    }
}

/// A solution to one [`Part`] of a puzzle.
pub trait Solution<P: Part> {
    /// The input data type passed to the solution, by reference.
    ///
    /// For direct string input, set to `str`.
    type Input: ?Sized;

    /// The answer type, printed once solved.
    type Output: Display;

    /// Solve with the given input.
    ///
    /// # Errors
    ///
    /// Invalid input or a failed search is returned as a dynamically dispatched error.
    fn solve(input: &Self::Input) -> DynamicResult<Self::Output>;
}

/// A data structure created by parsing the puzzle input string.
///
/// Solutions receive it by setting [`Solution::Input`] to the implementing type.
pub trait ParseData {
    /// Parse an input string into an instance of self.
    ///
    /// # Errors
    ///
    /// If parsing fails, the resulting error is returned as a dynamically dispatched error.
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_kind_displays_part_number() {
        assert_eq!(PartKind::One.to_string(), "Part 1");
        assert_eq!(PartKind::Two.to_string(), "Part 2");
    }

    #[test]
    fn part_markers_map_to_kinds() {
        assert_eq!(PartOne::kind(), PartKind::One);
        assert_eq!(PartTwo::kind(), PartKind::Two);
    }
}
