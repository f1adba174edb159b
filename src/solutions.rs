//! Solutions implemented for Advent of Code 2018.
//!
//! This module provides [`run_day`] to dynamically run a solution by its day.
//!
//! To add a day, make a submodule implementing [`AdventOfCode2018<DAY>`] as a [`SolutionRunner`]
//! and add a match arm for it in [`run_day`]:
//!
//! ```ignore
//! 4 => AdventOfCode2018::<4>::run(input, handler, timed),
//! ```

#![warn(clippy::dbg_macro, clippy::print_stderr, clippy::print_stdout)]

use aoc_framework::DynamicResult;
use aoc_framework::runner::{OutputHandler, SolutionRunner};
use thiserror::Error;

mod day02;
mod day03;
mod day04;
mod day05;

/// Solutions collected by day.
///
/// In a submodule, implement this as a [`SolutionRunner`] for the day with
/// [`#[solution_runner]`][aoc_framework::runner::solution_runner]:
///
/// ```ignore
/// #[solution_runner(name = "Day 5: Alchemical Reduction", part_one = Day05, part_two = Day05)]
/// impl super::AdventOfCode2018<5> {}
/// ```
struct AdventOfCode2018<const DAY: u8>;

/// A solution for a day is not available.
#[derive(Error, Debug)]
#[error("no solution available for day {0}")]
pub struct DayNotAvailable(u8);

/// Run a solution based on the day.
///
/// # Errors
///
/// If the solution for the given day is not available, a [`DayNotAvailable`] error is returned.
///
/// Any dynamically dispatched error from running the solution is propagated.
pub fn run_day(
    day: u8,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()> {
    tracing::debug!(day, "running solution");
    match day {
        2 => AdventOfCode2018::<2>::run(input, handler, timed),
        3 => AdventOfCode2018::<3>::run(input, handler, timed),
        4 => AdventOfCode2018::<4>::run(input, handler, timed),
        5 => AdventOfCode2018::<5>::run(input, handler, timed),
        _ => Err(DayNotAvailable(day).into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Display;
    use std::time::Duration;

    use aoc_framework::PartKind;

    use super::*;

    /// Keeps part answers, ignoring other events.
    #[derive(Default)]
    struct Answers(Vec<String>);

    impl OutputHandler for Answers {
        fn solution_name(&mut self, _name: &str) {}

        fn parse_start(&mut self) {}

        fn parse_end(&mut self, _duration_opt: Option<Duration>) {}

        fn part_start(&mut self, _part: PartKind) {}

        fn part_output(
            &mut self,
            _part: PartKind,
            output: &dyn Display,
            _duration_opt: Option<Duration>,
        ) {
            self.0.push(output.to_string());
        }
    }

    #[test]
    fn runs_day_by_number() -> DynamicResult<()> {
        let mut answers = Answers::default();
        run_day(5, "dabAcCaCBAcCcaDA\n", &mut answers, false)?;
        assert_eq!(answers.0, vec!["10", "4"]);
        Ok(())
    }

    #[test]
    fn unknown_day_is_not_available() {
        let mut answers = Answers::default();
        let Err(error) = run_day(1, "", &mut answers, false) else {
            panic!("day 1 should not be available");
        };
        assert!(error.downcast_ref::<DayNotAvailable>().is_some());
    }
}
