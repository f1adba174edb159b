//! Functions and traits for running solutions.
//!
//! Annotate a struct or impl-block with [`#[solution_runner]`][solution_runner] to implement
//! [`SolutionRunner`] for it:
//!
//! ```
//! # use aoc_framework::runner::solution_runner;
//! # use aoc_framework::{DynamicResult, PartOne, Solution};
//! #
//! struct Day01;
//!
//! impl Solution<PartOne> for Day01 {
//!     type Input = str;
//!     /* ... */
//! #    type Output = usize;
//! #    fn solve(input: &Self::Input) -> DynamicResult<usize> {
//! #        Ok(input.len())
//! #    }
//! }
//!
//! #[solution_runner(name = "Day 1: Chronal Calibration", part_one = Day01)]
//! impl Day01 {}
//! ```

use std::fmt::Display;
use std::time::{Duration, Instant};

use crate::{DynamicResult, ParseData, Part, PartKind, PartOne, PartTwo, Solution};

// re-export procedural macro
pub use aoc_framework_macros::solution_runner;

/// Receives the events of running a solution, for feedback to a user.
pub trait OutputHandler {
    /// Called with the name of the solution, before anything else runs.
    fn solution_name(&mut self, name: &str);

    /// Called when the solution starts parsing input.
    fn parse_start(&mut self);

    /// Called when parsing input is finished, with the elapsed time if timed.
    fn parse_end(&mut self, duration_opt: Option<Duration>);

    /// Called when a solution part starts.
    fn part_start(&mut self, part: PartKind);

    /// Called with the answer of a finished part, with the elapsed time if timed.
    fn part_output(&mut self, part: PartKind, output: &dyn Display, duration_opt: Option<Duration>);
}

/// Evaluate `f`, measuring the elapsed time only when `timed` is set.
fn measure<T>(timed: bool, f: impl FnOnce() -> T) -> (T, Option<Duration>) {
    if timed {
        let start = Instant::now();
        let result = f();
        (result, Some(start.elapsed()))
    } else {
        (f(), None)
    }
}

/// Run a solution part, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
fn run_part<S, P>(
    input: &S::Input,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    P: Part,
    S: Solution<P>,
{
    let part = P::kind();
    tracing::debug!(%part, "solving");
    handler.part_start(part);
    let (result, duration_opt) = measure(timed, || S::solve(input));
    let output = result.inspect_err(|error| tracing::debug!(%part, %error, "part failed"))?;
    tracing::debug!(%part, %output, ?duration_opt, "solved");
    handler.part_output(part, &output, duration_opt);
    Ok(())
}

/// Run a solution's parse step, outputting events through the handler.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing is propagated.
fn run_parse<D: ParseData>(
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<D> {
    tracing::debug!(input_len = input.len(), "parsing input");
    handler.parse_start();
    let (result, duration_opt) = measure(timed, || D::parse(input));
    let parsed = result.inspect_err(|error| tracing::debug!(%error, "parsing failed"))?;
    handler.parse_end(duration_opt);
    Ok(parsed)
}

/// Run a solution that only implements part one and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution is propagated.
pub fn solve_half_solution<S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
{
    handler.solution_name(name);
    run_part::<S1, PartOne>(input, handler, timed)
}

/// Run a solution that implements both parts and accepts string input.
///
/// # Errors
///
/// Any dynamically dispatched error from the solution parts is propagated. Part two does not run
/// if part one fails.
pub fn solve_full_solution<S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    S1: Solution<PartOne, Input = str>,
    S2: Solution<PartTwo, Input = str>,
{
    handler.solution_name(name);
    run_part::<S1, PartOne>(input, handler, timed)?;
    run_part::<S2, PartTwo>(input, handler, timed)
}

/// Run a solution that implements part one and has a parse data step for input.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution is propagated.
pub fn solve_parsed_half_solution<D, S1>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)
}

/// Run a solution that implements both parts and has a parse data step for input.
///
/// Input is parsed once and shared by both parts.
///
/// # Errors
///
/// Any dynamically dispatched error from parsing or the solution parts is propagated.
pub fn solve_parsed_full_solution<D, S1, S2>(
    name: &str,
    input: &str,
    handler: &mut dyn OutputHandler,
    timed: bool,
) -> DynamicResult<()>
where
    D: ParseData,
    S1: Solution<PartOne, Input = D>,
    S2: Solution<PartTwo, Input = D>,
{
    handler.solution_name(name);
    let parsed = run_parse::<D>(input, handler, timed)?;
    run_part::<S1, PartOne>(&parsed, handler, timed)?;
    run_part::<S2, PartTwo>(&parsed, handler, timed)
}

/// A solution that can be run from its input string.
///
/// Implement with the [`solution_runner`] attribute macro.
pub trait SolutionRunner {
    /// Run the solution, sending events to `handler`. With `timed`, durations are measured.
    ///
    /// # Errors
    ///
    /// Any dynamically dispatched error from running the solution is propagated.
    fn run(input: &str, handler: &mut dyn OutputHandler, timed: bool) -> DynamicResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records handler events as strings.
    #[derive(Default)]
    struct RecordingHandler(Vec<String>);

    impl OutputHandler for RecordingHandler {
        fn solution_name(&mut self, name: &str) {
            self.0.push(format!("name {name}"));
        }

        fn parse_start(&mut self) {
            self.0.push("parse start".to_owned());
        }

        fn parse_end(&mut self, duration_opt: Option<Duration>) {
            self.0.push(format!("parse end timed={}", duration_opt.is_some()));
        }

        fn part_start(&mut self, part: PartKind) {
            self.0.push(format!("start {part}"));
        }

        fn part_output(
            &mut self,
            part: PartKind,
            output: &dyn Display,
            duration_opt: Option<Duration>,
        ) {
            self.0
                .push(format!("{part}: {output} timed={}", duration_opt.is_some()));
        }
    }

    struct Words(Vec<String>);

    impl ParseData for Words {
        fn parse(input: &str) -> DynamicResult<Self> {
            Ok(Self(input.split_whitespace().map(str::to_owned).collect()))
        }
    }

    struct CountWords;

    impl Solution<PartOne> for CountWords {
        type Input = Words;
        type Output = usize;

        fn solve(input: &Words) -> DynamicResult<usize> {
            Ok(input.0.len())
        }
    }

    impl Solution<PartTwo> for CountWords {
        type Input = Words;
        type Output = String;

        fn solve(input: &Words) -> DynamicResult<String> {
            input.0.last().cloned().ok_or_else(|| "no words".into())
        }
    }

    struct CountBytes;

    impl Solution<PartOne> for CountBytes {
        type Input = str;
        type Output = usize;

        fn solve(input: &str) -> DynamicResult<usize> {
            Ok(input.len())
        }
    }

    #[test]
    fn parsed_full_solution_reports_events_in_order() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_parsed_full_solution::<Words, CountWords, CountWords>(
            "Words",
            "guard falls asleep",
            &mut handler,
            true,
        )?;
        assert_eq!(
            handler.0,
            vec![
                "name Words",
                "parse start",
                "parse end timed=true",
                "start Part 1",
                "Part 1: 3 timed=true",
                "start Part 2",
                "Part 2: asleep timed=true",
            ]
        );
        Ok(())
    }

    #[test]
    fn half_solution_runs_only_part_one() -> DynamicResult<()> {
        let mut handler = RecordingHandler::default();
        solve_half_solution::<CountBytes>("Bytes", "abcd", &mut handler, false)?;
        assert_eq!(
            handler.0,
            vec!["name Bytes", "start Part 1", "Part 1: 4 timed=false"]
        );
        Ok(())
    }

    #[test]
    fn failing_part_stops_the_run() {
        let mut handler = RecordingHandler::default();
        let result = solve_parsed_full_solution::<Words, CountWords, CountWords>(
            "Words",
            "",
            &mut handler,
            false,
        );
        assert!(result.is_err());
        assert_eq!(handler.0.last().map(String::as_str), Some("start Part 2"));
    }
}
