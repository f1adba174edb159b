use std::collections::BTreeSet;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};

#[solution_runner(
    name = "Day 5: Alchemical Reduction",
    parsed = Polymer,
    part_one = Day05,
    part_two = Day05
)]
impl super::AdventOfCode2018<5> {}

#[derive(thiserror::Error, Debug)]
enum ParsePolymerError {
    #[error("expected polymer units to be ASCII letters, found {found:?} at position {position}")]
    InvalidUnit { found: char, position: usize },
}

/*
Input is a polymer, a single line of units. A unit's type is its letter and its polarity is its
case, so `r` and `R` are the same type with opposite polarity.
*/

/// A polymer's units as ASCII letters.
struct Polymer(Vec<u8>);

impl ParseData for Polymer {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let units = input.trim();
        if let Some((position, found)) = units
            .char_indices()
            .find(|(_, unit)| !unit.is_ascii_alphabetic())
        {
            return Err(ParsePolymerError::InvalidUnit { found, position }.into());
        }
        Ok(Self(units.as_bytes().to_vec()))
    }
}

/*
For part 1, fully react the polymer and count the units left.

Adjacent units of the same type and opposite polarity react and are both destroyed. Removing a pair
can bring another reacting pair together, so reactions repeat until none are left.
*/

fn reacts(a: u8, b: u8) -> bool {
    a != b && a.eq_ignore_ascii_case(&b)
}

/// Fully react units, returning the length of the stable polymer.
///
/// Units are pushed on a stack of the stable prefix; an incoming unit reacting with the top pops
/// it instead.
fn fully_reacted_length(units: impl Iterator<Item = u8>) -> usize {
    let mut stable: Vec<u8> = Vec::new();
    for unit in units {
        match stable.last() {
            Some(&top) if reacts(top, unit) => {
                stable.pop();
            }
            _ => stable.push(unit),
        }
    }
    stable.len()
}

struct Day05;

impl Solution<PartOne> for Day05 {
    type Input = Polymer;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(fully_reacted_length(input.0.iter().copied()))
    }
}

/*
For part 2, one unit type is blocking the polymer from collapsing. For each unit type, remove all
its units regardless of polarity, fully react the rest, and find the shortest result.
*/

impl Solution<PartTwo> for Day05 {
    type Input = Polymer;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let unit_types: BTreeSet<u8> = input.0.iter().map(u8::to_ascii_lowercase).collect();

        let shortest = unit_types
            .into_iter()
            .map(|removed_type| {
                let length = fully_reacted_length(
                    input
                        .0
                        .iter()
                        .copied()
                        .filter(|unit| unit.to_ascii_lowercase() != removed_type),
                );
                tracing::trace!(removed_type = %char::from(removed_type), length);
                length
            })
            .min()
            .unwrap_or_else(|| fully_reacted_length(input.0.iter().copied()));
        Ok(shortest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = "dabAcCaCBAcCcaDA\n";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = Polymer::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 10);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = Polymer::parse(EXAMPLE_INPUT)?;
        let result = <Day05 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn reactions_need_opposite_polarity() {
        assert_eq!(fully_reacted_length(b"aA".iter().copied()), 0);
        assert_eq!(fully_reacted_length(b"abBA".iter().copied()), 0);
        assert_eq!(fully_reacted_length(b"abAB".iter().copied()), 4);
        assert_eq!(fully_reacted_length(b"aabAAB".iter().copied()), 6);
    }

    #[test]
    fn non_letter_unit_is_error() {
        assert!(Polymer::parse("dabA1cC").is_err());
    }

    #[test]
    fn empty_polymer_has_no_units() -> DynamicResult<()> {
        let parsed = Polymer::parse("\n")?;
        assert_eq!(<Day05 as Solution<PartOne>>::solve(&parsed)?, 0);
        assert_eq!(<Day05 as Solution<PartTwo>>::solve(&parsed)?, 0);
        Ok(())
    }
}
