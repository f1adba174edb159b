use std::collections::HashMap;

use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, PartOne, PartTwo, Solution};
use thiserror::Error;

#[solution_runner(
    name = "Day 2: Inventory Management System",
    part_one = Day02,
    part_two = Day02
)]
impl super::AdventOfCode2018<2> {}

#[derive(Error, Debug)]
enum Day02Error {
    #[error("no two box IDs differ by exactly one character")]
    NoCorrectBoxes,
}

/*
Input is a list of box IDs, one per line.

For part 1, calculate a checksum of the IDs: the count of IDs containing any letter exactly twice,
multiplied by the count of IDs containing any letter exactly three times. An ID counts at most once
toward each.
*/

/// Which repetitions a box ID has among its letters.
#[derive(Debug, Default, PartialEq, Eq)]
struct Repetitions {
    has_double: bool,
    has_triple: bool,
}

fn repetitions(box_id: &str) -> Repetitions {
    let mut letter_counts: HashMap<char, usize> = HashMap::new();
    for letter in box_id.chars() {
        *letter_counts.entry(letter).or_default() += 1;
    }

    letter_counts
        .values()
        .fold(Repetitions::default(), |acc, &count| Repetitions {
            has_double: acc.has_double || count == 2,
            has_triple: acc.has_triple || count == 3,
        })
}

struct Day02;

impl Solution<PartOne> for Day02 {
    type Input = str;
    type Output = u32;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let (doubles, triples) = input
            .lines()
            .map(repetitions)
            .fold((0u32, 0u32), |(doubles, triples), found| {
                (
                    doubles + u32::from(found.has_double),
                    triples + u32::from(found.has_triple),
                )
            });

        let checksum = doubles
            .checked_mul(triples)
            .expect("should not have integer overflow from checksum product");
        Ok(checksum)
    }
}

/*
For part 2, find the two box IDs that differ by exactly one character at the same position. The
answer is the letters they have in common, i.e. either ID with the differing character removed.
*/

/// If two IDs of equal length differ at exactly one position, return that position.
fn single_difference(box_id: &str, other_id: &str) -> Option<usize> {
    if box_id.len() != other_id.len() {
        return None;
    }

    let mut differences = box_id
        .chars()
        .zip(other_id.chars())
        .enumerate()
        .filter_map(|(index, (a, b))| (a != b).then_some(index));

    match (differences.next(), differences.next()) {
        (Some(index), None) => Some(index),
        _ => None,
    }
}

fn common_letters(box_ids: &[&str]) -> Option<String> {
    box_ids.iter().enumerate().find_map(|(index, box_id)| {
        box_ids[index + 1..].iter().find_map(|other_id| {
            single_difference(box_id, other_id).map(|position| {
                box_id
                    .chars()
                    .enumerate()
                    .filter_map(|(letter_index, letter)| {
                        (letter_index != position).then_some(letter)
                    })
                    .collect()
            })
        })
    })
}

impl Solution<PartTwo> for Day02 {
    type Input = str;
    type Output = String;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let box_ids: Vec<&str> = input.lines().map(str::trim).collect();
        let common = common_letters(&box_ids).ok_or(Day02Error::NoCorrectBoxes)?;
        Ok(common)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT_ONE: &str = r"abcdef
bababc
abbcde
abcccd
aabcdd
abcdee
ababab
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let result = <Day02 as Solution<PartOne>>::solve(EXAMPLE_INPUT_ONE)?;
        assert_eq!(result, 12);
        Ok(())
    }

    #[test]
    fn repetitions_count_once_per_id() {
        assert_eq!(
            repetitions("aabcdd"),
            Repetitions {
                has_double: true,
                has_triple: false
            }
        );
        assert_eq!(
            repetitions("bababc"),
            Repetitions {
                has_double: true,
                has_triple: true
            }
        );
        assert_eq!(repetitions("abcdef"), Repetitions::default());
    }

    const EXAMPLE_INPUT_TWO: &str = r"abcde
fghij
klmno
pqrst
fguij
axcye
wvxyz
";

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let result = <Day02 as Solution<PartTwo>>::solve(EXAMPLE_INPUT_TWO)?;
        assert_eq!(result, "fgij");
        Ok(())
    }

    #[test]
    fn single_difference_requires_exactly_one() {
        assert_eq!(single_difference("fghij", "fguij"), Some(2));
        assert_eq!(single_difference("abcde", "axcye"), None);
        assert_eq!(single_difference("abcde", "abcde"), None);
        assert_eq!(single_difference("abcd", "abcde"), None);
    }

    #[test]
    fn part_two_without_match_is_error() {
        assert!(<Day02 as Solution<PartTwo>>::solve("abc\nxyz\n").is_err());
    }
}
