use aoc_framework::parsing::{parse_input_lines, parse_with_context};
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, PartTwo, Solution};
use nalgebra::DMatrix;
use regex::Regex;

#[solution_runner(
    name = "Day 3: No Matter How You Slice It",
    parsed = ClaimedFabric,
    part_one = Day03,
    part_two = Day03
)]
impl super::AdventOfCode2018<3> {}

#[derive(thiserror::Error, Debug)]
enum Day03Error {
    /// Claim not formatted as expected. Tuple contains the source string to report in the error
    /// message.
    #[error("expected pattern \"#[id] @ [left],[top]: [width]x[height]\", found {0:?}")]
    NotClaim(String),

    #[error("every claim overlaps another claim")]
    NoIntactClaim,
}

/*
Input is a list of claims on a large square of fabric, one per line, like `#123 @ 3,2: 5x4`.

A claim is a rectangle with edges parallel to the fabric's, given by an ID, the inches from the left
and top edges of the fabric, then its width and height in inches.
*/

type ClaimId = u32;

/// The integer type for positions and sizes in inches.
///
/// The fabric is at least 1000 inches on each side.
type Inches = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Claim {
    id: ClaimId,
    left: Inches,
    top: Inches,
    width: Inches,
    height: Inches,
}

impl Claim {
    fn right(&self) -> Inches {
        self.left + self.width
    }

    fn bottom(&self) -> Inches {
        self.top + self.height
    }
}

struct ClaimParser {
    /// Regex capturing ID, left, top, width & height.
    claim_re: Regex,
}

impl ClaimParser {
    const CLAIM_PATTERN: &str = r"^#(\d+) @ (\d+),(\d+): (\d+)x(\d+)$";

    fn new() -> Self {
        let claim_re = Regex::new(Self::CLAIM_PATTERN).expect("pattern should be valid");
        Self { claim_re }
    }

    fn parse(&self, line: &str) -> DynamicResult<Claim> {
        let (_, [id, left, top, width, height]) = self
            .claim_re
            .captures(line.trim())
            .map(|captures| captures.extract())
            .ok_or_else(|| Day03Error::NotClaim(line.to_owned()))?;

        Ok(Claim {
            id: parse_with_context(id)?,
            left: parse_with_context(left)?,
            top: parse_with_context(top)?,
            width: parse_with_context(width)?,
            height: parse_with_context(height)?,
        })
    }
}

/// The count of claims over each square inch, rows from the top edge and columns from the left.
type Fabric = DMatrix<u16>;

/// The claims, marked on a fabric just large enough to hold them all.
struct ClaimedFabric {
    claims: Vec<Claim>,
    fabric: Fabric,
}

fn mark_claims(claims: &[Claim]) -> Fabric {
    let rows = claims.iter().map(Claim::bottom).max().unwrap_or(0);
    let cols = claims.iter().map(Claim::right).max().unwrap_or(0);
    let mut fabric = Fabric::zeros(rows, cols);

    for claim in claims {
        fabric
            .view_mut((claim.top, claim.left), (claim.height, claim.width))
            .iter_mut()
            .for_each(|count| *count += 1);
    }

    fabric
}

impl ParseData for ClaimedFabric {
    fn parse(input: &str) -> DynamicResult<Self>
    where
        Self: Sized,
    {
        let claim_parser = ClaimParser::new();
        let claims: Vec<Claim> = parse_input_lines(input, |_, line| claim_parser.parse(line))
            .collect::<Result<_, _>>()?;
        let fabric = mark_claims(&claims);
        tracing::debug!(
            claims = claims.len(),
            rows = fabric.nrows(),
            cols = fabric.ncols(),
            "marked claims on fabric"
        );
        Ok(Self { claims, fabric })
    }
}

/*
For part 1, count the square inches of fabric within two or more claims.
*/

struct Day03;

impl Solution<PartOne> for Day03 {
    type Input = ClaimedFabric;
    type Output = usize;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        Ok(input.fabric.iter().filter(|&&count| count >= 2).count())
    }
}

/*
For part 2, find the ID of the only claim that doesn't overlap any other claim.
*/

impl ClaimedFabric {
    fn is_intact(&self, claim: &Claim) -> bool {
        self.fabric
            .view((claim.top, claim.left), (claim.height, claim.width))
            .iter()
            .all(|&count| count == 1)
    }
}

impl Solution<PartTwo> for Day03 {
    type Input = ClaimedFabric;
    type Output = ClaimId;

    fn solve(input: &Self::Input) -> DynamicResult<Self::Output> {
        let intact = input
            .claims
            .iter()
            .find(|claim| input.is_intact(claim))
            .ok_or(Day03Error::NoIntactClaim)?;
        Ok(intact.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE_INPUT: &str = r"#1 @ 1,3: 4x4
#2 @ 3,1: 4x4
#3 @ 5,5: 2x2
";

    #[test]
    fn part_one_solves_example() -> DynamicResult<()> {
        let parsed = ClaimedFabric::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartOne>>::solve(&parsed)?;
        assert_eq!(result, 4);
        Ok(())
    }

    #[test]
    fn part_two_solves_example() -> DynamicResult<()> {
        let parsed = ClaimedFabric::parse(EXAMPLE_INPUT)?;
        let result = <Day03 as Solution<PartTwo>>::solve(&parsed)?;
        assert_eq!(result, 3);
        Ok(())
    }

    #[test]
    fn fabric_fits_claims() -> DynamicResult<()> {
        let parsed = ClaimedFabric::parse(EXAMPLE_INPUT)?;
        assert_eq!(parsed.fabric.shape(), (7, 7));
        assert_eq!(parsed.fabric[(3, 3)], 2);
        assert_eq!(parsed.fabric[(6, 6)], 1);
        assert_eq!(parsed.fabric[(0, 0)], 0);
        Ok(())
    }

    #[test]
    fn parses_claim() -> DynamicResult<()> {
        let claim = ClaimParser::new().parse("#123 @ 3,2: 5x4")?;
        assert_eq!(
            claim,
            Claim {
                id: 123,
                left: 3,
                top: 2,
                width: 5,
                height: 4
            }
        );
        assert_eq!((claim.right(), claim.bottom()), (8, 6));
        Ok(())
    }

    #[test]
    fn malformed_claim_is_error() {
        assert!(ClaimedFabric::parse("#1 @ 1,3 4x4").is_err());
    }

    #[test]
    fn all_claims_overlapping_is_error() -> DynamicResult<()> {
        let parsed = ClaimedFabric::parse("#1 @ 0,0: 2x2\n#2 @ 1,1: 2x2\n")?;
        assert!(<Day03 as Solution<PartTwo>>::solve(&parsed).is_err());
        Ok(())
    }
}
