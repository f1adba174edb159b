//! Utility functions and errors for parsing input.

use std::str::FromStr;

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type, mapping errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_owned(),
        source,
    })
}

/// A line in an input string caused a parsing error.
///
/// Holds the line text so a report points at the offending record.
#[derive(Error, Debug)]
#[error("failure parsing line {}: {line:?}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    line: String,
    source: DynamicError,
}

impl InvalidLine {
    /// The zero-based index of the line that failed.
    #[must_use]
    pub fn line_index(&self) -> usize {
        self.line_index
    }

    /// The text of the line that failed.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Parse each line of input with a closure, mapping any line's error to an [`InvalidLine`].
///
/// The closure receives the zero-based line index and the line.
///
/// # Returns
///
/// An iterator of parsing results for each line. Collect into a `Result` to stop at the first
/// failure.
pub fn parse_input_lines<T, F>(
    input: &str,
    mut parser: F,
) -> impl Iterator<Item = Result<T, InvalidLine>>
where
    F: FnMut(usize, &str) -> Result<T, DynamicError>,
{
    input.lines().enumerate().map(move |(index, line)| {
        parser(index, line).map_err(|source| InvalidLine {
            line_index: index,
            line: line.to_owned(),
            source,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_context_reports_string() {
        let Err(error) = parse_with_context::<u8>("300") else {
            panic!("300 should not fit in u8");
        };
        assert_eq!(error.to_string(), "failed to parse string: \"300\"");
    }

    #[test]
    fn parse_input_lines_collects_values() -> Result<(), InvalidLine> {
        let values: Vec<u8> =
            parse_input_lines("1\n2\n3\n", |_, line| Ok(parse_with_context(line)?))
                .collect::<Result<_, _>>()?;
        assert_eq!(values, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn parse_input_lines_reports_one_based_line() {
        let result = parse_input_lines("1\nx\n3", |_, line| Ok(parse_with_context::<u8>(line)?))
            .collect::<Result<Vec<_>, _>>();
        let Err(error) = result else {
            panic!("line 2 should fail to parse");
        };
        assert_eq!(error.line_index(), 1);
        assert_eq!(error.line(), "x");
        assert_eq!(error.to_string(), "failure parsing line 2: \"x\"");
    }
}
