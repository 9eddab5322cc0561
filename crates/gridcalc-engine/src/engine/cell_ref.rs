//! Cell reference parsing and formatting.
//!
//! Converts formula tokens such as "A1" or "C12" into zero-indexed row/column
//! coordinates. The letter selects the column and the number selects the row,
//! so "B3" is column 1, row 2. Only single-letter columns (A-Z) are addressable.
//!
//! # Examples
//!
//! ```
//! use gridcalc_engine::engine::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.col, 1);
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::ReferenceFault;

static A1_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<letter>[A-Z])(?<number>[0-9]+)$").expect("A1 pattern is valid")
});

/// A reference to a cell by row and column indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(row: usize, col: usize) -> CellRef {
        CellRef { row, col }
    }

    fn parse_a1(token: &str) -> Option<CellRef> {
        let caps = A1_PATTERN.captures(token)?;
        let col = (caps["letter"].as_bytes()[0] - b'A') as usize;
        let row = caps["number"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(row, col))
    }

    /// Whether a token is meant as a reference, i.e. it starts with an ASCII letter.
    ///
    /// Tokens that look like references but fail to parse are reported as bad
    /// references rather than as unknown formula tokens.
    pub fn looks_like_reference(token: &str) -> bool {
        token.starts_with(|c: char| c.is_ascii_alphabetic())
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        let mut result = String::new();
        let mut n = col as u128 + 1;
        while n > 0 {
            n -= 1;
            result.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        result
    }
}

impl FromStr for CellRef {
    type Err = ReferenceFault;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or(ReferenceFault::Malformed)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letters(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;
    use crate::error::ReferenceFault;

    fn parse(token: &str) -> Result<CellRef, ReferenceFault> {
        token.parse()
    }

    #[test]
    fn test_single_letter_columns() {
        assert_eq!(parse("A1"), Ok(CellRef::new(0, 0)));
        assert_eq!(parse("B1"), Ok(CellRef::new(0, 1)));
        assert_eq!(parse("Z1"), Ok(CellRef::new(0, 25)));
    }

    #[test]
    fn test_row_numbers_are_one_based() {
        assert_eq!(parse("A10").unwrap().row, 9);
        assert_eq!(parse("C100"), Ok(CellRef::new(99, 2)));
        assert_eq!(parse("A007"), Ok(CellRef::new(6, 0)));
    }

    #[test]
    fn test_invalid_tokens() {
        for token in ["", "1", "A", "A0", "1A", "a1", "AA1", "A 1", "A-1", "A1.5", "@1"] {
            assert_eq!(parse(token), Err(ReferenceFault::Malformed), "token {token:?}");
        }
    }

    #[test]
    fn test_row_overflow_is_malformed() {
        let huge = format!("A{}", "9".repeat(40));
        assert_eq!(parse(&huge), Err(ReferenceFault::Malformed));
    }

    #[test]
    fn test_display_round_trips() {
        for token in ["A1", "B7", "Z26"] {
            assert_eq!(parse(token).unwrap().to_string(), token);
        }
        assert_eq!(CellRef::new(0, 26).to_string(), "AA1");
    }

    #[test]
    fn test_looks_like_reference() {
        assert!(CellRef::looks_like_reference("A1"));
        assert!(CellRef::looks_like_reference("a1"));
        assert!(CellRef::looks_like_reference("AA1"));
        assert!(!CellRef::looks_like_reference("%"));
        assert!(!CellRef::looks_like_reference("1A"));
    }

    #[test]
    fn test_col_to_letters_handles_max_usize() {
        let letters = CellRef::col_to_letters(usize::MAX);
        assert!(!letters.is_empty());
        assert!(letters.chars().all(|c| c.is_ascii_uppercase()));
    }
}
