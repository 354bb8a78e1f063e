//! Numerical/non-numerical row classification.
//!
//! A cell is numerical when it only contains digits, commas, periods and
//! minus signs. The pattern is compiled once and shared by every row.

use regex::Regex;
use std::sync::LazyLock;

static NON_NUMERICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\d,.-]+").expect("non-numerical pattern must compile")
});

/// The first non-numerical cell found in a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonNumericalMatch<'a> {
    /// 1-based column index
    pub column_index: usize,
    /// The literal offending substring within that column
    pub matched: &'a str,
}

/// Whether a single cell contains anything outside the numeric alphabet
pub fn is_non_numerical(cell: &str) -> bool {
    NON_NUMERICAL.is_match(cell)
}

/// Find the first non-numerical cell of a row, scanning left to right
pub fn first_non_numerical<'a>(columns: &[&'a str]) -> Option<NonNumericalMatch<'a>> {
    columns.iter().enumerate().find_map(|(index, cell)| {
        NON_NUMERICAL.find(cell).map(|m| NonNumericalMatch {
            column_index: index + 1,
            matched: m.as_str(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_alphabet() {
        for cell in ["", "0", "12,5", "-3.25", "1.000,00", "--,,.."] {
            assert!(!is_non_numerical(cell), "{cell:?} should be numerical");
        }
    }

    #[test]
    fn test_non_numerical_cells() {
        for cell in ["A", "1e5", " 1", "NaN", "1/2", "\u{00e9}"] {
            assert!(is_non_numerical(cell), "{cell:?} should be non-numerical");
        }
    }

    #[test]
    fn test_first_non_numerical_reports_column_and_match() {
        let columns = vec!["0,00001", "12abc3", "NotANumber"];
        let found = first_non_numerical(&columns).unwrap();
        assert_eq!(found.column_index, 2);
        assert_eq!(found.matched, "abc");
    }

    #[test]
    fn test_all_numerical_row() {
        let columns = vec!["1", "2,5", "-3"];
        assert_eq!(first_non_numerical(&columns), None);
    }

    #[test]
    fn test_blank_cell_is_non_numerical_when_whitespace() {
        // Whitespace falls outside the numeric alphabet
        let columns = vec!["1", " "];
        let found = first_non_numerical(&columns).unwrap();
        assert_eq!(found.column_index, 2);
        assert_eq!(found.matched, " ");
    }
}
