//! Per-row validation and value substitution.
//!
//! Row 0 fixes the column count every later row must match. Classification
//! itself is pure: a row either is the header (its names are returned) or
//! is data (its transformed text is returned).

use crate::classifier::first_non_numerical;
use crate::config::ConverterConfig;
use crate::error::{ConverterError, Result};
use crate::models::RowOutcome;
use tracing::trace;

/// Column count established by the first row
#[derive(Debug, Default)]
pub struct ColumnContract {
    expected: Option<usize>,
}

impl ColumnContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Column count recorded from row 0, if seen yet
    pub fn expected(&self) -> Option<usize> {
        self.expected
    }

    /// Record the count on row 0, check it on every later row
    pub fn verify(&mut self, row_index: usize, found: usize) -> Result<()> {
        match self.expected {
            Some(expected) if row_index > 0 && found != expected => {
                Err(ConverterError::ColumnCountMismatch {
                    line_number: row_index + 1,
                    found,
                    expected,
                })
            }
            Some(_) if row_index > 0 => Ok(()),
            _ => {
                self.expected = Some(found);
                Ok(())
            }
        }
    }
}

/// Validates and rewrites input rows according to a configuration
pub struct RowTransformer<'a> {
    config: &'a ConverterConfig,
    columns: ColumnContract,
    header_consumed: bool,
}

impl<'a> RowTransformer<'a> {
    pub fn new(config: &'a ConverterConfig) -> Self {
        Self {
            config,
            columns: ColumnContract::new(),
            header_consumed: false,
        }
    }

    /// Split, validate and classify one raw line
    pub fn transform_line(&mut self, row_index: usize, line: &str) -> Result<RowOutcome> {
        let columns: Vec<&str> = line.split(self.config.column_delimiter).collect();
        self.verify_column_count(row_index, &columns)?;
        self.classify_and_process(row_index, line, &columns)
    }

    pub fn verify_column_count(&mut self, row_index: usize, columns: &[&str]) -> Result<()> {
        self.columns.verify(row_index, columns.len())
    }

    /// Position of line `row_index` among data rows, counting from 1
    pub fn data_row_index(&self, row_index: usize) -> usize {
        if self.header_consumed {
            row_index
        } else {
            row_index + 1
        }
    }

    /// Decide whether a row is the header or data and produce its outcome
    pub fn classify_and_process(
        &mut self,
        row_index: usize,
        line: &str,
        columns: &[&str],
    ) -> Result<RowOutcome> {
        let Some(found) = first_non_numerical(columns) else {
            return Ok(RowOutcome::Data(self.process_value_line(columns)));
        };

        if row_index == 0 {
            trace!("Row 0 holds non-numerical column {}, treating as header", found.column_index);
            self.header_consumed = true;
            return Ok(RowOutcome::Header(
                columns.iter().map(|c| c.to_string()).collect(),
            ));
        }

        if self.config.ignore_non_numerical {
            trace!(
                "Keeping non-numerical \"{}\" on line {}",
                found.matched,
                row_index + 1
            );
            return Ok(RowOutcome::Data(self.process_value_line(columns)));
        }

        Err(ConverterError::UnexpectedNonNumericalData {
            row_index: self.data_row_index(row_index),
            line_number: row_index + 1,
            column_index: found.column_index,
            context: line.to_string(),
            first_match: found.matched.to_string(),
        })
    }

    fn process_value_line(&self, columns: &[&str]) -> String {
        columns
            .iter()
            .map(|cell| self.process_cell(cell))
            .collect::<Vec<_>>()
            .join(&self.config.column_joiner)
    }

    /// Substitutions first, then blank-cell replacement
    fn process_cell(&self, cell: &str) -> String {
        let replaced = self
            .config
            .replacements
            .iter()
            .fold(cell.to_string(), |current, replacement| {
                replacement.apply(&current)
            });

        match &self.config.empty_replacement {
            Some(token) if replaced.trim().is_empty() => token.clone(),
            _ => replaced,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Replacement;

    fn header(names: &[&str]) -> RowOutcome {
        RowOutcome::Header(names.iter().map(|n| n.to_string()).collect())
    }

    fn data(text: &str) -> RowOutcome {
        RowOutcome::Data(text.to_string())
    }

    #[test]
    fn test_column_contract_records_first_row() {
        let mut contract = ColumnContract::new();
        assert_eq!(contract.expected(), None);
        contract.verify(0, 3).unwrap();
        assert_eq!(contract.expected(), Some(3));
        contract.verify(1, 3).unwrap();

        match contract.verify(4, 2).unwrap_err() {
            ConverterError::ColumnCountMismatch {
                line_number,
                found,
                expected,
            } => {
                assert_eq!(line_number, 5);
                assert_eq!(found, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("Expected ColumnCountMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_header_row_is_consumed() {
        let config = ConverterConfig::default();
        let mut transformer = RowTransformer::new(&config);
        let outcome = transformer.transform_line(0, "Age\tWeight").unwrap();
        assert_eq!(outcome, header(&["Age", "Weight"]));
    }

    #[test]
    fn test_numerical_first_row_is_data() {
        let config = ConverterConfig::default();
        let mut transformer = RowTransformer::new(&config);
        let outcome = transformer.transform_line(0, "1.5\t2").unwrap();
        assert_eq!(outcome, data("1,5\t2"));
    }

    #[test]
    fn test_replacements_apply_in_order_before_empty_token() {
        let config = ConverterConfig::default()
            .with_replacements(vec![
                Replacement::new(".", ","),
                Replacement::new(",", ";"),
                Replacement::new("--", ""),
            ])
            .with_empty_replacement(Some("-999".to_string()));
        let mut transformer = RowTransformer::new(&config);

        let outcome = transformer.transform_line(0, "1.5\t--\t").unwrap();
        assert_eq!(outcome, data("1;5\t-999\t-999"));
    }

    #[test]
    fn test_empty_cells_kept_without_token() {
        let config = ConverterConfig::default().with_empty_replacement(None);
        let mut transformer = RowTransformer::new(&config);
        let outcome = transformer.transform_line(0, "1\t\t3").unwrap();
        assert_eq!(outcome, data("1\t\t3"));
    }

    #[test]
    fn test_custom_joiner() {
        let config = ConverterConfig::default().with_column_joiner(" ");
        let mut transformer = RowTransformer::new(&config);
        let outcome = transformer.transform_line(0, "1\t2\t3").unwrap();
        assert_eq!(outcome, data("1 2 3"));
    }

    #[test]
    fn test_non_numerical_data_row_fails_with_context() {
        let config = ConverterConfig::default();
        let mut transformer = RowTransformer::new(&config);
        transformer.transform_line(0, "Header1\tHeader2").unwrap();

        match transformer
            .transform_line(1, "0,00001\tNotAHeader")
            .unwrap_err()
        {
            ConverterError::UnexpectedNonNumericalData {
                row_index,
                line_number,
                column_index,
                context,
                first_match,
            } => {
                assert_eq!(row_index, 1);
                assert_eq!(line_number, 2);
                assert_eq!(column_index, 2);
                assert_eq!(context, "0,00001\tNotAHeader");
                assert_eq!(first_match, "NotAHeader");
            }
            other => panic!("Expected UnexpectedNonNumericalData, got {other:?}"),
        }
    }

    #[test]
    fn test_ignore_non_numerical_processes_row_as_data() {
        let config = ConverterConfig::default().with_ignore_non_numerical(true);
        let mut transformer = RowTransformer::new(&config);
        transformer.transform_line(0, "A\tB").unwrap();

        let outcome = transformer.transform_line(1, "1.5\t ").unwrap();
        assert_eq!(outcome, data("1,5\t-999"));
    }

    #[test]
    fn test_column_count_checked_before_content() {
        let config = ConverterConfig::default();
        let mut transformer = RowTransformer::new(&config);
        transformer.transform_line(0, "A\tB").unwrap();

        let error = transformer.transform_line(1, "x\ty\tz").unwrap_err();
        assert!(matches!(error, ConverterError::ColumnCountMismatch { .. }));
    }

    #[test]
    fn test_custom_delimiter() {
        let config = ConverterConfig::default()
            .with_column_delimiter(';')
            .with_replacements(vec![]);
        let mut transformer = RowTransformer::new(&config);
        assert_eq!(
            transformer.transform_line(0, "a;b").unwrap(),
            header(&["a", "b"])
        );
        assert_eq!(transformer.transform_line(1, "1.5;2").unwrap(), data("1.5\t2"));
    }

    #[test]
    fn test_headerless_row_index_counts_data_rows() {
        let config = ConverterConfig::default();
        let mut transformer = RowTransformer::new(&config);
        transformer.transform_line(0, "1\t2").unwrap();
        transformer.transform_line(1, "3\t4").unwrap();

        match transformer.transform_line(2, "5\tx").unwrap_err() {
            ConverterError::UnexpectedNonNumericalData {
                row_index,
                line_number,
                column_index,
                ..
            } => {
                assert_eq!(row_index, 3);
                assert_eq!(line_number, 3);
                assert_eq!(column_index, 2);
            }
            other => panic!("Expected UnexpectedNonNumericalData, got {other:?}"),
        }
    }

    #[test]
    fn test_data_row_index_after_header() {
        let config = ConverterConfig::default();
        let mut transformer = RowTransformer::new(&config);
        assert_eq!(transformer.data_row_index(2), 3);
        transformer.transform_line(0, "A\tB").unwrap();
        assert_eq!(transformer.data_row_index(2), 2);
    }
}
