use csv::ReaderBuilder;
use tracing::debug;

use crate::core::{ErrorKind, ErrorSet, InputData};

/// Series limit enforced on xy input.
pub const MAX_SERIES: usize = 12;

/// Validates delimited input the way the chart engine reports problems.
///
/// The first column labels the X axis; every further column is a series that
/// must hold numbers (empty cells are allowed).
#[must_use]
pub fn validate_input(input: &InputData) -> ErrorSet {
    let mut errors = ErrorSet::new();
    if input.is_blank() {
        errors.insert(ErrorKind::Empty);
        return errors;
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input.raw.as_bytes());

    let column_count = match reader.headers() {
        Ok(headers) => headers.len(),
        Err(err) => {
            debug!(error = %err, "input header could not be read");
            errors.insert(ErrorKind::CantAutoType);
            return errors;
        }
    };

    let series_count = column_count.saturating_sub(1);
    if series_count == 0 {
        errors.insert(ErrorKind::TooFewSeries);
    } else if series_count > MAX_SERIES {
        errors.insert(ErrorKind::TooManySeries);
    }

    let mut row_count = 0usize;
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                debug!(error = %err, row = row_count, "input row could not be read");
                errors.insert(ErrorKind::CantAutoType);
                continue;
            }
        };
        row_count += 1;

        if record.len() != column_count {
            errors.insert(ErrorKind::UnevenSeries);
        }
        let has_nan = record
            .iter()
            .skip(1)
            .any(|cell| !cell.is_empty() && parse_number(cell).is_none());
        if has_nan {
            errors.insert(ErrorKind::NanValues);
        }
    }

    if row_count == 0 {
        errors.insert(ErrorKind::Empty);
    }
    errors
}

fn parse_number(cell: &str) -> Option<f64> {
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}
