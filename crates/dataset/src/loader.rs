use crate::error::DatasetError;
use crate::prepare::{RawRow, prepare};
use core_types::PreparedSale;
use std::path::Path;

/// The columns the sales file must provide. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "order_id",
    "order_date",
    "customer",
    "product",
    "category",
    "region",
    "quantity",
    "price",
    "revenue",
    "profit",
];

/// Loads the sales file at `path` and returns the prepared table.
///
/// Delegates to [`prepare`] immediately after parsing, so callers never see
/// unprepared rows. The operation is all-or-nothing: a missing file, a
/// missing required column or a structurally malformed CSV fails the whole
/// load with no partial result.
pub fn load_sales(path: &Path) -> Result<Vec<PreparedSale>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    validate_headers(&mut reader)?;

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: RawRow = result?;
        rows.push(row);
    }

    tracing::debug!(path = %path.display(), raw_rows = rows.len(), "Sales file parsed");
    Ok(prepare(rows))
}

fn validate_headers<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<(), DatasetError> {
    let headers = reader.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DatasetError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}
