//! CSV output: import templates and record export.

use csv::WriterBuilder;
use glee_model::ImportProfile;

use crate::error::{IngestError, Result};

/// Builds the downloadable template for a profile.
///
/// The header row uses field labels so the template maps onto the profile
/// without manual intervention; example rows follow.
pub fn template_csv(profile: &ImportProfile) -> Result<String> {
    let header = profile.labels();
    let rows = profile
        .example_rows
        .iter()
        .map(|row| row.iter().map(String::as_str).collect::<Vec<_>>());
    write_rows(&header, rows)
}

/// Writes records as CSV with the given header row.
pub fn export_csv<R, S>(columns: &[&str], records: R) -> Result<String>
where
    R: IntoIterator<Item = Vec<S>>,
    S: AsRef<str>,
{
    write_rows(columns, records)
}

fn write_rows<R, S>(header: &[&str], rows: R) -> Result<String>
where
    R: IntoIterator<Item = Vec<S>>,
    S: AsRef<str>,
{
    let mut writer = WriterBuilder::new().flexible(false).from_writer(Vec::new());
    writer.write_record(header).map_err(write_error)?;
    for row in rows {
        let cells: Vec<&str> = row.iter().map(AsRef::<str>::as_ref).collect();
        writer.write_record(&cells).map_err(write_error)?;
    }
    let bytes = writer.into_inner().map_err(|e| IngestError::Write {
        message: e.to_string(),
    })?;
    String::from_utf8(bytes).map_err(|e| IngestError::Write {
        message: e.to_string(),
    })
}

fn write_error(err: csv::Error) -> IngestError {
    IngestError::Write {
        message: err.to_string(),
    }
}
