//! Input table reader for sounding files
//!
//! Loads a whitespace- or comma-delimited numeric table, substitutes the
//! missing-value sentinel for the layout's missing token, and extracts the
//! physical quantities by fixed column index into a `SoundingTable`.
//!
//! Both delimiters treat `#` the same way: everything from it to the end of
//! the line is ignored, and a line left empty is skipped.

use crate::constants::{COMMENT_PREFIX, MISSING_VALUE_SENTINEL};
use crate::error::{Result, SoundingError};
use crate::models::{ColumnLayout, Delimiter, SoundingLevel, SoundingTable};

use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Numeric fields of one data row with the 1-based line it came from
#[derive(Debug)]
struct RawRow {
    line: usize,
    values: Vec<f64>,
}

/// Read a sounding file into a table according to `layout`
pub fn read_table(path: &Path, layout: &ColumnLayout) -> Result<SoundingTable> {
    if !path.exists() {
        return Err(SoundingError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let rows = match layout.delimiter {
        Delimiter::Whitespace => read_whitespace_rows(path, layout)?,
        Delimiter::Comma => read_comma_rows(path, layout)?,
    };

    if rows.is_empty() {
        return Err(SoundingError::input_format(path, 0, "no data rows found"));
    }

    let levels = rows
        .iter()
        .map(|row| extract_level(path, row, layout))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Read {} levels from {} ({:?}-delimited, {} header rows)",
        levels.len(),
        path.display(),
        layout.delimiter,
        layout.header_rows
    );

    Ok(SoundingTable::new(levels))
}

/// Read rows separated by runs of whitespace
fn read_whitespace_rows(path: &Path, layout: &ColumnLayout) -> Result<Vec<RawRow>> {
    let reader = BufReader::new(File::open(path)?);
    let mut rows = Vec::new();

    for (index, line) in reader.lines().enumerate().skip(layout.header_rows) {
        let line_num = index + 1;
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                SoundingError::input_format(path, line_num, format!("invalid UTF-8: {}", e))
            }
            _ => SoundingError::Io(e),
        })?;

        let content = strip_comment(&line);
        if content.trim().is_empty() {
            continue;
        }

        let values = content
            .split_whitespace()
            .enumerate()
            .map(|(col, token)| parse_field(path, line_num, col, token, &layout.missing_token))
            .collect::<Result<Vec<_>>>()?;

        rows.push(RawRow {
            line: line_num,
            values,
        });
    }

    Ok(rows)
}

/// Read comma-separated rows
fn read_comma_rows(path: &Path, layout: &ColumnLayout) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(COMMENT_PREFIX as u8))
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut skipped = 0;

    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(path, &e))?
    {
        if skipped < layout.header_rows {
            skipped += 1;
            continue;
        }

        let line_num = record.position().map_or(0, |p| p.line() as usize);
        let fields = fields_before_comment(&record);
        if fields.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let values = fields
            .into_iter()
            .enumerate()
            .map(|(col, token)| parse_field(path, line_num, col, token, &layout.missing_token))
            .collect::<Result<Vec<_>>>()?;

        rows.push(RawRow {
            line: line_num,
            values,
        });
    }

    Ok(rows)
}

/// Text of a line up to any comment
fn strip_comment(line: &str) -> &str {
    line.split_once(COMMENT_PREFIX).map_or(line, |(before, _)| before)
}

/// Fields of a CSV record up to any trailing comment
fn fields_before_comment(record: &StringRecord) -> Vec<&str> {
    let mut fields = Vec::with_capacity(record.len());
    for field in record.iter() {
        if let Some((before, _)) = field.split_once(COMMENT_PREFIX) {
            fields.push(before);
            break;
        }
        fields.push(field);
    }
    fields
}

/// Parse a single field, mapping the missing token and empty fields to the sentinel
fn parse_field(
    path: &Path,
    line: usize,
    column: usize,
    token: &str,
    missing_token: &str,
) -> Result<f64> {
    let token = token.trim();
    if token.is_empty() || token == missing_token {
        return Ok(MISSING_VALUE_SENTINEL);
    }

    token.parse::<f64>().map_err(|_| {
        SoundingError::input_format(
            path,
            line,
            format!("column {} value '{}' is not numeric", column, token),
        )
    })
}

/// Pick the layout's columns out of a parsed row
fn extract_level(path: &Path, row: &RawRow, layout: &ColumnLayout) -> Result<SoundingLevel> {
    if row.values.len() < layout.min_columns {
        return Err(SoundingError::input_format(
            path,
            row.line,
            format!(
                "expected at least {} columns, found {}",
                layout.min_columns,
                row.values.len()
            ),
        ));
    }

    let column = |index: usize| -> Result<f64> {
        row.values.get(index).copied().ok_or_else(|| {
            SoundingError::input_format(path, row.line, format!("missing column {}", index))
        })
    };

    let columns = &layout.columns;
    Ok(SoundingLevel {
        pressure_mb: column(columns.pressure)?,
        height_m: column(columns.height)?,
        temp_c: column(columns.temperature)?,
        dewpoint_c: columns.dewpoint.map(column).transpose()?,
        rel_humidity_pct: columns.rel_humidity.map(column).transpose()?,
        wind_dir: column(columns.wind_dir)?,
        wind_speed_kt: column(columns.wind_speed)?,
    })
}

fn csv_error(path: &Path, error: &csv::Error) -> SoundingError {
    let line = error.position().map_or(0, |p| p.line() as usize);
    SoundingError::input_format(path, line, format!("CSV parsing failed: {}", error))
}
