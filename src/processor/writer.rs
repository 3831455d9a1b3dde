//! SHARPpy text writer
//!
//! Emits the fixed layout read by SHARPpy:
//!
//! ```text
//! %TITLE%
//! {station} {YYMMDD}/{HHMM}
//!
//! LEVEL  HGHT  TEMP  DWPT WDIR  WSPD
//! ----------------------------------
//! %RAW%
//! {pres}, {hght}, {temp}, {dwpt}, {wdir}, {wspd}
//! %END%
//! ```

use crate::constants::sharppy::{
    COLUMN_HEADER, COLUMN_RULE, END_MARKER, FIELD_SEPARATOR, RAW_MARKER, TITLE_MARKER,
};
use crate::models::{SoundingHeader, SoundingLevel};
use std::io::{self, Write};

/// Render a value the way SHARPpy files have always carried them
///
/// Shortest round-trip decimal with at least one fractional digit, `nan`,
/// `inf`, and exponents written as `1e+16` / `1e-05`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let rendered = format!("{:?}", value);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

/// One data line, without the trailing newline
pub fn format_level(level: &SoundingLevel) -> String {
    [
        level.pressure_mb,
        level.height_m,
        level.temp_c,
        level.dewpoint_c.unwrap_or(f64::NAN),
        level.wind_dir,
        level.wind_speed_kt,
    ]
    .iter()
    .map(|&v| format_value(v))
    .collect::<Vec<_>>()
    .join(FIELD_SEPARATOR)
}

/// Streaming writer for a single SHARPpy file
#[derive(Debug)]
pub struct SharppyWriter<W: Write> {
    inner: W,
    levels_written: usize,
}

impl<W: Write> SharppyWriter<W> {
    /// Write the title block and column header
    pub fn begin(mut inner: W, header: &SoundingHeader) -> io::Result<Self> {
        writeln!(inner, "{}", TITLE_MARKER)?;
        writeln!(inner, "{}", header.title_line())?;
        writeln!(inner)?;
        writeln!(inner, "{}", COLUMN_HEADER)?;
        writeln!(inner, "{}", COLUMN_RULE)?;
        writeln!(inner, "{}", RAW_MARKER)?;
        Ok(Self {
            inner,
            levels_written: 0,
        })
    }

    pub fn write_level(&mut self, level: &SoundingLevel) -> io::Result<()> {
        writeln!(self.inner, "{}", format_level(level))?;
        self.levels_written += 1;
        Ok(())
    }

    /// Write the end marker and flush, returning the sink and the data line count
    pub fn finish(mut self) -> io::Result<(W, usize)> {
        writeln!(self.inner, "{}", END_MARKER)?;
        self.inner.flush()?;
        Ok((self.inner, self.levels_written))
    }
}

/// Write a complete SHARPpy file for `levels`, returning the number of data lines
pub fn write_sounding<'a, W, I>(out: W, header: &SoundingHeader, levels: I) -> io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a SoundingLevel>,
{
    let mut writer = SharppyWriter::begin(out, header)?;
    for level in levels {
        writer.write_level(level)?;
    }
    let (_, written) = writer.finish()?;
    Ok(written)
}
