//! Parsing of the ephemeris binary's comma-separated output.
//!
//! One routine serves all record kinds; the layout decides the field count
//! and which column loses its unit marker.

use super::error::{EphemerisError, EphemerisResult};
use super::records::{EphemerisRecord, HouseRecord, PlanetRecord, RecordLayout, StarRecord};

/// Parse planet rows (`name, longitude, latitude, speed`).
pub fn parse_planets(output: &str) -> EphemerisResult<Vec<PlanetRecord>> {
    parse_records(output)
}

/// Parse house cusp rows (`name, longitude`).
pub fn parse_houses(output: &str) -> EphemerisResult<Vec<HouseRecord>> {
    parse_records(output)
}

/// Parse fixed star rows (eight columns, magnitude last).
pub fn parse_stars(output: &str) -> EphemerisResult<Vec<StarRecord>> {
    parse_records(output)
}

/// Parse every data line of `output` into `R`, in line order.
///
/// Blank lines and lines without a comma are banner noise and skipped.
/// A single malformed line fails the whole parse.
pub fn parse_records<R: EphemerisRecord>(output: &str) -> EphemerisResult<Vec<R>> {
    let rows = split_lines(output, &R::LAYOUT)?;
    Ok(rows.into_iter().map(R::from_fields).collect())
}

/// Split `output` into cleaned field vectors according to `layout`.
pub fn split_lines(output: &str, layout: &RecordLayout) -> EphemerisResult<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    for raw in output.lines() {
        let line = raw.trim();
        if line.is_empty() || !line.contains(',') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != layout.width() {
            return Err(EphemerisError::MalformedLine {
                kind: layout.kind,
                line: line.to_string(),
                expected: layout.width(),
                found: fields.len(),
            });
        }

        let mut row: Vec<String> = fields.into_iter().map(clean_field).collect();
        if let Some((column, unit)) = layout.unit_suffix {
            if let Some(value) = row.get_mut(column) {
                strip_unit(value, unit);
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Remove one surrounding layer of double quotes, then whitespace.
///
/// The binary's `","` separator leaves a dangling quote on the outer
/// columns, so each side is stripped independently.
pub fn clean_field(field: &str) -> String {
    let field = field.strip_prefix('"').unwrap_or(field);
    let field = field.strip_suffix('"').unwrap_or(field);
    field.trim().to_string()
}

fn strip_unit(value: &mut String, unit: char) {
    if value.ends_with(unit) {
        value.pop();
        let trimmed_len = value.trim_end().len();
        value.truncate(trimmed_len);
    }
}
