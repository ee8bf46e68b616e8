//! Sensor payload decoding
//!
//! A payload is one line of comma-separated numbers in channel order:
//! `temperature,light,gas[,humidity]`. The 3-field form is the legacy
//! producer format; its humidity is filled with [`LEGACY_HUMIDITY_FALLBACK`].

use crate::error::{DashError, ParseErrorKind, Result};
use crate::types::Reading;

/// Humidity assumed for 3-field legacy payloads
pub const LEGACY_HUMIDITY_FALLBACK: f64 = 50.0;

/// Field separator of the payload format
pub const FIELD_DELIMITER: char = ',';

const MIN_FIELDS: usize = 3;
const MAX_FIELDS: usize = 4;

/// Decode a payload into a [`Reading`]
///
/// Surrounding whitespace of the payload and of each field is ignored.
/// Every field must be a finite number.
pub fn decode_payload(payload: &str) -> Result<Reading> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(DashError::parse(payload, ParseErrorKind::Empty));
    }

    let fields: Vec<&str> = trimmed.split(FIELD_DELIMITER).map(str::trim).collect();
    if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
        return Err(DashError::parse(
            trimmed,
            ParseErrorKind::FieldCount {
                found: fields.len(),
            },
        ));
    }

    let mut values = [LEGACY_HUMIDITY_FALLBACK; MAX_FIELDS];
    for (index, field) in fields.iter().enumerate() {
        values[index] = parse_field(trimmed, index, field)?;
    }

    Ok(Reading::new(values[0], values[1], values[2], values[3]))
}

fn parse_field(payload: &str, index: usize, field: &str) -> Result<f64> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(DashError::parse(
            payload,
            ParseErrorKind::NotANumber {
                index,
                field: field.to_string(),
            },
        )),
    }
}
