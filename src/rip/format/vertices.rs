//! Interleaved vertex record decoding.
//!
//! Decoding is purely positional: slot `i` of the field-type sequence
//! corresponds to the `i`-th 4-byte word of the record, independent of which
//! attribute the slot belongs to. Integer fields widen to floating point so
//! the role-extraction stage works over one numeric representation.

use crate::rip::cursor::ByteCursor;
use crate::rip::types::error::Result;
use crate::rip::types::models::FieldType;

/// Decodes one vertex record of exactly `field_types.len() * 4` bytes into
/// `out`, one numeric value per field slot.
///
/// `out` is cleared first; callers reuse it across records to avoid a
/// per-vertex allocation.
pub fn decode_record(
    cursor: &mut ByteCursor<'_>,
    field_types: &[FieldType],
    out: &mut Vec<f32>,
) -> Result<()> {
    out.clear();
    out.reserve(field_types.len());
    for &field_type in field_types {
        let value = match field_type {
            FieldType::Float32 => cursor.read_f32()?,
            FieldType::Uint32 => cursor.read_u32()? as f32,
            FieldType::Int32 => cursor.read_i32()? as f32,
        };
        out.push(value);
    }
    Ok(())
}
