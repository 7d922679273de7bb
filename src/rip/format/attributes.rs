//! Vertex-attribute declaration table parsing.
//!
//! The RIP container does not fix the vertex record layout. Instead each
//! file carries an ordered table of typed attribute descriptors, and the
//! concatenation of their per-field type tags forms the decode plan for one
//! interleaved vertex record.
//!
//! # Descriptor Structure
//! ```text
//! [N bytes] semantic name (null-terminated ASCII, e.g. "POSITION")
//! [4 bytes] semantic index
//! [4 bytes] byte offset within the vertex record
//! [4 bytes] byte size of this attribute
//! [4 bytes] type-map element count
//! [4 bytes * count] type codes {0: float, 1: uint, 2: int}
//! ```

use log::{debug, trace};

use crate::rip::cursor::ByteCursor;
use crate::rip::types::error::{Result, RipError};
use crate::rip::types::models::{AttributeDescriptor, FieldType};

/// Reads `count` attribute descriptors and builds the flattened field-type
/// sequence.
///
/// Byte offsets and sizes are converted to field-slot units (one slot =
/// 4 bytes); a value not divisible by 4 fails with
/// [`RipError::MalformedAttribute`]. Source order is preserved, since slot
/// indexing depends on it.
pub fn parse(
    cursor: &mut ByteCursor<'_>,
    count: u32,
) -> Result<(Vec<AttributeDescriptor>, Vec<FieldType>)> {
    let mut descriptors = Vec::with_capacity(count as usize);
    let mut field_types = Vec::new();

    for i in 0..count {
        let semantic = cursor.read_cstring()?;
        let semantic_index = cursor.read_u32()?;
        let byte_offset = cursor.read_u32()?;
        let byte_size = cursor.read_u32()?;
        let type_map_elements = cursor.read_u32()?;

        let slot_offset = to_slots(byte_offset, "offset", &semantic, i)?;
        let slot_count = to_slots(byte_size, "size", &semantic, i)?;

        let mut types = Vec::with_capacity(type_map_elements as usize);
        for _ in 0..type_map_elements {
            types.push(FieldType::from(cursor.read_u32()?));
        }

        trace!(
            "Attribute [{}]: semantic={}, index={}, slot offset={}, slots={}, types={:?}",
            i, semantic, semantic_index, slot_offset, slot_count, types
        );

        field_types.extend_from_slice(&types);
        descriptors.push(AttributeDescriptor {
            semantic,
            semantic_index,
            slot_offset,
            slot_count,
            field_types: types,
        });
    }

    debug!(
        "Attribute table parsed: {} descriptors, {} field slots per record",
        descriptors.len(),
        field_types.len()
    );

    Ok((descriptors, field_types))
}

/// Converts a byte offset/size to field-slot units.
fn to_slots(bytes: u32, what: &str, semantic: &str, index: u32) -> Result<usize> {
    if bytes % 4 != 0 {
        return Err(RipError::MalformedAttribute(format!(
            "{} {} of attribute [{}] '{}' is not a multiple of 4",
            what, bytes, index, semantic
        )));
    }
    Ok((bytes / 4) as usize)
}
