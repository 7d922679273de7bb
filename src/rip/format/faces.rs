//! Triangle index block parsing.

use crate::rip::cursor::ByteCursor;
use crate::rip::types::error::Result;

/// Reads `count` triangle triples (12 bytes each) into a flat index buffer.
///
/// The result holds `3 * count` vertex indices in source order.
pub fn parse(cursor: &mut ByteCursor<'_>, count: u32) -> Result<Vec<u32>> {
    let mut indices = Vec::with_capacity(count as usize * 3);
    for _ in 0..count {
        for _ in 0..3 {
            indices.push(cursor.read_u32()?);
        }
    }
    Ok(indices)
}
