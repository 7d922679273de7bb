//! Auxiliary string tables: texture and shader filenames.

use crate::rip::cursor::ByteCursor;
use crate::rip::types::error::Result;

/// Reads `count` consecutive null-terminated filenames.
pub fn parse(cursor: &mut ByteCursor<'_>, count: u32) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(count as usize);
    for _ in 0..count {
        names.push(cursor.read_cstring()?);
    }
    Ok(names)
}
