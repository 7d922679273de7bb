//! RIP file header parsing and validation.
//!
//! # Header Structure
//! ```text
//! [4 bytes] signature (must equal 0xDEADC0DE)
//! [4 bytes] version (must equal 4)
//! [4 bytes] face count
//! [4 bytes] vertex count
//! [4 bytes] vertex record size in bytes
//! [4 bytes] texture filename count
//! [4 bytes] shader filename count
//! [4 bytes] vertex attribute count
//! ```
//! All values little-endian `u32`.

use log::{info, trace, warn};

use crate::rip::cursor::ByteCursor;
use crate::rip::types::error::{Result, RipError};
use crate::rip::types::models::{RipHeader, RIP_FILE_VERSION, RIP_SIGNATURE};

/// Parses the fixed 32-byte header from the start of a RIP file.
///
/// Both the signature and version checks run and report before any further
/// reading occurs: a file failing either is treated as not of this format
/// and the import aborts with no side effects. A signature mismatch takes
/// precedence over a version mismatch in the returned error.
pub fn parse(cursor: &mut ByteCursor<'_>) -> Result<RipHeader> {
    let header = RipHeader {
        signature: cursor.read_u32()?,
        version: cursor.read_u32()?,
        face_count: cursor.read_u32()?,
        vertex_count: cursor.read_u32()?,
        vertex_record_size: cursor.read_u32()?,
        texture_file_count: cursor.read_u32()?,
        shader_file_count: cursor.read_u32()?,
        attribute_count: cursor.read_u32()?,
    };

    let signature_ok = header.signature == RIP_SIGNATURE;
    let version_ok = header.version == RIP_FILE_VERSION;
    if !signature_ok {
        warn!(
            "Expected signature {:#010x}, got {:#010x}",
            RIP_SIGNATURE, header.signature
        );
    }
    if !version_ok {
        warn!(
            "Expected version {}, got {}",
            RIP_FILE_VERSION, header.version
        );
    }
    if !signature_ok {
        return Err(RipError::BadSignature {
            expected: RIP_SIGNATURE,
            actual: header.signature,
        });
    }
    if !version_ok {
        return Err(RipError::UnsupportedVersion {
            expected: RIP_FILE_VERSION,
            actual: header.version,
        });
    }

    trace!(
        "Header: faces={}, vertices={}, record size={} bytes, textures={}, shaders={}, attributes={}",
        header.face_count,
        header.vertex_count,
        header.vertex_record_size,
        header.texture_file_count,
        header.shader_file_count,
        header.attribute_count
    );
    info!(
        "RIP header parsed: version={}, {} faces, {} vertices",
        header.version, header.face_count, header.vertex_count
    );

    Ok(header)
}
