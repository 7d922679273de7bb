//! Geometry assembly: drives face and vertex decoding and renders the
//! integrity verdict.
//!
//! Role extraction is a pure slot lookup into each decoded record. The V
//! texture coordinate is stored as `1 - v` unconditionally; the capture
//! convention puts the texture origin at the opposite vertical edge from
//! every host this importer feeds.

use log::{debug, info, warn};

use crate::rip::cursor::ByteCursor;
use crate::rip::format::{faces, vertices};
use crate::rip::layout::VertexLayout;
use crate::rip::types::error::{Result, RipError};
use crate::rip::types::models::{FieldType, GeometryBuffers, ImportOptions, RipHeader};

/// Decodes all faces and vertex records and assembles the output buffers.
///
/// Fails with [`RipError::IncompleteGeometry`] when the decoded buffers
/// disagree with the header counts, or when the resolved layout does not
/// describe a renderable 3-D object and `import_anything` is not set. No
/// buffers escape on rejection.
pub fn assemble(
    cursor: &mut ByteCursor<'_>,
    header: &RipHeader,
    layout: &VertexLayout,
    field_types: &[FieldType],
    options: &ImportOptions,
) -> Result<GeometryBuffers> {
    let declared_size = header.vertex_record_size as usize;
    let decoded_size = field_types.len() * 4;
    if declared_size != decoded_size {
        // The capture tool itself trusts the type map over the header field.
        warn!(
            "Header declares {} byte records but the attribute table describes {} bytes; using the attribute table",
            declared_size, decoded_size
        );
    }

    let indices = faces::parse(cursor, header.face_count)?;
    debug!("Face block read: {} indices", indices.len());

    let vertex_count = header.vertex_count as usize;
    let mut buffers = GeometryBuffers {
        positions: Vec::with_capacity(vertex_count),
        normals: Vec::with_capacity(vertex_count),
        u: Vec::with_capacity(vertex_count),
        v: Vec::with_capacity(vertex_count),
        indices,
    };

    let uv_slots = layout.uv_set(options.uv_set).unwrap_or(&[]);
    if uv_slots.is_empty() {
        warn!(
            "UV set {} requested but only {} resolved; texture coordinates default to zero",
            options.uv_set,
            layout.uv_set_count()
        );
    }

    let referenced = layout
        .position_slots()
        .iter()
        .chain(layout.normal_slots())
        .chain(uv_slots)
        .copied()
        .max();
    if let Some(max_slot) = referenced {
        if max_slot >= field_types.len() {
            return Err(RipError::MalformedAttribute(format!(
                "layout references slot {} but records carry only {} slots",
                max_slot,
                field_types.len()
            )));
        }
    }

    let mut record = Vec::new();
    for _ in 0..header.vertex_count {
        vertices::decode_record(cursor, field_types, &mut record)?;

        let mut position = [0.0, 0.0, 0.0, 0.0];
        for (component, &slot) in position.iter_mut().zip(layout.position_slots()) {
            *component = record[slot];
        }
        if layout.position_slots().len() < 4 {
            position[3] = 1.0;
        }
        buffers.positions.push(position);

        let mut normal = [0.0; 3];
        for (component, &slot) in normal.iter_mut().zip(layout.normal_slots()) {
            *component = record[slot];
        }
        buffers.normals.push(normal);

        let raw_u = uv_slots.first().map_or(0.0, |&slot| record[slot]);
        let raw_v = uv_slots.get(1).map_or(0.0, |&slot| record[slot]);
        buffers.u.push(raw_u);
        buffers.v.push(1.0 - raw_v);
    }

    verify(header, layout, &buffers, options)?;

    info!(
        "Geometry assembled: {} vertices, {} triangles",
        buffers.positions.len(),
        buffers.indices.len() / 3
    );
    Ok(buffers)
}

/// Terminal integrity check before the buffers are emitted.
fn verify(
    header: &RipHeader,
    layout: &VertexLayout,
    buffers: &GeometryBuffers,
    options: &ImportOptions,
) -> Result<()> {
    if buffers.positions.len() != header.vertex_count as usize {
        return Err(RipError::IncompleteGeometry(format!(
            "decoded {} vertices, header declares {}",
            buffers.positions.len(),
            header.vertex_count
        )));
    }
    if buffers.indices.len() != header.face_count as usize * 3 {
        return Err(RipError::IncompleteGeometry(format!(
            "decoded {} face indices, header declares {} faces",
            buffers.indices.len(),
            header.face_count
        )));
    }

    // Policy: a mesh without 3 position components and a full UV pair is not
    // a renderable 3-D object.
    if !options.import_anything {
        let position_components = layout.position_slots().len();
        let uv_components = layout.primary_uv_components();
        if position_components < 3 || uv_components < 2 {
            return Err(RipError::IncompleteGeometry(format!(
                "resolved {} position and {} texcoord components; file is not a 3-D object \
                 (enable import_anything to accept it)",
                position_components, uv_components
            )));
        }
    }

    Ok(())
}
