//! Core data structures for RIP format components.
//!
//! This module defines the fundamental types used throughout the library:
//! - The fixed file header
//! - Vertex-attribute descriptors and their per-field type tags
//! - The final geometry buffers
//! - Import configuration supplied by the caller

/// Magic number at offset 0 of every RIP file.
pub const RIP_SIGNATURE: u32 = 0xDEAD_C0DE;

/// The one supported revision of the RIP container.
pub const RIP_FILE_VERSION: u32 = 4;

/// Placeholder texture name used when a file declares no textures.
pub const DEFAULT_TEXTURE: &str = "setka.png";

/// Fixed 32-byte header at the start of every RIP file.
///
/// Eight consecutive little-endian `u32` values. Immutable once read; all
/// downstream stages validate their element counts against it.
#[derive(Debug, Clone, Copy)]
pub struct RipHeader {
    pub signature: u32,
    pub version: u32,
    pub face_count: u32,
    pub vertex_count: u32,
    /// Size of one interleaved vertex record, in bytes.
    pub vertex_record_size: u32,
    pub texture_file_count: u32,
    pub shader_file_count: u32,
    pub attribute_count: u32,
}

/// Scalar type tag for one 4-byte field of a vertex record.
///
/// On-disk type codes map {0 => Float32, 1 => Uint32, 2 => Int32};
/// unrecognized codes fall back to `Uint32`, matching the capture tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Float32,
    Uint32,
    Int32,
}

impl From<u32> for FieldType {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Float32,
            2 => Self::Int32,
            _ => Self::Uint32,
        }
    }
}

/// One declared vertex attribute from the file's layout table.
///
/// Offsets and sizes are stored in field-slot units (one slot = 4 bytes),
/// already divided down from the on-disk byte values. Source order is
/// preserved: the order of descriptors determines field-slot indexing.
#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    /// Semantic name, e.g. "POSITION", "NORMAL", "TEXCOORD".
    pub semantic: String,
    /// Disambiguates repeated semantics (e.g. the second UV set).
    pub semantic_index: u32,
    /// First field slot of this attribute within the vertex record.
    pub slot_offset: usize,
    /// Number of field slots this attribute occupies.
    pub slot_count: usize,
    /// Scalar layout of this attribute's components.
    pub field_types: Vec<FieldType>,
}

/// Final renderer-agnostic output of a successful import.
///
/// All per-vertex sequences are parallel-indexed with vertex record order.
#[derive(Debug, Default)]
pub struct GeometryBuffers {
    /// Homogeneous positions; unset components default to 0.0 and the
    /// 4th component defaults to 1.0 when the layout claims fewer slots.
    pub positions: Vec<[f32; 4]>,
    /// Normals; unset components default to 0.0.
    pub normals: Vec<[f32; 3]>,
    /// U channel of the selected UV set.
    pub u: Vec<f32>,
    /// V channel of the selected UV set, stored as `1 - raw_v`.
    pub v: Vec<f32>,
    /// Flat triangle index buffer, `3 * face_count` entries.
    pub indices: Vec<u32>,
}

/// Explicit per-role field-slot overrides for manual layout mode.
///
/// Slot lists are recorded verbatim; no semantic inference runs.
#[derive(Debug, Clone, Default)]
pub struct ManualLayout {
    /// Up to 4 position slots.
    pub position: Vec<usize>,
    /// Up to 4 normal slots.
    pub normal: Vec<usize>,
    /// Slots of a single UV set, usually `[u, v]`.
    pub texcoord: Vec<usize>,
}

/// How vertex attributes are mapped to geometric roles.
#[derive(Debug, Clone, Default)]
pub enum LayoutMode {
    /// Resolve roles from semantic names declared in the file.
    #[default]
    Auto,
    /// Use caller-supplied slot indices and skip recognition entirely.
    Manual(ManualLayout),
}

/// Operator-supplied configuration, read-only during assembly.
///
/// A batch of files may share one `ImportOptions`; per-file resolution
/// state never lives here.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub layout: LayoutMode,
    /// Which accumulated UV set feeds the output U/V channels.
    pub uv_set: usize,
    /// Which declared texture filename to select for the mesh.
    pub texture_index: usize,
    /// Skip the "renderable 3-D object" completeness policy and emit
    /// whatever geometry decoded, however incomplete.
    pub import_anything: bool,
}
