//! # rip-reader
//!
//! A reader for NinjaRipper captured-geometry files (.rip format, v4).
//!
//! RIP files do not fix their vertex record layout: each file declares an
//! ordered table of typed attributes describing one interleaved record. The
//! importer decodes that declaration, resolves which attributes carry
//! positions, normals, and texture coordinates (automatically by semantic
//! name, or via explicit overrides), and assembles renderer-agnostic
//! geometry buffers plus the associated texture and shader filenames.
pub mod rip;

// Re-export the main types for convenience
pub use rip::{
    import_batch,
    layout::VertexLayout,
    types::models::{
        AttributeDescriptor, FieldType, GeometryBuffers, ImportOptions, LayoutMode, ManualLayout,
        RipHeader, DEFAULT_TEXTURE, RIP_FILE_VERSION, RIP_SIGNATURE,
    },
    BatchOutcome, MeshConstructor, Result, RipError, RipFile,
};
