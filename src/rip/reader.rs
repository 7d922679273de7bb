//! High-level RIP file reading and batch import.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error, info};

use crate::rip::assemble;
use crate::rip::cursor::ByteCursor;
use crate::rip::format::{attributes, header, strings};
use crate::rip::layout::VertexLayout;
use crate::rip::types::error::{Result, RipError};
use crate::rip::types::models::{
    AttributeDescriptor, GeometryBuffers, ImportOptions, RipHeader, DEFAULT_TEXTURE,
};

/// A fully imported RIP captured-geometry file.
///
/// Construction runs the whole pipeline: header validation, attribute-table
/// parsing, semantic resolution, string tables, faces, vertex decoding, and
/// the integrity verdict. A `RipFile` therefore always holds complete,
/// consistent buffers; no partially-read value ever escapes.
#[derive(Debug)]
pub struct RipFile {
    pub header: RipHeader,
    pub attributes: Vec<AttributeDescriptor>,
    pub layout: VertexLayout,
    pub texture_files: Vec<String>,
    pub shader_files: Vec<String>,
    pub geometry: GeometryBuffers,
}

impl RipFile {
    /// Reads and imports a RIP file from the given path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be opened or read
    /// - The signature or version does not match the supported format
    /// - An attribute descriptor is malformed
    /// - Any block is truncated
    /// - The decoded geometry is incomplete (see [`ImportOptions::import_anything`])
    pub fn read(path: impl AsRef<Path>, options: &ImportOptions) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening RIP file: {}", path.display());
        let data = fs::read(path)?;
        Self::from_bytes(&data, options)
    }

    /// Imports a RIP file from an in-memory byte buffer.
    ///
    /// Resolution state is created fresh here on every call, so unrelated
    /// files in a batch can never contaminate each other's layout.
    pub fn from_bytes(data: &[u8], options: &ImportOptions) -> Result<Self> {
        let mut cursor = ByteCursor::new(data);

        let rip_header = header::parse(&mut cursor)?;

        let (descriptors, field_types) =
            attributes::parse(&mut cursor, rip_header.attribute_count)?;
        let layout = VertexLayout::resolve(&descriptors, &options.layout)?;

        let texture_files = strings::parse(&mut cursor, rip_header.texture_file_count)?;
        let shader_files = strings::parse(&mut cursor, rip_header.shader_file_count)?;
        debug!(
            "String tables read: {} texture(s), {} shader(s)",
            texture_files.len(),
            shader_files.len()
        );

        let geometry =
            assemble::assemble(&mut cursor, &rip_header, &layout, &field_types, options)?;

        Ok(Self {
            header: rip_header,
            attributes: descriptors,
            layout,
            texture_files,
            shader_files,
            geometry,
        })
    }

    /// The texture filename the imported mesh should carry.
    ///
    /// Picks the entry at `texture_index`, clamping an out-of-range index to
    /// the first declared texture; a file with no textures falls back to the
    /// capture tool's placeholder name.
    pub fn selected_texture(&self, options: &ImportOptions) -> &str {
        self.texture_files
            .get(options.texture_index)
            .or_else(|| self.texture_files.first())
            .map_or(DEFAULT_TEXTURE, String::as_str)
    }
}

/// Boundary to the host mesh-construction collaborator.
///
/// The importer knows nothing about scene graphs; a host implements this to
/// turn finished buffers into whatever mesh object it manages.
pub trait MeshConstructor {
    type Handle;

    /// Builds one mesh from assembled geometry.
    ///
    /// `source_dir` is the directory of the imported file and `texture` the
    /// selected texture filename, for hosts that wire up materials.
    fn build_mesh(
        &mut self,
        geometry: &GeometryBuffers,
        source_dir: &Path,
        texture: &str,
    ) -> Result<Self::Handle>;
}

/// Result of a batch import: built handles plus per-file failures.
///
/// One bad file never aborts a batch; its error is recorded and the batch
/// moves on.
pub struct BatchOutcome<H> {
    pub meshes: Vec<H>,
    pub failures: Vec<(PathBuf, RipError)>,
}

/// Imports each file in turn and hands successful geometry to the host.
///
/// Every file runs with freshly created resolution state; the only state
/// shared across the batch is the immutable `options`.
pub fn import_batch<P, M>(
    paths: impl IntoIterator<Item = P>,
    options: &ImportOptions,
    constructor: &mut M,
) -> BatchOutcome<M::Handle>
where
    P: AsRef<Path>,
    M: MeshConstructor,
{
    let mut outcome = BatchOutcome {
        meshes: Vec::new(),
        failures: Vec::new(),
    };

    for path in paths {
        let path = path.as_ref();
        let built = RipFile::read(path, options).and_then(|file| {
            let source_dir = path.parent().unwrap_or_else(|| Path::new(""));
            constructor.build_mesh(&file.geometry, source_dir, file.selected_texture(options))
        });
        match built {
            Ok(handle) => outcome.meshes.push(handle),
            Err(e) => {
                error!("Import failed for {}: {}", path.display(), e);
                outcome.failures.push((path.to_path_buf(), e));
            }
        }
    }

    info!(
        "Batch import done: {} mesh(es) built, {} failure(s)",
        outcome.meshes.len(),
        outcome.failures.len()
    );
    outcome
}
