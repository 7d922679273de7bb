//! Vertex layout resolution: mapping declared attributes to geometric roles.
//!
//! A RIP file declares its vertex record layout as an ordered attribute
//! table; which attributes carry positions, normals, and texture coordinates
//! is recovered here, either automatically from semantic names or from
//! explicit caller overrides.
//!
//! A layout is built fresh for every file import and is immutable for the
//! remainder of that import. Nothing here is shared across files: batch
//! imports in automatic mode must never reuse resolution state, since two
//! unrelated captures rarely agree on a record layout.

use log::{debug, trace};

use crate::rip::types::error::{Result, RipError};
use crate::rip::types::models::{AttributeDescriptor, LayoutMode, ManualLayout};

/// One of the three canonical geometric purposes a semantic resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Position,
    Normal,
    Texcoord,
}

impl Role {
    /// Maps a declared semantic name to its role.
    ///
    /// Unknown semantics (BLENDWEIGHT, COLOR, ...) return `None` and are
    /// skipped by recognition.
    pub fn from_semantic(name: &str) -> Option<Self> {
        match name {
            "POSITION" | "SV_POSITION" => Some(Self::Position),
            "NORMAL" => Some(Self::Normal),
            "TEXCOORD" => Some(Self::Texcoord),
            _ => None,
        }
    }
}

/// Position and normal roles claim at most this many field slots.
const ROLE_CAPACITY: usize = 4;

/// Resolved mapping from geometric roles to field-slot indices.
///
/// Position and normal hold up to 4 consecutive slots each; texture
/// coordinates accumulate one slot list per declared UV set. The asymmetry
/// is deliberate: a second POSITION or NORMAL declaration is ignored
/// (first-occurrence-wins), while every TEXCOORD declaration appends a new
/// UV set so that multi-UV meshes stay addressable by set index.
#[derive(Debug, Clone, Default)]
pub struct VertexLayout {
    position: [usize; ROLE_CAPACITY],
    position_count: usize,
    position_resolved: bool,
    normal: [usize; ROLE_CAPACITY],
    normal_count: usize,
    normal_resolved: bool,
    uv_sets: Vec<Vec<usize>>,
}

impl VertexLayout {
    /// Builds the layout for one file import.
    ///
    /// In [`LayoutMode::Auto`], recognition walks the descriptor table in
    /// source order. In [`LayoutMode::Manual`] the supplied slot lists are
    /// recorded verbatim and no inference runs, so attribute order in the
    /// file cannot affect the decoded geometry.
    pub fn resolve(descriptors: &[AttributeDescriptor], mode: &LayoutMode) -> Result<Self> {
        let layout = match mode {
            LayoutMode::Auto => Self::resolve_auto(descriptors),
            LayoutMode::Manual(overrides) => Self::from_manual(overrides)?,
        };
        debug!(
            "Vertex layout resolved: position slots {:?}, normal slots {:?}, {} UV set(s)",
            layout.position_slots(),
            layout.normal_slots(),
            layout.uv_sets.len()
        );
        Ok(layout)
    }

    fn resolve_auto(descriptors: &[AttributeDescriptor]) -> Self {
        let mut layout = Self::default();
        for descriptor in descriptors {
            let Some(role) = Role::from_semantic(&descriptor.semantic) else {
                trace!("Skipping unrecognized semantic '{}'", descriptor.semantic);
                continue;
            };
            layout.claim(role, descriptor.slot_offset, descriptor.slot_count);
        }
        layout
    }

    /// Claims slots for one attribute occurrence in automatic mode.
    ///
    /// Re-running recognition over the same table is a no-op for position
    /// and normal once they are resolved.
    fn claim(&mut self, role: Role, base_slot: usize, count: usize) {
        match role {
            Role::Position => {
                if self.position_resolved {
                    trace!("Ignoring extra POSITION at slot {}", base_slot);
                    return;
                }
                self.position_count = count.min(ROLE_CAPACITY);
                for (i, slot) in self.position[..self.position_count].iter_mut().enumerate() {
                    *slot = base_slot + i;
                }
                self.position_resolved = true;
            }
            Role::Normal => {
                if self.normal_resolved {
                    trace!("Ignoring extra NORMAL at slot {}", base_slot);
                    return;
                }
                self.normal_count = count.min(ROLE_CAPACITY);
                for (i, slot) in self.normal[..self.normal_count].iter_mut().enumerate() {
                    *slot = base_slot + i;
                }
                self.normal_resolved = true;
            }
            Role::Texcoord => {
                self.uv_sets.push((base_slot..base_slot + count).collect());
            }
        }
    }

    fn from_manual(overrides: &ManualLayout) -> Result<Self> {
        let check = |role: &str, slots: &[usize]| -> Result<()> {
            if slots.len() > ROLE_CAPACITY {
                return Err(RipError::MalformedAttribute(format!(
                    "manual {} override lists {} slots, at most {} allowed",
                    role,
                    slots.len(),
                    ROLE_CAPACITY
                )));
            }
            Ok(())
        };
        check("position", &overrides.position)?;
        check("normal", &overrides.normal)?;

        let mut layout = Self {
            position_count: overrides.position.len(),
            position_resolved: !overrides.position.is_empty(),
            normal_count: overrides.normal.len(),
            normal_resolved: !overrides.normal.is_empty(),
            ..Self::default()
        };
        layout.position[..overrides.position.len()].copy_from_slice(&overrides.position);
        layout.normal[..overrides.normal.len()].copy_from_slice(&overrides.normal);
        if !overrides.texcoord.is_empty() {
            layout.uv_sets.push(overrides.texcoord.clone());
        }
        Ok(layout)
    }

    /// Slots feeding the position role, in component order.
    pub fn position_slots(&self) -> &[usize] {
        &self.position[..self.position_count]
    }

    /// Slots feeding the normal role, in component order.
    pub fn normal_slots(&self) -> &[usize] {
        &self.normal[..self.normal_count]
    }

    /// Slot list of one resolved UV set.
    pub fn uv_set(&self, index: usize) -> Option<&[usize]> {
        self.uv_sets.get(index).map(Vec::as_slice)
    }

    /// Number of accumulated UV sets.
    pub fn uv_set_count(&self) -> usize {
        self.uv_sets.len()
    }

    /// Component count of the first UV set, 0 when none resolved.
    ///
    /// This is the witness for the "renderable 3-D object" policy check.
    pub fn primary_uv_components(&self) -> usize {
        self.uv_sets.first().map_or(0, Vec::len)
    }
}
