//! File format parsing layer for RIP captured-geometry files.
//!
//! This module provides the mid-level parsing layer that bridges between
//! the raw [`ByteCursor`](crate::rip::cursor::ByteCursor) and the high-level
//! [`RipFile`](crate::rip::reader::RipFile).
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌──────────────────────┐
//! │  Fixed Header        │ ← header::parse()
//! ├──────────────────────┤
//! │  Attribute Table     │ ← attributes::parse()
//! │  (declares layout)   │
//! ├──────────────────────┤
//! │  Texture Filenames   │ ← strings::parse()
//! │  Shader Filenames    │
//! ├──────────────────────┤
//! │  Face Index Triples  │ ← faces::parse()
//! ├──────────────────────┤
//! │  Vertex Records      │ ← vertices::decode_record()
//! │  (interleaved)       │
//! └──────────────────────┘
//! ```

pub mod attributes;
pub mod faces;
pub mod header;
pub mod strings;
pub mod vertices;
