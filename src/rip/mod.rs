//! Core RIP reader module

pub mod assemble;
pub mod cursor;
pub mod format;
pub mod layout;
pub mod reader;
pub mod types;

pub use reader::{import_batch, BatchOutcome, MeshConstructor, RipFile};
pub use types::error::{Result, RipError};
