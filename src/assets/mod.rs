//! Asset loading
//!
//! Both asset files are sequences of [`chunk`]s: the mesh library
//! (`dat0`, `str0`, `idx0`) and the scene description (`str0`, `scn0`).

pub mod chunk;
mod mesh_library;
mod scene_blob;

pub use mesh_library::*;
pub use scene_blob::*;

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("expected chunk '{expected}', found '{found}'")]
    ChunkMagic { expected: String, found: String },

    #[error("chunk '{magic}' is {size} bytes, not a multiple of the {record}-byte record size")]
    RaggedChunk {
        magic: String,
        size: usize,
        record: usize,
    },

    #[error("chunk '{magic}' is too large to write ({size} bytes)")]
    ChunkTooLarge { magic: String, size: usize },

    #[error("file ends inside chunk '{0}'")]
    Truncated(String),

    #[error("record {index}: name range {begin}..{end} exceeds string table of {len} bytes")]
    NameOutOfRange {
        index: usize,
        begin: u32,
        end: u32,
        len: usize,
    },

    #[error("mesh '{name}': vertex range {begin}..{end} exceeds {len} vertices")]
    VertexRangeOutOfRange {
        name: String,
        begin: u32,
        end: u32,
        len: usize,
    },

    #[error("mesh '{0}' not found")]
    MeshNotFound(String),

    #[error("mesh '{0}' defined twice")]
    DuplicateMesh(String),
}

pub type AssetResult<T> = Result<T, AssetError>;
