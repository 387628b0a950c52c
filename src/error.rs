//! Error types for world loading, rendering and image export.

use std::path::PathBuf;

/// A world grid that cannot be used for casting.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("world has no rows")]
    Empty,

    #[error("world row {row} is empty")]
    EmptyRow { row: usize },

    /// Rows must all be as wide as the first one.
    #[error("world row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("failed to read world file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid render parameters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    /// One cast column is required per image column.
    #[error("renderer expects {expected} columns, got {found}")]
    ColumnCountMismatch { expected: usize, found: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("pixel buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },

    #[error("failed to encode image")]
    Encode(#[from] image::ImageError),
}
