//! Errors raised while synthesizing a chunk.

/// Why a chunk build could not produce geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    /// Chunk size or resolution cannot form a grid.
    #[error("invalid chunk spec: {0}")]
    InvalidSpec(String),

    /// The height field returned NaN or infinity.
    #[error("non-finite height at world ({x}, {z})")]
    NonFiniteHeight { x: f64, z: f64 },

    /// `finish` was called before every row was built, or after a failure.
    #[error("chunk build incomplete: {rows_done}/{rows_total} rows")]
    Incomplete { rows_done: u32, rows_total: u32 },
}
