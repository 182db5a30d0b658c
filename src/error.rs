use thiserror::Error;

// Unified error type for lineval

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LError {
    #[error("shape mismatch: destination is {dst_rows}x{dst_cols}, source is {src_rows}x{src_cols}")]
    ShapeMismatch {
        dst_rows: usize,
        dst_cols: usize,
        src_rows: usize,
        src_cols: usize,
    },
    #[error("operator must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
