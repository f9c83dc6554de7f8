use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("the destination canvas is not hardware-accelerated, box shadow skipped")]
    NotHardwareAccelerated,
    #[error("could not record the shadow layer ({width}x{height})")]
    LayerRecording { width: f64, height: f64 },
    #[error("invalid box-shadow value at line {line}, column {column}")]
    Syntax { line: u32, column: u32 },
    #[error("inset box shadows cannot be drawn by an outset shadow")]
    InsetShadow,
}
