use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoundsError {
    #[error("Pixel ({x}, {y}) has value {value}; a binary mask only holds 0 or 255")]
    NonBinaryPixel { x: u32, y: u32, value: u8 },

    #[error("Mask is {actual:?} but the frame is {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

pub type Result<T> = std::result::Result<T, BoundsError>;
