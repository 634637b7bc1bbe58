//! The inference side handed to an interactive drawing front end.

pub mod image;
pub mod predictor;

use std::error::Error;
use std::fmt;

pub use self::image::{bitmap_to_pixels, image_bytes_to_pixels};
pub use predictor::{predict, Prediction};

#[derive(Debug)]
pub enum PredictError {
    /// The image bytes could not be decoded.
    Decode(String),
    /// A raw bitmap's buffer does not match its stated width and height.
    InvalidBitmap { width: u32, height: u32, len: usize },
    /// Every output score is NaN, e.g. after training diverged.
    NoScore,
    /// The pixel vector does not fit the network's input layer.
    DimensionMismatch { expected: usize, got: usize },
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictError::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            PredictError::InvalidBitmap { width, height, len } => write!(
                f,
                "Bitmap buffer of {} bytes does not match {}×{}",
                len, width, height
            ),
            PredictError::NoScore => write!(f, "Network produced no comparable output score"),
            PredictError::DimensionMismatch { expected, got } => write!(
                f,
                "Pixel vector has {} values but the network expects {}",
                got, expected
            ),
        }
    }
}

impl Error for PredictError {}
