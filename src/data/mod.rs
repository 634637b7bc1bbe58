//! Loading of IDX-encoded digit datasets into training samples.

pub mod dataset;
pub mod idx;
pub mod sample;

use std::error::Error;
use std::fmt;
use std::io;

pub use dataset::Dataset;
pub use sample::{one_hot, Sample};

#[derive(Debug)]
pub enum DatasetError {
    Io(io::Error),
    /// A stream ended before the length its header declares.
    Truncated { stream: &'static str, expected: usize, got: usize },
    BadMagic { stream: &'static str, expected: u32, got: u32 },
    /// Image and label streams declare different item counts.
    CountMismatch { images: usize, labels: usize },
    IndexOutOfBounds { index: usize, count: usize },
    LabelOutOfRange { index: usize, label: u8, n_classes: usize },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "I/O error: {}", err),
            DatasetError::Truncated { stream, expected, got } => write!(
                f,
                "{} stream too short: need {} bytes, got {}",
                stream, expected, got
            ),
            DatasetError::BadMagic { stream, expected, got } => write!(
                f,
                "{} stream has magic {:#010x}, expected {:#010x}",
                stream, got, expected
            ),
            DatasetError::CountMismatch { images, labels } => write!(
                f,
                "image stream has {} items but label stream has {}",
                images, labels
            ),
            DatasetError::IndexOutOfBounds { index, count } => {
                write!(f, "sample index {} out of bounds for dataset of {}", index, count)
            }
            DatasetError::LabelOutOfRange { index, label, n_classes } => write!(
                f,
                "label {} at index {} is out of range for {} classes",
                label, index, n_classes
            ),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(err: io::Error) -> DatasetError {
        DatasetError::Io(err)
    }
}
