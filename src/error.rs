use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A layer was requested with zero units.
    InvalidTopology(String),
    /// A training hyperparameter is outside its usable range.
    InvalidHyperparameter(String),
    /// A tensor or sample disagrees with the shape the topology requires.
    DimensionMismatch {
        what: String,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NetworkError::InvalidTopology(msg) => write!(f, "Invalid topology: {}", msg),
            NetworkError::InvalidHyperparameter(msg) => write!(f, "Invalid hyperparameter: {}", msg),
            NetworkError::DimensionMismatch { what, expected, got } => {
                write!(f, "Dimension mismatch in {}: expected {}, got {}", what, expected, got)
            }
        }
    }
}

impl Error for NetworkError {}

pub type Result<T> = std::result::Result<T, NetworkError>;

impl NetworkError {
    pub(crate) fn mismatch(what: impl Into<String>, expected: usize, got: usize) -> NetworkError {
        NetworkError::DimensionMismatch { what: what.into(), expected, got }
    }
}
