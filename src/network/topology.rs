use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Unit counts of the three layers (input → hidden → output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
}

impl Topology {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Topology {
        Topology { input_size, hidden_size, output_size }
    }

    /// Rejects any layer with zero units.
    pub fn validate(&self) -> Result<()> {
        for (name, size) in [
            ("input", self.input_size),
            ("hidden", self.hidden_size),
            ("output", self.output_size),
        ] {
            if size == 0 {
                return Err(NetworkError::InvalidTopology(format!("{} layer has zero units", name)));
            }
        }
        Ok(())
    }
}

impl Default for Topology {
    /// 28×28 pixels → 30 hidden units → 10 digit classes.
    fn default() -> Self {
        Topology::new(28 * 28, 30, 10)
    }
}
