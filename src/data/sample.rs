use crate::math::vector;

/// A pixel vector paired with its one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }

    /// Builds a sample whose target is the one-hot encoding of `label`.
    pub fn labelled(input: Vec<f64>, label: usize, n_classes: usize) -> Sample {
        Sample { input, target: one_hot(label, n_classes) }
    }

    /// Class index of the target, i.e. the position of its largest entry.
    pub fn label(&self) -> usize {
        vector::argmax(&self.target).unwrap_or(0)
    }
}

/// `n_classes` zeros with a single `1.0` at `label`.
///
/// # Panics
/// Panics if `label >= n_classes`.
pub fn one_hot(label: usize, n_classes: usize) -> Vec<f64> {
    assert!(label < n_classes, "label {} out of range for {} classes", label, n_classes);
    let mut v = vec![0.0; n_classes];
    v[label] = 1.0;
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hot_round_trips_through_label() {
        assert_eq!(one_hot(2, 4), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(Sample::labelled(vec![0.0], 7, 10).label(), 7);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn one_hot_rejects_large_label() {
        one_hot(10, 10);
    }
}
