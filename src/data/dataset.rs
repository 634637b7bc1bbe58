use std::fs;
use std::path::Path;

use tracing::info;

use super::idx::{self, ImageSet};
use super::sample::Sample;
use super::DatasetError;

/// An immutable, index-addressable set of `(pixels, label)` pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    images: ImageSet,
    labels: Vec<u8>,
}

impl Dataset {
    /// Decodes a complete image stream and label stream.
    ///
    /// Both streams must be fully present; nothing is returned for partial
    /// data.
    pub fn from_idx_bytes(image_bytes: &[u8], label_bytes: &[u8]) -> Result<Dataset, DatasetError> {
        let images = idx::parse_images(image_bytes)?;
        let labels = idx::parse_labels(label_bytes)?;

        if images.count != labels.len() {
            return Err(DatasetError::CountMismatch { images: images.count, labels: labels.len() });
        }

        Ok(Dataset { images, labels })
    }

    /// Reads both files to completion, then decodes them.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(image_path: P, label_path: Q) -> Result<Dataset, DatasetError> {
        let image_bytes = fs::read(image_path.as_ref())?;
        let label_bytes = fs::read(label_path.as_ref())?;
        let dataset = Dataset::from_idx_bytes(&image_bytes, &label_bytes)?;

        info!(
            images = %image_path.as_ref().display(),
            count = dataset.count(),
            rows = dataset.rows(),
            cols = dataset.cols(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    pub fn count(&self) -> usize {
        self.labels.len()
    }

    pub fn rows(&self) -> usize {
        self.images.rows
    }

    pub fn cols(&self) -> usize {
        self.images.cols
    }

    /// Pixel vector (raw `[0, 255]` values, length `rows * cols`) and label.
    pub fn get_sample(&self, index: usize) -> Result<(Vec<f64>, u8), DatasetError> {
        if index >= self.count() {
            return Err(DatasetError::IndexOutOfBounds { index, count: self.count() });
        }
        let pixels = self.images.image(index).iter().map(|&p| p as f64).collect();
        Ok((pixels, self.labels[index]))
    }

    /// Converts every entry into a training sample with a one-hot target.
    /// Pixel values are multiplied by `scale`; `1.0` keeps the raw range.
    pub fn to_samples(&self, n_classes: usize, scale: f64) -> Result<Vec<Sample>, DatasetError> {
        (0..self.count())
            .map(|index| {
                let label = self.labels[index];
                if label as usize >= n_classes {
                    return Err(DatasetError::LabelOutOfRange { index, label, n_classes });
                }
                let input = self.images.image(index).iter().map(|&p| p as f64 * scale).collect();
                Ok(Sample::labelled(input, label as usize, n_classes))
            })
            .collect()
    }

    /// Splits off entries `[at, count)` into a new dataset, keeping `[0, at)`.
    ///
    /// # Panics
    /// Panics if `at > count()`.
    pub fn split_off(&mut self, at: usize) -> Dataset {
        assert!(at <= self.count(), "split index {} beyond dataset of {}", at, self.count());
        let n = self.images.pixels_per_image();
        let tail_pixels = self.images.pixels.split_off(at * n);
        let tail_labels = self.labels.split_off(at);
        let tail_count = tail_labels.len();
        self.images.count = at;

        Dataset {
            images: ImageSet { count: tail_count, rows: self.images.rows, cols: self.images.cols, pixels: tail_pixels },
            labels: tail_labels,
        }
    }
}
