//! Decoding of the IDX binary streams used by MNIST.
//!
//! # Image stream
//! ```text
//! bytes  0-3:   magic 0x00000803 (big-endian u32)
//! bytes  4-7:   N      number of images
//! bytes  8-11:  rows
//! bytes 12-15:  cols
//! bytes 16..:   N * rows * cols bytes, image-major, row-major
//! ```
//!
//! # Label stream
//! ```text
//! bytes  0-3:   magic 0x00000801 (big-endian u32)
//! bytes  4-7:   N      number of labels
//! bytes  8..:   N bytes, one class index each
//! ```

use tracing::debug;

use super::DatasetError;

pub const IMAGE_MAGIC: u32 = 0x0000_0803;
pub const LABEL_MAGIC: u32 = 0x0000_0801;

const IMAGE_HEADER_LEN: usize = 16;
const LABEL_HEADER_LEN: usize = 8;

/// Decoded image stream. Pixels keep their raw `[0, 255]` byte values.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSet {
    pub count: usize,
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<u8>,
}

impl ImageSet {
    pub fn pixels_per_image(&self) -> usize {
        self.rows * self.cols
    }

    /// Raw bytes of image `index`. Caller checks the bound.
    pub fn image(&self, index: usize) -> &[u8] {
        let n = self.pixels_per_image();
        &self.pixels[index * n..(index + 1) * n]
    }
}

fn be_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

fn require_len(stream: &'static str, bytes: &[u8], expected: usize) -> Result<(), DatasetError> {
    if bytes.len() < expected {
        return Err(DatasetError::Truncated { stream, expected, got: bytes.len() });
    }
    Ok(())
}

fn check_magic(stream: &'static str, bytes: &[u8], expected: u32) -> Result<(), DatasetError> {
    let got = be_u32(bytes, 0);
    if got != expected {
        return Err(DatasetError::BadMagic { stream, expected, got });
    }
    Ok(())
}

pub fn parse_images(bytes: &[u8]) -> Result<ImageSet, DatasetError> {
    require_len("image", bytes, IMAGE_HEADER_LEN)?;
    check_magic("image", bytes, IMAGE_MAGIC)?;

    let count = be_u32(bytes, 4) as usize;
    let rows = be_u32(bytes, 8) as usize;
    let cols = be_u32(bytes, 12) as usize;

    let body = count
        .checked_mul(rows)
        .and_then(|n| n.checked_mul(cols))
        .and_then(|n| n.checked_add(IMAGE_HEADER_LEN))
        .unwrap_or(usize::MAX);
    require_len("image", bytes, body)?;

    debug!(count, rows, cols, "decoded image stream header");

    Ok(ImageSet {
        count,
        rows,
        cols,
        pixels: bytes[IMAGE_HEADER_LEN..body].to_vec(),
    })
}

pub fn parse_labels(bytes: &[u8]) -> Result<Vec<u8>, DatasetError> {
    require_len("label", bytes, LABEL_HEADER_LEN)?;
    check_magic("label", bytes, LABEL_MAGIC)?;

    let count = be_u32(bytes, 4) as usize;
    let body = count.saturating_add(LABEL_HEADER_LEN);
    require_len("label", bytes, body)?;

    debug!(count, "decoded label stream header");

    Ok(bytes[LABEL_HEADER_LEN..body].to_vec())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn image_stream(count: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        for word in [IMAGE_MAGIC, count, rows, cols] {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        bytes.extend_from_slice(pixels);
        bytes
    }

    pub(crate) fn label_stream(labels: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&LABEL_MAGIC.to_be_bytes());
        bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
        bytes.extend_from_slice(labels);
        bytes
    }

    #[test]
    fn decodes_single_two_by_two_image() {
        let set = parse_images(&image_stream(1, 2, 2, &[10, 20, 30, 40])).unwrap();
        assert_eq!((set.count, set.rows, set.cols), (1, 2, 2));
        assert_eq!(set.image(0), &[10, 20, 30, 40]);
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut bytes = image_stream(1, 1, 1, &[0]);
        bytes[3] = 0x01;
        match parse_images(&bytes) {
            Err(DatasetError::BadMagic { expected, got, .. }) => {
                assert_eq!(expected, IMAGE_MAGIC);
                assert_eq!(got, LABEL_MAGIC);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_truncated_body() {
        let bytes = image_stream(2, 2, 2, &[1, 2, 3, 4, 5]);
        assert!(matches!(
            parse_images(&bytes),
            Err(DatasetError::Truncated { expected: 24, got: 21, .. })
        ));
        assert!(matches!(parse_labels(&[0, 0, 8]), Err(DatasetError::Truncated { .. })));
    }

    #[test]
    fn decodes_labels() {
        assert_eq!(parse_labels(&label_stream(&[3, 1, 4])).unwrap(), vec![3, 1, 4]);
    }
}
