use rand::Rng;

use crate::math::vector;

/// Row-major dense matrix. Row `j` holds the incoming weights of unit `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Fills a `rows × cols` matrix with values drawn uniformly from `[-1, 1)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = rng.gen::<f64>() * 2.0 - 1.0;
            }
        }

        res
    }

    /// Builds a matrix from explicit rows. All rows must share one length.
    ///
    /// An empty `data` yields a `0 × 0` matrix.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        let cols = data.first().map_or(0, Vec::len);
        assert!(
            data.iter().all(|row| row.len() == cols),
            "Matrix rows have differing lengths"
        );
        Matrix {
            rows: data.len(),
            cols,
            data,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, j: usize) -> &[f64] {
        &self.data[j]
    }

    /// Matrix-vector product `self · v`.
    pub fn mul_vec(&self, v: &[f64]) -> Vec<f64> {
        assert_eq!(
            self.cols,
            v.len(),
            "mul_vec: matrix has {} columns but vector has length {}",
            self.cols,
            v.len()
        );
        self.data.iter().map(|row| vector::dot(row, v)).collect()
    }

    /// `self += a ⊗ b`, i.e. `self[i][j] += a[i] * b[j]`.
    pub fn add_outer(&mut self, a: &[f64], b: &[f64]) {
        assert!(
            a.len() == self.rows && b.len() == self.cols,
            "add_outer: {}×{} outer product into {}×{} matrix",
            a.len(),
            b.len(),
            self.rows,
            self.cols
        );
        for (row, &ai) in self.data.iter_mut().zip(a) {
            for (cell, &bj) in row.iter_mut().zip(b) {
                *cell += ai * bj;
            }
        }
    }

    /// `self -= factor * other`.
    pub fn sub_scaled(&mut self, other: &Matrix, factor: f64) {
        assert_eq!(self.shape(), other.shape(), "Matrices are of incorrect sizes");
        for (row, other_row) in self.data.iter_mut().zip(&other.data) {
            for (cell, &g) in row.iter_mut().zip(other_row) {
                *cell -= factor * g;
            }
        }
    }

    pub fn fill(&mut self, value: f64) {
        for row in &mut self.data {
            row.iter_mut().for_each(|x| *x = value);
        }
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
