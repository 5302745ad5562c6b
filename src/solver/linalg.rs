//! Dense complex linear algebra: LU factorization with partial pivoting.

use num_complex::Complex64;

use crate::error::{AcMeshError, Result};

/// Square complex system Ax = z.
#[derive(Debug, Clone)]
pub struct ComplexMatrix {
    /// System matrix A (row-major)
    pub a: Vec<Complex64>,
    /// Source vector z
    pub z: Vec<Complex64>,
    /// Matrix dimension
    pub size: usize,
    /// LU decomposition of A
    lu: Vec<Complex64>,
    /// Row permutation from pivoting
    pivots: Vec<usize>,
    /// Number of row swaps performed (for the determinant sign)
    swaps: usize,
    factored: bool,
}

impl ComplexMatrix {
    /// Create a zeroed `size × size` system.
    pub fn new(size: usize) -> Self {
        let zero = Complex64::new(0.0, 0.0);
        Self {
            a: vec![zero; size * size],
            z: vec![zero; size],
            size,
            lu: vec![zero; size * size],
            pivots: (0..size).collect(),
            swaps: 0,
            factored: false,
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.a[row * self.size + col]
    }

    /// Set matrix element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.a[row * self.size + col] = value;
        self.factored = false;
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: Complex64) {
        self.a[row * self.size + col] += value;
        self.factored = false;
    }

    /// Add to source vector element.
    pub fn add_source(&mut self, row: usize, value: Complex64) {
        self.z[row] += value;
    }

    /// Largest element magnitude of each row of A.
    fn row_scales(&self) -> Vec<f64> {
        if self.size == 0 {
            return Vec::new();
        }
        self.a
            .chunks(self.size)
            .map(|row| row.iter().map(|v| v.norm()).fold(0.0, f64::max))
            .collect()
    }

    /// Perform LU decomposition with partial pivoting on magnitude.
    ///
    /// A pivot whose magnitude falls below `tolerance × max_j |a_ij|` of its
    /// own original row marks the matrix singular.
    pub fn factor(&mut self, tolerance: f64) -> Result<()> {
        let n = self.size;
        self.lu.copy_from_slice(&self.a);
        for (i, p) in self.pivots.iter_mut().enumerate() {
            *p = i;
        }
        self.swaps = 0;
        self.factored = false;

        let mut scales = self.row_scales();

        for k in 0..n {
            // Find pivot
            let mut max_val = self.lu[k * n + k].norm();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = self.lu[i * n + k].norm();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            let threshold = tolerance * scales[max_row];
            if max_val <= threshold || max_val == 0.0 {
                tracing::debug!(column = k, pivot = max_val, threshold, "singular pivot");
                return Err(AcMeshError::SingularSystem);
            }

            // Swap rows if needed
            if max_row != k {
                self.pivots.swap(k, max_row);
                scales.swap(k, max_row);
                for j in 0..n {
                    self.lu.swap(k * n + j, max_row * n + j);
                }
                self.swaps += 1;
            }

            // Eliminate
            let pivot = self.lu[k * n + k];
            for i in (k + 1)..n {
                let factor = self.lu[i * n + k] / pivot;
                self.lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    let ukj = self.lu[k * n + j];
                    self.lu[i * n + j] -= factor * ukj;
                }
            }
        }

        self.factored = true;
        Ok(())
    }

    /// Determinant of A from the current factorization.
    pub fn determinant(&self) -> Option<Complex64> {
        if !self.factored {
            return None;
        }
        let n = self.size;
        let mut det = Complex64::new(1.0, 0.0);
        for i in 0..n {
            det *= self.lu[i * n + i];
        }
        if self.swaps % 2 == 1 {
            det = -det;
        }
        Some(det)
    }

    /// Solve the system using the pre-computed LU decomposition.
    pub fn solve(&self) -> Result<Vec<Complex64>> {
        if !self.factored {
            return Err(AcMeshError::SingularSystem);
        }
        let n = self.size;

        // Apply pivot permutation to z
        let mut x: Vec<Complex64> = self.pivots.iter().map(|&p| self.z[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                let xj = x[j];
                x[i] -= self.lu[i * n + j] * xj;
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let xj = x[j];
                x[i] -= self.lu[i * n + j] * xj;
            }
            x[i] /= self.lu[i * n + i];
        }

        if x.iter().any(|v| !v.re.is_finite() || !v.im.is_finite()) {
            return Err(AcMeshError::SingularSystem);
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn system(rows: &[&[Complex64]], rhs: &[Complex64]) -> ComplexMatrix {
        let mut m = ComplexMatrix::new(rhs.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &v) in row.iter().enumerate() {
                m.set(i, j, v);
            }
            m.add_source(i, rhs[i]);
        }
        m
    }

    #[test]
    fn test_solve_complex_2x2() {
        // [[1+j, 1], [1, -j]] x = [2+j, 1-j]  =>  x = [1, 1]
        let mut m = system(
            &[&[c(1.0, 1.0), c(1.0, 0.0)], &[c(1.0, 0.0), c(0.0, -1.0)]],
            &[c(2.0, 1.0), c(1.0, -1.0)],
        );
        m.factor(1e-12).unwrap();
        let x = m.solve().unwrap();
        assert_abs_diff_eq!(x[0].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[0].im, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_needs_pivoting() {
        // [[0, 1+j], [1, 2]] x = [1+j, 3]  =>  x = [1, 1]
        let mut m = system(
            &[&[c(0.0, 0.0), c(1.0, 1.0)], &[c(1.0, 0.0), c(2.0, 0.0)]],
            &[c(1.0, 1.0), c(3.0, 0.0)],
        );
        m.factor(1e-12).unwrap();
        let x = m.solve().unwrap();
        assert_abs_diff_eq!(x[0].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1].re, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1].im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_determinant_with_swap() {
        let mut m = system(
            &[&[c(0.0, 0.0), c(2.0, 0.0)], &[c(3.0, 0.0), c(1.0, 0.0)]],
            &[c(0.0, 0.0), c(0.0, 0.0)],
        );
        assert!(m.determinant().is_none());
        m.factor(1e-12).unwrap();
        let det = m.determinant().unwrap();
        assert_abs_diff_eq!(det.re, -6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(det.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_scaled_row() {
        // Row 2 is (1+j) times row 1
        let mut m = system(
            &[&[c(2.0, 1.0), c(1.0, -3.0)], &[c(1.0, 3.0), c(4.0, -2.0)]],
            &[c(1.0, 0.0), c(1.0, 0.0)],
        );
        assert!(matches!(m.factor(1e-12), Err(AcMeshError::SingularSystem)));
        assert!(m.solve().is_err());
    }

    #[test]
    fn test_widely_scaled_rows_are_regular() {
        // Entries span 13 decades; each row is well conditioned on its own
        let mut m = system(
            &[&[c(1e-4, 0.0), c(0.0, 0.0)], &[c(0.0, 0.0), c(1e9, 0.0)]],
            &[c(1.0, 0.0), c(1.0, 0.0)],
        );
        m.factor(1e-12).unwrap();
        assert_eq!(m.get(1, 1), c(1e9, 0.0));
        let x = m.solve().unwrap();
        assert_relative_eq!(x[0].re, 1e4, max_relative = 1e-12);
        assert_relative_eq!(x[1].re, 1e-9, max_relative = 1e-12);
        assert_relative_eq!(m.determinant().unwrap().re, 1e5, max_relative = 1e-12);
    }

    #[test]
    fn test_singular_small_rows() {
        // Dependent rows stay singular even when their magnitude is tiny
        // next to an unrelated row
        let mut m = system(
            &[
                &[c(1e-6, 0.0), c(2e-6, 0.0), c(0.0, 0.0)],
                &[c(2e-6, 0.0), c(4e-6, 0.0), c(0.0, 0.0)],
                &[c(0.0, 0.0), c(0.0, 0.0), c(1e9, 0.0)],
            ],
            &[c(1.0, 0.0), c(1.0, 0.0), c(1.0, 0.0)],
        );
        assert!(matches!(m.factor(1e-12), Err(AcMeshError::SingularSystem)));
    }

    #[test]
    fn test_zero_matrix_is_singular() {
        let mut m = ComplexMatrix::new(2);
        assert!(matches!(m.factor(1e-12), Err(AcMeshError::SingularSystem)));
    }

    #[test]
    fn test_empty_system() {
        let mut m = ComplexMatrix::new(0);
        m.factor(1e-12).unwrap();
        assert!(m.solve().unwrap().is_empty());
    }
}
