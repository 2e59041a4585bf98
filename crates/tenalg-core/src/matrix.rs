//! Dense matrix and vector proxies
//!
//! The collaboration boundary with the numerical-algorithms layer: the
//! tensor engine consumes row/column extraction and a plain dense multiply
//! from here, and lifts these types into rank-2 tensors. Matrices are
//! stored column-major, matching the first-order tensor layout.

use crate::error::{Result, TensorError};

/// Dense column vector
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vector<T> {
    data: Vec<T>,
}

impl<T> Vector<T> {
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn get(&self, i: usize) -> Result<&T> {
        self.data
            .get(i)
            .ok_or_else(|| TensorError::out_of_bounds("vector", i, self.data.len()))
    }
}

impl<T: Clone> Vector<T> {
    pub fn from_elem(len: usize, value: T) -> Self {
        Self {
            data: vec![value; len],
        }
    }
}

impl<T> std::ops::Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> std::ops::IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

/// Dense column-major matrix
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Constructs from column-major data; `data.len()` must be `rows*cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(TensorError::invalid_shape(
                vec![rows, cols],
                format!(
                    "matrix of {}x{} requires {} elements, but {} were provided",
                    rows,
                    cols,
                    rows * cols,
                    data.len()
                ),
            ));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Elements in column-major order
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize) -> Result<&T> {
        if i >= self.rows {
            return Err(TensorError::out_of_bounds("matrix row", i, self.rows));
        }
        if j >= self.cols {
            return Err(TensorError::out_of_bounds("matrix column", j, self.cols));
        }
        Ok(&self.data[i + j * self.rows])
    }
}

impl<T: Clone> Matrix<T> {
    pub fn from_elem(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Extracts row `i` as a vector
    pub fn row(&self, i: usize) -> Result<Vector<T>> {
        if i >= self.rows {
            return Err(TensorError::out_of_bounds("matrix row", i, self.rows));
        }
        let data = (0..self.cols)
            .map(|j| self.data[i + j * self.rows].clone())
            .collect();
        Ok(Vector::from_vec(data))
    }

    /// Extracts column `j` as a vector
    pub fn col(&self, j: usize) -> Result<Vector<T>> {
        if j >= self.cols {
            return Err(TensorError::out_of_bounds("matrix column", j, self.cols));
        }
        let data = self.data[j * self.rows..(j + 1) * self.rows].to_vec();
        Ok(Vector::from_vec(data))
    }
}

impl<T> Matrix<T>
where
    T: Clone + num_traits::Zero + std::ops::Mul<Output = T> + std::ops::Add<Output = T>,
{
    /// Plain dense multiply, the BLAS-style building block consumed by the
    /// numerical-algorithms layer
    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.cols != other.rows {
            return Err(TensorError::shape_mismatch(
                "matmul",
                vec![self.rows, self.cols],
                vec![other.rows, other.cols],
            ));
        }
        let mut out = Matrix::from_elem(self.rows, other.cols, T::zero());
        for j in 0..other.cols {
            for k in 0..self.cols {
                let b = other.data[k + j * other.rows].clone();
                for i in 0..self.rows {
                    let slot = i + j * self.rows;
                    out.data[slot] = out.data[slot].clone()
                        + self.data[i + k * self.rows].clone() * b.clone();
                }
            }
        }
        Ok(out)
    }
}

impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.data[i + j * self.rows]
    }
}

impl<T> std::ops::IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.data[i + j * self.rows]
    }
}
