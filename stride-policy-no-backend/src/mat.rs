use serde::{Deserialize, Serialize};

/// A row-major matrix of `f32`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    /// Elements in row-major order.
    pub data: Vec<f32>,

    /// `[rows, cols]`.
    pub shape: Vec<i32>,
}

impl Mat {
    /// Creates a matrix.
    pub fn new(data: Vec<f32>, shape: Vec<i32>) -> Self {
        Self { data, shape }
    }

    /// Returns the shape.
    pub fn shape(&self) -> &[i32] {
        &self.shape
    }

    fn rows(&self) -> usize {
        self.shape[0] as usize
    }

    fn cols(&self) -> usize {
        self.shape.get(1).copied().unwrap_or(1) as usize
    }

    /// Matrix product `self * x`.
    ///
    /// # Panics
    ///
    /// Panics if the number of columns of `self` differs from the number of
    /// rows of `x`.
    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (self.rows(), self.cols(), x.cols());
        if l != x.rows() {
            panic!(
                "Trying to multiply matrices of incompatible sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }
        let mut data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let kk = i * n + j;
                for k in 0..l {
                    data[kk] += self.data[i * l + k] * x.data[k * n + j];
                }
            }
        }

        Self {
            shape: vec![m as _, n as _],
            data,
        }
    }

    /// Element-wise sum.
    ///
    /// # Panics
    ///
    /// Panics if the shapes differ.
    pub fn add(&self, x: &Mat) -> Self {
        if self.rows() != x.rows() || self.cols() != x.cols() {
            panic!(
                "Trying to add matrices of different sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }

        let data = self
            .data
            .iter()
            .zip(x.data.iter())
            .map(|(a, b)| *a + *b)
            .collect();

        Mat {
            data,
            shape: self.shape.clone(),
        }
    }

    /// Element-wise `max(x, 0)`.
    pub fn relu(&self) -> Self {
        self.map(|a| if a < 0. { 0. } else { a })
    }

    /// Element-wise `tanh`.
    pub fn tanh(&self) -> Self {
        self.map(f32::tanh)
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self {
            data: self.data.iter().map(|a| f(*a)).collect(),
            shape: self.shape.clone(),
        }
    }
}

impl From<Vec<f32>> for Mat {
    /// A column vector.
    fn from(x: Vec<f32>) -> Self {
        let shape = vec![x.len() as i32, 1];
        Self { shape, data: x }
    }
}
