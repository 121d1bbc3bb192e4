use anyhow::{ensure, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Row-major matrix of `f32`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    pub data: Vec<f32>,
    pub shape: Vec<i32>,
}

impl Mat {
    /// A matrix filled with zeros.
    pub fn zeros(m: usize, n: usize) -> Self {
        Self {
            data: vec![0f32; m * n],
            shape: vec![m as _, n as _],
        }
    }

    /// Samples an `m x n` matrix from the standard normal distribution, then scales
    /// each row to the norm `std` (normalized-column initialization of a layer
    /// mapping `n` inputs to `m` outputs).
    pub fn normc<R: Rng>(m: usize, n: usize, std: f32, rng: &mut R) -> Self {
        let mut data: Vec<f32> = (0..m * n).map(|_| standard_normal(rng)).collect();
        if n > 0 {
            for row in data.chunks_mut(n) {
                let norm = row.iter().map(|v| v * v).sum::<f32>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v *= std / norm);
                }
            }
        }
        Self {
            data,
            shape: vec![m as _, n as _],
        }
    }

    /// Rows and columns, checked against the length of the data.
    pub fn dims(&self) -> Result<(usize, usize)> {
        ensure!(
            self.shape.len() == 2 && self.shape.iter().all(|d| *d >= 0),
            "invalid matrix shape {:?}",
            self.shape
        );
        let (m, n) = (self.shape[0] as usize, self.shape[1] as usize);
        ensure!(
            self.data.len() == m * n,
            "matrix of shape {:?} holds {} values",
            self.shape,
            self.data.len()
        );
        Ok((m, n))
    }

    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (
            self.shape[0] as usize,
            self.shape[1] as usize,
            x.shape[1] as usize,
        );
        assert_eq!(
            l, x.shape[0] as usize,
            "Trying to multiply matrices of incompatible sizes: {:?}",
            (&self.shape, &x.shape)
        );
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

    pub fn add(&self, x: &Mat) -> Self {
        if self.shape[0] != x.shape[0] || self.shape[1] != x.shape[1] {
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

    pub fn relu(&self) -> Self {
        let data = self.data.iter().map(|a| a.max(0.)).collect();

        Self {
            data,
            shape: self.shape.clone(),
        }
    }

    /// Softmax over all elements.
    pub fn softmax(&self) -> Self {
        let max = self.data.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let exp: Vec<f32> = self.data.iter().map(|a| (a - max).exp()).collect();
        let sum: f32 = exp.iter().sum();

        Self {
            data: exp.into_iter().map(|a| a / sum).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Index of the largest element, the first one on ties.
    pub fn argmax(&self) -> usize {
        let mut ix = 0;
        for (i, a) in self.data.iter().enumerate() {
            if *a > self.data[ix] {
                ix = i;
            }
        }
        ix
    }
}

impl From<Vec<f32>> for Mat {
    fn from(x: Vec<f32>) -> Self {
        let shape = vec![x.len() as i32, 1];
        Self { shape, data: x }
    }
}

/// Box-Muller transform.
fn standard_normal<R: Rng>(rng: &mut R) -> f32 {
    let u1: f32 = 1.0 - rng.gen::<f32>();
    let u2: f32 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}
