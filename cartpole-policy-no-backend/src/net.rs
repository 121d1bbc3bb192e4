use crate::Mat;
use anyhow::{ensure, Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Multilayer perceptron with ReLU activation function, computing action logits.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PolicyNet {
    /// Weights of layers.
    ws: Vec<Mat>,

    /// Biases of layers.
    bs: Vec<Mat>,
}

impl PolicyNet {
    /// Creates a network with randomly initialized weights and zero biases.
    ///
    /// Hidden layers are initialized with [`Mat::normc`] at std 1.0, the output layer
    /// at std 0.01, so that the initial policy is close to uniform.
    pub fn new<R: Rng>(in_dim: usize, hidden_units: &[usize], out_dim: usize, rng: &mut R) -> Self {
        let mut dims = vec![in_dim];
        dims.extend_from_slice(hidden_units);
        dims.push(out_dim);

        let n_layers = dims.len() - 1;
        let (ws, bs): (Vec<Mat>, Vec<Mat>) = dims
            .windows(2)
            .enumerate()
            .map(|(i, d)| {
                let std = if i == n_layers - 1 { 0.01 } else { 1.0 };
                (Mat::normc(d[1], d[0], std, rng), Mat::zeros(d[1], 1))
            })
            .unzip();

        Self { ws, bs }
    }

    /// Checks that the layers chain and that every matrix holds as many values as
    /// its shape says.
    pub fn check(&self) -> Result<()> {
        ensure!(
            !self.ws.is_empty() && self.ws.len() == self.bs.len(),
            "expected as many biases as weights, got {} weights and {} biases",
            self.ws.len(),
            self.bs.len()
        );

        let mut prev_out: Option<usize> = None;
        for (i, (w, b)) in self.ws.iter().zip(self.bs.iter()).enumerate() {
            let (m, n) = w.dims().with_context(|| format!("weight of layer {}", i))?;
            let b_dims = b.dims().with_context(|| format!("bias of layer {}", i))?;
            ensure!(
                b_dims == (m, 1),
                "bias of layer {} has shape {:?}, expected [{}, 1]",
                i,
                b.shape,
                m
            );
            if let Some(d) = prev_out {
                ensure!(
                    n == d,
                    "layer {} takes {} inputs, but layer {} outputs {}",
                    i,
                    n,
                    i - 1,
                    d
                );
            }
            prev_out = Some(m);
        }
        Ok(())
    }

    /// Input dimension.
    pub fn in_dim(&self) -> usize {
        self.ws.first().map_or(0, |w| w.shape[1] as usize)
    }

    /// Output dimension, the number of actions.
    pub fn out_dim(&self) -> usize {
        self.ws.last().map_or(0, |w| w.shape[0] as usize)
    }

    /// Computes the logits of a column vector.
    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        x
    }

    /// Saves the parameters.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        bincode::serialize_into(file, self)?;
        Ok(())
    }

    /// Loads parameters saved with [`PolicyNet::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = BufReader::new(File::open(path)?);
        let net = bincode::deserialize_from(file)?;
        Ok(net)
    }
}
