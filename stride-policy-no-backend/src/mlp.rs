use crate::Mat;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Multilayer perceptron with ReLU hidden activations and a `tanh` output.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mlp {
    /// Weights of layers, `[out, in]`.
    ws: Vec<Mat>,

    /// Biases of layers, `[out, 1]`.
    bs: Vec<Mat>,
}

impl Mlp {
    /// Creates an MLP after checking that the layers fit together.
    pub fn new(ws: Vec<Mat>, bs: Vec<Mat>) -> Result<Self> {
        if ws.is_empty() || ws.len() != bs.len() {
            bail!(
                "An MLP needs as many biases as weights, got {} and {}",
                ws.len(),
                bs.len()
            );
        }
        for (i, (w, b)) in ws.iter().zip(bs.iter()).enumerate() {
            if w.shape.len() != 2 || b.shape.first() != w.shape.first() {
                bail!(
                    "Layer {}: weight {:?} does not match bias {:?}",
                    i,
                    w.shape,
                    b.shape
                );
            }
            let w_len = (w.shape[0] * w.shape[1]) as usize;
            if w.shape.iter().any(|&d| d <= 0) || w.data.len() != w_len {
                bail!("Layer {}: weight data does not match shape {:?}", i, w.shape);
            }
            if b.shape.len() != 2 || b.shape[1] != 1 || b.data.len() != b.shape[0] as usize {
                bail!(
                    "Layer {}: bias must be a column vector of {} elements, got shape {:?} with {} elements",
                    i,
                    w.shape[0],
                    b.shape,
                    b.data.len()
                );
            }
            if i > 0 && w.shape[1] != ws[i - 1].shape[0] {
                bail!(
                    "Layer {}: input size {} differs from the previous output size {}",
                    i,
                    w.shape[1],
                    ws[i - 1].shape[0]
                );
            }
        }
        Ok(Self { ws, bs })
    }

    /// Input dimension.
    pub fn in_dim(&self) -> usize {
        self.ws[0].shape[1] as usize
    }

    /// Output dimension.
    pub fn out_dim(&self) -> usize {
        self.ws[self.ws.len() - 1].shape[0] as usize
    }

    /// Computes the output for a column vector `x`.
    ///
    /// # Panics
    ///
    /// Panics if `x` does not have [`Mlp::in_dim`] rows.
    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        x.tanh()
    }

    /// Loads an MLP serialized with bincode.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
        let mlp: Mlp = bincode::deserialize_from(BufReader::new(file))?;
        Self::new(mlp.ws, mlp.bs)
    }

    /// Serializes the MLP with bincode.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), self)?;
        Ok(())
    }
}
