//! Observation for [`GridEnv`](crate::GridEnv).
use gridcheck_core::Obs;
use ndarray::ArrayD;

/// One-hot encoding of the grid, shaped `[n_kinds, width, height]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridObs(pub ArrayD<u8>);

impl Obs for GridObs {}

impl From<ArrayD<u8>> for GridObs {
    fn from(obs: ArrayD<u8>) -> Self {
        Self(obs)
    }
}
