//! Observation for [`GriddlyEnv`](crate::GriddlyEnv).
use gridcheck_core::Obs;
use ndarray::ArrayD;

/// Observation represented by an [`ndarray::ArrayD`].
#[derive(Clone, Debug, PartialEq)]
pub struct GriddlyObs(pub ArrayD<u8>);

impl Obs for GriddlyObs {}

impl From<ArrayD<u8>> for GriddlyObs {
    fn from(obs: ArrayD<u8>) -> Self {
        Self(obs)
    }
}
