use ndarray::{ArrayBase, Data, Ix2};

use super::Records;

/// Implement records for 2-D arrays
impl<F, S: Data<Elem = F>> Records for ArrayBase<S, Ix2> {
    type Elem = F;

    fn nsamples(&self) -> usize {
        self.nrows()
    }

    fn nfeatures(&self) -> usize {
        self.ncols()
    }
}
