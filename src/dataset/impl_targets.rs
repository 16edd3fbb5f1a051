use ndarray::{ArrayBase, ArrayView1, Data, Ix1};

use super::{AsTargets, DatasetBase, Records};

/// Implement targets for 1-D arrays
impl<L, S: Data<Elem = L>> AsTargets for ArrayBase<S, Ix1> {
    type Elem = L;

    fn as_targets(&self) -> ArrayView1<L> {
        self.view()
    }
}

impl<R: Records, T: AsTargets> AsTargets for DatasetBase<R, T> {
    type Elem = T::Elem;

    fn as_targets(&self) -> ArrayView1<T::Elem> {
        self.targets.as_targets()
    }
}
