use crate::dataset::Records;
use crate::traits::Fit;

/// A set of hyperparameters whose values have not been checked for validity.
/// A reference to the checked hyperparameters can only be obtained after
/// checking has completed. If the `Fit` trait has been implemented on the
/// checked hyperparameters, it is also implemented on the unchecked
/// hyperparameters with the checking step done automatically.
///
/// The hyperparameter validation done in `check_ref()` and `check()` must be
/// identical.
pub trait ParamGuard {
    /// The checked hyperparameters
    type Checked;
    /// Error type resulting from failed hyperparameter checking
    type Error: std::error::Error;

    /// Checks the hyperparameters and returns a reference to the checked
    /// hyperparameters if successful
    fn check_ref(&self) -> Result<&Self::Checked, Self::Error>;

    /// Checks the hyperparameters and returns the checked hyperparameters if
    /// successful
    fn check(self) -> Result<Self::Checked, Self::Error>;

    /// Calls `check()` and unwraps the result
    fn check_unwrap(self) -> Self::Checked
    where
        Self: Sized,
    {
        self.check().unwrap()
    }
}

/// Performs the checking step and calls `fit` on the checked hyperparameters.
/// If checking failed, the checking error is converted to the original error
/// type of `Fit` and returned.
impl<R: Records, T, E, P: ParamGuard> Fit<R, T, E> for P
where
    P::Checked: Fit<R, T, E>,
    E: std::error::Error + From<P::Error>,
{
    type Object = <P::Checked as Fit<R, T, E>>::Object;

    fn fit(&self, dataset: &crate::DatasetBase<R, T>) -> Result<Self::Object, E> {
        let checked = self.check_ref()?;
        checked.fit(dataset)
    }
}
