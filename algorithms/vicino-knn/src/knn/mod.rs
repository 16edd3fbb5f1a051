mod algorithm;
mod hyperparams;
mod tune;

pub use algorithm::Knn;
pub use hyperparams::{KnnParams, KnnValidParams};
pub use tune::{
    cross_validate_error, KnnGridSearch, KnnGridSearchValid, RepeatedKFold, RepeatedKFoldValid,
    TuningResult,
};
