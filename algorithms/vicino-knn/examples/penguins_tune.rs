use rand::rngs::SmallRng;
use rand::SeedableRng;

use vicino::prelude::*;
use vicino_knn::{Knn, KnnGridSearch, RepeatedKFold, Result};

fn main() -> Result<()> {
    let data = vicino_datasets::penguins()
        .drop_missing_any()
        .select_features(&["bill_length_mm", "flipper_length_mm", "body_mass_g"])?;

    // Score every candidate neighbour count under the same repeated,
    // stratified 10-fold resampling
    let grid = KnnGridSearch::new()
        .candidates(1..=12)
        .resampling(RepeatedKFold::new(10).repeats(5).stratified(true))
        .check()?;

    let mut rng = SmallRng::seed_from_u64(42);
    let result = grid.evaluate(&data, &mut rng)?;

    println!("{}", result);
    println!(
        "selected k = {} with error {:.4}",
        result.best_k(),
        result.best_error()
    );

    // Retrain on the whole dataset with the winning neighbour count
    let model = Knn::params().k(result.best_k()).fit(&data)?;
    println!(
        "final model consults {} of {} samples per query",
        model.k(),
        model.nsamples()
    );

    Ok(())
}
