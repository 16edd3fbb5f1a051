use rand::rngs::SmallRng;
use rand::SeedableRng;

use vicino::prelude::*;
use vicino_knn::{Knn, Result};

fn main() -> Result<()> {
    // Read in the dataset, restrict it to the three clinical predictors and
    // hold out a fifth of the patients for validation
    let mut rng = SmallRng::seed_from_u64(42);
    let (train, valid) = vicino_datasets::diabetes()
        .select_features(&["insulin", "glucose", "sspg"])?
        .shuffle(&mut rng)
        .split_with_ratio(0.8);

    // Train the model
    let model = Knn::params().k(2).fit(&train)?;

    // Predict the validation dataset
    let pred = model.predict(&valid);

    // Construct confusion matrix
    let cm = pred.confusion_matrix(&valid)?;

    println!("{:?}", cm);
    println!(
        "accuracy {}, error {}, MCC {}",
        cm.accuracy(),
        cm.error(),
        cm.mcc()
    );

    Ok(())
}
