use ndarray::array;

use vicino::prelude::*;
use vicino_knn::{Knn, Result};

fn main() -> Result<()> {
    let species = vicino_datasets::penguins_species();

    // Keep the fully measured birds and the three predictive measurements
    let train = vicino_datasets::penguins()
        .drop_missing_any()
        .select_features(&["bill_length_mm", "flipper_length_mm", "body_mass_g"])?;

    let model = Knn::params().k(2).fit(&train)?;

    // Five birds measured in the field, one row per observation
    let fresh = array![
        [39.2, 188.0, 3650.0],
        [46.0, 195.0, 3600.0],
        [47.5, 218.0, 5250.0],
        [41.3, 192.0, 3800.0],
        [50.1, 210.0, 4900.0],
    ];

    let pred = model.predict(&fresh);
    for (bird, label) in fresh.rows().into_iter().zip(pred.iter()) {
        println!(
            "bill {:>5} mm, flipper {:>5} mm, mass {:>6} g -> {}",
            bird[0], bird[1], bird[2], species[*label]
        );
    }

    Ok(())
}
