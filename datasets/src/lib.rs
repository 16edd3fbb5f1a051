//! `vicino-datasets` provides a collection of small classification datasets
//! ready to be used in tests and examples.
//!
//! Currently the following datasets are provided:
//!
//! * `["diabetes"]` : clinical measurements of 145 adult patients
//! * `["penguins"]` : field measurements of 344 penguins from the Palmer
//!   archipelago
//!
//! along with methods to easily load them. Loaded datasets are returned as a
//! [`vicino::Dataset`](vicino::Dataset) structure with named features.
//!
//! To use one of the provided datasets in your project add the crate to your
//! Cargo.toml with the corresponding feature enabled:
//! ```ignore
//! vicino-datasets = { version = "0.1", features = ["penguins"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let (train, valid) = vicino_datasets::penguins()
//!     .drop_missing_any()
//!     .split_with_ratio(0.8);
//! // ...
//! ```

use csv::ReaderBuilder;
use flate2::read::GzDecoder;
use ndarray::prelude::*;
use ndarray_csv::Array2Reader;
use vicino::Dataset;

#[cfg(any(feature = "diabetes", feature = "penguins"))]
fn array_from_buf(buf: &[u8]) -> Array2<f64> {
    // unzip file
    let file = GzDecoder::new(buf);
    // create a CSV reader with headers and `,` as delimiter
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .from_reader(file);

    // extract ndarray
    reader.deserialize_array2_dynamic().unwrap()
}

#[cfg(feature = "diabetes")]
/// Read in the diabetes dataset from the dataset path.
///
/// 145 patients described by their plasma glucose area, plasma insulin area
/// and steady-state plasma glucose, classified into chemical diabetic,
/// normal and overt diabetic (see [`diabetes_classes`]).
// The `.csv` data is two dimensional: Axis(0) denotes y-axis (rows), Axis(1) denotes x-axis (columns)
pub fn diabetes() -> Dataset<f64, usize> {
    let data = include_bytes!("../data/diabetes.csv.gz");
    let array = array_from_buf(&data[..]);

    let (data, targets) = (
        array.slice(s![.., 0..3]).to_owned(),
        array.column(3).to_owned(),
    );

    let feature_names = vec!["glucose", "insulin", "sspg"];

    Dataset::new(data, targets)
        .map_targets(|x| *x as usize)
        .with_feature_names(feature_names)
}

#[cfg(feature = "diabetes")]
/// Class names of the diabetes dataset, indexed by target label
pub fn diabetes_classes() -> [&'static str; 3] {
    ["chemical", "normal", "overt"]
}

#[cfg(feature = "penguins")]
/// Read in the penguins dataset from the dataset path.
///
/// 344 penguins described by bill, flipper and body mass measurements,
/// classified by species (see [`penguins_species`]). A handful of birds lack
/// one or all field measurements; those cells are stored as NaN and can be
/// removed with [`drop_missing_any`](vicino::Dataset::drop_missing_any).
pub fn penguins() -> Dataset<f64, usize> {
    let data = include_bytes!("../data/penguins.csv.gz");
    let array = array_from_buf(&data[..]);

    let (data, targets) = (
        array.slice(s![.., 0..4]).to_owned(),
        array.column(4).to_owned(),
    );

    let feature_names = vec![
        "bill_length_mm",
        "bill_depth_mm",
        "flipper_length_mm",
        "body_mass_g",
    ];

    Dataset::new(data, targets)
        .map_targets(|x| *x as usize)
        .with_feature_names(feature_names)
}

#[cfg(feature = "penguins")]
/// Species names of the penguins dataset, indexed by target label
pub fn penguins_species() -> [&'static str; 3] {
    ["Adelie", "Chinstrap", "Gentoo"]
}

#[cfg(test)]
mod tests {
    #[cfg(any(feature = "diabetes", feature = "penguins"))]
    use super::*;
    #[cfg(any(feature = "diabetes", feature = "penguins"))]
    use vicino::prelude::*;

    #[cfg(feature = "diabetes")]
    #[test]
    fn diabetes_loads_complete() {
        let dataset = diabetes();

        assert_eq!(dataset.nsamples(), 145);
        assert_eq!(dataset.nfeatures(), 3);
        assert_eq!(dataset.feature_names(), vec!["glucose", "insulin", "sspg"]);

        let mut labels = dataset.labels();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);

        // no missing measurements in this dataset
        assert_eq!(dataset.drop_missing_any().nsamples(), 145);
    }

    #[cfg(feature = "penguins")]
    #[test]
    fn penguins_loads_with_missing_cells() {
        let dataset = penguins();

        assert_eq!(dataset.nsamples(), 344);
        assert_eq!(dataset.nfeatures(), 4);

        let mut labels = dataset.labels();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);

        // two birds lack all measurements, three lack a single one
        assert_eq!(dataset.drop_missing_any().nsamples(), 339);
        assert_eq!(
            dataset.drop_missing(&["bill_length_mm"]).unwrap().nsamples(),
            341
        );

        // cleaning is idempotent
        let cleaned = dataset.drop_missing_any();
        assert_eq!(cleaned.drop_missing_any().nsamples(), cleaned.nsamples());
    }
}
