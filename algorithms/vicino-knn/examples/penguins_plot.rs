use plotters::prelude::*;

use vicino::prelude::*;

/// Plots bill length against flipper length, coloured by species, and saves
/// the chart next to the working directory.
fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let data = vicino_datasets::penguins()
        .drop_missing_any()
        .select_features(&["bill_length_mm", "flipper_length_mm"])?;
    let species = vicino_datasets::penguins_species();

    let bills = data.records().column(0);
    let flippers = data.records().column(1);

    let x_min = bills.iter().copied().fold(f64::INFINITY, f64::min) - 2.0;
    let x_max = bills.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 2.0;
    let y_min = flippers.iter().copied().fold(f64::INFINITY, f64::min) - 2.0;
    let y_max = flippers.iter().copied().fold(f64::NEG_INFINITY, f64::max) + 2.0;

    let root = BitMapBackend::new("penguins.png", (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Penguins by species", ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("bill length (mm)")
        .y_desc("flipper length (mm)")
        .draw()?;

    let colors = [RED, BLUE, GREEN];
    for (label, name) in species.iter().enumerate() {
        let color = colors[label];
        chart
            .draw_series(
                data.records()
                    .rows()
                    .into_iter()
                    .zip(data.targets().iter())
                    .filter(|(_, target)| **target == label)
                    .map(|(bird, _)| Circle::new((bird[0], bird[1]), 3, color.filled())),
            )?
            .label(*name)
            .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
    }

    chart.configure_series_labels().background_style(WHITE).draw()?;

    Ok(())
}
