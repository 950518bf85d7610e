//! Renders the garden's time series as PNG charts.

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use growlog_core::analysis::{
    amounts_by_type, build_cohort_schedule, compute_growth_rates, measurement_dates,
    CohortSchedule,
};
use growlog_schemas::{measurement::GrowthMetric, plant::Plant};
use plotters::prelude::*;
use std::path::Path;

/// One line per plant: measured heights over time, sorted by date.
pub fn plot_plant_heights(output_dir: &Path, plants: &[Plant]) -> Result<()> {
    let mut series = Vec::new();
    for plant in plants {
        let mut measurements = plant.measurements.clone();
        measurements.sort_by_key(|m| m.date);
        let points: Vec<(NaiveDate, f64)> =
            measurements.iter().map(|m| (m.date, m.height_cm)).collect();
        if !points.is_empty() {
            series.push((plant.name.clone(), points));
        }
    }

    let (x_start, x_end) =
        match date_axis(series.iter().flat_map(|(_, pts)| pts.iter().cloned())) {
            Some(range) => range,
            None => {
                println!("[Plotting] Warning: No data to plot.");
                return Ok(());
            }
        };
    let y_max = max_value(series.iter().flat_map(|(_, pts)| pts.iter().cloned())) * 1.1;

    let path = output_dir.join("1_plant_heights.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Plant Heights Over Time", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Height (cm)")
        .draw()?;

    let colors = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];
    for (i, (label, points)) in series.iter().enumerate() {
        let color = colors[i % colors.len()].clone();
        chart
            .draw_series(LineSeries::new(
                points.iter().cloned(),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    println!("[Plotting] Saved {:?}", path);
    Ok(())
}

/// Height growth rates for every plant, one line per plant. Rates pair with
/// the dates from the second measurement on; zip truncates when same-day
/// pairs were skipped.
pub fn plot_growth_rates_all(output_dir: &Path, plants: &[Plant]) -> Result<()> {
    let mut series = Vec::new();
    for plant in plants {
        let mut measurements = plant.measurements.clone();
        measurements.sort_by_key(|m| m.date);
        let rates = compute_growth_rates(&measurements, "height")?;
        let points: Vec<(NaiveDate, f64)> = measurements
            .iter()
            .skip(1)
            .map(|m| m.date)
            .zip(rates)
            .collect();
        if !points.is_empty() {
            series.push((plant.name.clone(), points));
        }
    }

    let (x_start, x_end) =
        match date_axis(series.iter().flat_map(|(_, pts)| pts.iter().cloned())) {
            Some(range) => range,
            None => {
                println!("[Plotting] Warning: No data to plot.");
                return Ok(());
            }
        };
    let (y_min, y_max) = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().cloned()));

    let path = output_dir.join("2_growth_rates_all_plants.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Growth Rates for All Plants", ("sans-serif", 50).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Height growth (cm/day)")
        .draw()?;

    let colors = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];
    for (i, (label, points)) in series.iter().enumerate() {
        let color = colors[i % colors.len()].clone();
        chart
            .draw_series(LineSeries::new(
                points.iter().cloned(),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    println!("[Plotting] Saved {:?}", path);
    Ok(())
}

/// Height, leaf count and stem diameter rates for one plant on a shared axis.
pub fn plot_growth_rates_single(output_dir: &Path, plant: &Plant) -> Result<()> {
    let mut measurements = plant.measurements.clone();
    measurements.sort_by_key(|m| m.date);

    let mut series = Vec::new();
    for metric in GrowthMetric::ALL {
        let rates = compute_growth_rates(&measurements, metric.name())?;
        let points: Vec<(NaiveDate, f64)> = measurements
            .iter()
            .skip(1)
            .map(|m| m.date)
            .zip(rates)
            .collect();
        if !points.is_empty() {
            series.push((metric.label(), points));
        }
    }

    let (x_start, x_end) =
        match date_axis(series.iter().flat_map(|(_, pts)| pts.iter().cloned())) {
            Some(range) => range,
            None => {
                println!("[Plotting] Warning: No data to plot.");
                return Ok(());
            }
        };
    let (y_min, y_max) = padded_range(series.iter().flat_map(|(_, pts)| pts.iter().cloned()));

    let path = output_dir.join(format!("3_growth_rates_plant_{}.png", plant.id));
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Growth Rates: {}", plant.name),
            ("sans-serif", 50).into_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Rate of change per day")
        .draw()?;

    let colors = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];
    for (i, (label, points)) in series.iter().enumerate() {
        let color = colors[i % colors.len()].clone();
        chart
            .draw_series(LineSeries::new(
                points.iter().cloned(),
                color.stroke_width(2),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    println!("[Plotting] Saved {:?}", path);
    Ok(())
}

/// Gap-filled nutrient schedules for the whole garden, one line per
/// (plant, nutrient type) across the cohort's type union. Colour follows
/// the union so a type looks the same on every plant.
pub fn plot_nutrient_schedule_all(output_dir: &Path, plants: &[Plant]) -> Result<()> {
    let cohort = build_cohort_schedule(plants);
    let series = cohort_series(&cohort);

    let (x_start, x_end) =
        match date_axis(series.iter().flat_map(|(_, _, pts)| pts.iter().cloned())) {
            Some(range) => range,
            None => {
                println!("[Plotting] Warning: No data to plot.");
                return Ok(());
            }
        };
    let y_max = max_value(series.iter().flat_map(|(_, _, pts)| pts.iter().cloned())) * 1.1;

    let path = output_dir.join("4_nutrient_schedule_all_plants.png");
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Nutrient Schedule for All Plants",
            ("sans-serif", 50).into_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Amount (ml)")
        .draw()?;

    let colors = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];
    for (label, color_index, points) in &series {
        let color = colors[*color_index % colors.len()].clone();
        chart
            .draw_series(LineSeries::new(
                points.iter().cloned(),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    println!("[Plotting] Saved {:?}", path);
    Ok(())
}

/// One plant's nutrient amounts in record order, plotted against the plant's
/// measurement dates in record order. The two sequences are zipped, so the
/// shorter one bounds the drawn points; amounts here are not gap-filled.
pub fn plot_nutrient_schedule_single(output_dir: &Path, plant: &Plant) -> Result<()> {
    let dates = measurement_dates(&plant.measurements);
    let amounts = amounts_by_type(&plant.nutrients);

    let mut type_names: Vec<&String> = amounts.keys().collect();
    type_names.sort_unstable();

    let mut series = Vec::new();
    for name in type_names {
        let points: Vec<(NaiveDate, f64)> = dates
            .iter()
            .cloned()
            .zip(amounts[name].iter().cloned())
            .collect();
        if !points.is_empty() {
            series.push((name.clone(), points));
        }
    }

    let (x_start, x_end) =
        match date_axis(series.iter().flat_map(|(_, pts)| pts.iter().cloned())) {
            Some(range) => range,
            None => {
                println!("[Plotting] Warning: No data to plot.");
                return Ok(());
            }
        };
    let y_max = max_value(series.iter().flat_map(|(_, pts)| pts.iter().cloned())) * 1.1;

    let path = output_dir.join(format!("5_nutrient_schedule_plant_{}.png", plant.id));
    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Nutrient Schedule: {}", plant.name),
            ("sans-serif", 50).into_font(),
        )
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_start..x_end, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Amount (ml)")
        .draw()?;

    let colors = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];
    for (i, (label, points)) in series.iter().enumerate() {
        let color = colors[i % colors.len()].clone();
        chart
            .draw_series(LineSeries::new(
                points.iter().cloned(),
                color.stroke_width(2),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    println!("[Plotting] Saved {:?}", path);
    Ok(())
}

/// Series for the cohort chart: every plant gets one series per union type,
/// labelled "plant - type" and carrying the type's slot in the union for
/// colour assignment. Types a plant never received flatten to zero along
/// that plant's own date axis; a plant with no applications has no dates
/// and contributes nothing.
fn cohort_series(cohort: &CohortSchedule) -> Vec<(String, usize, Vec<(NaiveDate, f64)>)> {
    let mut series = Vec::new();
    for entry in &cohort.plants {
        for (color_index, nutrient_type) in cohort.nutrient_types.iter().enumerate() {
            let points: Vec<(NaiveDate, f64)> = entry
                .schedule
                .dates
                .iter()
                .map(|&date| (date, entry.schedule.amount(nutrient_type, date)))
                .collect();
            if points.is_empty() {
                continue;
            }
            series.push((
                format!("{} - {}", entry.plant_name, nutrient_type),
                color_index,
                points,
            ));
        }
    }
    series
}

/// Axis endpoints for a set of dated points, widened by a day when every
/// point shares one date so the axis is never empty.
fn date_axis<I>(points: I) -> Option<(NaiveDate, NaiveDate)>
where
    I: Iterator<Item = (NaiveDate, f64)> + Clone,
{
    let start = points.clone().map(|(date, _)| date).min()?;
    let end = points.map(|(date, _)| date).max()?;
    if start == end {
        Some((start, end + Duration::days(1)))
    } else {
        Some((start, end))
    }
}

/// Largest value in the points, floored at 1.0 so a `0..max` range is never
/// empty.
fn max_value<I>(points: I) -> f64
where
    I: Iterator<Item = (NaiveDate, f64)>,
{
    let max = points.map(|(_, value)| value).fold(0.0, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}

/// Padded min/max for series that can go negative, kept non-degenerate for
/// flat lines.
fn padded_range<I>(points: I) -> (f64, f64)
where
    I: Iterator<Item = (NaiveDate, f64)>,
{
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, value) in points {
        min = min.min(value);
        max = max.max(value);
    }
    if min > max {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.1).max(0.5);
    (min - pad, max + pad)
}
