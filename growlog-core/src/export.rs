use growlog_schemas::plant::Plant;
use crate::analysis::build_plant_schedule;
use chrono::NaiveDate;
use csv::Writer;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct MeasurementRow {
    date: NaiveDate,
    height_cm: f64,
    leaf_count: u32,
    stem_diameter_mm: f64,
}

#[derive(Debug, Serialize)]
struct ScheduleRow {
    date: NaiveDate,
    nutrient_type: String,
    amount_ml: f64,
}

/// Writes a plant's measurement history as CSV, sorted ascending by date.
pub fn export_measurements(path: &Path, plant: &Plant) -> Result<(), anyhow::Error> {
    let mut measurements = plant.measurements.clone();
    measurements.sort_by_key(|m| m.date);

    let mut writer = Writer::from_path(path)?;
    for m in measurements {
        writer.serialize(MeasurementRow {
            date: m.date,
            height_cm: m.height_cm,
            leaf_count: m.leaf_count,
            stem_diameter_mm: m.stem_diameter_mm,
        })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the gap-filled nutrient schedule, one row per (date, type) cell,
/// dates ascending and types sorted within a date.
pub fn export_nutrient_schedule(path: &Path, plant: &Plant) -> Result<(), anyhow::Error> {
    let schedule = build_plant_schedule(&plant.nutrients);

    let mut writer = Writer::from_path(path)?;
    for (idx, date) in schedule.dates.iter().enumerate() {
        for nutrient_type in schedule.nutrient_types() {
            writer.serialize(ScheduleRow {
                date: *date,
                nutrient_type: nutrient_type.to_string(),
                amount_ml: schedule.amounts[nutrient_type][idx],
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use growlog_schemas::{measurement::Measurement, nutrient::Nutrient};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_plant() -> Plant {
        let mut plant = Plant::new(1, "Basil", "Genovese");
        plant.measurements = vec![
            Measurement {
                plant_id: 1,
                date: date(2023, 5, 3),
                height_cm: 16.0,
                leaf_count: 6,
                stem_diameter_mm: 2.5,
            },
            Measurement {
                plant_id: 1,
                date: date(2023, 5, 1),
                height_cm: 10.0,
                leaf_count: 4,
                stem_diameter_mm: 2.0,
            },
        ];
        plant.nutrients = vec![
            Nutrient {
                plant_id: 1,
                nutrient_type: "TypeB".to_string(),
                date: date(2023, 5, 2),
                amount_ml: 3.0,
            },
            Nutrient {
                plant_id: 1,
                nutrient_type: "TypeA".to_string(),
                date: date(2023, 5, 1),
                amount_ml: 5.0,
            },
        ];
        plant
    }

    #[test]
    fn measurement_export_is_sorted_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measurements.csv");
        export_measurements(&path, &sample_plant()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "date,height_cm,leaf_count,stem_diameter_mm",
                "2023-05-01,10.0,4,2.0",
                "2023-05-03,16.0,6,2.5",
            ]
        );
    }

    #[test]
    fn schedule_export_covers_the_full_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        export_nutrient_schedule(&path, &sample_plant()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                "date,nutrient_type,amount_ml",
                "2023-05-01,TypeA,5.0",
                "2023-05-01,TypeB,0.0",
                "2023-05-02,TypeA,0.0",
                "2023-05-02,TypeB,3.0",
            ]
        );
    }

    #[test]
    fn empty_plant_exports_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        export_measurements(&path, &Plant::new(2, "Fern", "Boston")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
