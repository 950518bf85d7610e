use growlog_schemas::{
    measurement::{GrowthMetric, Measurement},
    nutrient::Nutrient,
    plant::Plant,
};
use crate::error::GrowlogError;
use chrono::NaiveDate;
use std::collections::HashMap;

/// One plant's nutrient applications aligned to a shared date axis.
///
/// Every type present in the source records carries exactly one amount per
/// axis date; dates with no recorded application hold an explicit 0.0, so
/// consumers can count on `types x dates` cells.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NutrientSchedule {
    /// Distinct application dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Per-type amounts, index-aligned with `dates`.
    pub amounts: HashMap<String, Vec<f64>>,
}

impl NutrientSchedule {
    /// Type names in sorted order, for stable display.
    pub fn nutrient_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.amounts.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// The amount applied for `nutrient_type` on `date`, 0.0 for any cell
    /// outside the schedule.
    pub fn amount(&self, nutrient_type: &str, date: NaiveDate) -> f64 {
        match self.dates.binary_search(&date) {
            Ok(idx) => self.amounts.get(nutrient_type).map_or(0.0, |row| row[idx]),
            Err(_) => 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Independent per-plant schedules plus the type union across the cohort.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CohortSchedule {
    pub plants: Vec<PlantSchedule>,
    /// Sorted union of type names over all plants. Presentation layers key
    /// colours off this list so a type renders identically on every plant.
    pub nutrient_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantSchedule {
    pub plant_id: u64,
    pub plant_name: String,
    pub schedule: NutrientSchedule,
}

/// Per-interval growth rates between consecutive measurements.
///
/// Measurements are taken in the order given and are expected to be sorted
/// ascending by date; this function does not sort. Pairs recorded on the same
/// day are skipped, so the result can be shorter than `len - 1`.
pub fn compute_growth_rates(
    measurements: &[Measurement],
    metric: &str,
) -> Result<Vec<f64>, GrowlogError> {
    let metric = GrowthMetric::from_name(metric)
        .ok_or_else(|| GrowlogError::InvalidMetric(metric.to_string()))?;

    let mut rates = Vec::new();
    for pair in measurements.windows(2) {
        let days = (pair[1].date - pair[0].date).num_days();
        if days == 0 {
            continue;
        }
        rates.push((metric.value(&pair[1]) - metric.value(&pair[0])) / days as f64);
    }
    Ok(rates)
}

/// Gap-filled dosage schedule from one plant's nutrient records.
///
/// When several records share a (type, date) cell the first one in record
/// order supplies the amount.
pub fn build_plant_schedule(nutrients: &[Nutrient]) -> NutrientSchedule {
    let dates = nutrient_dates(nutrients);

    let mut types: Vec<&str> = nutrients.iter().map(|n| n.nutrient_type.as_str()).collect();
    types.sort_unstable();
    types.dedup();

    let mut amounts = HashMap::with_capacity(types.len());
    for nutrient_type in types {
        let row = dates
            .iter()
            .map(|date| {
                nutrients
                    .iter()
                    .find(|n| n.nutrient_type == nutrient_type && n.date == *date)
                    .map_or(0.0, |n| n.amount_ml)
            })
            .collect();
        amounts.insert(nutrient_type.to_string(), row);
    }

    NutrientSchedule { dates, amounts }
}

/// One schedule per plant, each over that plant's own records only. There is
/// no cross-plant date alignment.
pub fn build_cohort_schedule(plants: &[Plant]) -> CohortSchedule {
    let schedules: Vec<PlantSchedule> = plants
        .iter()
        .map(|plant| PlantSchedule {
            plant_id: plant.id,
            plant_name: plant.name.clone(),
            schedule: build_plant_schedule(&plant.nutrients),
        })
        .collect();

    let mut nutrient_types: Vec<String> = schedules
        .iter()
        .flat_map(|entry| entry.schedule.amounts.keys().cloned())
        .collect();
    nutrient_types.sort_unstable();
    nutrient_types.dedup();

    CohortSchedule {
        plants: schedules,
        nutrient_types,
    }
}

/// Amounts grouped per type in record order, with no date alignment and no
/// gap-fill. Unlike [`build_plant_schedule`] the rows can be ragged; callers
/// pairing them with a date axis must tolerate length mismatches.
pub fn amounts_by_type(nutrients: &[Nutrient]) -> HashMap<String, Vec<f64>> {
    let mut amounts: HashMap<String, Vec<f64>> = HashMap::new();
    for nutrient in nutrients {
        amounts
            .entry(nutrient.nutrient_type.clone())
            .or_default()
            .push(nutrient.amount_ml);
    }
    amounts
}

/// Measurement dates in record order.
pub fn measurement_dates(measurements: &[Measurement]) -> Vec<NaiveDate> {
    measurements.iter().map(|m| m.date).collect()
}

/// Distinct nutrient application dates, ascending.
pub fn nutrient_dates(nutrients: &[Nutrient]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = nutrients.iter().map(|n| n.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn measurement(
        date: NaiveDate,
        height_cm: f64,
        leaf_count: u32,
        stem_diameter_mm: f64,
    ) -> Measurement {
        Measurement {
            plant_id: 1,
            date,
            height_cm,
            leaf_count,
            stem_diameter_mm,
        }
    }

    fn nutrient(nutrient_type: &str, date: NaiveDate, amount_ml: f64) -> Nutrient {
        Nutrient {
            plant_id: 1,
            nutrient_type: nutrient_type.to_string(),
            date,
            amount_ml,
        }
    }

    #[test]
    fn growth_rate_over_two_days() {
        let measurements = vec![
            measurement(date(2023, 5, 1), 10.0, 4, 2.0),
            measurement(date(2023, 5, 3), 16.0, 6, 2.5),
        ];
        assert_eq!(
            compute_growth_rates(&measurements, "height").unwrap(),
            vec![3.0]
        );
        assert_eq!(
            compute_growth_rates(&measurements, "leaf_count").unwrap(),
            vec![1.0]
        );
        assert_eq!(
            compute_growth_rates(&measurements, "stem_diameter").unwrap(),
            vec![0.25]
        );
    }

    #[test]
    fn one_rate_per_interval_for_distinct_dates() {
        let measurements = vec![
            measurement(date(2023, 5, 1), 10.0, 4, 2.0),
            measurement(date(2023, 5, 2), 12.0, 5, 2.2),
            measurement(date(2023, 5, 5), 18.0, 8, 2.8),
            measurement(date(2023, 5, 9), 30.0, 12, 3.6),
        ];
        for metric in GrowthMetric::ALL {
            let rates = compute_growth_rates(&measurements, metric.name()).unwrap();
            assert_eq!(rates.len(), measurements.len() - 1, "metric {}", metric.name());
        }
        assert_eq!(
            compute_growth_rates(&measurements, "height").unwrap(),
            vec![2.0, 2.0, 3.0]
        );
    }

    #[test]
    fn same_day_pairs_are_skipped() {
        let measurements = vec![
            measurement(date(2023, 5, 1), 10.0, 4, 2.0),
            measurement(date(2023, 5, 1), 11.0, 4, 2.0),
            measurement(date(2023, 5, 3), 15.0, 6, 2.4),
        ];
        // Same-day pair contributes nothing; only 05-01 -> 05-03 remains.
        assert_eq!(
            compute_growth_rates(&measurements, "height").unwrap(),
            vec![2.0]
        );

        let same_day_only = vec![
            measurement(date(2023, 5, 1), 10.0, 4, 2.0),
            measurement(date(2023, 5, 1), 16.0, 6, 2.5),
        ];
        assert!(compute_growth_rates(&same_day_only, "height")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn declining_metric_yields_negative_rates() {
        let measurements = vec![
            measurement(date(2023, 5, 1), 20.0, 10, 4.0),
            measurement(date(2023, 5, 5), 12.0, 6, 3.0),
        ];
        assert_eq!(
            compute_growth_rates(&measurements, "height").unwrap(),
            vec![-2.0]
        );
    }

    #[test]
    fn short_inputs_produce_no_rates() {
        assert!(compute_growth_rates(&[], "height").unwrap().is_empty());
        let single = vec![measurement(date(2023, 5, 1), 10.0, 4, 2.0)];
        assert!(compute_growth_rates(&single, "height").unwrap().is_empty());
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let measurements = vec![
            measurement(date(2023, 5, 1), 10.0, 4, 2.0),
            measurement(date(2023, 5, 3), 16.0, 6, 2.5),
        ];
        let err = compute_growth_rates(&measurements, "humidity").unwrap_err();
        assert!(matches!(err, GrowlogError::InvalidMetric(name) if name == "humidity"));
        // Validated before any pair is examined, so empty input still errors.
        assert!(compute_growth_rates(&[], "humidity").is_err());
    }

    #[test]
    fn schedule_covers_every_type_date_cell() {
        let nutrients = vec![
            nutrient("FloraGro", date(2023, 5, 1), 5.0),
            nutrient("FloraBloom", date(2023, 5, 2), 3.0),
            nutrient("FloraGro", date(2023, 5, 4), 6.0),
        ];
        let schedule = build_plant_schedule(&nutrients);
        assert_eq!(schedule.dates.len(), 3);
        assert_eq!(schedule.amounts.len(), 2);
        for row in schedule.amounts.values() {
            assert_eq!(row.len(), schedule.dates.len());
        }
    }

    #[test]
    fn missing_applications_fill_with_zero() {
        let nutrients = vec![
            nutrient("TypeA", date(2023, 5, 1), 5.0),
            nutrient("TypeB", date(2023, 5, 2), 3.0),
        ];
        let schedule = build_plant_schedule(&nutrients);
        assert_eq!(schedule.amounts["TypeA"], vec![5.0, 0.0]);
        assert_eq!(schedule.amounts["TypeB"], vec![0.0, 3.0]);
        assert_eq!(schedule.amount("TypeA", date(2023, 5, 2)), 0.0);
        assert_eq!(schedule.amount("TypeB", date(2023, 5, 2)), 3.0);
        // Cells outside the schedule read as zero as well.
        assert_eq!(schedule.amount("TypeA", date(2023, 6, 1)), 0.0);
        assert_eq!(schedule.amount("TypeC", date(2023, 5, 1)), 0.0);
    }

    #[test]
    fn schedule_dates_are_sorted_and_deduplicated() {
        let nutrients = vec![
            nutrient("TypeA", date(2023, 5, 4), 2.0),
            nutrient("TypeB", date(2023, 5, 1), 3.0),
            nutrient("TypeA", date(2023, 5, 1), 5.0),
        ];
        let schedule = build_plant_schedule(&nutrients);
        assert_eq!(schedule.dates, vec![date(2023, 5, 1), date(2023, 5, 4)]);
        assert_eq!(schedule.amounts["TypeA"], vec![5.0, 2.0]);
        assert_eq!(schedule.amounts["TypeB"], vec![3.0, 0.0]);
    }

    #[test]
    fn first_record_wins_for_duplicate_cells() {
        let nutrients = vec![
            nutrient("TypeA", date(2023, 5, 1), 5.0),
            nutrient("TypeA", date(2023, 5, 1), 9.0),
        ];
        let schedule = build_plant_schedule(&nutrients);
        assert_eq!(schedule.amounts["TypeA"], vec![5.0]);
    }

    #[test]
    fn empty_records_build_an_empty_schedule() {
        let schedule = build_plant_schedule(&[]);
        assert!(schedule.is_empty());
        assert!(schedule.dates.is_empty());
        assert!(schedule.amounts.is_empty());
    }

    #[test]
    fn schedule_types_are_listed_sorted() {
        let nutrients = vec![
            nutrient("Zinc", date(2023, 5, 1), 1.0),
            nutrient("Boost", date(2023, 5, 1), 2.0),
        ];
        let schedule = build_plant_schedule(&nutrients);
        assert_eq!(schedule.nutrient_types(), vec!["Boost", "Zinc"]);
    }

    #[test]
    fn amounts_by_type_keeps_record_order_without_fill() {
        let nutrients = vec![
            nutrient("TypeA", date(2023, 5, 3), 5.0),
            nutrient("TypeB", date(2023, 5, 1), 3.0),
            nutrient("TypeA", date(2023, 5, 1), 4.0),
        ];
        let amounts = amounts_by_type(&nutrients);
        // Record order per type; rows are ragged, not aligned to an axis.
        assert_eq!(amounts["TypeA"], vec![5.0, 4.0]);
        assert_eq!(amounts["TypeB"], vec![3.0]);
    }

    #[test]
    fn cohort_unions_types_but_keeps_axes_independent() {
        let mut basil = Plant::new(1, "Basil", "Genovese");
        basil.nutrients = vec![nutrient("TypeB", date(2023, 5, 2), 3.0)];
        let mut mint = Plant::new(2, "Mint", "Peppermint");
        mint.nutrients = vec![
            nutrient("TypeA", date(2023, 5, 1), 5.0),
            nutrient("TypeC", date(2023, 5, 6), 2.0),
        ];

        let cohort = build_cohort_schedule(&[basil, mint]);
        assert_eq!(cohort.nutrient_types, vec!["TypeA", "TypeB", "TypeC"]);
        assert_eq!(cohort.plants.len(), 2);
        assert_eq!(cohort.plants[0].plant_name, "Basil");
        assert_eq!(cohort.plants[0].schedule.dates, vec![date(2023, 5, 2)]);
        assert_eq!(
            cohort.plants[1].schedule.dates,
            vec![date(2023, 5, 1), date(2023, 5, 6)]
        );
        // Each plant's schedule only covers types it actually received.
        assert!(!cohort.plants[0].schedule.amounts.contains_key("TypeA"));
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let measurements = vec![
            measurement(date(2023, 5, 1), 10.0, 4, 2.0),
            measurement(date(2023, 5, 3), 16.0, 6, 2.5),
        ];
        let nutrients = vec![
            nutrient("TypeA", date(2023, 5, 1), 5.0),
            nutrient("TypeB", date(2023, 5, 2), 3.0),
        ];
        assert_eq!(
            compute_growth_rates(&measurements, "height").unwrap(),
            compute_growth_rates(&measurements, "height").unwrap()
        );
        assert_eq!(
            build_plant_schedule(&nutrients),
            build_plant_schedule(&nutrients)
        );
    }

    #[test]
    fn date_helpers_expose_the_two_axis_flavours() {
        let measurements = vec![
            measurement(date(2023, 5, 3), 10.0, 4, 2.0),
            measurement(date(2023, 5, 1), 12.0, 5, 2.2),
        ];
        // Measurement dates stay in record order.
        assert_eq!(
            measurement_dates(&measurements),
            vec![date(2023, 5, 3), date(2023, 5, 1)]
        );

        let nutrients = vec![
            nutrient("TypeA", date(2023, 5, 4), 2.0),
            nutrient("TypeA", date(2023, 5, 1), 5.0),
            nutrient("TypeB", date(2023, 5, 4), 3.0),
        ];
        assert_eq!(
            nutrient_dates(&nutrients),
            vec![date(2023, 5, 1), date(2023, 5, 4)]
        );
    }
}
