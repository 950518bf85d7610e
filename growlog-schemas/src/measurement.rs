use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated snapshot of one plant's physical attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub plant_id: u64,
    pub date: NaiveDate,
    pub height_cm: f64,
    pub leaf_count: u32,
    pub stem_diameter_mm: f64,
}

/// The measurement attributes a growth rate can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthMetric {
    Height,
    LeafCount,
    StemDiameter,
}

impl GrowthMetric {
    pub const ALL: [GrowthMetric; 3] = [
        GrowthMetric::Height,
        GrowthMetric::LeafCount,
        GrowthMetric::StemDiameter,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "height" => Some(GrowthMetric::Height),
            "leaf_count" => Some(GrowthMetric::LeafCount),
            "stem_diameter" => Some(GrowthMetric::StemDiameter),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            GrowthMetric::Height => "height",
            GrowthMetric::LeafCount => "leaf_count",
            GrowthMetric::StemDiameter => "stem_diameter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GrowthMetric::Height => "Height",
            GrowthMetric::LeafCount => "Leaf Count",
            GrowthMetric::StemDiameter => "Stem Diameter",
        }
    }

    /// The metric's value for one measurement, widened to f64.
    pub fn value(self, measurement: &Measurement) -> f64 {
        match self {
            GrowthMetric::Height => measurement.height_cm,
            GrowthMetric::LeafCount => f64::from(measurement.leaf_count),
            GrowthMetric::StemDiameter => measurement.stem_diameter_mm,
        }
    }
}
