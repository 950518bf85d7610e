use crate::{nutrient::NutrientType, plant::Plant};
use serde::{Deserialize, Serialize};

pub const GARDEN_SCHEMA_VERSION: &str = "1";

/// On-disk layout of a garden data file.
#[derive(Debug, Serialize, Deserialize)]
pub struct GardenFile {
    pub schema_version: String,
    pub plants: Vec<Plant>,
    pub nutrient_types: Vec<NutrientType>,
}
