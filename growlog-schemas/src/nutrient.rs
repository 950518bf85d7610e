use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A kind of nutrient that can be applied to plants. The name is unique and
/// serves as the key `Nutrient` records refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientType {
    pub name: String,
    pub description: Option<String>,
}

/// One application of a nutrient to one plant: a dose of `amount_ml` of the
/// named type on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub plant_id: u64,
    pub nutrient_type: String,
    pub date: NaiveDate,
    pub amount_ml: f64,
}
