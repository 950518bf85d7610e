use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A dated free-text observation about one plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub plant_id: u64,
    pub date: NaiveDate,
    pub content: String,
}
