use crate::{comment::Comment, measurement::Measurement, nutrient::Nutrient};
use serde::{Deserialize, Serialize};

/// A tracked plant: the aggregate root that owns all records taken for it.
///
/// Child collections are kept in storage (insertion) order; nothing here
/// guarantees date order. Callers that need a time axis sort their own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: u64,
    pub name: String,
    pub strain: String,
    pub measurements: Vec<Measurement>,
    pub nutrients: Vec<Nutrient>,
    pub comments: Vec<Comment>,
}

impl Plant {
    pub fn new(id: u64, name: &str, strain: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            strain: strain.to_string(),
            measurements: Vec::new(),
            nutrients: Vec::new(),
            comments: Vec::new(),
        }
    }
}
