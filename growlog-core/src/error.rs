use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrowlogError {
    #[error("Unknown growth metric '{0}'. Use height, leaf_count, or stem_diameter")]
    InvalidMetric(String),

    #[error("Plant with id {0} not found in the garden")]
    PlantNotFound(u64),

    #[error("Nutrient type '{0}' is not defined. Add it before recording doses")]
    UnknownNutrientType(String),

    #[error("Nutrient type '{0}' already exists")]
    DuplicateNutrientType(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),
}
