pub mod comment;
pub mod file_formats;
pub mod measurement;
pub mod nutrient;
pub mod plant;
