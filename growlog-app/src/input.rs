use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;

/// Parses a calendar date in YYYY-MM-DD form.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format. Please use YYYY-MM-DD."))
}

pub fn parse_height_cm(input: &str) -> Result<f64> {
    parse_positive(input, "height in cm")
}

pub fn parse_stem_diameter_mm(input: &str) -> Result<f64> {
    parse_positive(input, "stem diameter in mm")
}

pub fn parse_amount_ml(input: &str) -> Result<f64> {
    parse_positive(input, "amount in ml")
}

/// Leaf counts are whole numbers; zero is fine for a seedling.
pub fn parse_leaf_count(input: &str) -> Result<u32> {
    input
        .trim()
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid leaf count. Enter a whole number."))
}

fn parse_positive(input: &str, what: &str) -> Result<f64> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid {what}. Enter a number."))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("Invalid {what}. Enter a positive number.");
    }
    Ok(value)
}
