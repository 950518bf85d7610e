use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use growlog_core::{
    export::{export_measurements, export_nutrient_schedule},
    store::Garden,
};
use growlog_schemas::plant::Plant;
use std::{
    fs,
    io::{self, Write},
    path::Path,
};

use crate::{input, plotting};

/// Runs the interactive menu loop until the user exits.
pub fn run(garden: &mut Garden, data_file: &Path, output_dir: &Path) -> Result<()> {
    loop {
        println!();
        println!("--- Growlog Menu ---");
        println!("1. Add a new plant");
        println!("2. Add a nutrient type");
        println!("3. Record measurements and nutrients");
        println!("4. View plants");
        println!("5. View nutrient types");
        println!("6. Data visualization");
        println!("7. Export plant data to CSV");
        println!("8. Remove a plant");
        println!("9. Exit");

        let choice = prompt("Enter your choice: ")?;
        match choice.as_str() {
            "1" => add_plant(garden, data_file)?,
            "2" => add_nutrient_type(garden, data_file)?,
            "3" => record_entries(garden, data_file)?,
            "4" => view_plants(garden),
            "5" => view_nutrient_types(garden),
            "6" => visualization_menu(garden, output_dir)?,
            "7" => export_plant(garden, output_dir)?,
            "8" => remove_plant(garden, data_file)?,
            "9" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn add_plant(garden: &mut Garden, data_file: &Path) -> Result<()> {
    println!("\n--- Add a New Plant ---");
    let name = prompt("Enter the plant's name: ")?;
    let strain = prompt("Enter the plant's strain: ")?;
    let id = garden.add_plant(&name, &strain);
    save(garden, data_file)?;
    println!("Plant '{}' (id {}) added to the garden.", name, id);
    Ok(())
}

fn add_nutrient_type(garden: &mut Garden, data_file: &Path) -> Result<()> {
    println!("\n--- Add a Nutrient Type ---");
    let name = prompt("Enter the nutrient type's name: ")?;
    let description = prompt("Enter a description (optional): ")?;
    let description = if description.is_empty() {
        None
    } else {
        Some(description)
    };

    match garden.add_nutrient_type(&name, description) {
        Ok(()) => {
            save(garden, data_file)?;
            println!("Nutrient type '{}' added.", name);
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn record_entries(garden: &mut Garden, data_file: &Path) -> Result<()> {
    println!("\n--- Record Measurements and Nutrients ---");
    let plant_id = match select_plant(garden, "record entries for")? {
        Some(id) => id,
        None => return Ok(()),
    };
    let plant_name = garden
        .get_plant(plant_id)
        .map(|p| p.name.clone())
        .unwrap_or_default();

    let date = prompt_date()?;

    let height_cm = prompt_parsed("Enter the plant's height (cm): ", input::parse_height_cm)?;
    let leaf_count = prompt_parsed("Enter the number of leaves: ", input::parse_leaf_count)?;
    let stem_diameter_mm = prompt_parsed(
        "Enter the stem diameter (mm): ",
        input::parse_stem_diameter_mm,
    )?;
    record_measurement(
        garden,
        data_file,
        plant_id,
        date,
        height_cm,
        leaf_count,
        stem_diameter_mm,
    )?;
    println!("Measurement recorded for {} on {}.", plant_name, date);

    if garden.get_all_nutrient_types().is_empty() {
        println!("No nutrient types registered. Add one from the main menu first.");
    } else {
        loop {
            record_nutrient(garden, data_file, plant_id, date)?;
            let answer = prompt("Add another nutrient? (y/n): ")?;
            if !wants_another(&answer) {
                break;
            }
        }
    }

    let comment = prompt("Add a comment (press Enter to skip): ")?;
    if !comment.is_empty() {
        record_comment(garden, data_file, plant_id, date, &comment)?;
        println!("Comment recorded.");
    }

    Ok(())
}

/// Only an explicit yes keeps the nutrient loop going.
fn wants_another(answer: &str) -> bool {
    answer.to_lowercase() == "y"
}

fn record_nutrient(
    garden: &mut Garden,
    data_file: &Path,
    plant_id: u64,
    date: NaiveDate,
) -> Result<()> {
    let types = garden.get_all_nutrient_types();
    println!("Available nutrient types:");
    for (i, nutrient_type) in types.iter().enumerate() {
        match &nutrient_type.description {
            Some(description) => println!("{}. {} - {}", i + 1, nutrient_type.name, description),
            None => println!("{}. {}", i + 1, nutrient_type.name),
        }
    }

    let type_name = loop {
        let line = prompt("Enter the nutrient type number: ")?;
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= types.len() => break types[n - 1].name.clone(),
            _ => println!("Invalid selection. Enter a number from the list."),
        }
    };

    let amount_ml = prompt_parsed("Enter the amount applied (ml): ", input::parse_amount_ml)?;
    record_dose(garden, data_file, plant_id, &type_name, date, amount_ml)?;
    println!("{} ml of {} recorded.", amount_ml, type_name);
    Ok(())
}

/// Every accepted record is written to the data file straight away (one
/// insert, one save), so an interrupted session keeps what was entered.
fn record_measurement(
    garden: &mut Garden,
    data_file: &Path,
    plant_id: u64,
    date: NaiveDate,
    height_cm: f64,
    leaf_count: u32,
    stem_diameter_mm: f64,
) -> Result<()> {
    garden.add_measurement(plant_id, date, height_cm, leaf_count, stem_diameter_mm)?;
    save(garden, data_file)
}

fn record_dose(
    garden: &mut Garden,
    data_file: &Path,
    plant_id: u64,
    nutrient_type: &str,
    date: NaiveDate,
    amount_ml: f64,
) -> Result<()> {
    garden.add_nutrient(plant_id, nutrient_type, date, amount_ml)?;
    save(garden, data_file)
}

fn record_comment(
    garden: &mut Garden,
    data_file: &Path,
    plant_id: u64,
    date: NaiveDate,
    content: &str,
) -> Result<()> {
    garden.add_comment(plant_id, date, content)?;
    save(garden, data_file)
}

fn view_plants(garden: &Garden) {
    println!("\n--- Plants in the Garden ---");
    let plants = garden.get_all_plants();
    if plants.is_empty() {
        println!("No plants in the garden yet.");
        return;
    }
    for plant in plants {
        println!();
        print!("{}", plant_listing(plant));
    }
}

/// Full read-back of one plant's history: every measurement, nutrient
/// application and comment, in storage order.
fn plant_listing(plant: &Plant) -> String {
    let mut out = format!("{}. {} ({})\n", plant.id, plant.name, plant.strain);

    out.push_str("Measurements:\n");
    for measurement in &plant.measurements {
        out.push_str(&format!(
            "  {}: Height={} cm, Leaf Count={}, Stem Diameter={} mm\n",
            measurement.date,
            measurement.height_cm,
            measurement.leaf_count,
            measurement.stem_diameter_mm
        ));
    }

    out.push_str("Nutrients:\n");
    for nutrient in &plant.nutrients {
        out.push_str(&format!(
            "  {}: {} - {} ml\n",
            nutrient.date, nutrient.nutrient_type, nutrient.amount_ml
        ));
    }

    out.push_str("Comments:\n");
    for comment in &plant.comments {
        out.push_str(&format!("  {}: {}\n", comment.date, comment.content));
    }

    out
}

fn view_nutrient_types(garden: &Garden) {
    println!("\n--- Nutrient Types ---");
    let types = garden.get_all_nutrient_types();
    if types.is_empty() {
        println!("No nutrient types registered yet.");
        return;
    }
    for nutrient_type in types {
        match &nutrient_type.description {
            Some(description) => println!("- {}: {}", nutrient_type.name, description),
            None => println!("- {}", nutrient_type.name),
        }
    }
}

fn visualization_menu(garden: &Garden, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    loop {
        println!();
        println!("--- Data Visualization ---");
        println!("1. Plant Heights Over Time");
        println!("2. Growth Rates for All Plants");
        println!("3. Individual Plant Growth Rates");
        println!("4. Nutrient Schedule for All Plants");
        println!("5. Individual Plant Nutrient Schedule");
        println!("6. Back to Main Menu");

        let choice = prompt("Enter your choice: ")?;
        match choice.as_str() {
            "1" => plotting::plot_plant_heights(output_dir, garden.get_all_plants())?,
            "2" => plotting::plot_growth_rates_all(output_dir, garden.get_all_plants())?,
            "3" => {
                if let Some(plant_id) = select_plant(garden, "chart")? {
                    let plant = garden
                        .get_plant(plant_id)
                        .context("Selected plant is no longer in the garden")?;
                    plotting::plot_growth_rates_single(output_dir, plant)?;
                }
            }
            "4" => plotting::plot_nutrient_schedule_all(output_dir, garden.get_all_plants())?,
            "5" => {
                if let Some(plant_id) = select_plant(garden, "chart")? {
                    let plant = garden
                        .get_plant(plant_id)
                        .context("Selected plant is no longer in the garden")?;
                    plotting::plot_nutrient_schedule_single(output_dir, plant)?;
                }
            }
            "6" => return Ok(()),
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn export_plant(garden: &Garden, output_dir: &Path) -> Result<()> {
    println!("\n--- Export Plant Data to CSV ---");
    let plant_id = match select_plant(garden, "export")? {
        Some(id) => id,
        None => return Ok(()),
    };
    let plant = garden
        .get_plant(plant_id)
        .context("Selected plant is no longer in the garden")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    let measurements_path = output_dir.join(format!("plant_{}_measurements.csv", plant.id));
    export_measurements(&measurements_path, plant)?;
    println!("Wrote {:?}", measurements_path);

    let schedule_path = output_dir.join(format!("plant_{}_nutrient_schedule.csv", plant.id));
    export_nutrient_schedule(&schedule_path, plant)?;
    println!("Wrote {:?}", schedule_path);
    Ok(())
}

fn remove_plant(garden: &mut Garden, data_file: &Path) -> Result<()> {
    println!("\n--- Remove a Plant ---");
    let plant_id = match select_plant(garden, "remove")? {
        Some(id) => id,
        None => return Ok(()),
    };
    let plant_name = garden
        .get_plant(plant_id)
        .map(|p| p.name.clone())
        .unwrap_or_default();

    let answer = prompt(&format!(
        "Remove '{}' and all of its records? (y/n): ",
        plant_name
    ))?;
    if answer.to_lowercase() == "y" {
        garden.remove_plant(plant_id)?;
        save(garden, data_file)?;
        println!("Plant '{}' removed.", plant_name);
    } else {
        println!("Removal cancelled.");
    }
    Ok(())
}

/// Lists the plants and returns the chosen plant's id, or None when the
/// garden is empty.
fn select_plant(garden: &Garden, action: &str) -> Result<Option<u64>> {
    let plants = garden.get_all_plants();
    if plants.is_empty() {
        println!("No plants in the garden yet. Add one first.");
        return Ok(None);
    }

    println!("\nSelect a plant to {}:", action);
    for (i, plant) in plants.iter().enumerate() {
        println!("{}. {} ({})", i + 1, plant.name, plant.strain);
    }

    loop {
        let line = prompt("Enter the plant number: ")?;
        match line.parse::<usize>() {
            Ok(n) if n >= 1 && n <= plants.len() => return Ok(Some(plants[n - 1].id)),
            _ => println!("Invalid selection. Enter a number from the list."),
        }
    }
}

fn prompt_date() -> Result<NaiveDate> {
    loop {
        let line = prompt("Enter the date (YYYY-MM-DD, empty for today): ")?;
        if line.is_empty() {
            let today = Local::now().date_naive();
            println!("Using today's date: {}", today);
            return Ok(today);
        }
        match input::parse_date(&line) {
            Ok(date) => return Ok(date),
            Err(err) => println!("{err}"),
        }
    }
}

/// Prompts until `parse` accepts the input, printing the validation message
/// on each rejection.
fn prompt_parsed<T>(message: &str, parse: impl Fn(&str) -> Result<T>) -> Result<T> {
    loop {
        let line = prompt(message)?;
        match parse(&line) {
            Ok(value) => return Ok(value),
            Err(err) => println!("{err}"),
        }
    }
}

/// Reads one trimmed line from stdin. A closed input stream is an error so
/// the retry loops above cannot spin forever.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("Input stream closed");
    }
    Ok(line.trim().to_string())
}

fn save(garden: &Garden, data_file: &Path) -> Result<()> {
    garden
        .save(data_file)
        .with_context(|| format!("Failed to save the garden to {:?}", data_file))
}
