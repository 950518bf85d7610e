use growlog_schemas::{
    comment::Comment,
    file_formats::{GardenFile, GARDEN_SCHEMA_VERSION},
    measurement::Measurement,
    nutrient::{Nutrient, NutrientType},
    plant::Plant,
};
use crate::error::GrowlogError;
use chrono::NaiveDate;
use std::{fs, path::Path};

/// The record store: every tracked plant plus the registered nutrient types.
///
/// Records append in arrival order; the store never sorts and accepts
/// duplicate dates. Referential integrity (plant ids, nutrient-type names)
/// is checked on every insert.
#[derive(Debug)]
pub struct Garden {
    plants: Vec<Plant>,
    nutrient_types: Vec<NutrientType>,
    next_plant_id: u64,
}

impl Garden {
    pub fn new() -> Self {
        Self {
            plants: Vec::new(),
            nutrient_types: Vec::new(),
            next_plant_id: 1,
        }
    }

    /// Reads a garden from a YAML file written by [`Garden::save`].
    pub fn load(path: &Path) -> Result<Self, GrowlogError> {
        let content = fs::read_to_string(path)
            .map_err(|e| GrowlogError::FileIO(path.display().to_string(), e))?;
        let file: GardenFile = serde_yaml::from_str(&content)
            .map_err(|e| GrowlogError::YamlParsing(path.display().to_string(), e))?;

        // Ids are not persisted as a counter; pick up after the highest one.
        let next_plant_id = file.plants.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Ok(Self {
            plants: file.plants,
            nutrient_types: file.nutrient_types,
            next_plant_id,
        })
    }

    /// Loads `path` when it exists, otherwise starts an empty garden.
    pub fn load_or_default(path: &Path) -> Result<Self, GrowlogError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), GrowlogError> {
        let file = GardenFile {
            schema_version: GARDEN_SCHEMA_VERSION.to_string(),
            plants: self.plants.clone(),
            nutrient_types: self.nutrient_types.clone(),
        };
        let content = serde_yaml::to_string(&file)
            .map_err(|e| GrowlogError::YamlParsing(path.display().to_string(), e))?;
        fs::write(path, content).map_err(|e| GrowlogError::FileIO(path.display().to_string(), e))
    }

    /// Registers a plant and returns its assigned id.
    pub fn add_plant(&mut self, name: &str, strain: &str) -> u64 {
        let id = self.next_plant_id;
        self.next_plant_id += 1;
        self.plants.push(Plant::new(id, name, strain));
        id
    }

    pub fn get_plant(&self, id: u64) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    pub fn get_all_plants(&self) -> &[Plant] {
        &self.plants
    }

    /// Removes a plant and everything recorded for it.
    pub fn remove_plant(&mut self, id: u64) -> Result<(), GrowlogError> {
        let idx = self
            .plants
            .iter()
            .position(|p| p.id == id)
            .ok_or(GrowlogError::PlantNotFound(id))?;
        self.plants.remove(idx);
        Ok(())
    }

    pub fn add_nutrient_type(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<(), GrowlogError> {
        if self.get_nutrient_type(name).is_some() {
            return Err(GrowlogError::DuplicateNutrientType(name.to_string()));
        }
        self.nutrient_types.push(NutrientType {
            name: name.to_string(),
            description,
        });
        Ok(())
    }

    pub fn get_nutrient_type(&self, name: &str) -> Option<&NutrientType> {
        self.nutrient_types.iter().find(|t| t.name == name)
    }

    pub fn get_all_nutrient_types(&self) -> &[NutrientType] {
        &self.nutrient_types
    }

    pub fn add_measurement(
        &mut self,
        plant_id: u64,
        date: NaiveDate,
        height_cm: f64,
        leaf_count: u32,
        stem_diameter_mm: f64,
    ) -> Result<(), GrowlogError> {
        let plant = self.plant_mut(plant_id)?;
        plant.measurements.push(Measurement {
            plant_id,
            date,
            height_cm,
            leaf_count,
            stem_diameter_mm,
        });
        Ok(())
    }

    /// Records a nutrient application; the type must have been registered
    /// with [`Garden::add_nutrient_type`] first.
    pub fn add_nutrient(
        &mut self,
        plant_id: u64,
        nutrient_type: &str,
        date: NaiveDate,
        amount_ml: f64,
    ) -> Result<(), GrowlogError> {
        if self.get_nutrient_type(nutrient_type).is_none() {
            return Err(GrowlogError::UnknownNutrientType(nutrient_type.to_string()));
        }
        let plant = self.plant_mut(plant_id)?;
        plant.nutrients.push(Nutrient {
            plant_id,
            nutrient_type: nutrient_type.to_string(),
            date,
            amount_ml,
        });
        Ok(())
    }

    pub fn add_comment(
        &mut self,
        plant_id: u64,
        date: NaiveDate,
        content: &str,
    ) -> Result<(), GrowlogError> {
        let plant = self.plant_mut(plant_id)?;
        plant.comments.push(Comment {
            plant_id,
            date,
            content: content.to_string(),
        });
        Ok(())
    }

    pub fn get_measurements(&self, plant_id: u64) -> Result<&[Measurement], GrowlogError> {
        self.get_plant(plant_id)
            .map(|p| p.measurements.as_slice())
            .ok_or(GrowlogError::PlantNotFound(plant_id))
    }

    pub fn get_nutrients(&self, plant_id: u64) -> Result<&[Nutrient], GrowlogError> {
        self.get_plant(plant_id)
            .map(|p| p.nutrients.as_slice())
            .ok_or(GrowlogError::PlantNotFound(plant_id))
    }

    pub fn get_comments(&self, plant_id: u64) -> Result<&[Comment], GrowlogError> {
        self.get_plant(plant_id)
            .map(|p| p.comments.as_slice())
            .ok_or(GrowlogError::PlantNotFound(plant_id))
    }

    fn plant_mut(&mut self, id: u64) -> Result<&mut Plant, GrowlogError> {
        self.plants
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GrowlogError::PlantNotFound(id))
    }
}

impl Default for Garden {
    fn default() -> Self {
        Self::new()
    }
}
