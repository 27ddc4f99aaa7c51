pub mod floors;
pub mod locate;
pub mod session;

use serde::{Deserialize, Serialize};

// --- Types (matching the web client's building model) ---

/// A single level of a building. `number` may be negative for below-grade
/// levels (parking, utility basements).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: i64,
    pub number: i32,
    #[serde(default)]
    pub description: String,
}

/// A vertical cable run. `number` is a free-text label ("East", "Riser A"),
/// not unique and not numeric. Several risers covering the same floor is
/// normal, not bad data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Riser {
    pub id: i64,
    #[serde(default)]
    pub number: String,
    /// Raw coverage spec, e.g. "1-5,7,10-12". See [`floors::parse_floors`].
    #[serde(default)]
    pub floors_covered: String,
    #[serde(default)]
    pub location_description: String,
}

impl Riser {
    /// The expanded set of floors this riser covers.
    pub fn floor_set(&self) -> std::collections::BTreeSet<i32> {
        floors::parse_floors(&self.floors_covered)
    }

    pub fn covers(&self, floor: i32) -> bool {
        self.floor_set().contains(&floor)
    }

    /// Lowest covered floor. `None` when the coverage spec parses to nothing.
    pub fn min_floor(&self) -> Option<i32> {
        self.floor_set().first().copied()
    }

    /// Highest covered floor. `None` when the coverage spec parses to nothing.
    pub fn max_floor(&self) -> Option<i32> {
        self.floor_set().last().copied()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BuildingImage {
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub image_type: String,
    /// Other buildings this image is shared with.
    #[serde(default)]
    pub linked_building_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TechPdf {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub linked_building_ids: Vec<i64>,
}

/// One building with its floors, risers and attached documentation. The
/// locating logic reads `floors`/`risers`; images and PDFs are carried for
/// the store and the client but never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub technology_summary: String,
    #[serde(default)]
    pub complexity_percentage: u8,
    #[serde(default)]
    pub required_technicians: u32,
    #[serde(default)]
    pub parking_type: String,
    #[serde(default)]
    pub parking_instructions: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub risers: Vec<Riser>,
    #[serde(default)]
    pub images: Vec<BuildingImage>,
    #[serde(rename = "techPDFs", default)]
    pub tech_pdfs: Vec<TechPdf>,
}

fn default_direction() -> String {
    "N/A".to_string()
}

// --- Id allocation (max existing + 1, matching the frontend pattern) ---

pub fn next_building_id(buildings: &[Building]) -> i64 {
    buildings.iter().map(|b| b.id).max().unwrap_or(0) + 1
}

pub fn next_floor_id(building: &Building) -> i64 {
    building.floors.iter().map(|f| f.id).max().unwrap_or(0) + 1
}

pub fn next_riser_id(building: &Building) -> i64 {
    building.risers.iter().map(|r| r.id).max().unwrap_or(0) + 1
}
