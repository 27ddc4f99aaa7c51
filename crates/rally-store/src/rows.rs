//! Raw persistence rows.
//!
//! Two historical key spellings exist in stored data: camelCase from the
//! mock/browser persistence path and snake_case from Postgres. Rows accept
//! both and normalize into the canonical `rally-core` shape at this boundary,
//! with camelCase preferred when a record carries both, so the locating logic
//! never sees a dual-key record.

use serde::Deserialize;

use rally_core::{Building, BuildingImage, Floor, Riser, TechPdf};

fn prefer<T>(camel: Option<T>, snake: Option<T>) -> Option<T> {
    camel.or(snake)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RiserRow {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub number: String,
    #[serde(rename = "floorsCovered")]
    floors_covered_camel: Option<String>,
    #[serde(rename = "floors_covered")]
    floors_covered_snake: Option<String>,
    #[serde(rename = "locationDescription")]
    location_description_camel: Option<String>,
    #[serde(rename = "location_description")]
    location_description_snake: Option<String>,
}

impl RiserRow {
    pub fn into_riser(self) -> Riser {
        Riser {
            id: self.id,
            number: self.number,
            floors_covered: prefer(self.floors_covered_camel, self.floors_covered_snake)
                .unwrap_or_default(),
            location_description: prefer(
                self.location_description_camel,
                self.location_description_snake,
            )
            .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImageRow {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub image_type: String,
    #[serde(rename = "linkedBuildingIds")]
    linked_camel: Option<Vec<i64>>,
    #[serde(rename = "linked_building_ids")]
    linked_snake: Option<Vec<i64>>,
}

impl ImageRow {
    pub fn into_image(self) -> BuildingImage {
        BuildingImage {
            id: self.id,
            url: self.url,
            image_type: self.image_type,
            linked_building_ids: prefer(self.linked_camel, self.linked_snake).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PdfRow {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "linkedBuildingIds")]
    linked_camel: Option<Vec<i64>>,
    #[serde(rename = "linked_building_ids")]
    linked_snake: Option<Vec<i64>>,
}

impl PdfRow {
    pub fn into_pdf(self) -> TechPdf {
        TechPdf {
            id: self.id,
            name: self.name,
            url: self.url,
            linked_building_ids: prefer(self.linked_camel, self.linked_snake).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildingRow {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "technologySummary")]
    technology_summary_camel: Option<String>,
    #[serde(rename = "technology_summary")]
    technology_summary_snake: Option<String>,
    #[serde(rename = "complexityPercentage")]
    complexity_camel: Option<u8>,
    #[serde(rename = "complexity_percentage")]
    complexity_snake: Option<u8>,
    #[serde(rename = "requiredTechnicians")]
    technicians_camel: Option<u32>,
    #[serde(rename = "required_technicians")]
    technicians_snake: Option<u32>,
    #[serde(rename = "parkingType")]
    parking_type_camel: Option<String>,
    #[serde(rename = "parking_type")]
    parking_type_snake: Option<String>,
    #[serde(rename = "parkingInstructions")]
    parking_instructions_camel: Option<String>,
    #[serde(rename = "parking_instructions")]
    parking_instructions_snake: Option<String>,
    direction: Option<String>,
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub risers: Vec<RiserRow>,
    #[serde(default)]
    pub images: Vec<ImageRow>,
    #[serde(rename = "techPDFs")]
    tech_pdfs_camel: Option<Vec<PdfRow>>,
    #[serde(rename = "tech_pdfs")]
    tech_pdfs_snake: Option<Vec<PdfRow>>,
}

impl BuildingRow {
    pub fn into_building(self) -> Building {
        Building {
            id: self.id,
            name: self.name,
            address: self.address,
            technology_summary: prefer(
                self.technology_summary_camel,
                self.technology_summary_snake,
            )
            .unwrap_or_default(),
            complexity_percentage: prefer(self.complexity_camel, self.complexity_snake)
                .unwrap_or_default(),
            required_technicians: prefer(self.technicians_camel, self.technicians_snake)
                .unwrap_or_default(),
            parking_type: prefer(self.parking_type_camel, self.parking_type_snake)
                .unwrap_or_default(),
            parking_instructions: prefer(
                self.parking_instructions_camel,
                self.parking_instructions_snake,
            )
            .unwrap_or_default(),
            direction: self.direction.unwrap_or_else(|| "N/A".to_string()),
            floors: self.floors,
            risers: self.risers.into_iter().map(RiserRow::into_riser).collect(),
            images: self.images.into_iter().map(ImageRow::into_image).collect(),
            tech_pdfs: prefer(self.tech_pdfs_camel, self.tech_pdfs_snake)
                .unwrap_or_default()
                .into_iter()
                .map(PdfRow::into_pdf)
                .collect(),
        }
    }
}
