//! JSON-file building store — the development/mock backend.
//!
//! One file holds the full building list, the same shape the browser's
//! localStorage held. Reads go through row normalization so legacy dumps in
//! either key spelling load cleanly.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::rows::BuildingRow;
use crate::{BuildingRepository, StoreError};
use rally_core::{next_building_id, next_floor_id, next_riser_id, Building, Floor, Riser};

/// Resolve the default data directory (~/.rally/).
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rally")
}

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Open the store under ~/.rally/, seeding sample data on first use.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(data_dir().join("buildings.json"))
    }

    /// Open a store at an explicit path, seeding it if the file is missing.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let store = Self { path };
        if !store.path.exists() {
            store.write_all(&seed_buildings())?;
            tracing::debug!(path = %store.path.display(), "seeded local store");
        }
        Ok(store)
    }

    fn read_all(&self) -> Result<Vec<Building>, StoreError> {
        let raw = fs::read_to_string(&self.path)?;
        let rows: Vec<BuildingRow> = serde_json::from_str(&raw)?;
        Ok(rows.into_iter().map(BuildingRow::into_building).collect())
    }

    /// Atomic write (temp file + rename) so a concurrent reader never sees a
    /// half-written building list.
    fn write_all(&self, buildings: &[Building]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(buildings)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn with_building<T>(
        &self,
        id: i64,
        edit: impl FnOnce(&mut Building) -> T,
    ) -> Result<T, StoreError> {
        let mut all = self.read_all()?;
        let building = all
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let out = edit(building);
        self.write_all(&all)?;
        Ok(out)
    }

    // --- Nested floor/riser edits (admin operations) ---

    /// Append a floor to a building, allocating its id.
    pub fn add_floor(
        &self,
        building_id: i64,
        number: i32,
        description: &str,
    ) -> Result<Floor, StoreError> {
        self.with_building(building_id, |b| {
            let floor = Floor {
                id: next_floor_id(b),
                number,
                description: description.to_string(),
            };
            b.floors.push(floor.clone());
            floor
        })
    }

    pub fn remove_floor(&self, building_id: i64, floor_id: i64) -> Result<(), StoreError> {
        self.with_building(building_id, |b| {
            b.floors.retain(|f| f.id != floor_id);
        })
    }

    /// Append a riser to a building, allocating its id.
    pub fn add_riser(&self, building_id: i64, mut riser: Riser) -> Result<Riser, StoreError> {
        self.with_building(building_id, |b| {
            riser.id = next_riser_id(b);
            b.risers.push(riser.clone());
            riser
        })
    }

    pub fn remove_riser(&self, building_id: i64, riser_id: i64) -> Result<(), StoreError> {
        self.with_building(building_id, |b| {
            b.risers.retain(|r| r.id != riser_id);
        })
    }
}

#[async_trait]
impl BuildingRepository for LocalStore {
    async fn list(&self) -> Result<Vec<Building>, StoreError> {
        self.read_all()
    }

    async fn get(&self, id: i64) -> Result<Building, StoreError> {
        self.read_all()?
            .into_iter()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, mut building: Building) -> Result<Building, StoreError> {
        let mut all = self.read_all()?;
        if building.id == 0 {
            building.id = next_building_id(&all);
            all.push(building.clone());
        } else {
            let slot = all
                .iter_mut()
                .find(|b| b.id == building.id)
                .ok_or(StoreError::NotFound(building.id))?;
            *slot = building.clone();
        }
        self.write_all(&all)?;
        Ok(building)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut all = self.read_all()?;
        all.retain(|b| b.id != id);
        self.write_all(&all)
    }
}

/// First-run sample data, matching the shape the web client expects.
fn seed_buildings() -> Vec<Building> {
    vec![Building {
        id: 1,
        name: "Test Building 1".to_string(),
        address: "123 Test St".to_string(),
        technology_summary: "Huawei Equipment".to_string(),
        complexity_percentage: 75,
        required_technicians: 2,
        parking_type: "Underground".to_string(),
        parking_instructions: "Use side entrance".to_string(),
        direction: "North".to_string(),
        floors: Vec::new(),
        risers: Vec::new(),
        images: Vec::new(),
        tech_pdfs: Vec::new(),
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("buildings.json")).unwrap();
        (dir, store)
    }

    fn riser(number: &str, floors_covered: &str) -> Riser {
        Riser {
            id: 0,
            number: number.to_string(),
            floors_covered: floors_covered.to_string(),
            location_description: String::new(),
        }
    }

    #[tokio::test]
    async fn open_seeds_sample_building_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildings.json");
        let store = LocalStore::open(path.clone()).unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        store.delete(1).await.unwrap();

        // Reopening an existing file must not reseed.
        let store = LocalStore::open(path).unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_allocates_id_and_round_trips() {
        let (_dir, store) = temp_store();
        let mut building = seed_buildings().remove(0);
        building.id = 0;
        building.name = "Annex".to_string();
        let saved = store.save(building).await.unwrap();
        assert_eq!(saved.id, 2);
        assert_eq!(store.get(2).await.unwrap().name, "Annex");
    }

    #[tokio::test]
    async fn save_replaces_existing_building() {
        let (_dir, store) = temp_store();
        let mut building = store.get(1).await.unwrap();
        building.direction = "South".to_string();
        store.save(building).await.unwrap();
        assert_eq!(store.get(1).await.unwrap().direction, "South");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn save_of_unknown_id_is_not_found() {
        let (_dir, store) = temp_store();
        let mut building = store.get(1).await.unwrap();
        building.id = 99;
        assert!(matches!(
            store.save(building).await,
            Err(StoreError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn get_of_missing_building_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(store.get(42).await, Err(StoreError::NotFound(42))));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let (_dir, store) = temp_store();
        store.delete(1).await.unwrap();
        store.delete(1).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn nested_floor_and_riser_edits() {
        let (_dir, store) = temp_store();
        let floor = store.add_floor(1, 24, "Penthouse").unwrap();
        assert_eq!(floor.id, 1);
        let east = store.add_riser(1, riser("East", "24")).unwrap();
        let west = store.add_riser(1, riser("West", "24")).unwrap();
        assert_eq!((east.id, west.id), (1, 2));

        let building = store.get(1).await.unwrap();
        assert_eq!(building.floors.len(), 1);
        assert_eq!(building.risers.len(), 2);

        store.remove_riser(1, east.id).unwrap();
        store.remove_floor(1, floor.id).unwrap();
        let building = store.get(1).await.unwrap();
        assert!(building.floors.is_empty());
        assert_eq!(building.risers[0].number, "West");
    }

    #[tokio::test]
    async fn nested_edit_on_missing_building_fails() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.add_floor(42, 1, ""),
            Err(StoreError::NotFound(42))
        ));
    }

    #[tokio::test]
    async fn legacy_snake_case_file_loads_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buildings.json");
        fs::write(
            &path,
            r#"[{
                "id": 1,
                "name": "Legacy",
                "technology_summary": "GPON",
                "risers": [{"id": 1, "number": "East", "floors_covered": "1-5",
                            "location_description": "riser closet"}]
            }]"#,
        )
        .unwrap();

        let store = LocalStore::open(path).unwrap();
        let building = store.get(1).await.unwrap();
        assert_eq!(building.technology_summary, "GPON");
        assert_eq!(building.risers[0].floors_covered, "1-5");
        assert_eq!(building.risers[0].location_description, "riser closet");
    }
}
