//! Supabase (PostgREST) building store.
//!
//! Fetch, insert and delete only — auth/session handling and file upload live
//! elsewhere. Buildings are fetched with their nested floors, risers, images
//! and PDFs in one select; rows come back snake_case and are normalized at
//! the boundary.

use async_trait::async_trait;
use reqwest::Method;

use crate::rows::BuildingRow;
use crate::{BuildingRepository, StoreError};
use rally_core::Building;

const NESTED_SELECT: &str = "*,floors(*),risers(*),images(*),tech_pdfs(*)";

pub struct RemoteStore {
    base_url: String,
    anon_key: String,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            client: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(StoreError::Rejected {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            })
        }
    }

    async fn fetch_rows(&self, path: &str) -> Result<Vec<BuildingRow>, StoreError> {
        tracing::debug!(path, "fetching buildings");
        let resp = self.request(Method::GET, path).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    /// Scalar columns written on save. Nested floors/risers/images/PDFs have
    /// their own tables and are edited through their own admin operations.
    fn building_columns(building: &Building) -> serde_json::Value {
        serde_json::json!({
            "name": building.name,
            "address": building.address,
            "technology_summary": building.technology_summary,
            "complexity_percentage": building.complexity_percentage,
            "required_technicians": building.required_technicians,
            "parking_type": building.parking_type,
            "parking_instructions": building.parking_instructions,
            "direction": building.direction,
        })
    }
}

#[async_trait]
impl BuildingRepository for RemoteStore {
    async fn list(&self) -> Result<Vec<Building>, StoreError> {
        let rows = self
            .fetch_rows(&format!("buildings?select={NESTED_SELECT}"))
            .await?;
        Ok(rows.into_iter().map(BuildingRow::into_building).collect())
    }

    async fn get(&self, id: i64) -> Result<Building, StoreError> {
        let rows = self
            .fetch_rows(&format!("buildings?select={NESTED_SELECT}&id=eq.{id}"))
            .await?;
        rows.into_iter()
            .next()
            .map(BuildingRow::into_building)
            .ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, building: Building) -> Result<Building, StoreError> {
        let columns = Self::building_columns(&building);
        let resp = if building.id == 0 {
            self.request(Method::POST, "buildings")
                .header("Prefer", "return=representation")
                .json(&columns)
                .send()
                .await?
        } else {
            self.request(Method::PATCH, &format!("buildings?id=eq.{}", building.id))
                .header("Prefer", "return=representation")
                .json(&columns)
                .send()
                .await?
        };
        let rows: Vec<BuildingRow> = Self::check(resp).await?.json().await?;
        rows.into_iter()
            .next()
            .map(BuildingRow::into_building)
            .ok_or(StoreError::NotFound(building.id))
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let resp = self
            .request(Method::DELETE, &format!("buildings?id=eq.{id}"))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
