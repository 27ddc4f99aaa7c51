pub mod local;
pub mod remote;
mod rows;

use async_trait::async_trait;
use thiserror::Error;

use rally_core::Building;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("building {0} not found")]
    NotFound(i64),
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store data: {0}")]
    Data(#[from] serde_json::Error),
    #[error("remote request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Abstract building data source. The locating core only ever sees building
/// snapshots; where they come from is this trait's concern.
#[async_trait]
pub trait BuildingRepository {
    async fn list(&self) -> Result<Vec<Building>, StoreError>;
    async fn get(&self, id: i64) -> Result<Building, StoreError>;
    /// Insert (id 0) or replace an existing building. Returns the stored
    /// building with its id filled in.
    async fn save(&self, building: Building) -> Result<Building, StoreError>;
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

// --- Backend selection ---

/// Which backend to talk to. Mock (local JSON) is forced when the remote
/// settings are incomplete, so a bare checkout works out of the box.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub use_mock: bool,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl StoreConfig {
    /// Read backend selection from the environment: `RALLY_USE_MOCK`,
    /// `RALLY_SUPABASE_URL`, `RALLY_SUPABASE_ANON_KEY`.
    pub fn from_env() -> Self {
        let use_mock = std::env::var("RALLY_USE_MOCK")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let supabase_url = std::env::var("RALLY_SUPABASE_URL")
            .ok()
            .filter(|s| !s.is_empty());
        let supabase_anon_key = std::env::var("RALLY_SUPABASE_ANON_KEY")
            .ok()
            .filter(|s| !s.is_empty());
        Self {
            use_mock,
            supabase_url,
            supabase_anon_key,
        }
    }

    /// Open the configured backend.
    pub fn open(&self) -> Result<Box<dyn BuildingRepository + Send + Sync>, StoreError> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(key)) if !self.use_mock => {
                tracing::info!(%url, "using Supabase store");
                Ok(Box::new(remote::RemoteStore::new(url.clone(), key.clone())))
            }
            _ => {
                tracing::info!("using local mock store");
                Ok(Box::new(local::LocalStore::open_default()?))
            }
        }
    }
}
