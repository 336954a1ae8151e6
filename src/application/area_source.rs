// Source trait for wintering area data
use crate::domain::wintering_area::AreaFeature;
use async_trait::async_trait;

#[async_trait]
pub trait WinteringAreaSource: Send + Sync {
    /// Fetch every wintering area currently published upstream.
    async fn fetch_areas(&self) -> anyhow::Result<Vec<AreaFeature>>;
}
