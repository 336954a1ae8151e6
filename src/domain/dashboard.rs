// Dashboard domain model
use super::widgets::{ChartData, MapLayer, TextSection, TileData};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub title: String,
    pub fetched_at: DateTime<Utc>,
    pub tiles: Vec<TileData>,
    pub map: MapLayer,
    pub charts: Vec<ChartData>,
    pub sections: Vec<TextSection>,
}
