// Dashboard service - Use case for building the wintering area dashboard
use crate::application::aggregation_service::{aggregate, classify_regions};
use crate::application::area_source::WinteringAreaSource;
use crate::domain::dashboard::Dashboard;
use crate::domain::statistics::AreaStatistics;
use crate::domain::widgets::{
    CategoryValue, ChartData, ChartKind, LegendEntry, MapLayer, MapMarker, TextSection, TileData,
};
use crate::domain::wintering_area::{SizeCategory, WinteringArea};
use crate::infrastructure::config::MapConfig;
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub const DASHBOARD_TITLE: &str = "Analysis of Maine's Deer Wintering Areas";

#[derive(Clone)]
pub struct DashboardService {
    source: Arc<dyn WinteringAreaSource>,
    map_config: MapConfig,
}

impl DashboardService {
    pub fn new(source: Arc<dyn WinteringAreaSource>, map_config: MapConfig) -> Self {
        Self { source, map_config }
    }

    /// Fetch once, aggregate and build the dashboard. Any fetch failure is returned as is.
    pub async fn load_dashboard(&self) -> anyhow::Result<Dashboard> {
        let features = self.source.fetch_areas().await?;
        let fetched_at = Utc::now();
        tracing::info!(features = features.len(), "Fetched wintering areas");

        let areas = classify_regions(features);
        let stats = aggregate(&areas);
        tracing::info!(
            count = stats.count,
            total_km2 = stats.sizes.total,
            regions = stats.regions.counts().len(),
            "Aggregated wintering areas"
        );

        Ok(build_dashboard(&areas, &stats, &self.map_config, fetched_at))
    }
}

pub fn build_dashboard(
    areas: &[WinteringArea],
    stats: &AreaStatistics,
    map_config: &MapConfig,
    fetched_at: DateTime<Utc>,
) -> Dashboard {
    Dashboard {
        title: DASHBOARD_TITLE.to_string(),
        fetched_at,
        tiles: build_tiles(stats),
        map: build_map(areas, map_config),
        charts: vec![build_size_chart(stats), build_region_chart(stats)],
        sections: build_sections(stats),
    }
}

fn build_tiles(stats: &AreaStatistics) -> Vec<TileData> {
    vec![
        TileData::new("total_areas", "Total Wintering Areas", None, stats.count as f64, 0),
        TileData::new("total_area", "Total Protected Area", Some("km²"), stats.sizes.total, 2),
        TileData::new("average_area", "Average Area Size", Some("km²"), stats.sizes.mean, 2),
        TileData::new("median_area", "Median Area Size", Some("km²"), stats.sizes.median, 2),
        TileData::new("largest_area", "Largest Area", Some("km²"), stats.sizes.max, 2),
    ]
}

fn build_map(areas: &[WinteringArea], map_config: &MapConfig) -> MapLayer {
    let markers: Vec<MapMarker> = areas
        .iter()
        .map(|area| {
            let category = area.size_category();
            MapMarker {
                id: area.id.clone(),
                lat: area.lat(),
                lon: area.lon(),
                category: category.label().to_string(),
                color: category.color().to_string(),
                area_km2: area.area_km2,
                region: area.region.clone(),
                town: area.town.clone(),
            }
        })
        .collect();

    // Centre on the mean centroid, or the configured fallback when there is nothing to show
    let (center_lat, center_lon) = if markers.is_empty() {
        (map_config.center_lat, map_config.center_lon)
    } else {
        let n = markers.len() as f64;
        (
            markers.iter().map(|m| m.lat).sum::<f64>() / n,
            markers.iter().map(|m| m.lon).sum::<f64>() / n,
        )
    };

    MapLayer {
        title: "Maine Deer Wintering Areas by Size".to_string(),
        style: map_config.style.clone(),
        zoom: map_config.zoom,
        center_lat,
        center_lon,
        markers,
        legend: SizeCategory::ALL
            .iter()
            .map(|c| LegendEntry {
                label: c.label().to_string(),
                color: c.color().to_string(),
            })
            .collect(),
    }
}

fn build_size_chart(stats: &AreaStatistics) -> ChartData {
    let values = stats
        .histogram
        .buckets()
        .iter()
        .map(|(category, count)| {
            CategoryValue::new(
                category.label().to_string(),
                *count as f64,
                Some(category.color().to_string()),
            )
        })
        .collect();

    ChartData::new(
        "size_distribution",
        "Distribution of Deer Wintering Area Sizes in Maine",
        ChartKind::Bar,
        Some("Size Category"),
        Some("Number of Areas"),
        values,
    )
}

fn build_region_chart(stats: &AreaStatistics) -> ChartData {
    let values = stats
        .regions
        .counts()
        .iter()
        .map(|(region, count)| CategoryValue::new(region.clone(), *count as f64, None))
        .collect();

    ChartData::new(
        "region_distribution",
        "Distribution of Deer Wintering Areas by Region",
        ChartKind::Pie,
        None,
        None,
        values,
    )
}

fn build_sections(stats: &AreaStatistics) -> Vec<TextSection> {
    let dataset = TextSection::new("dataset", "Dataset").paragraph(
        "Deer Wintering Areas published by the Maine Department of Inland Fisheries and \
         Wildlife (DIFW). These mapped polygons mark the habitat where deer gather for shelter \
         when deep snow and cold make winter survival difficult.",
    );

    if stats.count == 0 {
        return vec![
            dataset.paragraph("The GeoService returned no wintering areas, so there is nothing to summarise."),
        ];
    }

    let mut findings = TextSection::new("findings", "Key Findings");

    if let Some((category, count)) = stats.histogram.buckets().iter().max_by_key(|(_, n)| *n) {
        findings = findings.bullet(format!(
            "{} of {} areas ({:.1}%) fall in the {} category.",
            count,
            stats.count,
            *count as f64 * 100.0 / stats.count as f64,
            category.label(),
        ));
    }

    // Ties go to the southernmost region
    if let Some((region, count)) = stats.regions.counts().iter().rev().max_by_key(|(_, n)| *n) {
        findings = findings.bullet(format!("{region} holds the most wintering areas ({count})."));
    }

    findings = findings.bullet(format!(
        "Sizes range from {:.2} km² to {:.2} km², with a median of {:.2} km².",
        stats.sizes.min, stats.sizes.max, stats.sizes.median,
    ));

    vec![dataset, findings]
}
