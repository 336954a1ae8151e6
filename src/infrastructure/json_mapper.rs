// Mapper to convert domain models to the JSON payload consumed by the page
use crate::domain::dashboard::Dashboard;
use crate::domain::widgets::{
    CategoryValue, ChartData, ChartKind, LegendEntry, MapLayer, MapMarker, TextSection, TileData,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub title: String,
    pub fetched_at: String,
    pub tiles: Vec<TilePayload>,
    pub map: MapPayload,
    pub charts: Vec<ChartPayload>,
    pub sections: Vec<SectionPayload>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TilePayload {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub value: f64,
    pub precision: i32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPayload {
    pub title: String,
    pub style: String,
    pub zoom: f64,
    pub center: CenterPayload,
    pub markers: Vec<MarkerPayload>,
    pub legend: Vec<LegendPayload>,
}

#[derive(Debug, Serialize)]
pub struct CenterPayload {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerPayload {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub color: String,
    pub area_km2: f64,
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LegendPayload {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub id: String,
    pub title: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct SectionPayload {
    pub id: String,
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub bullets: Vec<String>,
}

pub fn dashboard_to_payload(dashboard: Dashboard) -> DashboardPayload {
    DashboardPayload {
        title: dashboard.title,
        fetched_at: dashboard.fetched_at.to_rfc3339(),
        tiles: dashboard.tiles.into_iter().map(tile_to_payload).collect(),
        map: map_to_payload(dashboard.map),
        charts: dashboard.charts.into_iter().map(chart_to_payload).collect(),
        sections: dashboard.sections.into_iter().map(section_to_payload).collect(),
    }
}

fn tile_to_payload(tile: TileData) -> TilePayload {
    TilePayload {
        id: tile.id,
        title: tile.title,
        unit: tile.unit,
        value: tile.value,
        precision: tile.precision,
    }
}

fn map_to_payload(map: MapLayer) -> MapPayload {
    MapPayload {
        title: map.title,
        style: map.style,
        zoom: map.zoom,
        center: CenterPayload {
            lat: map.center_lat,
            lon: map.center_lon,
        },
        markers: map.markers.into_iter().map(marker_to_payload).collect(),
        legend: map
            .legend
            .into_iter()
            .map(|LegendEntry { label, color }| LegendPayload { label, color })
            .collect(),
    }
}

fn marker_to_payload(marker: MapMarker) -> MarkerPayload {
    MarkerPayload {
        id: marker.id,
        lat: marker.lat,
        lon: marker.lon,
        category: marker.category,
        color: marker.color,
        area_km2: marker.area_km2,
        region: marker.region,
        town: marker.town,
    }
}

/// Charts are flattened into parallel arrays, which is what Plotly traces take.
fn chart_to_payload(chart: ChartData) -> ChartPayload {
    let kind = match chart.kind {
        ChartKind::Bar => "bar",
        ChartKind::Pie => "pie",
    };

    // Colours only go out when every value has one
    let colors: Option<Vec<String>> = chart.values.iter().map(|v| v.color.clone()).collect();
    let (labels, values): (Vec<String>, Vec<f64>) = chart
        .values
        .into_iter()
        .map(|CategoryValue { label, value, .. }| (label, value))
        .unzip();

    ChartPayload {
        id: chart.id,
        title: chart.title,
        kind,
        x_label: chart.x_label,
        y_label: chart.y_label,
        labels,
        values,
        colors: colors.filter(|c| !c.is_empty()),
    }
}

fn section_to_payload(section: TextSection) -> SectionPayload {
    SectionPayload {
        id: section.id,
        heading: section.heading,
        paragraphs: section.paragraphs,
        bullets: section.bullets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn dashboard() -> Dashboard {
        Dashboard {
            title: "Deer".to_string(),
            fetched_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            tiles: vec![TileData::new("total_areas", "Total Wintering Areas", None, 3.0, 0)],
            map: MapLayer {
                title: "Map".to_string(),
                style: "carto-positron".to_string(),
                zoom: 7.0,
                center_lat: 45.0,
                center_lon: -69.0,
                markers: vec![MapMarker {
                    id: "1".to_string(),
                    lat: 45.0,
                    lon: -69.0,
                    category: "Small (< 1 km²)".to_string(),
                    color: "#98FB98".to_string(),
                    area_km2: 0.5,
                    region: "Central Maine".to_string(),
                    town: None,
                }],
                legend: vec![LegendEntry {
                    label: "Small (< 1 km²)".to_string(),
                    color: "#98FB98".to_string(),
                }],
            },
            charts: vec![
                ChartData::new(
                    "size_distribution",
                    "Sizes",
                    ChartKind::Bar,
                    Some("Size Category"),
                    Some("Number of Areas"),
                    vec![CategoryValue::new("Small".to_string(), 1.0, Some("#98FB98".to_string()))],
                ),
                ChartData::new(
                    "region_distribution",
                    "Regions",
                    ChartKind::Pie,
                    None,
                    None,
                    vec![CategoryValue::new("Central Maine".to_string(), 1.0, None)],
                ),
            ],
            sections: vec![TextSection::new("dataset", "Dataset").paragraph("DIFW data")],
        }
    }

    #[test]
    fn test_dashboard_payload_shape() {
        let value = serde_json::to_value(dashboard_to_payload(dashboard())).unwrap();

        assert_eq!(value["fetchedAt"], "2024-01-15T12:00:00+00:00");
        assert_eq!(value["tiles"][0], json!({
            "id": "total_areas",
            "title": "Total Wintering Areas",
            "value": 3.0,
            "precision": 0
        }));
        assert_eq!(value["map"]["center"], json!({ "lat": 45.0, "lon": -69.0 }));
        assert_eq!(value["map"]["markers"][0]["areaKm2"], 0.5);
        assert!(value["map"]["markers"][0].get("town").is_none());

        let bar = &value["charts"][0];
        assert_eq!(bar["kind"], "bar");
        assert_eq!(bar["xLabel"], "Size Category");
        assert_eq!(bar["colors"], json!(["#98FB98"]));

        let pie = &value["charts"][1];
        assert_eq!(pie["kind"], "pie");
        assert_eq!(pie["labels"], json!(["Central Maine"]));
        assert!(pie.get("colors").is_none());
        assert!(pie.get("xLabel").is_none());
    }
}
