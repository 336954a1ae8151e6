// Dashboard widget domain models

#[derive(Debug, Clone, PartialEq)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub value: f64,
    pub precision: i32,
}

impl TileData {
    pub fn new(id: &str, title: &str, unit: Option<&str>, value: f64, precision: i32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.map(str::to_string),
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

impl CategoryValue {
    pub fn new(label: String, value: f64, color: Option<String>) -> Self {
        Self {
            label,
            value,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub values: Vec<CategoryValue>,
}

impl ChartData {
    pub fn new(
        id: &str,
        title: &str,
        kind: ChartKind,
        x_label: Option<&str>,
        y_label: Option<&str>,
        values: Vec<CategoryValue>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            x_label: x_label.map(str::to_string),
            y_label: y_label.map(str::to_string),
            values,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub category: String,
    pub color: String,
    pub area_km2: f64,
    pub region: String,
    pub town: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapLayer {
    pub title: String,
    pub style: String,
    pub zoom: f64,
    pub center_lat: f64,
    pub center_lon: f64,
    pub markers: Vec<MapMarker>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextSection {
    pub id: String,
    pub heading: String,
    pub paragraphs: Vec<String>,
    pub bullets: Vec<String>,
}

impl TextSection {
    pub fn new(id: &str, heading: &str) -> Self {
        Self {
            id: id.to_string(),
            heading: heading.to_string(),
            ..Default::default()
        }
    }

    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.paragraphs.push(text.into());
        self
    }

    pub fn bullet(mut self, text: impl Into<String>) -> Self {
        self.bullets.push(text.into());
        self
    }
}
