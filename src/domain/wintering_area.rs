// Wintering area domain model
use geo::Point;

/// A feature fetched from the GeoService, before it is assigned a region.
/// The centroid is stored as (x = longitude, y = latitude) in WGS84.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFeature {
    pub id: String,
    pub town: Option<String>,
    pub area_km2: f64,
    pub centroid: Point<f64>,
}

impl AreaFeature {
    pub fn new(id: String, town: Option<String>, area_km2: f64, centroid: Point<f64>) -> Self {
        Self {
            id,
            town,
            area_km2,
            centroid,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WinteringArea {
    pub id: String,
    pub town: Option<String>,
    pub area_km2: f64,
    pub centroid: Point<f64>,
    pub region: String,
}

impl WinteringArea {
    pub fn new(feature: AreaFeature, region: impl Into<String>) -> Self {
        Self {
            id: feature.id,
            town: feature.town,
            area_km2: feature.area_km2,
            centroid: feature.centroid,
            region: region.into(),
        }
    }

    pub fn lat(&self) -> f64 {
        self.centroid.y()
    }

    pub fn lon(&self) -> f64 {
        self.centroid.x()
    }

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::from_area_km2(self.area_km2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    VeryLarge,
}

impl SizeCategory {
    pub const ALL: [SizeCategory; 4] = [
        SizeCategory::Small,
        SizeCategory::Medium,
        SizeCategory::Large,
        SizeCategory::VeryLarge,
    ];

    /// Buckets are right-closed: (0, 1], (1, 5], (5, 10], (10, inf).
    /// Anything not above 1 km² counts as small so every area lands somewhere.
    pub fn from_area_km2(area_km2: f64) -> Self {
        if area_km2 > 10.0 {
            SizeCategory::VeryLarge
        } else if area_km2 > 5.0 {
            SizeCategory::Large
        } else if area_km2 > 1.0 {
            SizeCategory::Medium
        } else {
            SizeCategory::Small
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SizeCategory::Small => "Small (< 1 km²)",
            SizeCategory::Medium => "Medium (1-5 km²)",
            SizeCategory::Large => "Large (5-10 km²)",
            SizeCategory::VeryLarge => "Very Large (>10 km²)",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SizeCategory::Small => "#98FB98",
            SizeCategory::Medium => "#228B22",
            SizeCategory::Large => "#006400",
            SizeCategory::VeryLarge => "#00008B",
        }
    }
}

pub const LATITUDE_BAND_LABELS: [&str; 4] = [
    "Southern Maine",
    "South-Central Maine",
    "Central Maine",
    "Northern Maine",
];

/// Four equal-width latitude bands spanning the observed centroids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeBands {
    min_lat: f64,
    max_lat: f64,
}

impl LatitudeBands {
    pub fn spanning<'a>(features: impl IntoIterator<Item = &'a AreaFeature>) -> Option<Self> {
        features
            .into_iter()
            .map(|f| f.centroid.y())
            .fold(None, |acc, lat| match acc {
                None => Some(Self {
                    min_lat: lat,
                    max_lat: lat,
                }),
                Some(b) => Some(Self {
                    min_lat: b.min_lat.min(lat),
                    max_lat: b.max_lat.max(lat),
                }),
            })
    }

    /// Bands are right-closed and the lowest latitude belongs to the first band.
    pub fn band_index(&self, lat: f64) -> usize {
        let span = self.max_lat - self.min_lat;
        if span <= 0.0 || lat <= self.min_lat {
            return 0;
        }
        let width = span / LATITUDE_BAND_LABELS.len() as f64;
        let index = ((lat - self.min_lat) / width).ceil() as usize;
        index.clamp(1, LATITUDE_BAND_LABELS.len()) - 1
    }

    pub fn label(&self, lat: f64) -> &'static str {
        LATITUDE_BAND_LABELS[self.band_index(lat)]
    }
}
