// Aggregation - region classification and summary statistics
use crate::domain::statistics::{AreaStatistics, RegionSummary, SizeHistogram, SizeStatistics};
use crate::domain::wintering_area::{
    AreaFeature, LatitudeBands, SizeCategory, WinteringArea, LATITUDE_BAND_LABELS,
};
use std::collections::BTreeMap;

/// Label every feature with the latitude band its centroid falls in.
pub fn classify_regions(features: Vec<AreaFeature>) -> Vec<WinteringArea> {
    let Some(bands) = LatitudeBands::spanning(&features) else {
        return Vec::new();
    };

    features
        .into_iter()
        .map(|feature| {
            let region = bands.label(feature.centroid.y());
            WinteringArea::new(feature, region)
        })
        .collect()
}

pub fn aggregate(areas: &[WinteringArea]) -> AreaStatistics {
    AreaStatistics {
        count: areas.len(),
        sizes: size_statistics(areas),
        histogram: size_histogram(areas),
        regions: region_summary(areas),
    }
}

pub fn size_histogram(areas: &[WinteringArea]) -> SizeHistogram {
    let mut counts: BTreeMap<SizeCategory, usize> =
        SizeCategory::ALL.iter().map(|c| (*c, 0)).collect();

    for area in areas {
        *counts.entry(area.size_category()).or_default() += 1;
    }

    SizeHistogram::new(counts.into_iter().collect())
}

/// Regions are listed in latitude band order. Labels outside the known bands
/// sort after them, alphabetically.
pub fn region_summary(areas: &[WinteringArea]) -> RegionSummary {
    let mut counts: BTreeMap<(usize, &str), usize> = BTreeMap::new();
    for area in areas {
        let rank = LATITUDE_BAND_LABELS
            .iter()
            .position(|label| *label == area.region)
            .unwrap_or(LATITUDE_BAND_LABELS.len());
        *counts.entry((rank, area.region.as_str())).or_insert(0) += 1;
    }

    RegionSummary::new(
        counts
            .into_iter()
            .map(|((_, region), count)| (region.to_string(), count))
            .collect(),
    )
}

pub fn size_statistics(areas: &[WinteringArea]) -> SizeStatistics {
    if areas.is_empty() {
        return SizeStatistics::default();
    }

    let mut sizes: Vec<f64> = areas.iter().map(|a| a.area_km2).collect();
    sizes.sort_by(f64::total_cmp);

    let total: f64 = sizes.iter().sum();
    let mid = sizes.len() / 2;
    let median = if sizes.len() % 2 == 0 {
        (sizes[mid - 1] + sizes[mid]) / 2.0
    } else {
        sizes[mid]
    };

    SizeStatistics {
        min: sizes[0],
        max: sizes[sizes.len() - 1],
        mean: total / sizes.len() as f64,
        median,
        total,
    }
}
