// Summary statistics derived from a set of wintering areas
use super::wintering_area::SizeCategory;

#[derive(Debug, Clone, PartialEq)]
pub struct SizeHistogram {
    buckets: Vec<(SizeCategory, usize)>,
}

impl SizeHistogram {
    pub fn new(buckets: Vec<(SizeCategory, usize)>) -> Self {
        Self { buckets }
    }

    /// Buckets in ascending size order, including empty ones.
    pub fn buckets(&self) -> &[(SizeCategory, usize)] {
        &self.buckets
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, n)| n).sum()
    }
}

/// Per-region counts, south to north, listing only regions that hold an area.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionSummary {
    counts: Vec<(String, usize)>,
}

impl RegionSummary {
    pub fn new(counts: Vec<(String, usize)>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[(String, usize)] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Scalar size statistics in km². All zero for an empty set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaStatistics {
    pub count: usize,
    pub sizes: SizeStatistics,
    pub histogram: SizeHistogram,
    pub regions: RegionSummary,
}
