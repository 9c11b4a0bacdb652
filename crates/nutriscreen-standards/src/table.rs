use std::collections::BTreeMap;

use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::IndicatorKind;
use nutriscreen_core::models::sex::Sex;
use serde::{Deserialize, Serialize};

/// Tolerance for comparing measurements against band limits and grid points.
pub const EPSILON: f64 = 1e-9;

/// What a table is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    AgeMonths,
    HeightCm,
}

/// A table index stored in tenths, so 0.5 cm grid points compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridIndex(i32);

impl GridIndex {
    pub fn from_value(value: f64) -> Self {
        GridIndex((value * 10.0).round() as i32)
    }

    pub fn from_months(months: u32) -> Self {
        GridIndex(months as i32 * 10)
    }

    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

/// The evenly spaced index points a table is defined on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub start: f64,
    pub end: f64,
    pub step: f64,
}

impl Grid {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.start - EPSILON && value <= self.end + EPSILON
    }

    /// True if `value` sits exactly on a grid point.
    pub fn is_aligned(&self, value: f64) -> bool {
        let steps = (value - self.start) / self.step;
        (steps - steps.round()).abs() < 1e-6
    }
}

/// One classification band. `min: None` is −∞, `max: None` is +∞.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub label: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Ordered, contiguous bands covering the whole real line.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySet {
    bands: Vec<Band>,
}

impl BoundarySet {
    /// Bands must already have passed validation.
    pub(crate) fn new(bands: Vec<Band>) -> Self {
        BoundarySet { bands }
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// The band owning `value`: the first whose `max` is at or above it.
    ///
    /// Band *i* owns `(max[i-1], max[i]]`, so a value equal to a band's max
    /// stays in that band, and a value falling between one band's max and
    /// the next band's min (finer than the table resolution) belongs to the
    /// next band.
    pub fn classify(&self, value: f64) -> Option<Classification> {
        self.bands
            .iter()
            .find(|b| b.max.is_none_or(|max| value <= max + EPSILON))
            .map(|b| b.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistributionPoint {
    pub median: f64,
    pub sd: f64,
}

impl DistributionPoint {
    pub fn z_score(&self, observed: f64) -> f64 {
        (observed - self.median) / self.sd
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryTable {
    pub grid: Grid,
    /// Precision at which adjacent bands abut (0.1 kg).
    pub resolution: f64,
    /// Whether entries are intentionally missing from the grid.
    pub sparse: bool,
    pub(crate) entries: BTreeMap<GridIndex, BoundarySet>,
}

impl BoundaryTable {
    pub fn get(&self, index: GridIndex) -> Option<&BoundarySet> {
        self.entries.get(&index)
    }

    /// The entry nearest to `index` by absolute distance, ties toward the
    /// lower index.
    pub fn nearest(&self, index: GridIndex) -> Option<(GridIndex, &BoundarySet)> {
        let below = self.entries.range(..=index).next_back();
        let above = self.entries.range(index..).next();
        match (below, above) {
            (Some((lo, lo_set)), Some((hi, hi_set))) => {
                if (index.0 - lo.0) <= (hi.0 - index.0) {
                    Some((*lo, lo_set))
                } else {
                    Some((*hi, hi_set))
                }
            }
            (Some((i, s)), None) | (None, Some((i, s))) => Some((*i, s)),
            (None, None) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridIndex, &BoundarySet)> {
        self.entries.iter().map(|(i, s)| (*i, s))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionTable {
    pub grid: Grid,
    pub(crate) entries: BTreeMap<GridIndex, DistributionPoint>,
}

impl DistributionTable {
    pub fn get(&self, index: GridIndex) -> Option<&DistributionPoint> {
        self.entries.get(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GridIndex, &DistributionPoint)> {
        self.entries.iter().map(|(i, p)| (*i, p))
    }
}

/// All reference data for one indicator and sex.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub indicator: IndicatorKind,
    pub sex: Sex,
    pub index: IndexKind,
    pub version: String,
    pub source: String,
    pub boundaries: Option<BoundaryTable>,
    pub distribution: Option<DistributionTable>,
}

impl ReferenceTable {
    /// The index span covered by either table family.
    pub fn span(&self) -> Option<(f64, f64)> {
        let grids = self
            .boundaries
            .as_ref()
            .map(|b| b.grid)
            .into_iter()
            .chain(self.distribution.as_ref().map(|d| d.grid));
        grids.fold(None, |acc, g| match acc {
            None => Some((g.start, g.end)),
            Some((lo, hi)) => Some((lo.min(g.start), hi.max(g.end))),
        })
    }

    /// Human-readable name, e.g. `weight_for_age/male`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.indicator.id(), self.sex.id())
    }
}
