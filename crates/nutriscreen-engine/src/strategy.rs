//! The lookup chain every indicator resolves through.
//!
//! Tiers are tried in order and the first to produce an [`Outcome`] wins:
//! an exact boundary-table entry, the nearest entry of a sparse boundary
//! table, then the median/SD distribution. If none apply the outcome is
//! Unknown.

use nutriscreen_core::models::classification::Classification;
use nutriscreen_core::models::indicator::Method;
use nutriscreen_standards::table::{GridIndex, ReferenceTable};
use tracing::{debug, warn};

use crate::classify::{Scale, classify_z, round_to};

/// One indicator lookup against one table.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    pub table: &'a ReferenceTable,
    /// Index already resolved onto the table's finest grid.
    pub index: GridIndex,
    /// The measurement being classified (kg, cm or BMI).
    pub value: f64,
    pub scale: Scale,
}

/// What a tier concluded. `z_score` is unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub classification: Classification,
    pub z_score: Option<f64>,
    pub method: Option<Method>,
    /// The grid point whose reference data was used.
    pub index: GridIndex,
    pub median: Option<f64>,
    pub sd: Option<f64>,
    pub note: Option<String>,
}

pub trait Tier: Sync {
    fn name(&self) -> &'static str;

    /// `None` hands the query to the next tier.
    fn resolve(&self, query: &Query<'_>) -> Option<Outcome>;
}

/// Exact boundary-table entry for the resolved index.
pub struct BoundaryTier;

/// Nearest entry of a boundary table declared sparse.
pub struct NearestBoundaryTier;

/// z-score from the median/SD table.
pub struct DistributionTier;

static TIERS: [&dyn Tier; 3] = [&BoundaryTier, &NearestBoundaryTier, &DistributionTier];

/// Run the chain, falling back to Unknown when no tier applies.
pub fn resolve(query: &Query<'_>) -> Outcome {
    for tier in TIERS {
        if let Some(outcome) = tier.resolve(query) {
            debug!(
                table = %query.table.name(),
                index = query.index.value(),
                tier = tier.name(),
                classification = %outcome.classification,
                "indicator resolved"
            );
            return outcome;
        }
    }

    debug!(
        table = %query.table.name(),
        index = query.index.value(),
        "no tier could resolve indicator"
    );
    Outcome {
        classification: Classification::Unknown,
        z_score: None,
        method: None,
        index: query.index,
        median: None,
        sd: None,
        note: Some(format!(
            "No reference data for index {}",
            query.index.value()
        )),
    }
}

/// Build a lookup outcome from a boundary entry at `used`, reporting the
/// z-score from the distribution point at the same index when there is one.
///
/// The z is dropped when its reported (2 dp) value would map to a different
/// category than the boundary entry gave.
fn boundary_outcome(
    query: &Query<'_>,
    used: GridIndex,
    classification: Classification,
    note: Option<String>,
) -> Outcome {
    let point = query
        .table
        .distribution
        .as_ref()
        .and_then(|d| d.get(used));
    let z_score = point
        .map(|p| p.z_score(query.value))
        .filter(|&z| classify_z(round_to(z, 2), query.scale) == classification);
    if point.is_some() && z_score.is_none() {
        debug!(
            table = %query.table.name(),
            index = used.value(),
            %classification,
            "z-score disagrees with boundary entry, omitted"
        );
    }
    Outcome {
        classification,
        z_score,
        method: Some(Method::LookupTable),
        index: used,
        median: point.map(|p| p.median),
        sd: point.map(|p| p.sd),
        note,
    }
}

impl Tier for BoundaryTier {
    fn name(&self) -> &'static str {
        "boundary"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<Outcome> {
        let boundaries = query.table.boundaries.as_ref()?;
        if let Some(set) = boundaries.get(query.index) {
            let classification = set.classify(query.value)?;
            return Some(boundary_outcome(query, query.index, classification, None));
        }

        // A point on the table's own grid that has no entry is a hole in
        // the data. Points between grid lines simply are not tabulated.
        let at = query.index.value();
        if !boundaries.sparse && boundaries.grid.contains(at) && boundaries.grid.is_aligned(at) {
            warn!(
                table = %query.table.name(),
                index = at,
                "boundary table is missing an entry on its grid"
            );
        }
        None
    }
}

impl Tier for NearestBoundaryTier {
    fn name(&self) -> &'static str {
        "nearest_boundary"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<Outcome> {
        let boundaries = query.table.boundaries.as_ref()?;
        if !boundaries.sparse {
            return None;
        }
        let (used, set) = boundaries.nearest(query.index)?;
        let classification = set.classify(query.value)?;
        let note = format!(
            "Nearest boundary entry at {} used for {}",
            used.value(),
            query.index.value()
        );
        Some(boundary_outcome(query, used, classification, Some(note)))
    }
}

impl Tier for DistributionTier {
    fn name(&self) -> &'static str {
        "distribution"
    }

    fn resolve(&self, query: &Query<'_>) -> Option<Outcome> {
        let distribution = query.table.distribution.as_ref()?;
        let point = distribution.get(query.index)?;
        let z = point.z_score(query.value);
        Some(Outcome {
            classification: classify_z(z, query.scale),
            z_score: Some(z),
            method: Some(Method::Formula),
            index: query.index,
            median: Some(point.median),
            sd: Some(point.sd),
            note: None,
        })
    }
}
