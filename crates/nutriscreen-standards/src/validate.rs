//! Structural checks applied to every table before it is accepted.
//!
//! A table that passes here can be looked up without further checking:
//! bands are contiguous and ordered from most to least severe undernutrition,
//! every grid point between the first and last entry is present (unless the
//! boundary section is marked sparse), and every SD is positive.

use std::collections::BTreeMap;

use crate::error::StandardsError;
use crate::file::{BoundarySection, DistributionSection, TableFile};
use crate::table::{
    Band, BoundarySet, BoundaryTable, DistributionPoint, DistributionTable, Grid, GridIndex,
    IndexKind, ReferenceTable,
};

/// Tolerance for the `min[i] == max[i-1] + resolution` contiguity rule.
const CONTIGUITY_TOLERANCE: f64 = 1e-6;

struct Ctx<'a> {
    table: &'a str,
}

impl Ctx<'_> {
    fn defect(&self, index: Option<f64>, message: impl Into<String>) -> StandardsError {
        StandardsError::Defect {
            table: self.table.to_string(),
            index,
            message: message.into(),
        }
    }
}

/// Validate a parsed file and convert it into a lookup-ready table.
pub fn build_table(name: &str, file: TableFile) -> Result<ReferenceTable, StandardsError> {
    let ctx = Ctx { table: name };

    if file.boundaries.is_none() && file.distribution.is_none() {
        return Err(ctx.defect(None, "table has neither boundaries nor distribution"));
    }

    let boundaries = file
        .boundaries
        .map(|section| build_boundaries(&ctx, file.index, section))
        .transpose()?;
    let distribution = file
        .distribution
        .map(|section| build_distribution(&ctx, file.index, section))
        .transpose()?;

    Ok(ReferenceTable {
        indicator: file.indicator,
        sex: file.sex,
        index: file.index,
        version: file.version,
        source: file.source,
        boundaries,
        distribution,
    })
}

fn build_boundaries(
    ctx: &Ctx<'_>,
    kind: IndexKind,
    section: BoundarySection,
) -> Result<BoundaryTable, StandardsError> {
    if !(section.resolution.is_finite() && section.resolution > 0.0) {
        return Err(ctx.defect(None, "boundary resolution must be positive"));
    }

    let indices: Vec<f64> = section.entries.iter().map(|e| e.index).collect();
    let grid = check_grid(ctx, kind, section.step, &indices, !section.sparse)?;

    let mut entries = BTreeMap::new();
    for entry in section.entries {
        check_bands(ctx, entry.index, &entry.bands, section.resolution)?;
        entries.insert(GridIndex::from_value(entry.index), BoundarySet::new(entry.bands));
    }

    Ok(BoundaryTable {
        grid,
        resolution: section.resolution,
        sparse: section.sparse,
        entries,
    })
}

fn build_distribution(
    ctx: &Ctx<'_>,
    kind: IndexKind,
    section: DistributionSection,
) -> Result<DistributionTable, StandardsError> {
    let indices: Vec<f64> = section.entries.iter().map(|e| e.index).collect();
    let grid = check_grid(ctx, kind, section.step, &indices, true)?;

    let mut entries = BTreeMap::new();
    for entry in section.entries {
        if !(entry.median.is_finite() && entry.median > 0.0) {
            return Err(ctx.defect(Some(entry.index), "median must be positive"));
        }
        if !(entry.sd.is_finite() && entry.sd > 0.0) {
            return Err(ctx.defect(
                Some(entry.index),
                format!("sd must be positive, got {}", entry.sd),
            ));
        }
        entries.insert(
            GridIndex::from_value(entry.index),
            DistributionPoint {
                median: entry.median,
                sd: entry.sd,
            },
        );
    }

    Ok(DistributionTable { grid, entries })
}

/// Check entry indices against the section grid and return it.
///
/// Indices must be strictly ascending and sit on `start + k * step`. Age
/// indices must be whole months. When `dense` is set, no grid point between
/// the first and last entry may be missing.
fn check_grid(
    ctx: &Ctx<'_>,
    kind: IndexKind,
    step: f64,
    indices: &[f64],
    dense: bool,
) -> Result<Grid, StandardsError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(ctx.defect(None, "grid step must be positive"));
    }
    let (Some(&start), Some(&end)) = (indices.first(), indices.last()) else {
        return Err(ctx.defect(None, "section has no entries"));
    };
    let grid = Grid { start, end, step };

    for pair in indices.windows(2) {
        if pair[1] <= pair[0] {
            return Err(ctx.defect(
                Some(pair[1]),
                "indices must be strictly ascending without duplicates",
            ));
        }
    }

    for &index in indices {
        if !index.is_finite() || index < 0.0 {
            return Err(ctx.defect(Some(index), "index must be a non-negative number"));
        }
        if kind == IndexKind::AgeMonths && index.fract() != 0.0 {
            return Err(ctx.defect(Some(index), "age index must be a whole month"));
        }
        if !grid.is_aligned(index) {
            return Err(ctx.defect(
                Some(index),
                format!("index is not on the {step} grid starting at {start}"),
            ));
        }
    }

    if dense {
        let expected = ((end - start) / step).round() as usize + 1;
        if indices.len() != expected {
            return Err(ctx.defect(
                None,
                format!(
                    "expected {expected} entries between {start} and {end}, found {}",
                    indices.len()
                ),
            ));
        }
    }

    Ok(grid)
}

/// Check that one entry's bands partition the real line.
///
/// The first band is open below, the last open above, and each band starts
/// exactly one `resolution` step after the previous band's max. Labels must be
/// assessed categories in strictly increasing severity rank.
fn check_bands(
    ctx: &Ctx<'_>,
    index: f64,
    bands: &[Band],
    resolution: f64,
) -> Result<(), StandardsError> {
    let at = Some(index);
    let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
        return Err(ctx.defect(at, "entry has no bands"));
    };
    if first.min.is_some() {
        return Err(ctx.defect(at, "first band must be unbounded below"));
    }
    if last.max.is_some() {
        return Err(ctx.defect(at, "last band must be unbounded above"));
    }

    let mut prev_rank = None;
    for (i, band) in bands.iter().enumerate() {
        let Some(rank) = band.label.rank() else {
            return Err(ctx.defect(
                at,
                format!("'{}' is not a nutritional category", band.label),
            ));
        };
        if prev_rank.is_some_and(|prev| rank <= prev) {
            return Err(ctx.defect(
                at,
                format!("'{}' is out of order or repeated", band.label),
            ));
        }
        prev_rank = Some(rank);

        if i + 1 < bands.len() && band.max.is_none() {
            return Err(ctx.defect(at, format!("'{}' needs a max", band.label)));
        }
        if let (Some(min), Some(max)) = (band.min, band.max)
            && min > max + CONTIGUITY_TOLERANCE
        {
            return Err(ctx.defect(at, format!("'{}' has min above max", band.label)));
        }
        if i > 0 {
            let prev_max = bands[i - 1].max.unwrap_or(f64::INFINITY);
            let Some(min) = band.min else {
                return Err(ctx.defect(at, format!("'{}' needs a min", band.label)));
            };
            let gap = min - prev_max;
            if (gap - resolution).abs() > CONTIGUITY_TOLERANCE {
                let problem = if gap < resolution { "overlaps" } else { "leaves a gap after" };
                return Err(ctx.defect(
                    at,
                    format!("'{}' {problem} '{}'", band.label, bands[i - 1].label),
                ));
            }
        }
    }
    Ok(())
}
