use nutriscreen_standards::table::{EPSILON, Grid};

/// The grid point nearest to `height_cm`, ties toward the lower point.
///
/// Returns `None` when the height lies outside the grid's `[start, end]`.
pub fn resolve_height_index(height_cm: f64, grid: &Grid) -> Option<f64> {
    if !height_cm.is_finite() || !grid.contains(height_cm) {
        return None;
    }
    let steps = (height_cm - grid.start) / grid.step;
    let lower = steps.floor();
    // Half-way between two points resolves downward.
    let chosen = if steps - lower > 0.5 + EPSILON {
        lower + 1.0
    } else {
        lower
    };
    let point = grid.start + chosen * grid.step;
    Some(point.min(grid.end))
}
