//! Path reconstruction and reveal progress.

use relief_core::{Grid, Point};

/// Walk the predecessor links from the end cell back to the start cell and
/// return the path in start-to-end order.
///
/// Returns an empty path when the walk does not end at the start cell,
/// which is how "no path found" is reported.
pub fn reconstruct_path(grid: &Grid) -> Vec<Point> {
    let (Some(start), Some(end)) = (grid.start(), grid.end()) else {
        return Vec::new();
    };

    // A walk longer than the lattice can only come from a predecessor cycle.
    let limit = grid.bounds().len();
    let mut path = Vec::new();
    let mut cur = Some(end);
    while let Some(p) = cur {
        if path.len() >= limit {
            log::warn!("predecessor cycle through {p}");
            return Vec::new();
        }
        path.push(p);
        cur = grid.at(p).and_then(|c| c.prev());
    }

    if path.last() != Some(&start) {
        return Vec::new();
    }
    path.reverse();
    path
}

/// Progress of each path cell: its distance divided by the end cell's.
///
/// A zero-length path (start equal to end) gets progress 0 everywhere.
pub fn reveal_progress(grid: &Grid, path: &[Point]) -> Vec<(Point, f64)> {
    let total = path
        .last()
        .and_then(|&p| grid.at(p))
        .map_or(0.0, |c| c.distance());

    path.iter()
        .map(|&p| {
            let d = grid.at(p).map_or(0.0, |c| c.distance());
            let progress = if total > 0.0 && total.is_finite() {
                (d / total).clamp(0.0, 1.0)
            } else {
                0.0
            };
            (p, progress)
        })
        .collect()
}

/// Write reveal progress onto every cell of `path` at once.
pub fn apply_reveal(grid: &mut Grid, path: &[Point]) {
    for (p, progress) in reveal_progress(grid, path) {
        if let Some(c) = grid.at_mut(p) {
            c.set_reveal(progress);
        }
    }
}
