use relief_core::{Cell, Point};

/// Cost of moving between two adjacent cells: the Euclidean distance
/// between `(a.x, a.y, a.cost)` and `(b.x, b.y, b.cost)`.
#[inline]
pub fn edge_cost(a: &Cell, b: &Cell) -> f64 {
    length(a.pos(), a.cost(), b.pos(), b.cost())
}

#[inline]
pub(crate) fn length(a: Point, a_cost: f64, b: Point, b_cost: f64) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    let dz = a_cost - b_cost;
    (dx * dx + dy * dy + dz * dz).sqrt()
}
