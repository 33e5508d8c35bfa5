use kurbo::Point;

/// Registry of the transient icon clones.
///
/// At most one set exists at a time and it has one clone per icon. The
/// generation tells a freshly spawned set apart from an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloneSet {
    pub generation: u64,
    pub count: usize,
}

/// Position of a clone `local` of the way through the dispersal phase.
///
/// The first half moves only vertically from `start` to the target row,
/// the second half only horizontally to the target column.
pub fn clone_center(start: Point, target: Point, local: f64) -> Point {
    let delta = target - start;
    if local <= 0.5 {
        let vertical = local / 0.5;
        Point::new(start.x, start.y + delta.y * vertical)
    } else {
        let horizontal = (local - 0.5) / 0.5;
        Point::new(start.x + delta.x * horizontal, target.y)
    }
}

/// Top-left corner that centres a `size` px square on `center`.
pub fn top_left(center: Point, size: f64) -> Point {
    Point::new(center.x - size / 2.0, center.y - size / 2.0)
}
