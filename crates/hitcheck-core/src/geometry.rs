//! Region membership test.
//!
//! The region is split by the signs of `x` and `y`. Every boundary is
//! closed and comparisons are exact; no tolerance is applied, since that
//! would move points on the edges.

/// Whether `(x, y)` lies inside the region scaled by `r`.
///
/// Quadrants are tested in a fixed order so that points on an axis are
/// decided by the first matching branch. The three closed shapes agree
/// with each other on the axes they share, and all of them take precedence
/// over the empty quadrant: the positive y axis belongs to the rectangle
/// and the negative x axis to the circle.
pub fn classify(x: f64, y: f64, r: f64) -> bool {
    let half = r / 2.0;

    if x >= 0.0 && y >= 0.0 {
        // Rectangle [0, r/2] x [0, r].
        return x <= half && y <= r;
    }

    if x >= 0.0 && y <= 0.0 {
        // Right triangle with legs r/2 along both axes.
        return x <= half && y >= -r && x + y.abs() <= half;
    }

    if x <= 0.0 && y <= 0.0 {
        // Quarter circle of radius r/2.
        return x * x + y * y <= half * half;
    }

    // x <= 0, y >= 0: nothing there. Also reached by NaN input.
    false
}
