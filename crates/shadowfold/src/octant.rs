//! The direction table: coordinate transforms for the eight octants.

use shadowfold_core::Point;

/// A linear transform mapping canonical-octant offsets to world offsets.
///
/// The scanner always walks one canonical wedge of local `(dx, dy)` cells;
/// applying each transform of a direction table reflects and rotates that
/// wedge around the origin. The world offset of a local cell is
/// `(xx·dx + xy·dy, yx·dx + yy·dy)`.
///
/// [`OCTANTS_8`] covers the full circle. Since the table is plain data, a
/// caller can pass a partial table (e.g. a single wedge) or a denser
/// symmetry set through [`ScanConfig::directions`](crate::ScanConfig)
/// without the scanner changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Octant {
    pub xx: i32,
    pub xy: i32,
    pub yx: i32,
    pub yy: i32,
}

impl Octant {
    /// Create a transform from its four coefficients.
    pub const fn new(xx: i32, xy: i32, yx: i32, yy: i32) -> Self {
        Self { xx, xy, yx, yy }
    }

    /// World offset of the local `(dx, dy)` cell.
    #[inline]
    pub const fn apply(self, dx: i32, dy: i32) -> Point {
        Point::new(self.xx * dx + self.xy * dy, self.yx * dx + self.yy * dy)
    }
}

/// The eight reflections and rotations of the canonical wedge, covering
/// every off-axis cell around the origin. Octants are independent; the
/// table order only fixes the order in which hooks observe cells.
pub const OCTANTS_8: [Octant; 8] = [
    Octant::new(0, -1, -1, 0),
    Octant::new(-1, 0, 0, -1),
    Octant::new(0, 1, -1, 0),
    Octant::new(1, 0, 0, -1),
    Octant::new(0, -1, 1, 0),
    Octant::new(-1, 0, 0, 1),
    Octant::new(0, 1, 1, 0),
    Octant::new(1, 0, 0, 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn eight_transforms_tile_the_off_axis_plane() {
        // Applying every transform to the canonical wedge reaches each
        // off-axis cell within the depth; diagonal cells are shared by two
        // adjacent octants.
        let mut count: HashMap<Point, i32> = HashMap::new();
        for oct in OCTANTS_8 {
            for dy in -3..=-1 {
                for dx in dy..0 {
                    *count.entry(oct.apply(dx, dy)).or_insert(0) += 1;
                }
            }
        }
        for x in -3..=3 {
            for y in -3..=3 {
                let got = count.get(&Point::new(x, y)).copied().unwrap_or(0);
                if x == 0 || y == 0 {
                    assert_eq!(got, 0, "axis cell ({x}, {y}) belongs to the rays");
                } else if x.abs() == y.abs() {
                    assert_eq!(got, 2, "diagonal cell ({x}, {y})");
                } else {
                    assert_eq!(got, 1, "interior cell ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn apply_is_linear() {
        let oct = Octant::new(0, -1, -1, 0);
        assert_eq!(oct.apply(-2, -3), Point::new(3, 2));
        assert_eq!(oct.apply(0, 0), Point::ZERO);
    }
}
