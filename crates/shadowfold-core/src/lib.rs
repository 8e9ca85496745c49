//! Geometry primitives shared by the shadowfold crates.

mod geom;

pub use geom::{Point, Range, RangeIter};
