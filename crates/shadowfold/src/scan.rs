//! The slope-interval scanner: recursive shadow casting driven by an
//! explicit stack, folding caller state through visibility callbacks.

use shadowfold_core::{Point, Range};

use crate::distance::{DistanceFn, euclidean};
use crate::error::FovError;
use crate::octant::{OCTANTS_8, Octant};

/// Callbacks threaded through one scan.
///
/// The scanner owns no output: everything it learns is delivered through
/// these hooks, which fold an opaque state value `S` forward and hand the
/// final value back from [`evaluate`]. The opacity oracle
/// [`is_blocked`](Viewer::is_blocked) is queried against the *latest*
/// folded state, not the initial one, so visibility decisions made earlier
/// in a scan can influence later occlusion.
///
/// The hooks default to identity. Implementations may have side effects or
/// read mutable state outside the fold, but the oracle must then be safe
/// to call with a partially-updated fold.
pub trait Viewer<S> {
    /// Whether the cell at `p` blocks sight, given the current folded state.
    fn is_blocked(&self, state: &S, p: Point) -> bool;

    /// Called once per scan, before any cell is reported visible.
    fn on_start(&self, state: S, _origin: Point) -> S {
        state
    }

    /// Called once per emitted cell, origin included (at distance 0).
    ///
    /// Diagonal cells sit on the edge shared by two adjacent octants and
    /// may be reported twice per scan; all other cells arrive once.
    fn on_visible(&self, state: S, _p: Point, _distance: f64) -> S {
        state
    }

    /// Called exactly once, after the octants and the cardinal rays. The
    /// result is the scan's return value.
    fn on_end(&self, state: S) -> S {
        state
    }
}

/// Configuration for [`evaluate`]: scan bounds, direction table, and
/// distance metric.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Candidate cells outside these bounds are skipped, without stopping
    /// the traversal. `None` means unbounded.
    pub bounds: Option<Range>,
    /// Direction transforms, one octant walk per entry.
    pub directions: Vec<Octant>,
    /// Distance metric over local octant offsets.
    pub metric: DistanceFn,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            bounds: None,
            directions: OCTANTS_8.to_vec(),
            metric: euclidean,
        }
    }
}

impl ScanConfig {
    #[inline]
    fn in_bounds(&self, p: Point) -> bool {
        self.bounds.is_none_or(|b| b.contains(p))
    }
}

/// A resumption point in the simulated recursion: scan `row` onward,
/// restricted to the slope window `[finish, start]`.
#[derive(Debug, Clone, Copy)]
struct Frame {
    row: i32,
    start: f64,
    finish: f64,
}

/// Compute visibility from `origin` out to `radius`, folding `state`
/// through the viewer's hooks and returning the final fold.
///
/// Delivery order: `on_start`, then the origin at distance 0, then each
/// octant of the direction table in table order, then the four cardinal
/// rays in `+x, -x, +y, -y` order, then `on_end`. Within one octant cells
/// arrive row by row outward; across octants no finer ordering is
/// guaranteed.
///
/// The radius is inclusive: a cell whose distance equals `radius` is
/// still reported. A zero radius visits only the origin.
///
/// # Errors
///
/// Returns [`FovError::InvalidRadius`] if `radius` is negative, NaN, or
/// infinite.
pub fn evaluate<S, V: Viewer<S>>(
    state: S,
    origin: Point,
    radius: f64,
    viewer: &V,
    config: &ScanConfig,
) -> Result<S, FovError> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(FovError::InvalidRadius(radius));
    }

    let mut state = viewer.on_start(state, origin);
    state = viewer.on_visible(state, origin, 0.0);

    for &oct in &config.directions {
        state = scan_octant(state, viewer, origin, radius, oct, config);
    }
    state = cardinal_rays(state, viewer, origin, radius, config);

    Ok(viewer.on_end(state))
}

/// Walk one octant: a depth-first traversal of rows, each bounded by a
/// slope interval, splitting the interval where occlusion begins and ends.
fn scan_octant<S, V: Viewer<S>>(
    mut state: S,
    viewer: &V,
    origin: Point,
    radius: f64,
    oct: Octant,
    config: &ScanConfig,
) -> S {
    let mut stack = vec![Frame {
        row: 1,
        start: 1.0,
        finish: 0.0,
    }];

    while let Some(frame) = stack.pop() {
        // An empty or reversed window is a resumption point pushed for a
        // sibling split that turned out not to be needed; drop it.
        if frame.start < frame.finish {
            continue;
        }
        let mut start = frame.start;
        let finish = frame.finish;
        let mut new_start = 0.0;
        let mut blocked = false;

        let mut dy = -frame.row;
        while (dy as f64) >= -radius && !blocked {
            let dyf = dy as f64;
            // Reciprocals straddling the row's cell edges. `dy` is always
            // negative here, so neither denominator can be zero.
            let inv_near = 1.0 / (dyf + 0.5);
            let inv_far = 1.0 / (dyf - 0.5);
            let mut left_slope = (dyf - 1.5) * inv_near;
            let mut right_slope = (dyf - 0.5) * inv_far;

            for dx in dy..0 {
                left_slope += inv_near;
                right_slope += inv_far;
                let p = origin + oct.apply(dx, dy);

                // A cell before the window's near edge (or out of bounds)
                // is skipped but still feeds the occlusion tracking below.
                if config.in_bounds(p) && start >= right_slope {
                    if finish > left_slope {
                        // Past the far occlusion edge; the rest of the row
                        // lies deeper in the shadow.
                        break;
                    }
                    let distance = (config.metric)(dx, dy);
                    if distance <= radius {
                        state = viewer.on_visible(state, p, distance);
                    }
                }

                if blocked {
                    if viewer.is_blocked(&state, p) {
                        new_start = right_slope;
                    } else {
                        blocked = false;
                        start = new_start;
                    }
                } else if viewer.is_blocked(&state, p) && ((-dy) as f64) < radius {
                    // Occlusion opens: deeper rows of the already-scanned
                    // part of the window continue in a child frame clipped
                    // to the blocker's left edge.
                    blocked = true;
                    stack.push(Frame {
                        row: -dy + 1,
                        start,
                        finish: left_slope,
                    });
                    new_start = right_slope;
                }
            }
            // Leaving the row while still blocked abandons the frame; the
            // pushed child carries the continuation.
            dy -= 1;
        }
    }
    state
}

/// Four straight walks along the axes, run after the octants.
///
/// Rays emit the stepped cell before checking it, so the hook also fires
/// for the cell that stops the ray (blocked or out of bounds). This is
/// the opposite of the octant walk, which checks before emitting.
fn cardinal_rays<S, V: Viewer<S>>(
    mut state: S,
    viewer: &V,
    origin: Point,
    radius: f64,
    config: &ScanConfig,
) -> S {
    for (sx, sy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
        for i in 1..=radius as i32 {
            let p = Point::new(origin.x + sx * i, origin.y + sy * i);
            state = viewer.on_visible(state, p, i as f64);
            if !config.in_bounds(p) || viewer.is_blocked(&state, p) {
                break;
            }
        }
    }
    state
}
