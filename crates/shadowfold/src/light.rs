//! Lighting falloff layered on top of the visibility fold.

use shadowfold_core::Point;

use crate::error::FovError;
use crate::scan::{ScanConfig, Viewer, evaluate};

/// Adapter viewer whose folded state is the brightness emitter itself.
struct Torch<B> {
    origin: Point,
    power: f64,
    opaque: B,
}

impl<B, E> Viewer<E> for Torch<B>
where
    B: Fn(Point) -> bool,
    E: FnMut(Point, f64),
{
    fn is_blocked(&self, _state: &E, p: Point) -> bool {
        (self.opaque)(p)
    }

    fn on_visible(&self, mut emit: E, p: Point, distance: f64) -> E {
        let radius = self.power.abs();
        let mut brightness = if radius > 0.0 {
            1.0 - distance / radius
        } else {
            1.0
        };
        let d = p - self.origin;
        if d.x == 0 || d.y == 0 || d.x.abs() == d.y.abs() {
            brightness *= 0.5;
        }
        if self.power < 0.0 {
            brightness = -brightness;
        }
        emit(p, brightness);
        emit
    }
}

/// Cast light (or darkness) from `origin` with the given `power`.
///
/// The sight radius is `|power|`. Every visible cell is reported through
/// `emit` with a linearly decaying brightness, from full at the origin
/// down to zero at the radius edge. Axis-aligned and diagonal cells (the
/// origin among them) carry half weight, so that light accumulated over
/// the doubly-reported diagonals stays even, and the whole falloff is
/// negated when `power` is negative.
///
/// This is ordinary caller logic over [`evaluate`]; any other intensity
/// formula can be expressed the same way with a custom [`Viewer`].
///
/// # Errors
///
/// Returns [`FovError::InvalidRadius`] if `power` is NaN or infinite.
pub fn illuminate<B, E>(
    origin: Point,
    power: f64,
    config: &ScanConfig,
    opaque: B,
    emit: E,
) -> Result<(), FovError>
where
    B: Fn(Point) -> bool,
    E: FnMut(Point, f64),
{
    let torch = Torch {
        origin,
        power,
        opaque,
    };
    evaluate(emit, origin, power.abs(), &torch, config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(power: f64, opaque: impl Fn(Point) -> bool) -> Vec<(Point, f64)> {
        let mut out = Vec::new();
        illuminate(Point::ZERO, power, &ScanConfig::default(), opaque, |p, b| {
            out.push((p, b));
        })
        .unwrap();
        out
    }

    fn brightness_at(out: &[(Point, f64)], p: Point) -> Vec<f64> {
        out.iter()
            .filter(|&&(q, _)| q == p)
            .map(|&(_, b)| b)
            .collect()
    }

    #[test]
    fn linear_falloff_values() {
        let out = lit(4.0, |_| false);

        // Axis cell at distance 2 of 4: (1 - 0.5) halved.
        assert_eq!(brightness_at(&out, Point::new(2, 0)), vec![0.25]);
        // The origin counts as axis-aligned.
        assert_eq!(brightness_at(&out, Point::ZERO), vec![0.5]);

        // Interior cell, full weight.
        let b = brightness_at(&out, Point::new(1, 2));
        assert_eq!(b.len(), 1);
        let expected = 1.0 - (5.0_f64).sqrt() / 4.0;
        assert!((b[0] - expected).abs() < 1e-12);

        // Diagonal cell: two half-weight reports.
        let b = brightness_at(&out, Point::new(1, 1));
        assert_eq!(b.len(), 2);
        let expected = (1.0 - (2.0_f64).sqrt() / 4.0) / 2.0;
        assert!((b[0] - expected).abs() < 1e-12);
        assert!((b[1] - expected).abs() < 1e-12);
    }

    #[test]
    fn negative_power_casts_darkness() {
        let out = lit(-4.0, |_| false);
        assert_eq!(brightness_at(&out, Point::new(2, 0)), vec![-0.25]);
    }

    #[test]
    fn zero_power_lights_only_the_origin() {
        let out = lit(0.0, |_| false);
        assert_eq!(out, vec![(Point::ZERO, 0.5)]);
    }

    #[test]
    fn opaque_cells_shadow_the_light() {
        let wall = Point::new(2, 1);
        let out = lit(5.0, move |p| p == wall);
        assert_eq!(brightness_at(&out, wall).len(), 1);
        assert!(brightness_at(&out, Point::new(3, 1)).is_empty());
        assert_eq!(brightness_at(&out, Point::new(3, 2)).len(), 1);
    }

    #[test]
    fn non_finite_power_is_rejected() {
        let r = illuminate(
            Point::ZERO,
            f64::NAN,
            &ScanConfig::default(),
            |_| false,
            |_, _| {},
        );
        assert!(matches!(r, Err(FovError::InvalidRadius(_))));
    }
}
