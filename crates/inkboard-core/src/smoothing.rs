//! Incremental curve smoothing.
//!
//! Each new sample retroactively adjusts the curve through the *previous*
//! point using a Catmull-Rom-style tangent estimate, so a sparse stream of
//! straight samples renders as a continuous curve.

use crate::path::{PathCommand, StrokePath};
use kurbo::Point;

/// Smoothing aggressiveness. The lower this number, the smoother the line.
pub const ANGULARITY: f64 = 3.0;

/// What [`append_point`] did with the sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    /// A command was appended (and possibly the previous one amended).
    Appended,
    /// The sample equalled one of the two previous endpoints and was dropped.
    DuplicateDropped,
    /// The tangent norm was too small to scale safely; a degenerate straight
    /// segment was appended instead of the smoothed one.
    DegenerateFallback,
}

/// Distance between two points.
fn dist(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Append one sample to a stroke's path, smoothing the curve through the
/// previous point.
///
/// With fewer than two points there is not enough history to estimate
/// curvature: the first sample opens the path with a `MoveTo`, the second
/// appends a segment whose control points collapse onto the endpoints. From
/// the third sample on, the tangent at the previous point is estimated from
/// its two neighbors, the previous command's trailing control point is
/// amended accordingly, and the new command gets the matching leading control
/// point. The math is branch-for-branch deterministic; identical input
/// sequences produce bit-identical command lists.
pub fn append_point(path: &mut StrokePath, p: Point) -> AppendOutcome {
    let (prev, ante) = (path.last_endpoint(), path.ante_endpoint());
    match (prev, ante) {
        (None, _) => {
            path.push(PathCommand::MoveTo(p));
            AppendOutcome::Appended
        }
        (Some(prev), None) => {
            path.push(PathCommand::CurveTo { c1: prev, c2: p, to: p });
            AppendOutcome::Appended
        }
        (Some(prev), Some(ante)) => {
            // Redundant pointer events would produce zero-length or kinked
            // segments; drop the sample without touching the path.
            if p == prev || p == ante {
                return AppendOutcome::DuplicateDropped;
            }

            let v = p - ante;
            let norm = v.hypot();
            if norm < f64::EPSILON {
                // Near-duplicate of the ante point: scaling by 1/norm would
                // blow up, so fall back to the two-point degenerate form.
                path.push(PathCommand::CurveTo { c1: prev, c2: p, to: p });
                return AppendOutcome::DegenerateFallback;
            }

            // Scale the tangent asymmetrically toward whichever neighbor is
            // closer, so the curve bends with local point spacing.
            let dist1 = dist(ante, prev) / norm;
            let dist2 = dist(p, prev) / norm;
            let v = v / ANGULARITY;

            let before = prev - dist1 * v;
            let after = prev + dist2 * v;

            path.amend_tail_control(before);
            path.push(PathCommand::CurveTo { c1: after, c2: p, to: p });
            AppendOutcome::Appended
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-12, "{a:?} != {b:?}");
        assert!((a.y - b.y).abs() < 1e-12, "{a:?} != {b:?}");
    }

    #[test]
    fn test_first_point_is_move_to() {
        let mut path = StrokePath::new();
        let outcome = append_point(&mut path, Point::new(3.0, 4.0));
        assert_eq!(outcome, AppendOutcome::Appended);
        assert_eq!(path.commands(), &[PathCommand::MoveTo(Point::new(3.0, 4.0))]);
    }

    #[test]
    fn test_second_point_degenerate_segment() {
        let mut path = StrokePath::new();
        append_point(&mut path, Point::new(0.0, 0.0));
        append_point(&mut path, Point::new(10.0, 0.0));

        assert_eq!(
            path.commands()[1],
            PathCommand::CurveTo {
                c1: Point::new(0.0, 0.0),
                c2: Point::new(10.0, 0.0),
                to: Point::new(10.0, 0.0),
            }
        );
    }

    #[test]
    fn test_duplicate_of_previous_point_dropped() {
        let mut path = StrokePath::new();
        append_point(&mut path, Point::new(0.0, 0.0));
        append_point(&mut path, Point::new(10.0, 0.0));
        let before = path.clone();

        let outcome = append_point(&mut path, Point::new(10.0, 0.0));
        assert_eq!(outcome, AppendOutcome::DuplicateDropped);
        assert_eq!(path, before);
    }

    #[test]
    fn test_duplicate_of_ante_point_dropped() {
        let mut path = StrokePath::new();
        append_point(&mut path, Point::new(0.0, 0.0));
        append_point(&mut path, Point::new(10.0, 0.0));
        let before = path.clone();

        let outcome = append_point(&mut path, Point::new(0.0, 0.0));
        assert_eq!(outcome, AppendOutcome::DuplicateDropped);
        assert_eq!(path, before);
    }

    #[test]
    fn test_smoothing_amends_previous_control_point() {
        // (0,0) -> (10,0) -> (10,10): both neighbors of (10,0) are 10 units
        // away, the tangent is (10,10) with norm sqrt(200).
        let mut path = StrokePath::new();
        append_point(&mut path, Point::new(0.0, 0.0));
        append_point(&mut path, Point::new(10.0, 0.0));
        append_point(&mut path, Point::new(10.0, 10.0));

        let norm = 200f64.sqrt();
        let offset = 10.0 / norm * 10.0 / ANGULARITY;
        let before = Point::new(10.0 - offset, -offset);
        let after = Point::new(10.0 + offset, offset);

        match path.commands()[1] {
            PathCommand::CurveTo { c2, .. } => assert_point_eq(c2, before),
            _ => panic!("expected a CurveTo"),
        }
        match path.commands()[2] {
            PathCommand::CurveTo { c1, c2, to } => {
                assert_point_eq(c1, after);
                assert_eq!(c2, Point::new(10.0, 10.0));
                assert_eq!(to, Point::new(10.0, 10.0));
            }
            _ => panic!("expected a CurveTo"),
        }
    }

    #[test]
    fn test_asymmetric_neighbor_spacing() {
        // The previous point sits much closer to the new sample than to the
        // ante point; the leading offset must be proportionally smaller.
        let mut path = StrokePath::new();
        append_point(&mut path, Point::new(0.0, 0.0));
        append_point(&mut path, Point::new(20.0, 0.0));
        append_point(&mut path, Point::new(22.0, 0.0));

        let norm = 22.0;
        let dist1 = 20.0 / norm;
        let dist2 = 2.0 / norm;
        let vx = 22.0 / ANGULARITY;

        match path.commands()[1] {
            PathCommand::CurveTo { c2, .. } => {
                assert_point_eq(c2, Point::new(20.0 - dist1 * vx, 0.0));
            }
            _ => panic!("expected a CurveTo"),
        }
        match path.commands()[2] {
            PathCommand::CurveTo { c1, .. } => {
                assert_point_eq(c1, Point::new(20.0 + dist2 * vx, 0.0));
            }
            _ => panic!("expected a CurveTo"),
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let samples = [
            Point::new(0.0, 0.0),
            Point::new(3.5, 1.25),
            Point::new(7.0, 8.0),
            Point::new(7.0, 8.0),
            Point::new(12.25, 4.5),
            Point::new(20.0, 20.0),
        ];

        let mut first = StrokePath::new();
        let mut second = StrokePath::new();
        for p in samples {
            append_point(&mut first, p);
            append_point(&mut second, p);
        }

        assert_eq!(first, second);
    }

    #[test]
    fn test_near_zero_tangent_falls_back() {
        let mut path = StrokePath::new();
        append_point(&mut path, Point::new(0.0, 0.0));
        append_point(&mut path, Point::new(10.0, 0.0));

        // Not equal to either neighbor, but close enough to the ante point
        // that 1/norm is unusable.
        let outcome = append_point(&mut path, Point::new(1e-17, 0.0));
        assert_eq!(outcome, AppendOutcome::DegenerateFallback);
        assert_eq!(path.len(), 3);
        assert_eq!(
            path.commands()[2],
            PathCommand::CurveTo {
                c1: Point::new(10.0, 0.0),
                c2: Point::new(1e-17, 0.0),
                to: Point::new(1e-17, 0.0),
            }
        );
        // The previous command's trailing control point is left alone.
        match path.commands()[1] {
            PathCommand::CurveTo { c2, .. } => assert_eq!(c2, Point::new(10.0, 0.0)),
            _ => panic!("expected a CurveTo"),
        }
    }
}
