//! Construction geometry for the proof scenes.
//!
//! Scenes author coordinates in scene units (origin at the canvas center,
//! y pointing up, [`SCENE_UNITS_TALL`] units of visible height); [`Stage`]
//! maps them into pixel space. Shape constructors return paths in local
//! pixel coordinates, positioned later by clip transforms.

use crate::{
    core::{BezPath, Canvas, Point, Vec2},
    error::{ProofreelError, ProofreelResult},
};

/// Visible scene height in units; width follows the canvas aspect ratio.
pub const SCENE_UNITS_TALL: f64 = 8.0;

#[derive(Clone, Copy, Debug)]
pub struct Stage {
    center: Vec2,
    px_per_unit: f64,
}

impl Stage {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            center: Vec2::new(
                f64::from(canvas.width) / 2.0,
                f64::from(canvas.height) / 2.0,
            ),
            px_per_unit: f64::from(canvas.height) / SCENE_UNITS_TALL,
        }
    }

    /// Scene-unit point (y up) to pixel position (y down).
    pub fn point(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(
            self.center.x + x * self.px_per_unit,
            self.center.y - y * self.px_per_unit,
        )
    }

    /// Scene-unit length to pixels.
    pub fn len(&self, units: f64) -> f64 {
        units * self.px_per_unit
    }

    /// Half the visible scene width in units.
    pub fn half_width_units(&self) -> f64 {
        self.center.x / self.px_per_unit
    }
}

/// Axis-aligned rectangle centered on the local origin.
pub fn rect_path(width: f64, height: f64) -> BezPath {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let mut p = BezPath::new();
    p.move_to(Point::new(-hw, -hh));
    p.line_to(Point::new(hw, -hh));
    p.line_to(Point::new(hw, hh));
    p.line_to(Point::new(-hw, hh));
    p.close_path();
    p
}

pub fn square_path(side: f64) -> BezPath {
    rect_path(side, side)
}

/// Closed polygon through the given local points.
pub fn polygon_path(points: &[Point]) -> ProofreelResult<BezPath> {
    if points.len() < 3 {
        return Err(ProofreelError::geometry(
            "polygon needs at least three points",
        ));
    }
    let mut p = BezPath::new();
    p.move_to(points[0]);
    for pt in &points[1..] {
        p.line_to(*pt);
    }
    p.close_path();
    Ok(p)
}

/// Open segment from `a` to `b` in local coordinates.
pub fn segment_path(a: Point, b: Point) -> BezPath {
    let mut p = BezPath::new();
    p.move_to(a);
    p.line_to(b);
    p
}

/// Curly dimension brace along the local x axis.
///
/// Runs from (-length/2, 0) to (length/2, 0) with the cusp at (0, depth);
/// two mirrored cubics meeting at the cusp. `depth > 0` bulges toward +y.
pub fn brace_path(length: f64, depth: f64) -> ProofreelResult<BezPath> {
    if !length.is_finite() || length <= 0.0 {
        return Err(ProofreelError::geometry(
            "brace length must be finite and > 0",
        ));
    }
    if !depth.is_finite() || depth == 0.0 {
        return Err(ProofreelError::geometry(
            "brace depth must be finite and nonzero",
        ));
    }

    let hl = length / 2.0;
    let s = (hl * 0.5).min(2.0 * depth.abs());

    let mut p = BezPath::new();
    p.move_to(Point::new(-hl, 0.0));
    p.curve_to(
        Point::new(-hl + s, depth),
        Point::new(-s, 0.0),
        Point::new(0.0, depth),
    );
    p.curve_to(
        Point::new(s, 0.0),
        Point::new(hl - s, depth),
        Point::new(hl, 0.0),
    );
    Ok(p)
}

/// A brace spanning `a` to `b`, bulging to the right of the a→b direction
/// (pixel space, y down). Returns the local path plus its placement.
pub fn brace_between(
    a: Point,
    b: Point,
    depth: f64,
) -> ProofreelResult<(BezPath, crate::core::Transform2D)> {
    let d = b - a;
    let length = d.hypot();
    if length < 1e-9 {
        return Err(ProofreelError::geometry("brace endpoints coincide"));
    }
    let path = brace_path(length, depth.abs())?;
    let mid = a.midpoint(b);
    let transform = crate::core::Transform2D::at(mid.to_vec2())
        .with_rotation(d.y.atan2(d.x));
    Ok((path, transform))
}

/// Anchor point for a brace's label: beyond the cusp by `gap`, on the
/// bulge side.
pub fn brace_label_anchor(a: Point, b: Point, depth: f64, gap: f64) -> Point {
    let d = b - a;
    let len = d.hypot().max(1e-9);
    let normal = Vec2::new(-d.y / len, d.x / len); // right of travel, y-down space
    let mid = a.midpoint(b);
    mid + normal * (depth.abs() + gap)
}

/// Hypotenuse of a right triangle with legs `a`, `b`.
pub fn hypotenuse(a: f64, b: f64) -> f64 {
    a.hypot(b)
}

/// Tilt of the inscribed square formed by four congruent right triangles
/// with legs `a` (vertical) and `b` (horizontal) around a square of side
/// `a + b`.
pub fn tilt_angle(leg_a: f64, leg_b: f64) -> f64 {
    leg_b.atan2(leg_a)
}

/// Real roots of `ax² + bx + c = 0`, larger root first.
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> ProofreelResult<(f64, f64)> {
    if a == 0.0 {
        return Err(ProofreelError::geometry(
            "quadratic coefficient a must be nonzero",
        ));
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Err(ProofreelError::geometry(
            "quadratic discriminant is negative (no real roots)",
        ));
    }
    let sq = disc.sqrt();
    let r1 = (-b + sq) / (2.0 * a);
    let r2 = (-b - sq) / (2.0 * a);
    Ok((r1.max(r2), r1.min(r2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape as _;

    #[test]
    fn stage_maps_center_and_flips_y() {
        let stage = Stage::new(Canvas {
            width: 1280,
            height: 720,
        });
        assert_eq!(stage.point(0.0, 0.0), Vec2::new(640.0, 360.0));
        // One unit up in scene space is 90px toward the top of the canvas.
        assert_eq!(stage.point(0.0, 1.0), Vec2::new(640.0, 270.0));
        assert_eq!(stage.len(2.0), 180.0);
    }

    #[test]
    fn rect_path_bounds_are_centered() {
        let p = rect_path(100.0, 40.0);
        let bb = p.bounding_box();
        assert_eq!(bb.x0, -50.0);
        assert_eq!(bb.x1, 50.0);
        assert_eq!(bb.y0, -20.0);
        assert_eq!(bb.y1, 20.0);
    }

    #[test]
    fn polygon_needs_three_points() {
        assert!(polygon_path(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).is_err());
        assert!(
            polygon_path(&[
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0)
            ])
            .is_ok()
        );
    }

    #[test]
    fn brace_spans_its_segment() {
        let p = brace_path(200.0, 14.0).unwrap();
        let bb = p.bounding_box();
        assert_eq!(bb.x0, -100.0);
        assert_eq!(bb.x1, 100.0);
        // The cusp reaches the requested depth and the baseline is flat.
        assert_eq!(bb.y0, 0.0);
        assert!((bb.y1 - 14.0).abs() < 1.0);
    }

    #[test]
    fn brace_between_rejects_degenerate_segment() {
        let a = Point::new(3.0, 3.0);
        assert!(brace_between(a, a, 10.0).is_err());
    }

    #[test]
    fn brace_between_places_midpoint_and_angle() {
        let (_, t) = brace_between(Point::new(0.0, 0.0), Point::new(0.0, 100.0), 12.0).unwrap();
        assert_eq!(t.translate, Vec2::new(0.0, 50.0));
        assert!((t.rotation_rad - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn brace_label_anchor_sits_on_bulge_side() {
        // Bottom brace: left-to-right travel puts the bulge downward (y down).
        let anchor = brace_label_anchor(Point::new(0.0, 100.0), Point::new(80.0, 100.0), 10.0, 5.0);
        assert_eq!(anchor, Point::new(40.0, 115.0));
    }

    #[test]
    fn hypotenuse_matches_theorem_constants() {
        let c = hypotenuse(2.0, 1.2);
        assert!((c - 2.3324).abs() < 1e-4);
        assert!((hypotenuse(3.0, 4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn tilt_angle_is_atan2_of_legs() {
        let theta = tilt_angle(2.0, 1.2);
        assert!((theta - (1.2f64).atan2(2.0)).abs() < 1e-12);
    }

    #[test]
    fn quadratic_roots_match_formula_constants() {
        let (r1, r2) = quadratic_roots(1.0, 4.0, 3.0).unwrap();
        assert!((r1 - (-1.0)).abs() < 1e-12);
        assert!((r2 - (-3.0)).abs() < 1e-12);
    }

    #[test]
    fn quadratic_rejects_degenerate_and_complex() {
        assert!(quadratic_roots(0.0, 1.0, 1.0).is_err());
        assert!(quadratic_roots(1.0, 0.0, 1.0).is_err());
    }
}
