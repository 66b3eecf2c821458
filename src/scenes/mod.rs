//! The animated proofs.
//!
//! Every scene follows the same recipe: derive a handful of constants from
//! literal dimensions, cast shapes and labels at computed positions, then
//! run a fixed directive sequence with fixed waits. Coordinates are
//! authored in scene units (origin at canvas center, y up) and mapped by
//! [`Stage`](crate::geometry::Stage).

pub mod difference_of_squares;
pub mod difference_square;
pub mod pythagorean;
pub mod quadratic_formula;
pub mod sum_square;
pub mod triangle_area;

use crate::{
    core::{BezPath, Point, Rgba8, Transform2D},
    error::ProofreelResult,
    geometry::{self, Stage},
    model::{Asset, LabelAsset, ShapeAsset, StrokeStyle},
    palette,
    scene::SceneOptions,
    storyboard::Storyboard,
};

pub(crate) const TITLE_PX: f32 = 42.0;
pub(crate) const FORMULA_PX: f32 = 32.0;
pub(crate) const SMALL_PX: f32 = 24.0;

pub(crate) const BRACE_DEPTH_UNITS: f64 = 0.18;
pub(crate) const BRACE_LABEL_GAP_UNITS: f64 = 0.38;

/// A filled shape with the standard thin white outline.
pub(crate) fn filled(path: &BezPath, fill: Rgba8, fill_opacity: f64) -> Asset {
    Asset::Shape(ShapeAsset {
        svg_path_d: path.to_svg(),
        fill: Some(palette::fill(fill, fill_opacity)),
        stroke: Some(StrokeStyle {
            width: 2.0,
            color: palette::WHITE,
            dash: None,
        }),
    })
}

/// A filled shape outlined in its own color.
pub(crate) fn filled_outlined(
    path: &BezPath,
    fill: Rgba8,
    fill_opacity: f64,
    stroke_color: Rgba8,
    stroke_width: f64,
) -> Asset {
    Asset::Shape(ShapeAsset {
        svg_path_d: path.to_svg(),
        fill: Some(palette::fill(fill, fill_opacity)),
        stroke: Some(StrokeStyle {
            width: stroke_width,
            color: stroke_color,
            dash: None,
        }),
    })
}

/// Stroke-only shape (construction lines, braces, highlight boxes).
pub(crate) fn outlined(path: &BezPath, color: Rgba8, width: f64) -> Asset {
    Asset::Shape(ShapeAsset {
        svg_path_d: path.to_svg(),
        fill: None,
        stroke: Some(StrokeStyle {
            width,
            color,
            dash: None,
        }),
    })
}

/// Dashed stroke-only shape.
pub(crate) fn dashed(path: &BezPath, color: Rgba8, width: f64, dash: f64) -> Asset {
    Asset::Shape(ShapeAsset {
        svg_path_d: path.to_svg(),
        fill: None,
        stroke: Some(StrokeStyle {
            width,
            color,
            dash: Some(dash),
        }),
    })
}

pub(crate) fn label_asset(opts: &SceneOptions, text: &str, size_px: f32, color: Rgba8) -> Asset {
    Asset::Label(LabelAsset {
        text: text.to_string(),
        font_source: opts.font_source.clone(),
        size_px,
        color,
        max_width_px: None,
    })
}

/// Cast a centered label at a scene-unit position.
pub(crate) fn cast_label(
    board: &mut Storyboard,
    stage: &Stage,
    opts: &SceneOptions,
    name: &str,
    text: &str,
    size_px: f32,
    color: Rgba8,
    at: (f64, f64),
) -> ProofreelResult<()> {
    board.cast(
        name,
        label_asset(opts, text, size_px, color),
        Transform2D::at(stage.point(at.0, at.1)),
    )
}

/// Cast a centered, wrapped block of prose at a scene-unit position.
pub(crate) fn cast_paragraph(
    board: &mut Storyboard,
    stage: &Stage,
    opts: &SceneOptions,
    name: &str,
    text: &str,
    size_px: f32,
    color: Rgba8,
    at: (f64, f64),
    width_units: f64,
) -> ProofreelResult<()> {
    board.cast(
        name,
        Asset::Label(LabelAsset {
            text: text.to_string(),
            font_source: opts.font_source.clone(),
            size_px,
            color,
            max_width_px: Some(stage.len(width_units) as f32),
        }),
        Transform2D::at(stage.point(at.0, at.1)),
    )
}

/// Cast a dimension brace between two scene-unit points plus its label.
///
/// The brace bulges to the right of the `from`→`to` direction in pixel
/// space; the label actor is named `{name}_label`.
pub(crate) fn cast_brace(
    board: &mut Storyboard,
    stage: &Stage,
    opts: &SceneOptions,
    name: &str,
    from: (f64, f64),
    to: (f64, f64),
    text: &str,
) -> ProofreelResult<()> {
    let a = stage.point(from.0, from.1).to_point();
    let b = stage.point(to.0, to.1).to_point();
    let depth = stage.len(BRACE_DEPTH_UNITS);

    let (path, place) = geometry::brace_between(a, b, depth)?;
    board.cast(name, outlined(&path, palette::WHITE, 2.5), place)?;

    let anchor = geometry::brace_label_anchor(a, b, depth, stage.len(BRACE_LABEL_GAP_UNITS));
    board.cast(
        format!("{name}_label"),
        label_asset(opts, text, FORMULA_PX, palette::WHITE),
        Transform2D::at(anchor.to_vec2()),
    )
}

/// Scene-unit rectangle corner helper (y up): `dx`, `dy` in {-1, 1}.
pub(crate) fn corner(center: (f64, f64), w: f64, h: f64, dx: f64, dy: f64) -> (f64, f64) {
    (center.0 + dx * w / 2.0, center.1 + dy * h / 2.0)
}

/// A segment between two scene-unit points as a centered local path plus
/// its placement.
pub(crate) fn local_segment(
    stage: &Stage,
    from: (f64, f64),
    to: (f64, f64),
) -> (BezPath, Transform2D) {
    let a = stage.point(from.0, from.1);
    let b = stage.point(to.0, to.1);
    let mid = (a + b) / 2.0;
    let path = geometry::segment_path(
        Point::new(a.x - mid.x, a.y - mid.y),
        Point::new(b.x - mid.x, b.y - mid.y),
    );
    (path, Transform2D::at(mid))
}

/// Convert scene-unit points to a local-pixel polygon around a pivot.
pub(crate) fn local_polygon(
    stage: &Stage,
    pivot: (f64, f64),
    points: &[(f64, f64)],
) -> ProofreelResult<BezPath> {
    let origin = stage.point(pivot.0, pivot.1);
    let pts: Vec<Point> = points
        .iter()
        .map(|(x, y)| {
            let p = stage.point(*x, *y);
            Point::new(p.x - origin.x, p.y - origin.y)
        })
        .collect();
    geometry::polygon_path(&pts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Canvas;

    #[test]
    fn corner_points_match_rectangle_extents() {
        let c = corner((1.0, -0.5), 2.0, 1.0, -1.0, 1.0);
        assert_eq!(c, (0.0, 0.0));
        let c = corner((1.0, -0.5), 2.0, 1.0, 1.0, -1.0);
        assert_eq!(c, (2.0, -1.0));
    }

    #[test]
    fn local_polygon_is_relative_to_pivot() {
        let stage = Stage::new(Canvas {
            width: 720,
            height: 720,
        });
        let path = local_polygon(&stage, (0.0, 0.0), &[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)])
            .unwrap();
        use kurbo::Shape as _;
        let bb = path.bounding_box();
        assert_eq!(bb.x0, 0.0);
        assert_eq!(bb.x1, 90.0);
        // y up in scene units maps to negative local pixels.
        assert_eq!(bb.y0, -90.0);
        assert_eq!(bb.y1, 0.0);
    }
}
