//! Triangle-area formulas: half the bounding rectangle, then the general
//! base-height formula with the altitude inside and outside the triangle.

use crate::{
    core::Transform2D,
    error::ProofreelResult,
    geometry::{self, Stage},
    model::Composition,
    palette,
    scene::SceneOptions,
    storyboard::Storyboard,
};

use super::{
    FORMULA_PX, SMALL_PX, cast_label, cast_paragraph, dashed, filled, local_polygon,
    local_segment, outlined,
};

/// Shoelace area of a scene-unit triangle.
fn triangle_area(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    ((b.0 - a.0) * (c.1 - a.1) - (c.0 - a.0) * (b.1 - a.1)).abs() / 2.0
}

// ---- half the bounding rectangle ----

const RECT_SIDE: f64 = 3.0;
const RECT_CENTER: (f64, f64) = (-2.0, 0.0);

pub fn compose_rectangle(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    let hs = RECT_SIDE / 2.0;
    let dl = (RECT_CENTER.0 - hs, RECT_CENTER.1 - hs);
    let dr = (RECT_CENTER.0 + hs, RECT_CENTER.1 - hs);
    let ul = (RECT_CENTER.0 - hs, RECT_CENTER.1 + hs);
    let ur = (RECT_CENTER.0 + hs, RECT_CENTER.1 + hs);

    b.cast(
        "rectangle",
        super::filled_outlined(
            &geometry::square_path(stage.len(RECT_SIDE)),
            palette::BLUE,
            0.3,
            palette::BLUE,
            3.0,
        ),
        Transform2D::at(stage.point(RECT_CENTER.0, RECT_CENTER.1)),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "base_label",
        "b",
        FORMULA_PX,
        palette::WHITE,
        (RECT_CENTER.0, dl.1 - 0.4),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "height_label",
        "h",
        FORMULA_PX,
        palette::WHITE,
        (dr.0 + 0.4, RECT_CENTER.1),
    )?;

    let (diag_path, diag_place) = local_segment(&stage, dl, ur);
    b.cast("diagonal", outlined(&diag_path, palette::RED, 3.0), diag_place)?;

    b.cast(
        "left_triangle",
        filled(
            &local_polygon(&stage, RECT_CENTER, &[dl, ul, ur])?,
            palette::GREEN,
            0.5,
        ),
        Transform2D::at(stage.point(RECT_CENTER.0, RECT_CENTER.1)),
    )?;
    b.cast(
        "right_triangle",
        filled(
            &local_polygon(&stage, RECT_CENTER, &[dl, dr, ur])?,
            palette::YELLOW,
            0.5,
        ),
        Transform2D::at(stage.point(RECT_CENTER.0, RECT_CENTER.1)),
    )?;

    cast_label(
        &mut b,
        &stage,
        opts,
        "rect_area",
        "Area(rectangle) = b \u{b7} h",
        FORMULA_PX,
        palette::WHITE,
        (3.5, 1.0),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "half_area",
        "Area(triangle) = Area(rectangle) / 2",
        SMALL_PX,
        palette::WHITE,
        (3.5, 0.3),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "triangle_formula",
        "A = b \u{b7} h / 2",
        FORMULA_PX,
        palette::WHITE,
        (3.5, -0.4),
    )?;
    cast_paragraph(
        &mut b,
        &stage,
        opts,
        "conclusion",
        "The area of a right triangle is exactly half the area of its bounding rectangle.",
        SMALL_PX,
        palette::BLUE,
        (0.0, -3.5),
        12.0,
    )?;

    b.play(1.0).fade_in("rectangle")?;
    b.play(1.0).fade_in("base_label")?.fade_in("height_label")?;
    b.wait(1.0);

    b.play(1.0).fade_in("diagonal")?;
    b.wait(1.0);

    b.play(1.0)
        .fade_out("rectangle")?
        .fade_out("diagonal")?
        .fade_in("left_triangle")?
        .fade_in("right_triangle")?;
    b.wait(1.0);

    b.play(1.0).fade_out("left_triangle")?;
    b.wait(1.0);

    b.play(1.0).fade_in("rect_area")?;
    b.wait(2.0);
    b.play(1.0).fade_in("half_area")?;
    b.wait(1.0);
    b.play(1.0).fade_in("triangle_formula")?;
    b.wait(2.0);

    b.play(1.0).fade_in("conclusion")?;
    b.wait(3.0);

    b.finish()
}

// ---- altitude inside the triangle ----

const IN_A: (f64, f64) = (-4.5, 2.0);
const IN_B: (f64, f64) = (-1.5, 0.0);
const IN_C: (f64, f64) = (-6.5, 0.0);
const IN_D: (f64, f64) = (-4.5, 0.0); // foot of the altitude, between C and B

pub fn compose_interior_altitude(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    cast_triangle_figure(
        &mut b,
        &stage,
        opts,
        &TriangleFigure {
            a: IN_A,
            b: IN_B,
            c: IN_C,
            d: IN_D,
            extend_base: false,
            left_piece: ("tri_acd", &[IN_A, IN_C, IN_D], palette::GREEN),
            right_piece: ("tri_abd", &[IN_A, IN_B, IN_D], palette::RED),
        },
    )?;

    let derivation = [
        ("derive_split", "Area(ABC) = Area(ACD) + Area(ABD)"),
        ("derive_halves", "= \u{bd} \u{b7} CD \u{b7} AD + \u{bd} \u{b7} DB \u{b7} AD"),
        ("derive_factored", "= \u{bd} \u{b7} AD \u{b7} (CD + DB)"),
        ("derive_simplified", "= \u{bd} \u{b7} AD \u{b7} CB"),
    ];
    for (i, (name, text)) in derivation.iter().enumerate() {
        let at = (2.0, 3.0 - 0.8 * i as f64);
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }
    cast_label(
        &mut b,
        &stage,
        opts,
        "final_formula",
        "Area(ABC) = \u{bd} \u{b7} base \u{b7} height",
        FORMULA_PX,
        palette::YELLOW,
        (2.0, -0.4),
    )?;
    cast_paragraph(
        &mut b,
        &stage,
        opts,
        "conclusion",
        "The area formula remains valid when the altitude lies inside the triangle.",
        SMALL_PX,
        palette::GREEN,
        (1.5, -1.6),
        7.0,
    )?;

    play_triangle_figure(&mut b, false)?;

    for (name, _) in &derivation {
        b.play(1.0).fade_in(name)?;
        b.wait(1.0);
    }
    b.play(1.0).fade_in("final_formula")?;
    b.wait(2.0);
    b.play(1.0).fade_in("conclusion")?;
    b.wait(3.0);

    b.finish()
}

// ---- altitude outside the triangle ----

const EX_A: (f64, f64) = (-5.5, 2.0);
const EX_B: (f64, f64) = (-1.5, -1.0);
const EX_C: (f64, f64) = (-3.5, -1.0);
const EX_D: (f64, f64) = (-5.5, -1.0); // foot of the altitude, left of C

pub fn compose_exterior_altitude(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    cast_triangle_figure(
        &mut b,
        &stage,
        opts,
        &TriangleFigure {
            a: EX_A,
            b: EX_B,
            c: EX_C,
            d: EX_D,
            extend_base: true,
            left_piece: ("tri_acd", &[EX_A, EX_C, EX_D], palette::YELLOW),
            right_piece: ("tri_abd", &[EX_A, EX_B, EX_D], palette::RED),
        },
    )?;

    // The triangle itself, re-shown as a filled piece of the decomposition.
    let stage_pivot = EX_A;
    b.cast(
        "tri_acb",
        filled(
            &local_polygon(&stage, stage_pivot, &[EX_A, EX_C, EX_B])?,
            palette::BLUE,
            0.4,
        ),
        Transform2D::at(stage.point(stage_pivot.0, stage_pivot.1)),
    )?;

    let derivation = [
        ("derive_split", "Area(ABC) = Area(ABD) \u{2212} Area(ACD)"),
        ("derive_halves", "= \u{bd} \u{b7} DB \u{b7} AD \u{2212} \u{bd} \u{b7} DC \u{b7} AD"),
        ("derive_factored", "= \u{bd} \u{b7} AD \u{b7} (DB \u{2212} DC)"),
        ("derive_simplified", "= \u{bd} \u{b7} AD \u{b7} CB"),
    ];
    for (i, (name, text)) in derivation.iter().enumerate() {
        let at = (2.0, 3.0 - 0.8 * i as f64);
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }
    cast_label(
        &mut b,
        &stage,
        opts,
        "final_formula",
        "Area(ABC) = \u{bd} \u{b7} base \u{b7} height",
        FORMULA_PX,
        palette::YELLOW,
        (2.0, -0.4),
    )?;
    cast_paragraph(
        &mut b,
        &stage,
        opts,
        "conclusion",
        "The area formula remains valid when the altitude falls outside the triangle.",
        SMALL_PX,
        palette::GREEN,
        (1.5, -1.6),
        7.0,
    )?;

    play_triangle_figure(&mut b, true)?;

    for (name, _) in &derivation {
        b.play(1.0).fade_in(name)?;
        b.wait(1.0);
    }
    b.play(1.0).fade_in("final_formula")?;
    b.wait(2.0);
    b.play(1.0).fade_in("conclusion")?;
    b.wait(3.0);

    b.finish()
}

// ---- shared figure plumbing for the altitude scenes ----

struct TriangleFigure<'a> {
    a: (f64, f64),
    b: (f64, f64),
    c: (f64, f64),
    d: (f64, f64),
    extend_base: bool,
    left_piece: (&'a str, &'a [(f64, f64)], crate::core::Rgba8),
    right_piece: (&'a str, &'a [(f64, f64)], crate::core::Rgba8),
}

fn cast_triangle_figure(
    board: &mut Storyboard,
    stage: &Stage,
    opts: &SceneOptions,
    fig: &TriangleFigure<'_>,
) -> ProofreelResult<()> {
    board.cast(
        "main_triangle",
        outlined(
            &local_polygon(stage, fig.a, &[fig.a, fig.b, fig.c])?,
            palette::BLUE,
            3.0,
        ),
        Transform2D::at(stage.point(fig.a.0, fig.a.1)),
    )?;

    let (alt_path, alt_place) = local_segment(stage, fig.a, fig.d);
    board.cast(
        "altitude",
        dashed(&alt_path, palette::YELLOW, 2.0, stage.len(0.12)),
        alt_place,
    )?;
    if fig.extend_base {
        let (ext_path, ext_place) = local_segment(stage, fig.c, fig.d);
        board.cast(
            "base_extension",
            dashed(&ext_path, palette::YELLOW, 2.0, stage.len(0.12)),
            ext_place,
        )?;
    }

    let vertex_labels = [
        ("label_a", "A", (fig.a.0, fig.a.1 + 0.4)),
        ("label_b", "B", (fig.b.0, fig.b.1 - 0.4)),
        ("label_c", "C", (fig.c.0, fig.c.1 - 0.4)),
        ("label_d", "D", (fig.d.0, fig.d.1 - 0.4)),
    ];
    for (name, text, at) in vertex_labels {
        cast_label(board, stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }

    for (name, pts, color) in [fig.left_piece, fig.right_piece] {
        board.cast(
            name,
            filled(&local_polygon(stage, fig.a, pts)?, color, 0.4),
            Transform2D::at(stage.point(fig.a.0, fig.a.1)),
        )?;
    }
    Ok(())
}

fn play_triangle_figure(board: &mut Storyboard, exterior: bool) -> ProofreelResult<()> {
    board.play(2.0).fade_in("main_triangle")?;
    board
        .play(1.0)
        .fade_in("label_a")?
        .fade_in("label_b")?
        .fade_in("label_c")?;
    board.wait(1.0);

    let step = board.play(1.0).fade_in("altitude")?.fade_in("label_d")?;
    if exterior {
        step.fade_in("base_extension")?;
    }
    board.wait(1.0);

    if exterior {
        board.play(1.0).fade_in("tri_acb")?;
        board.wait(1.0);
        board.play(1.0).fade_in("tri_acd")?;
        board.wait(1.0);
        board.play(1.0).fade_in("tri_abd")?;
        board.wait(1.0);
    } else {
        board.play(1.0).fade_in("tri_acd")?.fade_in("tri_abd")?;
        board.wait(1.0);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_pieces_sum_to_the_triangle() {
        let whole = triangle_area(IN_A, IN_B, IN_C);
        let left = triangle_area(IN_A, IN_C, IN_D);
        let right = triangle_area(IN_A, IN_B, IN_D);
        assert!((whole - (left + right)).abs() < 1e-12);
        // The foot lies strictly between C and B.
        assert!(IN_C.0 < IN_D.0 && IN_D.0 < IN_B.0);
    }

    #[test]
    fn exterior_pieces_subtract_to_the_triangle() {
        let whole = triangle_area(EX_A, EX_B, EX_C);
        let enclosing = triangle_area(EX_A, EX_B, EX_D);
        let cut = triangle_area(EX_A, EX_C, EX_D);
        assert!((whole - (enclosing - cut)).abs() < 1e-12);
        // The foot lies outside the base segment.
        assert!(EX_D.0 < EX_C.0);
    }

    #[test]
    fn rectangle_scene_composes() {
        let comp = compose_rectangle(&SceneOptions::default()).unwrap();
        comp.validate().unwrap();
    }

    #[test]
    fn altitude_scenes_compose() {
        compose_interior_altitude(&SceneOptions::default())
            .unwrap()
            .validate()
            .unwrap();
        compose_exterior_altitude(&SceneOptions::default())
            .unwrap()
            .validate()
            .unwrap();
    }
}
