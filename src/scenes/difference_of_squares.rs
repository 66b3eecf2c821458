//! (a+b)(a−b) = a² − b²: the L-shaped a² − b² figure is rearranged into an
//! (a+b) × (a−b) rectangle.

use crate::{
    core::Transform2D,
    error::ProofreelResult,
    geometry::{self, Stage},
    model::Composition,
    palette,
    scene::SceneOptions,
    storyboard::Storyboard,
};

use super::{FORMULA_PX, TITLE_PX, cast_brace, cast_label, filled};

// The figure uses a = 3, b = 1 (so a−b = 2) in scene units.
const SIDE_A: f64 = 3.0;
const SIDE_B: f64 = 1.0;
const SIDE_AMB: f64 = SIDE_A - SIDE_B;

pub fn compose(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    // L-shaped figure centered left of the canvas middle.
    let top_c = (-2.5, 0.5); // a × (a−b) rectangle
    let sq_c = (top_c.0 - SIDE_A / 2.0 + SIDE_B / 2.0, top_c.1 - SIDE_AMB / 2.0 - SIDE_B / 2.0);
    let bottom_c = (sq_c.0 + SIDE_B / 2.0 + SIDE_AMB / 2.0, sq_c.1);
    let side_c = (top_c.0 - SIDE_A / 2.0 - SIDE_B / 2.0, top_c.1);

    let top_left = top_c.0 - SIDE_A / 2.0;
    let top_right = top_c.0 + SIDE_A / 2.0;
    let top_edge = top_c.1 + SIDE_AMB / 2.0;
    let bottom_edge_y = sq_c.1 - SIDE_B / 2.0;

    cast_label(
        &mut b,
        &stage,
        opts,
        "title",
        "Difference of Squares:  (a+b)(a\u{2212}b)",
        TITLE_PX,
        palette::WHITE,
        (0.0, 3.5),
    )?;

    b.cast(
        "rect_top",
        filled(
            &geometry::rect_path(stage.len(SIDE_A), stage.len(SIDE_AMB)),
            palette::RED,
            0.7,
        ),
        Transform2D::at(stage.point(top_c.0, top_c.1)),
    )?;
    b.cast(
        "square_b",
        filled(
            &geometry::square_path(stage.len(SIDE_B)),
            palette::BLUE,
            0.7,
        ),
        Transform2D::at(stage.point(sq_c.0, sq_c.1)),
    )?;
    b.cast(
        "rect_bottom",
        filled(
            &geometry::rect_path(stage.len(SIDE_AMB), stage.len(SIDE_B)),
            palette::RED,
            0.7,
        ),
        Transform2D::at(stage.point(bottom_c.0, bottom_c.1)),
    )?;

    // Top braces travel right-to-left so the bulge points up.
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_a",
        (top_right, top_edge),
        (top_left, top_edge),
        "a",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_b",
        (sq_c.0 - SIDE_B / 2.0, bottom_edge_y),
        (sq_c.0 + SIDE_B / 2.0, bottom_edge_y),
        "b",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_amb",
        (top_right, top_c.1 - SIDE_AMB / 2.0),
        (top_right, top_edge),
        "a\u{2212}b",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_total",
        (top_right, top_edge),
        (side_c.0 - SIDE_B / 2.0, top_edge),
        "a+b",
    )?;

    let formulas = [
        ("formula_area1", "Area\u{2081} = a\u{b2} \u{2212} b\u{b2}", (2.5, 1.0)),
        ("formula_area2", "Area\u{2082} = (a+b)(a\u{2212}b)", (2.5, 0.4)),
        ("formula_equiv", "Area\u{2082} = Area\u{2081}", (0.0, 0.8)),
        (
            "formula_identity",
            "(a+b)(a\u{2212}b) = a\u{b2} \u{2212} b\u{b2}",
            (0.0, 0.0),
        ),
    ];
    for (name, text, at) in formulas {
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }

    // ---- sequence ----
    b.play(1.0).fade_in("title")?;

    b.play(1.0)
        .fade_in("rect_top")?
        .fade_in("brace_a")?
        .fade_in("brace_a_label")?;
    b.play(1.0)
        .fade_in("square_b")?
        .fade_in("brace_b")?
        .fade_in("brace_b_label")?;
    b.play(1.0).fade_in("rect_bottom")?;
    b.play(1.0).fade_in("brace_amb")?.fade_in("brace_amb_label")?;

    b.play(1.0).fade_in("formula_area1")?;
    b.wait(1.0);

    // Swing the bottom rectangle upright against the figure's left edge:
    // (a−b) × b becomes b × (a−b).
    b.play(1.0).morph(
        "rect_bottom",
        Transform2D::at(stage.point(side_c.0, side_c.1))
            .with_scale(SIDE_B / SIDE_AMB, SIDE_AMB / SIDE_B),
    )?;
    b.play(1.0).fade_out("square_b")?.fade_out("brace_b")?.fade_out("brace_b_label")?;
    b.play(1.0)
        .fade_out("brace_a")?
        .fade_out("brace_a_label")?
        .fade_in("brace_total")?
        .fade_in("brace_total_label")?;

    b.play(1.0).fade_in("formula_area2")?;
    b.wait(2.0);

    b.play(1.0)
        .fade_out("rect_top")?
        .fade_out("rect_bottom")?
        .fade_out("brace_total")?
        .fade_out("brace_total_label")?
        .fade_out("brace_amb")?
        .fade_out("brace_amb_label")?;

    b.play(1.0).slide("formula_area1", stage.point(0.0, 2.0))?;
    b.play(1.0).slide("formula_area2", stage.point(0.0, 1.4))?;

    b.play(1.0).fade_in("formula_equiv")?;
    b.wait(2.0);

    b.play(1.0).fade_in("formula_identity")?;
    b.wait(3.0);

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearranged_pieces_have_equal_area() {
        // a(a−b) + b(a−b) = (a+b)(a−b) = a² − b².
        let l_shape = SIDE_A * SIDE_AMB + SIDE_B * SIDE_AMB;
        let product = (SIDE_A + SIDE_B) * SIDE_AMB;
        assert!((l_shape - product).abs() < 1e-12);
        // And with b² added back, the pieces tile the full a square.
        assert!((l_shape + SIDE_B * SIDE_B - SIDE_A * SIDE_A).abs() < 1e-12);
    }

    #[test]
    fn composes_and_validates() {
        let comp = compose(&SceneOptions::default()).unwrap();
        comp.validate().unwrap();
        assert!(comp.assets.contains_key("rect_bottom"));
    }
}
