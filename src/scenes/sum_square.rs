//! (a+b)² = a² + 2ab + b²: a square of side a+b decomposed into a², b² and
//! two ab rectangles.

use crate::{
    core::Transform2D,
    error::ProofreelResult,
    geometry::{self, Stage},
    model::Composition,
    palette,
    scene::SceneOptions,
    storyboard::Storyboard,
};

use super::{FORMULA_PX, TITLE_PX, cast_brace, cast_label, corner, filled};

const LENGTH_A: f64 = 2.0;
const LENGTH_B: f64 = 1.0;

pub fn compose(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    // The decomposed square sits left of center; derivations go on the right.
    let shift = -3.0;

    let sq_a2_c = (shift - LENGTH_B / 2.0, -LENGTH_B / 2.0);
    let sq_b2_c = (shift + LENGTH_A / 2.0, LENGTH_A / 2.0);
    let rect_ab1_c = (shift + LENGTH_A / 2.0, -LENGTH_B / 2.0);
    let rect_ab2_c = (shift - LENGTH_B / 2.0, LENGTH_A / 2.0);

    cast_label(
        &mut b,
        &stage,
        opts,
        "title",
        "Square of a Sum:  (a+b)\u{b2}",
        TITLE_PX,
        palette::WHITE,
        (0.0, 3.5),
    )?;

    b.cast(
        "sq_a2",
        filled(
            &geometry::square_path(stage.len(LENGTH_A)),
            palette::BLUE,
            0.7,
        ),
        Transform2D::at(stage.point(sq_a2_c.0, sq_a2_c.1)),
    )?;
    b.cast(
        "sq_b2",
        filled(
            &geometry::square_path(stage.len(LENGTH_B)),
            palette::YELLOW,
            0.7,
        ),
        Transform2D::at(stage.point(sq_b2_c.0, sq_b2_c.1)),
    )?;
    b.cast(
        "rect_ab1",
        filled(
            &geometry::rect_path(stage.len(LENGTH_B), stage.len(LENGTH_A)),
            palette::RED,
            0.7,
        ),
        Transform2D::at(stage.point(rect_ab1_c.0, rect_ab1_c.1)),
    )?;
    b.cast(
        "rect_ab2",
        filled(
            &geometry::rect_path(stage.len(LENGTH_A), stage.len(LENGTH_B)),
            palette::RED,
            0.7,
        ),
        Transform2D::at(stage.point(rect_ab2_c.0, rect_ab2_c.1)),
    )?;

    let area_labels = [
        ("lbl_a2", "a\u{b2}", sq_a2_c),
        ("lbl_b2", "b\u{b2}", sq_b2_c),
        ("lbl_ab1", "ab", rect_ab1_c),
        ("lbl_ab2", "ab", rect_ab2_c),
    ];
    for (name, text, at) in area_labels {
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }

    // Dimension braces on the left edge (a below, b above) and the full
    // a+b span along the bottom.
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_a",
        corner(rect_ab2_c, LENGTH_A, LENGTH_B, -1.0, -1.0),
        corner(sq_a2_c, LENGTH_A, LENGTH_A, -1.0, -1.0),
        "a",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_b",
        corner(rect_ab2_c, LENGTH_A, LENGTH_B, -1.0, 1.0),
        corner(rect_ab2_c, LENGTH_A, LENGTH_B, -1.0, -1.0),
        "b",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_total",
        corner(sq_a2_c, LENGTH_A, LENGTH_A, -1.0, -1.0),
        corner(rect_ab1_c, LENGTH_B, LENGTH_A, 1.0, -1.0),
        "a + b",
    )?;

    // Step-by-step derivation column on the right.
    let steps = [
        ("step_area_def", "Area of square = side\u{b2}"),
        ("step_side", "= (a + b)\u{b2}"),
        ("step_sum_text", "Area of square"),
        ("step_sum_desc", "= sum of small areas"),
        ("step_expanded", "= a\u{b2} + b\u{b2} + 2ab"),
    ];
    for (i, (name, text)) in steps.iter().enumerate() {
        cast_label(
            &mut b,
            &stage,
            opts,
            name,
            text,
            FORMULA_PX,
            palette::WHITE,
            (2.5, 1.5 - 0.6 * i as f64),
        )?;
    }

    let final_identity = [
        ("final_lhs", "(a + b)\u{b2}", (2.5, 0.9)),
        ("final_eq", "=", (2.5, 0.3)),
        ("final_rhs", "a\u{b2} + 2ab + b\u{b2}", (2.5, -0.3)),
    ];
    for (name, text, at) in final_identity {
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }

    // ---- sequence ----
    b.play(1.0).fade_in("title")?;

    b.play(1.0)
        .fade_in("sq_a2")?
        .fade_in("sq_b2")?
        .fade_in("rect_ab1")?
        .fade_in("rect_ab2")?;
    b.play(1.0)
        .fade_in("lbl_a2")?
        .fade_in("lbl_b2")?
        .fade_in("lbl_ab1")?
        .fade_in("lbl_ab2")?;
    b.wait(1.0);

    b.play(1.0).fade_in("brace_a")?.fade_in("brace_a_label")?;
    b.play(1.0)
        .fade_in("brace_total")?
        .fade_in("brace_total_label")?;
    b.play(1.0).fade_in("brace_b")?.fade_in("brace_b_label")?;
    b.wait(1.0);

    for (name, _) in &steps[..4] {
        b.play(1.0).fade_in(name)?;
        b.wait(1.0);
    }
    b.play(1.0).fade_in("step_expanded")?;
    let step_names: Vec<&str> = steps.iter().map(|(name, _)| *name).collect();
    b.play(2.5).fade_out_all(&step_names)?;
    b.wait(1.0);

    b.play(1.0).fade_in("final_lhs")?;
    b.wait(1.0);
    b.play(1.0).fade_in("final_eq")?;
    b.wait(1.0);
    b.play(1.0).fade_in("final_rhs")?;
    b.wait(3.0);

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposition_areas_tile_the_square() {
        let whole = (LENGTH_A + LENGTH_B) * (LENGTH_A + LENGTH_B);
        let parts = LENGTH_A * LENGTH_A + LENGTH_B * LENGTH_B + 2.0 * LENGTH_A * LENGTH_B;
        assert!((whole - parts).abs() < 1e-12);
    }

    #[test]
    fn composes_and_validates() {
        let comp = compose(&SceneOptions::default()).unwrap();
        comp.validate().unwrap();
        assert!(comp.duration.0 > 0);
        assert!(comp.assets.len() >= 18);
    }
}
