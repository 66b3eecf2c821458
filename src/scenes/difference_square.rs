//! (a−b)² = a² − 2ab + b²: subtract two ab strips from the a square and
//! correct the doubly-subtracted b² corner.

use crate::{
    core::{Transform2D, Vec2},
    error::ProofreelResult,
    geometry::{self, Stage},
    model::Composition,
    palette,
    scene::SceneOptions,
    storyboard::Storyboard,
};

use super::{
    FORMULA_PX, SMALL_PX, TITLE_PX, cast_brace, cast_label, dashed, filled_outlined,
    local_segment, outlined,
};

const LENGTH_A: f64 = 3.5;
const LENGTH_B: f64 = 1.0;
const LENGTH_A_MINUS_B: f64 = LENGTH_A - LENGTH_B;

pub fn compose(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    // The a-square hugs the left edge; the running equation builds on the
    // right.
    let left_x = -stage.half_width_units() + 2.75;
    let center = (left_x + LENGTH_A / 2.0, 0.0);
    let top_y = LENGTH_A / 2.0;
    let bottom_y = -LENGTH_A / 2.0;
    let right_x = left_x + LENGTH_A;

    cast_label(
        &mut b,
        &stage,
        opts,
        "title",
        "Square of a Difference:  (a\u{2212}b)\u{b2}",
        TITLE_PX,
        palette::WHITE,
        (0.0, 3.5),
    )?;

    b.cast(
        "large_square",
        filled_outlined(
            &geometry::square_path(stage.len(LENGTH_A)),
            palette::BLUE,
            0.2,
            palette::BLUE,
            3.0,
        ),
        Transform2D::at(stage.point(center.0, center.1)),
    )?;

    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_bottom",
        (left_x, bottom_y),
        (right_x, bottom_y),
        "a",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_left",
        (left_x, top_y),
        (left_x, bottom_y),
        "a",
    )?;

    // Running equation, one term per line.
    let equation_terms = [
        ("eq_lhs", "(a\u{2212}b)\u{b2}", (1.2, 1.0)),
        ("eq_sign", "=", (2.2, 1.0)),
        ("eq_a2", "a\u{b2}", (2.8, 1.0)),
        ("term_minus_ab1", "\u{2212} ab", (2.9, 0.4)),
        ("term_minus_ab2", "\u{2212} ab", (2.9, -0.2)),
        ("term_plus_b2", "+ b\u{b2}", (2.9, -0.8)),
    ];
    for (name, text, at) in equation_terms {
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, at)?;
    }

    // Division lines one b in from the right and top edges.
    let (v_path, v_place) = local_segment(
        &stage,
        (right_x - LENGTH_B, top_y),
        (right_x - LENGTH_B, bottom_y),
    );
    b.cast(
        "divider_vertical",
        dashed(&v_path, palette::GRAY, 2.0, stage.len(0.12)),
        v_place,
    )?;
    let (h_path, h_place) = local_segment(
        &stage,
        (left_x, top_y - LENGTH_B),
        (right_x, top_y - LENGTH_B),
    );
    b.cast(
        "divider_horizontal",
        dashed(&h_path, palette::GRAY, 2.0, stage.len(0.12)),
        h_place,
    )?;

    // The full-height left brace splits into b and a−b.
    let split_y = top_y - LENGTH_B;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_upper_b",
        (left_x, top_y),
        (left_x, split_y),
        "b",
    )?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_lower_amb",
        (left_x, split_y),
        (left_x, bottom_y),
        "a\u{2212}b",
    )?;

    let target_center = (
        left_x + LENGTH_A_MINUS_B / 2.0,
        bottom_y + LENGTH_A_MINUS_B / 2.0,
    );
    b.cast(
        "target_square",
        filled_outlined(
            &geometry::square_path(stage.len(LENGTH_A_MINUS_B)),
            palette::GREEN,
            0.6,
            palette::GREEN,
            2.0,
        ),
        Transform2D::at(stage.point(target_center.0, target_center.1)),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "target_label",
        "(a\u{2212}b)\u{b2}",
        SMALL_PX,
        palette::WHITE,
        target_center,
    )?;

    b.cast(
        "rect_top",
        filled_outlined(
            &geometry::rect_path(stage.len(LENGTH_A), stage.len(LENGTH_B)),
            palette::RED,
            0.4,
            palette::RED,
            2.0,
        ),
        Transform2D::at(stage.point(center.0, top_y - LENGTH_B / 2.0)),
    )?;
    b.cast(
        "rect_right",
        filled_outlined(
            &geometry::rect_path(stage.len(LENGTH_B), stage.len(LENGTH_A)),
            palette::RED,
            0.4,
            palette::RED,
            2.0,
        ),
        Transform2D::at(stage.point(right_x - LENGTH_B / 2.0, center.1)),
    )?;

    let overlap_center = (right_x - LENGTH_B / 2.0, top_y - LENGTH_B / 2.0);
    b.cast(
        "overlap_square",
        filled_outlined(
            &geometry::square_path(stage.len(LENGTH_B)),
            palette::YELLOW,
            0.8,
            palette::YELLOW,
            2.0,
        ),
        Transform2D::at(stage.point(overlap_center.0, overlap_center.1)),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "overlap_label",
        "b\u{b2}",
        SMALL_PX,
        palette::BLACK,
        overlap_center,
    )?;

    cast_label(
        &mut b,
        &stage,
        opts,
        "correction_note",
        "We subtracted b\u{b2} twice!",
        SMALL_PX,
        palette::YELLOW,
        (center.0, bottom_y - 1.0),
    )?;

    cast_label(
        &mut b,
        &stage,
        opts,
        "final_formula",
        "= a\u{b2} \u{2212} 2ab + b\u{b2}",
        FORMULA_PX,
        palette::WHITE,
        (2.9, 1.0),
    )?;

    b.cast(
        "highlight_box",
        outlined(
            &geometry::rect_path(stage.len(4.6), stage.len(0.9)),
            palette::YELLOW,
            2.5,
        ),
        Transform2D::at(stage.point(2.0, 0.0)),
    )?;

    // ---- sequence ----
    b.play(1.0).fade_in("title")?;

    b.play(1.0).fade_in("large_square")?;
    b.play(1.0)
        .fade_in("brace_bottom")?
        .fade_in("brace_bottom_label")?
        .fade_in("brace_left")?
        .fade_in("brace_left_label")?;
    b.wait(1.0);

    b.play(1.0).fade_in("eq_lhs")?;
    b.wait(1.0);

    b.play(1.0)
        .fade_in("divider_vertical")?
        .fade_in("divider_horizontal")?;

    b.play(1.0)
        .fade_out("brace_left")?
        .fade_out("brace_left_label")?
        .fade_in("brace_upper_b")?
        .fade_in("brace_upper_b_label")?
        .fade_in("brace_lower_amb")?
        .fade_in("brace_lower_amb_label")?;

    b.play(1.0).fade_in("target_square")?.fade_in("target_label")?;
    b.play(1.0).fade_in("eq_sign")?.fade_in("eq_a2")?;
    b.wait(1.0);

    b.play(1.0).fade_in("rect_top")?;
    b.play(1.0).fade_in("term_minus_ab1")?;
    b.play(1.0).fade_in("rect_right")?;
    b.play(1.0).fade_in("term_minus_ab2")?;
    b.wait(1.0);

    b.play(1.0)
        .fade_in("overlap_square")?
        .fade_in("overlap_label")?;
    b.play(1.0).pulse("overlap_square", 1.2)?;

    b.play(1.0).fade_in("correction_note")?;
    b.wait(1.0);

    b.play(1.0).fade_in("term_plus_b2")?;
    b.play(1.0).fade_out("correction_note")?;

    // Collapse the accumulated terms into the expanded identity.
    b.play(1.0)
        .fade_out("eq_sign")?
        .fade_out("eq_a2")?
        .fade_out("term_minus_ab1")?
        .fade_out("term_minus_ab2")?
        .fade_out("term_plus_b2")?
        .fade_in("final_formula")?;

    b.play(1.0).fade_out("eq_lhs")?.fade_out("final_formula")?;
    let drop = Vec2::new(0.0, stage.len(1.0));
    b.play(0.0).nudge("eq_lhs", drop)?.nudge("final_formula", drop)?;
    b.play(1.0).fade_in("eq_lhs")?.fade_in("final_formula")?;

    b.play(1.0).fade_in("highlight_box")?;
    b.wait(3.0);

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtraction_and_correction_tile_the_square() {
        // a² − ab − ab + b² must equal (a−b)².
        let lhs = LENGTH_A * LENGTH_A - 2.0 * LENGTH_A * LENGTH_B + LENGTH_B * LENGTH_B;
        let rhs = LENGTH_A_MINUS_B * LENGTH_A_MINUS_B;
        assert!((lhs - rhs).abs() < 1e-12);
    }

    #[test]
    fn composes_and_validates() {
        let comp = compose(&SceneOptions::default()).unwrap();
        comp.validate().unwrap();
        assert!(comp.assets.contains_key("overlap_square"));
        assert!(comp.assets.contains_key("highlight_box"));
    }
}
