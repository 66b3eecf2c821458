//! The quadratic formula by completing the square: normalize ax² + bx + c,
//! build the x² + px figure, fold half the px strip on top, and complete
//! the square with (p/2)².

use crate::{
    core::Transform2D,
    error::ProofreelResult,
    geometry::{self, Stage},
    model::Composition,
    palette,
    scene::SceneOptions,
    storyboard::Storyboard,
};

use super::{FORMULA_PX, SMALL_PX, TITLE_PX, cast_label, filled_outlined};

const COEFF_A: f64 = 1.0;
const COEFF_B: f64 = 4.0;
const COEFF_C: f64 = 3.0;
const COEFF_P: f64 = COEFF_B / COEFF_A;

// Visual sizing of the figure.
const VIS_SCALE: f64 = 0.6;
const X_VISUAL: f64 = 1.0;
const BASE_SIDE: f64 = X_VISUAL * VIS_SCALE;

pub fn compose(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    cast_label(
        &mut b,
        &stage,
        opts,
        "title",
        "Quadratic Formula: Geometric Proof",
        TITLE_PX,
        palette::WHITE,
        (0.0, 3.5),
    )?;

    // Assumptions panel, then the normalization walk-through.
    let assumptions = [
        ("assume_header", "Assumptions for geometric interpretation:"),
        ("assume_1", "1.  a \u{2260} 0   (quadratic equation)"),
        ("assume_2", "2.  a > 0,  b > 0   (geometric meaning)"),
        ("assume_3", "3.  Working in real domain"),
        ("assume_note", "Required for geometric validity, not for algebraic truth."),
    ];
    for (i, (name, text)) in assumptions.iter().enumerate() {
        cast_label(
            &mut b,
            &stage,
            opts,
            name,
            text,
            SMALL_PX,
            palette::BLUE,
            (0.0, 2.8 - 0.5 * i as f64),
        )?;
    }

    let normalization = [
        ("norm_header", "Convert the general form to normalized form:"),
        ("norm_general", "ax\u{b2} + bx + c = 0"),
        ("norm_divide", "Divide both sides by a   (since a \u{2260} 0)"),
        ("norm_divided", "x\u{b2} + (b/a)x + (c/a) = 0"),
        ("norm_pq", "Set p := b/a,  q := c/a   \u{21d2}   x\u{b2} + px + q = 0"),
    ];
    for (i, (name, text)) in normalization.iter().enumerate() {
        cast_label(
            &mut b,
            &stage,
            opts,
            name,
            text,
            SMALL_PX,
            palette::WHITE,
            (0.0, 0.1 - 0.5 * i as f64),
        )?;
    }

    // ---- figure geometry ----
    let left_edge = -stage.half_width_units() + 1.5;
    let sq_c = (left_edge + BASE_SIDE / 2.0, 0.0);
    let px_w = COEFF_P * VIS_SCALE;
    let px_c = (left_edge + BASE_SIDE + px_w / 2.0, 0.0);
    let half_w = px_w / 2.0;
    let half1_c = (left_edge + BASE_SIDE + half_w / 2.0, 0.0);
    let half2_c = (left_edge + BASE_SIDE + half_w * 1.5, 0.0);
    let top_c = (sq_c.0, BASE_SIDE / 2.0 + half_w / 2.0);
    let comp_sq_c = (half1_c.0, top_c.1);

    b.cast(
        "x2_square",
        filled_outlined(
            &geometry::square_path(stage.len(BASE_SIDE)),
            palette::RED,
            0.5,
            palette::WHITE,
            3.0,
        ),
        Transform2D::at(stage.point(sq_c.0, sq_c.1)),
    )?;
    cast_label(&mut b, &stage, opts, "x2_label", "x\u{b2}", SMALL_PX, palette::WHITE, sq_c)?;

    b.cast(
        "px_rect",
        filled_outlined(
            &geometry::rect_path(stage.len(px_w), stage.len(BASE_SIDE)),
            palette::GREEN,
            0.25,
            palette::WHITE,
            2.0,
        ),
        Transform2D::at(stage.point(px_c.0, px_c.1)),
    )?;
    cast_label(&mut b, &stage, opts, "px_label", "px", SMALL_PX, palette::WHITE, px_c)?;

    b.cast(
        "px_half1",
        filled_outlined(
            &geometry::rect_path(stage.len(half_w), stage.len(BASE_SIDE)),
            palette::GREEN,
            0.5,
            palette::WHITE,
            2.0,
        ),
        Transform2D::at(stage.point(half1_c.0, half1_c.1)),
    )?;
    cast_label(&mut b, &stage, opts, "px_half1_label", "px/2", SMALL_PX, palette::WHITE, half1_c)?;

    b.cast(
        "px_half2",
        filled_outlined(
            &geometry::rect_path(stage.len(half_w), stage.len(BASE_SIDE)),
            palette::GREEN,
            0.5,
            palette::WHITE,
            2.0,
        ),
        Transform2D::at(stage.point(half2_c.0, half2_c.1)),
    )?;
    cast_label(&mut b, &stage, opts, "px_half2_label", "px/2", SMALL_PX, palette::WHITE, half2_c)?;

    b.cast(
        "completing_square",
        filled_outlined(
            &geometry::square_path(stage.len(half_w)),
            palette::BLUE,
            0.5,
            palette::WHITE,
            2.0,
        ),
        Transform2D::at(stage.point(comp_sq_c.0, comp_sq_c.1)),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "completing_label",
        "(p/2)\u{b2}",
        SMALL_PX,
        palette::WHITE,
        comp_sq_c,
    )?;

    // ---- algebraic derivation ----
    let derivation = [
        ("derive_identity", "x\u{b2} + px + (p/2)\u{b2} = (x + p/2)\u{b2}"),
        ("derive_normalized", "x\u{b2} + px + q = 0   (Normalized Form)"),
        ("derive_rearranged", "x\u{b2} + px = \u{2212}q"),
        ("derive_squared", "\u{21d2}  (x + p/2)\u{b2} = p\u{b2}/4 \u{2212} q"),
        ("derive_root", "x + p/2 = \u{b1}\u{221a}(p\u{b2}/4 \u{2212} q)"),
        ("derive_solution", "x = \u{2212}p/2 \u{b1} \u{221a}(p\u{b2}/4 \u{2212} q)"),
    ];
    for (i, (name, text)) in derivation.iter().enumerate() {
        cast_label(
            &mut b,
            &stage,
            opts,
            name,
            text,
            SMALL_PX,
            palette::WHITE,
            (1.5, 2.0 - 0.6 * i as f64),
        )?;
    }

    cast_label(
        &mut b,
        &stage,
        opts,
        "coefficient_relation",
        "p = b/a,   q = c/a",
        FORMULA_PX,
        palette::WHITE,
        (0.0, 1.2),
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "quadratic_formula",
        "x = (\u{2212}b \u{b1} \u{221a}(b\u{b2} \u{2212} 4ac)) / 2a",
        FORMULA_PX,
        palette::WHITE,
        (0.0, 0.4),
    )?;

    let limitations = [
        ("limit_header", "Limitations of geometric approach:"),
        ("limit_1", "\u{2022}  Only valid for a > 0, b > 0"),
        ("limit_2", "\u{2022}  Real domain only"),
        ("limit_3", "\u{2022}  Specific coefficient values"),
    ];
    for (i, (name, text)) in limitations.iter().enumerate() {
        cast_label(
            &mut b,
            &stage,
            opts,
            name,
            text,
            SMALL_PX,
            palette::RED,
            (0.0, 1.6 - 0.5 * i as f64),
        )?;
    }
    cast_label(
        &mut b,
        &stage,
        opts,
        "algebra_conclusion",
        "However, the algebraic method has no such limitation.",
        SMALL_PX,
        palette::GREEN,
        (0.0, -0.6),
    )?;

    // ---- sequence ----
    let assumption_names: Vec<&str> = assumptions.iter().map(|(name, _)| *name).collect();
    let normalization_names: Vec<&str> = normalization.iter().map(|(name, _)| *name).collect();

    b.play(1.0).fade_in("title")?;
    b.wait(1.0);

    b.play(1.0).fade_in_all(&assumption_names)?;
    b.wait(1.6);

    for name in &normalization_names {
        b.play(1.0).fade_in(name)?;
        b.wait(1.0);
    }
    b.wait(1.0);
    b.play(0.8).fade_out_all(&normalization_names)?;
    b.wait(0.25);
    b.play(0.5).fade_out_all(&assumption_names)?;
    b.wait(0.25);

    b.play(1.0).fade_in("x2_square")?.fade_in("x2_label")?;
    b.wait(0.75);
    b.play(1.0).fade_in("px_rect")?.fade_in("px_label")?;
    b.wait(1.0);

    // Split the px strip into equal halves.
    b.play(1.2)
        .fade_out("px_label")?
        .fade_out("px_rect")?
        .fade_in("px_half1")?
        .fade_in("px_half2")?;
    b.play(1.0)
        .fade_in("px_half1_label")?
        .fade_in("px_half2_label")?;
    b.wait(0.75);
    b.play(0.4).fade_out("px_half2_label")?;

    // Fold the second half on top of the x² square.
    b.play(1.0).morph(
        "px_half2",
        Transform2D::at(stage.point(top_c.0, top_c.1))
            .with_scale(BASE_SIDE / half_w, half_w / BASE_SIDE),
    )?;
    b.play(0.0).slide("px_half2_label", stage.point(top_c.0, top_c.1))?;
    b.play(0.5).fade_in("px_half2_label")?;
    b.wait(0.5);

    b.play(1.0).fade_in("completing_square")?;
    b.play(0.5).fade_in("completing_label")?;
    b.wait(0.5);

    b.play(1.4)
        .pulse("x2_square", 1.1)?
        .pulse("px_half1", 1.1)?
        .pulse("px_half2", 1.1)?
        .pulse("completing_square", 1.1)?;
    b.wait(0.75);

    let derivation_names: Vec<&str> = derivation.iter().map(|(name, _)| *name).collect();
    for name in &derivation_names {
        b.play(1.0).fade_in(name)?;
        b.wait(1.0);
    }
    b.play(1.0).fade_out_all(&derivation_names)?;
    b.wait(0.5);

    b.play(1.0).fade_in("coefficient_relation")?;
    b.wait(0.5);
    b.play(1.0).fade_in("quadratic_formula")?;
    b.wait(1.5);

    // Clear everything but the title for the critical analysis.
    b.play(1.0).fade_out_all(&[
        "x2_square",
        "x2_label",
        "px_half1",
        "px_half1_label",
        "px_half2",
        "px_half2_label",
        "completing_square",
        "completing_label",
        "coefficient_relation",
        "quadratic_formula",
    ])?;
    b.wait(0.5);

    let limitation_names: Vec<&str> = limitations.iter().map(|(name, _)| *name).collect();
    b.play(2.0).fade_in_all(&limitation_names)?;
    b.wait(1.0);
    b.play(1.0).fade_in("algebra_conclusion")?;
    b.wait(2.0);

    b.play(1.5)
        .fade_out("title")?
        .fade_out_all(&limitation_names)?
        .fade_out("algebra_conclusion")?;
    b.wait(0.5);

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_match_the_formula() {
        let (r1, r2) = geometry::quadratic_roots(COEFF_A, COEFF_B, COEFF_C).unwrap();
        assert!((r1 - (-1.0)).abs() < 1e-12);
        assert!((r2 - (-3.0)).abs() < 1e-12);
    }

    #[test]
    fn normalized_coefficients_are_p4_q3() {
        assert_eq!(COEFF_P, 4.0);
        assert_eq!(COEFF_C / COEFF_A, 3.0);
    }

    #[test]
    fn completed_square_tiles_exactly() {
        // x² + 2·(p/2)x + (p/2)² = (x + p/2)², in visual units.
        let x = BASE_SIDE;
        let half = (COEFF_P / 2.0) * VIS_SCALE;
        let pieces = x * x + 2.0 * (x * half) + half * half;
        let completed = (x + half) * (x + half);
        assert!((pieces - completed).abs() < 1e-12);
    }

    #[test]
    fn composes_and_validates() {
        let comp = compose(&SceneOptions::default()).unwrap();
        comp.validate().unwrap();
        assert!(comp.assets.contains_key("completing_square"));
    }
}
