//! a² + b² = c²: the classic four-triangle rearrangement proof, prefaced
//! by its algebraic context and closed by a generality re-dimensioning.

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
    FORMULA_PX, SMALL_PX, TITLE_PX, cast_brace, cast_label, cast_paragraph, filled, local_polygon,
    outlined,
};

const LEG_A: f64 = 2.0;
const LEG_B: f64 = 1.2;
const NEW_LEG_A: f64 = 1.5;
const NEW_LEG_B: f64 = 2.5;

pub fn compose(opts: &SceneOptions) -> ProofreelResult<Composition> {
    let stage = Stage::new(opts.canvas);
    let mut b = Storyboard::new(opts.fps, opts.canvas);

    let outer_side = LEG_A + LEG_B;
    let hyp = geometry::hypotenuse(LEG_A, LEG_B);
    let tilt = geometry::tilt_angle(LEG_A, LEG_B);
    let half = outer_side / 2.0;

    let new_outer_side = NEW_LEG_A + NEW_LEG_B;
    let new_hyp = geometry::hypotenuse(NEW_LEG_A, NEW_LEG_B);
    let new_tilt = geometry::tilt_angle(NEW_LEG_A, NEW_LEG_B);
    let new_half = new_outer_side / 2.0;

    // ---- preface ----
    cast_label(
        &mut b,
        &stage,
        opts,
        "preface_title",
        "Mathematical Context of the Pythagorean Theorem",
        TITLE_PX,
        palette::WHITE,
        (0.0, 3.5),
    )?;

    let preface = [
        (
            "preface_1",
            "The Pythagorean theorem is fundamentally a geometric statement, \
             describing the relationship between the side lengths of a right triangle.",
        ),
        (
            "preface_2",
            "Therefore, in its original context, the side lengths a, b, and c are \
             assumed to be real and strictly positive, giving the theorem geometric meaning.",
        ),
        (
            "preface_3",
            "When generalized algebraically as a\u{b2} + b\u{b2} = c\u{b2}, the variables a and b \
             may take any real value, including negatives, allowing for broader \
             mathematical applications.",
        ),
        (
            "preface_4",
            "However, since squaring removes the effect of sign, the validity of the \
             formula for all real numbers is already implied by its geometric proof \
             under a, b > 0.",
        ),
        (
            "preface_5",
            "In other words, a purely geometric proof, based only on positive lengths, \
             is sufficient to establish the universal truth of a\u{b2} + b\u{b2} = c\u{b2}.",
        ),
        (
            "preface_6",
            "In this demonstration, we focus on this geometric interpretation, \
             assuming a, b > 0 and c as the hypotenuse.",
        ),
    ];
    for (i, (name, text)) in preface.iter().enumerate() {
        cast_paragraph(
            &mut b,
            &stage,
            opts,
            name,
            text,
            SMALL_PX,
            palette::WHITE,
            (0.0, 2.5 - 0.95 * i as f64),
            11.5,
        )?;
    }

    // ---- the figure ----
    let bl = (-half, -half);
    let br = (half, -half);
    let tr = (half, half);
    let tl = (-half, half);

    b.cast(
        "outer_square",
        outlined(&geometry::square_path(stage.len(outer_side)), palette::WHITE, 3.0),
        Transform2D::at(stage.point(0.0, 0.0)),
    )?;

    // Each corner triangle is built around its right-angle vertex so the
    // later re-dimensioning is a pure corner-pivot scale.
    b.cast(
        "tri_bl",
        filled(
            &local_polygon(&stage, bl, &[bl, (bl.0 + LEG_B, bl.1), (bl.0, bl.1 + LEG_A)])?,
            palette::BLUE,
            0.5,
        ),
        Transform2D::at(stage.point(bl.0, bl.1)),
    )?;
    b.cast(
        "tri_br",
        filled(
            &local_polygon(&stage, br, &[br, (br.0 - LEG_A, br.1), (br.0, br.1 + LEG_B)])?,
            palette::PURPLE,
            0.5,
        ),
        Transform2D::at(stage.point(br.0, br.1)),
    )?;
    b.cast(
        "tri_tr",
        filled(
            &local_polygon(&stage, tr, &[tr, (tr.0 - LEG_B, tr.1), (tr.0, tr.1 - LEG_A)])?,
            palette::GREEN,
            0.5,
        ),
        Transform2D::at(stage.point(tr.0, tr.1)),
    )?;
    b.cast(
        "tri_tl",
        filled(
            &local_polygon(&stage, tl, &[tl, (tl.0 + LEG_A, tl.1), (tl.0, tl.1 - LEG_B)])?,
            palette::LIGHT_PINK,
            0.5,
        ),
        Transform2D::at(stage.point(tl.0, tl.1)),
    )?;

    // The tilted square on the hypotenuses. Screen rotation is clockwise in
    // pixel space, so the counterclockwise tilt is negated.
    b.cast(
        "central_square",
        filled(&geometry::square_path(stage.len(hyp)), palette::TEAL, 0.6),
        Transform2D::at(stage.point(0.0, 0.0)).with_rotation(-tilt),
    )?;

    cast_label(
        &mut b,
        &stage,
        opts,
        "title",
        "Geometric Proof: Pythagorean Theorem",
        TITLE_PX,
        palette::WHITE,
        (0.0, 3.5),
    )?;

    // Braces on the bottom-left triangle.
    cast_brace(&mut b, &stage, opts, "brace_a", (bl.0, bl.1 + LEG_A), bl, "a")?;
    cast_brace(&mut b, &stage, opts, "brace_b", bl, (bl.0 + LEG_B, bl.1), "b")?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "brace_c",
        (bl.0 + LEG_B, bl.1),
        (bl.0, bl.1 + LEG_A),
        "c",
    )?;

    cast_paragraph(
        &mut b,
        &stage,
        opts,
        "outer_explanation",
        "We form a square with side length a + b in the following arrangement.",
        SMALL_PX,
        palette::WHITE,
        (0.0, 2.1),
        10.0,
    )?;
    cast_label(
        &mut b,
        &stage,
        opts,
        "outer_formula",
        "Area = (a+b)\u{b2}",
        SMALL_PX,
        palette::WHITE,
        (0.0, 2.1),
    )?;

    // The derivation replaces itself in place at the bottom edge.
    let derivation = [
        ("eq_step_0", "(a+b)\u{b2} = 4\u{b7}(ab/2) + c\u{b2}"),
        ("eq_step_1", "(a+b)\u{b2} = 2ab + c\u{b2}"),
        ("eq_step_2", "a\u{b2} + 2ab + b\u{b2} = 2ab + c\u{b2}"),
        ("eq_step_3", "a\u{b2} + b\u{b2} = c\u{b2}"),
    ];
    for (name, text) in derivation {
        cast_label(&mut b, &stage, opts, name, text, FORMULA_PX, palette::WHITE, (0.0, -3.5))?;
    }

    cast_paragraph(
        &mut b,
        &stage,
        opts,
        "conclusion",
        "After derivation, we get:  c\u{b2} = a\u{b2} + b\u{b2}",
        SMALL_PX,
        palette::WHITE,
        (4.6, 0.0),
        4.0,
    )?;

    cast_label(
        &mut b,
        &stage,
        opts,
        "dimension_note",
        "Now we change the dimensions of a and b",
        SMALL_PX,
        palette::WHITE,
        (0.0, 3.0),
    )?;

    // Braces for the re-dimensioned bottom-left triangle.
    let nbl = (-new_half, -new_half);
    cast_brace(
        &mut b,
        &stage,
        opts,
        "new_brace_a",
        (nbl.0, nbl.1 + NEW_LEG_A),
        nbl,
        "a",
    )?;
    cast_brace(&mut b, &stage, opts, "new_brace_b", nbl, (nbl.0 + NEW_LEG_B, nbl.1), "b")?;
    cast_brace(
        &mut b,
        &stage,
        opts,
        "new_brace_c",
        (nbl.0 + NEW_LEG_B, nbl.1),
        (nbl.0, nbl.1 + NEW_LEG_A),
        "c",
    )?;

    cast_paragraph(
        &mut b,
        &stage,
        opts,
        "invariance",
        "Even though the sides change, the relationship a\u{b2} + b\u{b2} = c\u{b2} remains true!",
        SMALL_PX,
        palette::WHITE,
        (-4.6, 0.0),
        4.0,
    )?;

    cast_label(
        &mut b,
        &stage,
        opts,
        "final_conclusion",
        "Therefore, in any right triangle:  c\u{b2} = a\u{b2} + b\u{b2}",
        FORMULA_PX,
        palette::WHITE,
        (0.0, 0.0),
    )?;

    // ---- preface sequence ----
    b.play(1.0).fade_in("preface_title")?;
    b.wait(0.5);
    b.play(1.0).fade_in("preface_1")?;
    b.play(1.0).fade_in("preface_2")?;
    b.wait(1.75);
    b.play(1.0).fade_in("preface_3")?;
    b.play(1.0).fade_in("preface_4")?;
    b.wait(1.75);
    b.play(1.0).fade_in("preface_5")?;
    b.play(1.0).fade_in("preface_6")?;
    b.wait(2.5);
    let mut preface_names = vec!["preface_title"];
    preface_names.extend(preface.iter().map(|(name, _)| *name));
    b.play(1.5).fade_out_all(&preface_names)?;

    // ---- proof sequence ----
    b.play(1.0).fade_in("title")?;
    b.wait(0.6);

    b.play(1.0).fade_in("outer_square")?;
    b.play(1.2)
        .fade_in("tri_bl")?
        .fade_in("tri_br")?
        .fade_in("tri_tr")?
        .fade_in("tri_tl")?;
    b.play(1.0)
        .fade_in("brace_a")?
        .fade_in("brace_a_label")?
        .fade_in("brace_b")?
        .fade_in("brace_b_label")?;
    b.wait(1.0);

    b.play(1.0).fade_in("central_square")?;
    b.play(1.0).fade_in("brace_c")?.fade_in("brace_c_label")?;
    b.wait(0.8);

    b.play(1.0).fade_in("outer_explanation")?;
    b.wait(1.0);
    b.play(1.0).fade_out("outer_explanation")?;
    b.play(1.0).fade_in("outer_formula")?;
    b.wait(0.5);

    // Derivation: each step replaces the previous one in place.
    b.play(1.0).fade_in("eq_step_0")?;
    b.wait(1.5);
    b.play(1.0).fade_out("eq_step_0")?.fade_in("eq_step_1")?;
    b.wait(1.5);
    b.play(1.0).fade_out("eq_step_1")?.fade_in("eq_step_2")?;
    b.wait(1.5);
    b.play(1.2).fade_out("eq_step_2")?.fade_in("eq_step_3")?;
    b.wait(1.75);

    b.play(1.0).fade_in("conclusion")?;
    b.wait(2.0);

    // ---- generality: re-dimension every piece in flight ----
    b.play(1.0).fade_in("dimension_note")?;
    b.wait(1.0);

    b.play(1.0)
        .fade_out("brace_a")?
        .fade_out("brace_a_label")?
        .fade_out("brace_b")?
        .fade_out("brace_b_label")?
        .fade_out("brace_c")?
        .fade_out("brace_c_label")?;
    b.wait(0.3);

    b.play(1.0).nudge("outer_formula", Vec2::new(0.0, -stage.len(0.35)))?;

    b.play(3.0)
        .morph(
            "tri_bl",
            Transform2D::at(stage.point(nbl.0, nbl.1))
                .with_scale(NEW_LEG_B / LEG_B, NEW_LEG_A / LEG_A),
        )?
        .morph(
            "tri_br",
            Transform2D::at(stage.point(new_half, -new_half))
                .with_scale(NEW_LEG_A / LEG_A, NEW_LEG_B / LEG_B),
        )?
        .morph(
            "tri_tr",
            Transform2D::at(stage.point(new_half, new_half))
                .with_scale(NEW_LEG_B / LEG_B, NEW_LEG_A / LEG_A),
        )?
        .morph(
            "tri_tl",
            Transform2D::at(stage.point(-new_half, new_half))
                .with_scale(NEW_LEG_A / LEG_A, NEW_LEG_B / LEG_B),
        )?
        .morph(
            "central_square",
            Transform2D::at(stage.point(0.0, 0.0))
                .with_rotation(-new_tilt)
                .with_scale(new_hyp / hyp, new_hyp / hyp),
        )?
        .morph(
            "outer_square",
            Transform2D::at(stage.point(0.0, 0.0))
                .with_scale(new_outer_side / outer_side, new_outer_side / outer_side),
        )?;

    b.play(1.5)
        .fade_in("new_brace_a")?
        .fade_in("new_brace_a_label")?
        .fade_in("new_brace_b")?
        .fade_in("new_brace_b_label")?
        .fade_in("new_brace_c")?
        .fade_in("new_brace_c_label")?;

    b.play(1.0).fade_in("invariance")?;
    b.wait(2.0);

    b.play(1.5).fade_out_all(&[
        "title",
        "outer_square",
        "tri_bl",
        "tri_br",
        "tri_tr",
        "tri_tl",
        "central_square",
        "outer_formula",
        "eq_step_3",
        "conclusion",
        "dimension_note",
        "new_brace_a",
        "new_brace_a_label",
        "new_brace_b",
        "new_brace_b_label",
        "new_brace_c",
        "new_brace_c_label",
        "invariance",
    ])?;

    b.play(2.0).fade_in("final_conclusion")?;
    b.wait(0.2);
    b.play(1.0).pulse("final_conclusion", 1.1)?;
    b.wait(1.5);
    b.play(1.0).fade_out("final_conclusion")?;
    b.wait(0.5);

    b.finish()
}
