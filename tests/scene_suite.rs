use proofreel::{
    Evaluator, FrameIndex, SceneOptions, fingerprint_eval,
    scene::{find, scenes},
};

#[test]
fn every_scene_composes_and_validates() {
    let opts = SceneOptions::default();
    for info in scenes() {
        let comp = (info.build)(&opts)
            .unwrap_or_else(|e| panic!("scene '{}' failed to compose: {e}", info.name));
        comp.validate()
            .unwrap_or_else(|e| panic!("scene '{}' failed validation: {e}", info.name));

        assert!(comp.duration.0 > 0, "scene '{}' has no frames", info.name);
        for track in &comp.tracks {
            for clip in &track.clips {
                assert!(
                    clip.range.end.0 <= comp.duration.0,
                    "scene '{}' clip '{}' escapes the timeline",
                    info.name,
                    clip.id
                );
            }
        }
    }
}

#[test]
fn registry_contains_all_eight_proofs() {
    let expected = [
        "sum-square",
        "difference-square",
        "difference-of-squares",
        "pythagorean",
        "quadratic-formula",
        "triangle-rectangle",
        "triangle-interior-altitude",
        "triangle-exterior-altitude",
    ];
    assert_eq!(scenes().len(), expected.len());
    for name in expected {
        assert!(find(name).is_some(), "missing scene '{name}'");
    }
}

#[test]
fn evaluation_succeeds_across_each_timeline() {
    let opts = SceneOptions::default();
    for info in scenes() {
        let comp = (info.build)(&opts).unwrap();
        // Spot-check the start, an early frame, the middle and the last frame.
        let picks = [
            0,
            comp.duration.0 / 7,
            comp.duration.0 / 2,
            comp.duration.0 - 1,
        ];
        for frame in picks {
            let graph = Evaluator::eval_frame(&comp, FrameIndex(frame)).unwrap_or_else(|e| {
                panic!("scene '{}' frame {frame} failed eval: {e}", info.name)
            });
            for node in &graph.nodes {
                assert!(
                    (0.0..=1.0).contains(&node.opacity),
                    "scene '{}' node '{}' opacity {} out of range",
                    info.name,
                    node.clip_id,
                    node.opacity
                );
            }
        }
    }
}

#[test]
fn closing_wait_produces_identical_fingerprints() {
    // Every proof ends on a hold; consecutive frames there must share a
    // fingerprint so the encoder can reuse pixels.
    let opts = SceneOptions::default();
    for info in scenes() {
        let comp = (info.build)(&opts).unwrap();
        let a = Evaluator::eval_frame(&comp, FrameIndex(comp.duration.0 - 2)).unwrap();
        let b = Evaluator::eval_frame(&comp, FrameIndex(comp.duration.0 - 1)).unwrap();
        assert_eq!(
            fingerprint_eval(&a),
            fingerprint_eval(&b),
            "scene '{}' is not static at its end",
            info.name
        );
    }
}

#[test]
fn scene_durations_are_storyboard_length() {
    let opts = SceneOptions::default();
    // The proofs run tens of seconds; a collapsed timeline means a broken
    // cursor.
    for info in scenes() {
        let comp = (info.build)(&opts).unwrap();
        let secs = comp.fps.frames_to_secs(comp.duration.0);
        assert!(
            secs > 10.0,
            "scene '{}' is implausibly short ({secs:.1}s)",
            info.name
        );
    }
}
