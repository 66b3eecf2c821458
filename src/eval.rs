use crate::{
    anim::SampleCtx,
    core::FrameIndex,
    error::{ProofreelError, ProofreelResult},
    model::{Clip, Composition},
};

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedGraph {
    pub frame: FrameIndex,
    pub nodes: Vec<EvaluatedNode>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedNode {
    pub clip_id: String,
    pub asset: String,
    pub z: i32,
    pub transform: kurbo::Affine,
    pub opacity: f64,
}

pub struct Evaluator;

impl Evaluator {
    #[tracing::instrument(skip(comp))]
    pub fn eval_frame(comp: &Composition, frame: FrameIndex) -> ProofreelResult<EvaluatedGraph> {
        comp.validate()?;
        if frame.0 >= comp.duration.0 {
            return Err(ProofreelError::evaluation("frame is out of bounds"));
        }

        let mut nodes_with_key: Vec<((i32, usize, u64, String), EvaluatedNode)> = Vec::new();

        for (track_index, track) in comp.tracks.iter().enumerate() {
            for clip in &track.clips {
                if !clip.range.contains(frame) {
                    continue;
                }

                let node = eval_clip(comp, clip, frame, track.z_base)?;
                let sort_key = (
                    node.z,
                    track_index,
                    clip.range.start.0,
                    node.clip_id.clone(),
                );
                nodes_with_key.push((sort_key, node));
            }
        }

        nodes_with_key.sort_by(|a, b| a.0.cmp(&b.0));
        let nodes = nodes_with_key.into_iter().map(|(_, n)| n).collect();

        Ok(EvaluatedGraph { frame, nodes })
    }
}

fn eval_clip(
    comp: &Composition,
    clip: &Clip,
    frame: FrameIndex,
    track_z_base: i32,
) -> ProofreelResult<EvaluatedNode> {
    let clip_local = FrameIndex(frame.0 - clip.range.start.0);
    let ctx = SampleCtx {
        frame,
        fps: comp.fps,
        clip_local,
    };

    let opacity = clip.props.opacity.sample(ctx)?.clamp(0.0, 1.0);
    let transform = clip.props.transform.sample(ctx)?.to_affine();

    Ok(EvaluatedNode {
        clip_id: clip.id.clone(),
        asset: clip.asset.clone(),
        z: track_z_base + clip.z_offset,
        transform,
        opacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        anim::Anim,
        core::{Canvas, Fps, FrameRange, Transform2D, Vec2},
        model::{Asset, ClipProps, ShapeAsset, StrokeStyle, Track},
        palette,
    };
    use std::collections::BTreeMap;

    fn basic_comp(opacity: Anim<f64>) -> Composition {
        let mut assets = BTreeMap::new();
        assets.insert(
            "p0".to_string(),
            Asset::Shape(ShapeAsset {
                svg_path_d: "M0,0 L10,0 L10,10 Z".to_string(),
                fill: None,
                stroke: Some(StrokeStyle {
                    width: 2.0,
                    color: palette::WHITE,
                    dash: None,
                }),
            }),
        );
        Composition {
            fps: Fps::new(30, 1).unwrap(),
            canvas: Canvas {
                width: 640,
                height: 360,
            },
            duration: FrameIndex(20),
            background: palette::BACKGROUND,
            assets,
            tracks: vec![Track {
                name: "main".to_string(),
                z_base: 0,
                clips: vec![Clip {
                    id: "c0".to_string(),
                    asset: "p0".to_string(),
                    range: FrameRange::new(FrameIndex(5), FrameIndex(15)).unwrap(),
                    props: ClipProps {
                        transform: Anim::constant(Transform2D::at(Vec2::new(1.0, 2.0))),
                        opacity,
                    },
                    z_offset: 0,
                }],
            }],
        }
    }

    #[test]
    fn visibility_respects_frame_range() {
        let comp = basic_comp(Anim::constant(1.0));
        assert_eq!(
            Evaluator::eval_frame(&comp, FrameIndex(4)).unwrap().nodes.len(),
            0
        );
        assert_eq!(
            Evaluator::eval_frame(&comp, FrameIndex(5)).unwrap().nodes.len(),
            1
        );
        assert_eq!(
            Evaluator::eval_frame(&comp, FrameIndex(14)).unwrap().nodes.len(),
            1
        );
        assert_eq!(
            Evaluator::eval_frame(&comp, FrameIndex(15)).unwrap().nodes.len(),
            0
        );
    }

    #[test]
    fn opacity_is_clamped() {
        let comp = basic_comp(Anim::constant(2.0));
        let g = Evaluator::eval_frame(&comp, FrameIndex(5)).unwrap();
        assert_eq!(g.nodes[0].opacity, 1.0);
    }

    #[test]
    fn out_of_bounds_frame_is_an_error() {
        let comp = basic_comp(Anim::constant(1.0));
        assert!(Evaluator::eval_frame(&comp, FrameIndex(20)).is_err());
    }

    #[test]
    fn nodes_sort_by_z_then_order() {
        let mut comp = basic_comp(Anim::constant(1.0));
        let mut clip = comp.tracks[0].clips[0].clone();
        clip.id = "c1".to_string();
        clip.z_offset = -1;
        comp.tracks[0].clips.push(clip);

        let g = Evaluator::eval_frame(&comp, FrameIndex(5)).unwrap();
        assert_eq!(g.nodes[0].clip_id, "c1");
        assert_eq!(g.nodes[1].clip_id, "c0");
    }
}
