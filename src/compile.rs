use crate::{
    assets::{AssetId, PreparedAsset, PreparedAssets},
    core::{Affine, BezPath, Canvas, Rgba8},
    error::ProofreelResult,
    eval::EvaluatedGraph,
    model::Composition,
};

/// Backend-agnostic draw list for one frame, in paint order.
#[derive(Clone, Debug)]
pub struct FramePlan {
    pub canvas: Canvas,
    pub background: Rgba8,
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Debug)]
pub enum DrawOp {
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Rgba8,
        opacity: f32,
    },
    Label {
        asset: AssetId,
        transform: Affine,
        opacity: f32,
    },
}

pub fn compile_frame(
    comp: &Composition,
    eval: &EvaluatedGraph,
    assets: &PreparedAssets,
) -> ProofreelResult<FramePlan> {
    let mut ops = Vec::<DrawOp>::with_capacity(eval.nodes.len() * 2);

    for node in &eval.nodes {
        let opacity = node.opacity as f32;
        if opacity <= 0.0 {
            continue;
        }

        let id = assets.id_for_key(&node.asset)?;
        match assets.get(id)? {
            PreparedAsset::Shape(shape) => {
                if let Some((path, color)) = &shape.fill {
                    ops.push(DrawOp::FillPath {
                        path: path.clone(),
                        transform: node.transform,
                        color: *color,
                        opacity,
                    });
                }
                if let Some((outline, color)) = &shape.stroke {
                    ops.push(DrawOp::FillPath {
                        path: outline.clone(),
                        transform: node.transform,
                        color: *color,
                        opacity,
                    });
                }
            }
            PreparedAsset::Label(label) => {
                // Labels are positioned by their center; the layout's own
                // origin is its top-left corner.
                let centering = Affine::translate((
                    -f64::from(label.width) / 2.0,
                    -f64::from(label.height) / 2.0,
                ));
                ops.push(DrawOp::Label {
                    asset: id,
                    transform: node.transform * centering,
                    opacity,
                });
            }
        }
    }

    Ok(FramePlan {
        canvas: comp.canvas,
        background: comp.background,
        ops,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{
        anim::Anim,
        core::{FrameIndex, FrameRange, Fps, Transform2D, Vec2},
        eval::Evaluator,
        model::{Asset, Clip, ClipProps, ShapeAsset, StrokeStyle, Track},
        palette,
    };

    fn comp_with_square(opacity: f64) -> Composition {
        let mut assets = BTreeMap::new();
        assets.insert(
            "sq".to_string(),
            Asset::Shape(ShapeAsset {
                svg_path_d: "M-10,-10 L10,-10 L10,10 L-10,10 Z".to_string(),
                fill: Some(palette::fill(palette::BLUE, 0.7)),
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
                width: 64,
                height: 64,
            },
            duration: FrameIndex(10),
            background: palette::BACKGROUND,
            assets,
            tracks: vec![Track {
                name: "main".to_string(),
                z_base: 0,
                clips: vec![Clip {
                    id: "c0".to_string(),
                    asset: "sq".to_string(),
                    range: FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap(),
                    props: ClipProps {
                        transform: Anim::constant(Transform2D::at(Vec2::new(32.0, 32.0))),
                        opacity: Anim::constant(opacity),
                    },
                    z_offset: 0,
                }],
            }],
        }
    }

    #[test]
    fn shape_with_fill_and_stroke_emits_two_ops() {
        let comp = comp_with_square(1.0);
        let assets = PreparedAssets::prepare(&comp, std::path::Path::new(".")).unwrap();
        let eval = Evaluator::eval_frame(&comp, FrameIndex(0)).unwrap();
        let plan = compile_frame(&comp, &eval, &assets).unwrap();

        assert_eq!(plan.ops.len(), 2);
        let DrawOp::FillPath { opacity, color, .. } = &plan.ops[0] else {
            panic!("expected FillPath");
        };
        assert_eq!(*opacity, 1.0);
        assert_eq!(color.a, 179); // 0.7 fill opacity
    }

    #[test]
    fn transparent_nodes_are_skipped() {
        let comp = comp_with_square(0.0);
        let assets = PreparedAssets::prepare(&comp, std::path::Path::new(".")).unwrap();
        let eval = Evaluator::eval_frame(&comp, FrameIndex(0)).unwrap();
        let plan = compile_frame(&comp, &eval, &assets).unwrap();
        assert!(plan.ops.is_empty());
        assert_eq!(plan.background, palette::BACKGROUND);
    }
}
