use std::collections::HashMap;

use crate::{
    assets::{AssetId, PreparedAsset, PreparedAssets},
    compile::{DrawOp, FramePlan},
    error::{ProofreelError, ProofreelResult},
};

/// Rendered pixels for one frame.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// CPU rasterizer backed by `vello_cpu`.
pub struct CpuRenderer {
    font_cache: HashMap<AssetId, vello_cpu::peniko::FontData>,
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self {
            font_cache: HashMap::new(),
        }
    }

    #[tracing::instrument(skip_all, fields(ops = plan.ops.len()))]
    pub fn render_plan(
        &mut self,
        plan: &FramePlan,
        assets: &PreparedAssets,
    ) -> ProofreelResult<FrameRgba> {
        let width: u16 = plan
            .canvas
            .width
            .try_into()
            .map_err(|_| ProofreelError::evaluation("canvas width exceeds u16"))?;
        let height: u16 = plan
            .canvas
            .height
            .try_into()
            .map_err(|_| ProofreelError::evaluation("canvas height exceeds u16"))?;

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        clear_pixmap(
            &mut pixmap,
            premul_rgba8(
                plan.background.r,
                plan.background.g,
                plan.background.b,
                plan.background.a,
            ),
        );

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        for op in &plan.ops {
            self.draw_op(&mut ctx, op, assets)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRgba {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_op(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        op: &DrawOp,
        assets: &PreparedAssets,
    ) -> ProofreelResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillPath {
                path,
                transform,
                color,
                opacity,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    color.r, color.g, color.b, color.a,
                ));
                if *opacity < 1.0 {
                    ctx.push_opacity_layer(*opacity);
                }
                let cpu_path = bezpath_to_cpu(path);
                ctx.fill_path(&cpu_path);
                if *opacity < 1.0 {
                    ctx.pop_layer();
                }
                Ok(())
            }
            DrawOp::Label {
                asset,
                transform,
                opacity,
            } => {
                let prepared = assets.get(*asset)?;
                let PreparedAsset::Label(label) = prepared else {
                    return Err(ProofreelError::evaluation("AssetId is not a PreparedLabel"));
                };

                let font = self.font_for_label(*asset, assets)?;
                ctx.set_transform(affine_to_cpu(*transform));

                if *opacity < 1.0 {
                    ctx.push_opacity_layer(*opacity);
                }

                for line in label.layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }

                if *opacity < 1.0 {
                    ctx.pop_layer();
                }

                Ok(())
            }
        }
    }

    fn font_for_label(
        &mut self,
        id: AssetId,
        assets: &PreparedAssets,
    ) -> ProofreelResult<vello_cpu::peniko::FontData> {
        if let Some(font) = self.font_cache.get(&id) {
            return Ok(font.clone());
        }

        let prepared = assets.get(id)?;
        let PreparedAsset::Label(label) = prepared else {
            return Err(ProofreelError::evaluation("AssetId is not a PreparedLabel"));
        };

        let font_bytes = label.font_bytes.as_ref().clone();
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        self.font_cache.insert(id, font.clone());
        Ok(font)
    }
}

fn premul_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    let af = (a as u16) + 1;
    let premul = |c: u8| -> u8 { (((c as u16) * af) >> 8) as u8 };
    [premul(r), premul(g), premul(b), a]
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn affine_to_cpu(a: crate::core::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: crate::core::Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &crate::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premul_is_exact_at_extremes() {
        assert_eq!(premul_rgba8(255, 128, 0, 255), [255, 128, 0, 255]);
        assert_eq!(premul_rgba8(255, 128, 10, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut pixmap = vello_cpu::Pixmap::new(4, 4);
        clear_pixmap(&mut pixmap, [1, 2, 3, 255]);
        for px in pixmap.data_as_u8_slice().chunks_exact(4) {
            assert_eq!(px, [1, 2, 3, 255]);
        }
    }

    #[test]
    fn bezpath_conversion_preserves_element_count() {
        let mut p = crate::core::BezPath::new();
        p.move_to(crate::core::Point::new(0.0, 0.0));
        p.line_to(crate::core::Point::new(1.0, 0.0));
        p.quad_to(
            crate::core::Point::new(2.0, 0.0),
            crate::core::Point::new(2.0, 1.0),
        );
        p.close_path();
        let out = bezpath_to_cpu(&p);
        assert_eq!(out.elements().len(), p.elements().len());
    }
}
