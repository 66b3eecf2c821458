//! Prepared assets: all IO and shaping happens here, before rendering.
//!
//! Shape paths are parsed and their strokes expanded to fill outlines once;
//! label text is shaped into a reusable Parley layout with measured
//! metrics. The renderer itself never touches the filesystem.

use std::{
    collections::{BTreeMap, HashMap},
    path::Path,
    sync::Arc,
};

use crate::{
    core::{BezPath, Rgba8},
    error::{ProofreelError, ProofreelResult},
    model::{Asset, Composition, LabelAsset, ShapeAsset, StrokeStyle},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssetId(pub u32);

pub enum PreparedAsset {
    Shape(PreparedShape),
    Label(PreparedLabel),
}

pub struct PreparedShape {
    pub fill: Option<(BezPath, Rgba8)>,
    /// Stroke geometry pre-expanded to a fillable outline.
    pub stroke: Option<(BezPath, Rgba8)>,
}

pub struct PreparedLabel {
    pub layout: parley::Layout<TextBrushRgba8>,
    pub font_bytes: Arc<Vec<u8>>,
    pub width: f32,
    pub height: f32,
}

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub struct PreparedAssets {
    ids: BTreeMap<String, AssetId>,
    items: Vec<PreparedAsset>,
}

impl PreparedAssets {
    /// Load and prepare every asset of `comp`, resolving font sources
    /// relative to `root`.
    pub fn prepare(comp: &Composition, root: &Path) -> ProofreelResult<Self> {
        let mut engine = TextLayoutEngine::new();
        let mut font_cache: HashMap<String, Arc<Vec<u8>>> = HashMap::new();

        let mut ids = BTreeMap::new();
        let mut items = Vec::with_capacity(comp.assets.len());
        for (key, asset) in &comp.assets {
            let prepared = match asset {
                Asset::Shape(s) => PreparedAsset::Shape(prepare_shape(s)?),
                Asset::Label(l) => {
                    PreparedAsset::Label(prepare_label(l, root, &mut engine, &mut font_cache)?)
                }
            };
            ids.insert(key.clone(), AssetId(items.len() as u32));
            items.push(prepared);
        }

        Ok(Self { ids, items })
    }

    pub fn id_for_key(&self, key: &str) -> ProofreelResult<AssetId> {
        self.ids.get(key).copied().ok_or_else(|| {
            ProofreelError::evaluation(format!("no prepared asset for key '{key}'"))
        })
    }

    pub fn get(&self, id: AssetId) -> ProofreelResult<&PreparedAsset> {
        self.items
            .get(id.0 as usize)
            .ok_or_else(|| ProofreelError::evaluation(format!("unknown asset id {:?}", id)))
    }
}

fn prepare_shape(asset: &ShapeAsset) -> ProofreelResult<PreparedShape> {
    let path = parse_svg_path(&asset.svg_path_d)?;

    let fill = asset.fill.map(|color| (path.clone(), color));
    let stroke = match &asset.stroke {
        Some(style) => Some((expand_stroke(&path, style), style.color)),
        None => None,
    };

    Ok(PreparedShape { fill, stroke })
}

fn parse_svg_path(d: &str) -> ProofreelResult<BezPath> {
    let d = d.trim();
    if d.is_empty() {
        return Err(ProofreelError::validation(
            "shape svg_path_d must be non-empty",
        ));
    }
    BezPath::from_svg(d)
        .map_err(|e| ProofreelError::validation(format!("invalid svg_path_d: {e}")))
}

fn expand_stroke(path: &BezPath, style: &StrokeStyle) -> BezPath {
    let mut stroke = kurbo::Stroke::new(style.width)
        .with_caps(kurbo::Cap::Butt)
        .with_join(kurbo::Join::Miter);
    if let Some(d) = style.dash {
        stroke = stroke.with_dashes(0.0, [d, d]);
    }
    kurbo::stroke(
        path.elements().iter().copied(),
        &stroke,
        &kurbo::StrokeOpts::default(),
        0.25,
    )
}

fn prepare_label(
    asset: &LabelAsset,
    root: &Path,
    engine: &mut TextLayoutEngine,
    font_cache: &mut HashMap<String, Arc<Vec<u8>>>,
) -> ProofreelResult<PreparedLabel> {
    let rel = normalize_rel_path(&asset.font_source)?;
    let font_bytes = match font_cache.get(&rel) {
        Some(bytes) => bytes.clone(),
        None => {
            let full = root.join(&rel);
            let bytes = std::fs::read(&full).map_err(|e| {
                ProofreelError::validation(format!(
                    "failed to read font '{}': {e}",
                    full.display()
                ))
            })?;
            let bytes = Arc::new(bytes);
            font_cache.insert(rel, bytes.clone());
            bytes
        }
    };

    let brush = TextBrushRgba8 {
        r: asset.color.r,
        g: asset.color.g,
        b: asset.color.b,
        a: asset.color.a,
    };
    let layout = engine.layout_plain(
        &asset.text,
        &font_bytes,
        asset.size_px,
        brush,
        asset.max_width_px,
    )?;

    let (width, height) = (layout.width(), layout.height());
    Ok(PreparedLabel {
        layout,
        font_bytes,
        width,
        height,
    })
}

/// Normalize and validate asset-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> ProofreelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ProofreelError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ProofreelError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ProofreelError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ProofreelError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Stateful helper for building Parley text layouts from raw font bytes.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape and lay out plain text using provided font bytes and styling.
    pub fn layout_plain(
        &mut self,
        text: &str,
        font_bytes: &[u8],
        size_px: f32,
        brush: TextBrushRgba8,
        max_width_px: Option<f32>,
    ) -> ProofreelResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ProofreelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ProofreelError::validation("no font families registered from font bytes")
        })?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ProofreelError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        if let Some(w) = max_width_px {
            layout.break_all_lines(Some(w));
            layout.align(
                Some(w),
                parley::Alignment::Start,
                parley::AlignmentOptions::default(),
            );
        } else {
            layout.break_all_lines(None);
        }

        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    #[test]
    fn normalize_accepts_plain_relative_paths() {
        assert_eq!(
            normalize_rel_path("assets/fonts/DejaVuSans.ttf").unwrap(),
            "assets/fonts/DejaVuSans.ttf"
        );
        assert_eq!(normalize_rel_path("./a//b.ttf").unwrap(), "a/b.ttf");
        assert_eq!(normalize_rel_path("a\\b.ttf").unwrap(), "a/b.ttf");
    }

    #[test]
    fn normalize_rejects_escapes() {
        assert!(normalize_rel_path("/etc/fonts.ttf").is_err());
        assert!(normalize_rel_path("../x.ttf").is_err());
        assert!(normalize_rel_path("a/../x.ttf").is_err());
        assert!(normalize_rel_path("").is_err());
    }

    #[test]
    fn shape_preparation_expands_strokes() {
        let shape = ShapeAsset {
            svg_path_d: "M0,0 L100,0".to_string(),
            fill: None,
            stroke: Some(StrokeStyle {
                width: 4.0,
                color: palette::WHITE,
                dash: None,
            }),
        };
        let prepared = prepare_shape(&shape).unwrap();
        assert!(prepared.fill.is_none());
        let (outline, color) = prepared.stroke.as_ref().unwrap();
        assert_eq!(*color, palette::WHITE);

        // A stroked segment expands to a closed outline with area ~ w * len.
        use kurbo::Shape as _;
        let bb = outline.bounding_box();
        assert!(bb.width() >= 100.0);
        assert!(bb.height() >= 4.0 - 1e-6);
    }

    #[test]
    fn dashed_stroke_produces_multiple_subpaths() {
        let solid = prepare_shape(&ShapeAsset {
            svg_path_d: "M0,0 L100,0".to_string(),
            fill: None,
            stroke: Some(StrokeStyle {
                width: 2.0,
                color: palette::WHITE,
                dash: None,
            }),
        })
        .unwrap();
        let dashed = prepare_shape(&ShapeAsset {
            svg_path_d: "M0,0 L100,0".to_string(),
            fill: None,
            stroke: Some(StrokeStyle {
                width: 2.0,
                color: palette::WHITE,
                dash: Some(10.0),
            }),
        })
        .unwrap();

        let count_moves = |p: &BezPath| {
            p.elements()
                .iter()
                .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
                .count()
        };
        let dashed_moves = count_moves(&dashed.stroke.as_ref().unwrap().0);
        let solid_moves = count_moves(&solid.stroke.as_ref().unwrap().0);
        assert!(dashed_moves > solid_moves);
    }

    #[test]
    fn invalid_path_is_rejected() {
        assert!(parse_svg_path("not a path").is_err());
        assert!(parse_svg_path("").is_err());
    }
}
