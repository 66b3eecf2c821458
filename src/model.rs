use std::collections::BTreeMap;

use crate::{
    anim::Anim,
    core::{Canvas, Fps, FrameIndex, FrameRange, Rgba8, Transform2D},
    error::{ProofreelError, ProofreelResult},
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    pub fps: Fps,
    pub canvas: Canvas,
    pub duration: FrameIndex,            // total frames
    pub background: Rgba8,               // cleared to every frame
    pub assets: BTreeMap<String, Asset>, // stable keys
    pub tracks: Vec<Track>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub name: String,
    pub z_base: i32,
    pub clips: Vec<Clip>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    pub id: String,
    pub asset: String,     // key into Composition.assets
    pub range: FrameRange, // timeline placement [start,end)
    pub props: ClipProps,
    pub z_offset: i32,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ClipProps {
    pub transform: Anim<Transform2D>,
    pub opacity: Anim<f64>, // 0..1 clamped in eval
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub enum Asset {
    Shape(ShapeAsset),
    Label(LabelAsset),
}

/// A filled and/or stroked vector path in local pixel coordinates.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShapeAsset {
    pub svg_path_d: String,
    pub fill: Option<Rgba8>,
    pub stroke: Option<StrokeStyle>,
}

#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Rgba8,
    pub dash: Option<f64>, // on/off dash length in px
}

/// A text label drawn centered on the clip transform's origin.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct LabelAsset {
    pub text: String,
    pub font_source: String, // path relative to the asset root
    pub size_px: f32,
    pub color: Rgba8,
    pub max_width_px: Option<f32>,
}

impl Composition {
    pub fn validate(&self) -> ProofreelResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(ProofreelError::validation("fps must have num>0 and den>0"));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ProofreelError::validation(
                "canvas width/height must be > 0",
            ));
        }
        if self.duration.0 == 0 {
            return Err(ProofreelError::validation("duration must be > 0 frames"));
        }

        for (key, asset) in &self.assets {
            asset
                .validate()
                .map_err(|e| ProofreelError::validation(format!("asset '{key}': {e}")))?;
        }

        for track in &self.tracks {
            if track.name.trim().is_empty() {
                return Err(ProofreelError::validation("track name must be non-empty"));
            }
            for clip in &track.clips {
                if clip.id.trim().is_empty() {
                    return Err(ProofreelError::validation("clip id must be non-empty"));
                }
                if !self.assets.contains_key(&clip.asset) {
                    return Err(ProofreelError::validation(format!(
                        "clip '{}' references missing asset key '{}'",
                        clip.id, clip.asset
                    )));
                }
                if clip.range.start.0 > clip.range.end.0 {
                    return Err(ProofreelError::validation(format!(
                        "clip '{}' has invalid range (start > end)",
                        clip.id
                    )));
                }
                if clip.range.end.0 > self.duration.0 {
                    return Err(ProofreelError::validation(format!(
                        "clip '{}' range exceeds composition duration",
                        clip.id
                    )));
                }

                clip.props.opacity.validate()?;
                clip.props.transform.validate()?;
            }
        }

        Ok(())
    }
}

impl Asset {
    pub fn validate(&self) -> ProofreelResult<()> {
        match self {
            Asset::Shape(s) => {
                if s.svg_path_d.trim().is_empty() {
                    return Err(ProofreelError::validation(
                        "shape svg_path_d must be non-empty",
                    ));
                }
                if s.fill.is_none() && s.stroke.is_none() {
                    return Err(ProofreelError::validation(
                        "shape must have a fill or a stroke",
                    ));
                }
                if let Some(stroke) = &s.stroke {
                    if !stroke.width.is_finite() || stroke.width <= 0.0 {
                        return Err(ProofreelError::validation(
                            "stroke width must be finite and > 0",
                        ));
                    }
                    if let Some(d) = stroke.dash
                        && (!d.is_finite() || d <= 0.0)
                    {
                        return Err(ProofreelError::validation(
                            "stroke dash length must be finite and > 0",
                        ));
                    }
                }
                Ok(())
            }
            Asset::Label(l) => {
                if l.text.is_empty() {
                    return Err(ProofreelError::validation("label text must be non-empty"));
                }
                if !l.size_px.is_finite() || l.size_px <= 0.0 {
                    return Err(ProofreelError::validation(
                        "label size_px must be finite and > 0",
                    ));
                }
                if l.font_source.trim().is_empty() {
                    return Err(ProofreelError::validation(
                        "label font_source must be non-empty",
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::Vec2, palette};

    fn basic_comp() -> Composition {
        let mut assets = BTreeMap::new();
        assets.insert(
            "sq".to_string(),
            Asset::Shape(ShapeAsset {
                svg_path_d: "M-50,-50 L50,-50 L50,50 L-50,50 Z".to_string(),
                fill: Some(palette::fill(palette::BLUE, 0.7)),
                stroke: Some(StrokeStyle {
                    width: 3.0,
                    color: palette::WHITE,
                    dash: None,
                }),
            }),
        );
        Composition {
            fps: Fps::new(30, 1).unwrap(),
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            duration: FrameIndex(60),
            background: palette::BACKGROUND,
            assets,
            tracks: vec![Track {
                name: "main".to_string(),
                z_base: 0,
                clips: vec![Clip {
                    id: "c0".to_string(),
                    asset: "sq".to_string(),
                    range: FrameRange::new(FrameIndex(0), FrameIndex(60)).unwrap(),
                    props: ClipProps {
                        transform: Anim::constant(Transform2D::at(Vec2::new(640.0, 360.0))),
                        opacity: Anim::constant(1.0),
                    },
                    z_offset: 0,
                }],
            }],
        }
    }

    #[test]
    fn json_roundtrip() {
        let comp = basic_comp();
        let s = serde_json::to_string_pretty(&comp).unwrap();
        let de: Composition = serde_json::from_str(&s).unwrap();
        assert_eq!(de.canvas.width, 1280);
        assert_eq!(de.assets.len(), 1);
        de.validate().unwrap();
    }

    #[test]
    fn validate_rejects_missing_asset() {
        let mut comp = basic_comp();
        comp.tracks[0].clips[0].asset = "missing".to_string();
        assert!(comp.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_bounds_range() {
        let mut comp = basic_comp();
        comp.tracks[0].clips[0].range = FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(999),
        };
        assert!(comp.validate().is_err());
    }

    #[test]
    fn validate_rejects_paintless_shape() {
        let mut comp = basic_comp();
        comp.assets.insert(
            "bare".to_string(),
            Asset::Shape(ShapeAsset {
                svg_path_d: "M0,0 L1,1".to_string(),
                fill: None,
                stroke: None,
            }),
        );
        assert!(comp.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_label() {
        let mut comp = basic_comp();
        comp.assets.insert(
            "l".to_string(),
            Asset::Label(LabelAsset {
                text: String::new(),
                font_source: "assets/fonts/DejaVuSans.ttf".to_string(),
                size_px: 32.0,
                color: palette::WHITE,
                max_width_px: None,
            }),
        );
        assert!(comp.validate().is_err());
    }
}
