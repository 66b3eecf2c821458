#![forbid(unsafe_code)]

pub mod anim;
pub mod anim_ease;
pub mod assets;
pub mod compile;
pub mod core;
pub mod encode_ffmpeg;
pub mod error;
pub mod eval;
pub mod fingerprint;
pub mod geometry;
pub mod model;
pub mod palette;
pub mod pipeline;
pub mod render_cpu;
pub mod scene;
pub mod scenes;
pub mod storyboard;

pub use anim::{Anim, InterpMode, Keyframe, Lerp, SampleCtx};
pub use anim_ease::Ease;
pub use assets::{AssetId, PreparedAsset, PreparedAssets};
pub use compile::{DrawOp, FramePlan, compile_frame};
pub use self::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Transform2D, Vec2,
};
pub use encode_ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
pub use error::{ProofreelError, ProofreelResult};
pub use eval::{EvaluatedGraph, EvaluatedNode, Evaluator};
pub use fingerprint::{FrameFingerprint, fingerprint_eval};
pub use geometry::Stage;
pub use model::{
    Asset, Clip, ClipProps, Composition, LabelAsset, ShapeAsset, StrokeStyle, Track,
};
pub use pipeline::{
    RenderStats, RenderToMp4Opts, render_frame, render_frames, render_to_mp4,
    render_to_mp4_with_stats,
};
pub use render_cpu::{CpuRenderer, FrameRgba};
pub use scene::{DEFAULT_FONT, SceneInfo, SceneOptions};
pub use storyboard::{Step, Storyboard};
