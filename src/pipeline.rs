use crate::{
    assets::PreparedAssets,
    compile::compile_frame,
    core::{FrameIndex, FrameRange},
    error::{ProofreelError, ProofreelResult},
    eval::Evaluator,
    fingerprint::{FrameFingerprint, fingerprint_eval},
    model::Composition,
    render_cpu::{CpuRenderer, FrameRgba},
};

/// Evaluate + compile + render a single frame.
///
/// Pipeline:
/// 1. [`Evaluator::eval_frame`]
/// 2. [`compile_frame`]
/// 3. [`CpuRenderer::render_plan`]
///
/// Returns premultiplied RGBA8 pixels.
pub fn render_frame(
    comp: &Composition,
    frame: FrameIndex,
    renderer: &mut CpuRenderer,
    assets: &PreparedAssets,
) -> ProofreelResult<FrameRgba> {
    let eval = Evaluator::eval_frame(comp, frame)?;
    let plan = compile_frame(comp, &eval, assets)?;
    renderer.render_plan(&plan, assets)
}

/// Render a range of frames (start inclusive, end exclusive), sequentially.
pub fn render_frames(
    comp: &Composition,
    range: FrameRange,
    renderer: &mut CpuRenderer,
    assets: &PreparedAssets,
) -> ProofreelResult<Vec<FrameRgba>> {
    if range.is_empty() {
        return Err(ProofreelError::validation("render range must be non-empty"));
    }
    let mut out = Vec::with_capacity(range.len_frames() as usize);
    for f in range.start.0..range.end.0 {
        out.push(render_frame(comp, FrameIndex(f), renderer, assets)?);
    }
    Ok(out)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
    pub frames_elided: u64,
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frame range to render (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Whether to overwrite the output file if it already exists.
    pub overwrite: bool,
    /// Reuse the previous frame's pixels when the evaluated graph is
    /// unchanged (the storyboards' fixed waits make this common).
    pub static_frame_elision: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            range: FrameRange {
                start: FrameIndex(0),
                end: FrameIndex(1),
            },
            overwrite: true,
            static_frame_elision: true,
        }
    }
}

/// Render a composition to an MP4 by invoking the system `ffmpeg` binary.
///
/// `ffmpeg` must be installed and on `PATH`; this is checked up front.
/// Requires integer FPS (`comp.fps.den == 1`). Frames are flattened over
/// the composition background.
pub fn render_to_mp4(
    comp: &Composition,
    out_path: impl Into<std::path::PathBuf>,
    opts: RenderToMp4Opts,
    renderer: &mut CpuRenderer,
    assets: &PreparedAssets,
) -> ProofreelResult<()> {
    let _ = render_to_mp4_with_stats(comp, out_path, opts, renderer, assets)?;
    Ok(())
}

pub fn render_to_mp4_with_stats(
    comp: &Composition,
    out_path: impl Into<std::path::PathBuf>,
    opts: RenderToMp4Opts,
    renderer: &mut CpuRenderer,
    assets: &PreparedAssets,
) -> ProofreelResult<RenderStats> {
    if opts.range.end.0 > comp.duration.0 {
        return Err(ProofreelError::validation(
            "render_to_mp4 range must be within composition duration",
        ));
    }
    if opts.range.is_empty() {
        return Err(ProofreelError::validation(
            "render_to_mp4 range must be non-empty",
        ));
    }

    let fps = if comp.fps.den == 1 {
        comp.fps.num
    } else {
        return Err(ProofreelError::validation(
            "render_to_mp4 currently requires integer fps (fps.den == 1)",
        ));
    };

    let cfg = crate::encode_ffmpeg::EncodeConfig {
        width: comp.canvas.width,
        height: comp.canvas.height,
        fps,
        out_path: out_path.into(),
        overwrite: opts.overwrite,
    };
    let mut enc = crate::encode_ffmpeg::FfmpegEncoder::new(cfg, comp.background)?;

    let mut stats = RenderStats::default();
    let mut last: Option<(FrameFingerprint, FrameRgba)> = None;

    for f in opts.range.start.0..opts.range.end.0 {
        let eval = Evaluator::eval_frame(comp, FrameIndex(f))?;
        let fingerprint = fingerprint_eval(&eval);

        let reusable = last
            .as_ref()
            .filter(|(prev, _)| opts.static_frame_elision && *prev == fingerprint);

        let frame = if let Some((_, prev_frame)) = reusable {
            stats.frames_elided += 1;
            prev_frame.clone()
        } else {
            let plan = compile_frame(comp, &eval, assets)?;
            let frame = renderer.render_plan(&plan, assets)?;
            stats.frames_rendered += 1;
            frame
        };

        enc.encode_frame(&frame)?;
        stats.frames_total += 1;
        last = Some((fingerprint, frame));
    }

    tracing::debug!(
        total = stats.frames_total,
        rendered = stats.frames_rendered,
        elided = stats.frames_elided,
        "encoded frame range"
    );

    enc.finish()?;
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_opts_elide_static_frames() {
        let opts = RenderToMp4Opts::default();
        assert!(opts.static_frame_elision);
        assert!(opts.overwrite);
        assert_eq!(opts.range.len_frames(), 1);
    }
}
